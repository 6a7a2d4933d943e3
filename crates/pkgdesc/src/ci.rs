// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Machine-readable output for CI systems.

use std::path::Path;

/// Environment variable set by GitHub Actions runners.
pub const CI_ENV_VAR: &str = "GITHUB_ACTIONS";

/// Marker that precedes each artifact path in CI output.
pub const OUTPUT_MARKER: &str = "::set-output name=package::";

/// Whether the process runs inside CI.
pub fn running_in_ci() -> bool {
    std::env::var_os(CI_ENV_VAR).is_some_and(|v| !v.is_empty())
}

/// The line announcing `path` to the CI log scraper.
pub fn output_line(path: &Path) -> String {
    format!("{OUTPUT_MARKER}{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_line() {
        assert_eq!(
            output_line(Path::new("out/test_1.0.0-1_amd64.deb")),
            "::set-output name=package::out/test_1.0.0-1_amd64.deb"
        );
    }
}
