// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;
use crate::descriptor::{PackageIdent, assemble};
use crate::predicate::ExprEngine;
use crate::spec::PackageSpec;
use crate::{Arch, Format};

#[rstest]
fn test_manifest_packager_writes_yaml() {
    let spec = PackageSpec::from_yaml(
        r#"
meta:
  description: demo
units:
  - demo.service
"#,
    )
    .unwrap();
    let ident = PackageIdent {
        name: "demo".to_string(),
        version: semver::Version::new(0, 3, 1),
        arch: Arch::Aarch64,
    };
    let desc = assemble(&spec, &ident, Format::Rpm, &ExprEngine).unwrap();

    let mut out = Vec::new();
    ManifestPackager.encode(&desc, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    assert_eq!(value["format"].as_str(), Some("rpm"));
    assert_eq!(value["arch"].as_str(), Some("aarch64"));
    assert_eq!(value["filename"].as_str(), Some("demo-0.3.1-1.aarch64.rpm"));
    assert_eq!(value["meta"]["description"].as_str(), Some("demo"));
    assert_eq!(value["units"][0].as_str(), Some("demo.service"));
}

#[rstest]
fn test_manifest_artifact_name() {
    let spec = PackageSpec::default();
    let ident = PackageIdent {
        name: "demo".to_string(),
        version: semver::Version::new(1, 0, 0),
        arch: Arch::X86_64,
    };
    let desc = assemble(&spec, &ident, Format::Deb, &ExprEngine).unwrap();
    assert_eq!(
        ManifestPackager.artifact_name(&desc),
        "demo_1.0.0-1_amd64.deb.yaml"
    );
}
