// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use rstest::rstest;

use super::*;
use crate::fs::MemoryFilesystem;

fn entry(file: &str, mode: Option<&str>, owner: Option<&str>) -> FileEntry {
    FileEntry {
        file: PathBuf::from(file),
        mode: mode.map(String::from),
        owner: owner.map(String::from),
        keep: false,
    }
}

#[rstest]
fn test_defaults_applied_when_unset() {
    let filled = entry("bin0", None, None).with_defaults();
    assert_eq!(filled.mode.as_deref(), Some("0644"));
    assert_eq!(filled.owner.as_deref(), Some("root"));
}

#[rstest]
fn test_explicit_values_kept() {
    let filled = entry("bin1", Some("0755"), Some("toor")).with_defaults();
    assert_eq!(filled.mode.as_deref(), Some("0755"));
    assert_eq!(filled.owner.as_deref(), Some("toor"));
}

#[rstest]
fn test_defaults_are_idempotent() {
    let once = entry("bin0", None, Some("svc")).with_defaults();
    let twice = once.with_defaults();
    assert_eq!(once, twice);
}

#[rstest]
#[case("0644", 0o644)]
#[case("644", 0o644)]
#[case("0755", 0o755)]
#[case("0", 0)]
#[case("0777", 0o777)]
#[case("000000644", 0o644)]
fn test_parse_mode_valid(#[case] mode: &str, #[case] expected: u32) {
    assert_eq!(parse_mode(mode), Some(expected));
}

#[rstest]
#[case("999")]
#[case("")]
#[case("rwxr-xr-x")]
#[case("1000")]
#[case("4755")]
#[case("-644")]
#[case("0x1ff")]
#[case("0o600")]
#[case(" 0644 ")]
#[case("+644")]
#[case("0644\n")]
fn test_parse_mode_invalid(#[case] mode: &str) {
    assert_eq!(parse_mode(mode), None);
}

#[rstest]
fn test_resolve_reports_invalid_mode() {
    let err = entry("bin0", Some("999"), None).resolve().unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidFileMode { ref path, ref mode }
            if path == &PathBuf::from("bin0") && mode == "999"
    ));
}

#[rstest]
fn test_invalid_mode_fails_before_filesystem_access() {
    let fs = MemoryFilesystem::new();
    fs.add_file("bin0", 0o644, b"");

    let err = entry("bin0", Some("999"), None).validate(&fs).unwrap_err();
    assert!(matches!(err, Error::InvalidFileMode { .. }));
    assert_eq!(fs.access_count(), 0);
}

#[rstest]
fn test_validate_regular_file() {
    let fs = MemoryFilesystem::new();
    fs.add_file("bin0", 0o600, b"");

    let resolved = entry("bin0", Some("0755"), None).validate(&fs).unwrap();
    assert_eq!(resolved.bits, 0o755);
    assert_eq!(resolved.owner, "root");
    // validation never changes the file
    assert_eq!(fs.mode(&PathBuf::from("bin0")), Some(0o600));
}

#[rstest]
fn test_validate_missing_file() {
    let fs = MemoryFilesystem::new();
    let err = entry("missing", None, None).validate(&fs).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(ref p) if p == &PathBuf::from("missing")));
}

#[rstest]
fn test_validate_directory() {
    let fs = MemoryFilesystem::new();
    fs.add_dir("etc");
    let err = entry("etc", None, None).validate(&fs).unwrap_err();
    assert!(matches!(err, Error::NotARegularFile(_)));
}

#[rstest]
fn test_resolved_mode_matches_bits() {
    let resolved = entry("bin0", Some("0750"), None).resolve().unwrap();
    assert_eq!(resolved.mode, "0750");
    assert_eq!(format!("{:04o}", resolved.bits), resolved.mode);

    let err = entry("bin0", Some(" 0644 "), None).resolve().unwrap_err();
    assert!(matches!(err, Error::InvalidFileMode { ref mode, .. } if mode == " 0644 "));
}
