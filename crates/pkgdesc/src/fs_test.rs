// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;

#[rstest]
fn test_local_stat_kinds() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("file");
    std::fs::write(&file, "data").unwrap();

    let fs = LocalFilesystem;
    assert_eq!(fs.stat(&file).unwrap(), Some(FileKind::Regular));
    assert_eq!(fs.stat(tmp.path()).unwrap(), Some(FileKind::Directory));
    assert_eq!(fs.stat(&tmp.path().join("missing")).unwrap(), None);
}

#[cfg(unix)]
#[rstest]
fn test_local_chmod() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("tool");
    std::fs::write(&file, "#!/bin/sh\n").unwrap();

    LocalFilesystem.chmod(&file, 0o755).unwrap();
    let mode = std::fs::metadata(&file).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[rstest]
fn test_local_create_writes() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("out.txt");
    {
        let mut sink = LocalFilesystem.create(&path).unwrap();
        sink.write_all(b"hello").unwrap();
        sink.flush().unwrap();
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
}

#[rstest]
fn test_local_create_in_missing_dir() {
    let tmp = TempDir::new().unwrap();
    let result = LocalFilesystem.create(&tmp.path().join("nope").join("out"));
    assert!(matches!(result, Err(Error::CreateFailed { .. })));
}

#[rstest]
fn test_memory_fs_tracks_state() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/src/bin", 0o600, b"elf");
    fs.add_dir("/src");
    fs.add_special("/src/sock");

    assert_eq!(fs.stat(Path::new("/src/bin")).unwrap(), Some(FileKind::Regular));
    assert_eq!(fs.stat(Path::new("/src")).unwrap(), Some(FileKind::Directory));
    assert_eq!(fs.stat(Path::new("/src/sock")).unwrap(), Some(FileKind::Other));
    assert_eq!(fs.stat(Path::new("/missing")).unwrap(), None);

    fs.chmod(Path::new("/src/bin"), 0o755).unwrap();
    assert_eq!(fs.mode(Path::new("/src/bin")), Some(0o755));
    assert_eq!(fs.access_count(), 5);
}

#[rstest]
fn test_memory_fs_chmod_missing() {
    let fs = MemoryFilesystem::new();
    let result = fs.chmod(Path::new("/missing"), 0o644);
    assert!(matches!(result, Err(Error::ChmodFailed { mode: 0o644, .. })));
}

#[rstest]
fn test_memory_fs_create() {
    let fs = MemoryFilesystem::new();
    {
        let mut sink = fs.create(Path::new("/out/pkg.deb")).unwrap();
        sink.write_all(b"abc").unwrap();
        sink.write_all(b"def").unwrap();
    }
    assert_eq!(fs.contents(Path::new("/out/pkg.deb")), Some(b"abcdef".to_vec()));
}
