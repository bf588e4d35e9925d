use std::fs;
use std::path::Path;

use bodymap::{canonicalize_or_current, resolve_under, sha256_bytes, write_atomic};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_resolves_existing_path() {
    let tmp = tempdir().expect("tempdir");
    let nested = tmp.path().join("nested");
    fs::create_dir_all(&nested).expect("create nested");

    let result = canonicalize_or_current(&nested.to_string_lossy()).expect("canonicalize");
    assert_eq!(result, nested.canonicalize().expect("canonicalize nested"));
}

#[test]
fn canonicalize_or_current_keeps_missing_paths_absolute() {
    let result = canonicalize_or_current("does-not-exist-yet").expect("canonicalize");
    assert!(result.is_absolute());
    assert!(result.ends_with("does-not-exist-yet"));
}

#[test]
fn resolve_under_respects_absolute_paths() {
    let tmp = tempdir().expect("tempdir");
    let absolute = tmp.path().join("abs.ts");
    assert_eq!(resolve_under(Path::new("/root"), &absolute.to_string_lossy()), absolute);
    assert_eq!(resolve_under(Path::new("/root"), "rel/a.ts"), Path::new("/root/rel/a.ts"));
}

#[test]
fn sha256_bytes_matches_known_hash() {
    let hash = sha256_bytes(b"abc");
    assert_eq!(hash, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn write_atomic_creates_parent_dirs_and_replaces_content() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("src/components/player/BodyMapPaths.ts");
    write_atomic(&path, b"first").expect("first write");
    write_atomic(&path, b"second").expect("second write");
    assert_eq!(fs::read_to_string(&path).expect("read"), "second");

    let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
    assert_eq!(leftovers.len(), 1, "temp files should not be left behind");
}
