use decapta_fs::{Error, NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_replaces_previous_export() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("people.csv");
    let path = NormalizedPath::new(&target);

    io::write_atomic(&path, b"name\nAlice\n").unwrap();
    io::write_atomic(&path, b"name\nBob\n").unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "name\nBob\n");
}

#[test]
fn test_write_text_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("content").join("people").join("1.yaml"));

    io::write_text(&path, "name: Alice\n").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "name: Alice\n");
}

#[test]
fn test_write_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("target.txt"));

    io::write_text(&path, "content").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "found temp files: {:?}", leftovers);
}

#[test]
fn test_read_text_nonexistent_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.csv");
    let path = NormalizedPath::new(&missing);

    let err = io::read_text(&path).unwrap_err();
    assert!(matches!(&err, Error::Io { path, .. } if path == &missing));
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn test_failed_write_removes_temp_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("people");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("1.yaml"), "name: Alice\n").unwrap();

    let err = io::write_text(&NormalizedPath::new(&target), "name\nAlice\n").unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "found temp files: {:?}", leftovers);
    assert!(target.join("1.yaml").is_file());
}

#[test]
fn test_read_bytes_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("blob.bin"));

    io::write_atomic(&path, &[0, 159, 146, 150]).unwrap();

    assert_eq!(io::read_bytes(&path).unwrap(), vec![0, 159, 146, 150]);
}
