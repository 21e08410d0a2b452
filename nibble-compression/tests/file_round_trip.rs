use std::fs;

use nibble_compression::{
    cli::{run, Args, Direction},
    CompressionError,
};
use rstest::rstest;
use tempfile::TempDir;

fn args(input: impl Into<std::path::PathBuf>, output: impl Into<std::path::PathBuf>) -> Args {
    Args {
        input: input.into(),
        output: output.into(),
    }
}

#[test]
fn test_compress_then_decompress_sample_file() {
    let dir = TempDir::new().unwrap();
    let compressed = dir.path().join("sample.nib");
    let restored = dir.path().join("sample.out");

    let summary = run(
        Direction::Compress,
        &args("./tests/sample.txt", &compressed),
    )
    .unwrap();
    let original = include_bytes!("sample.txt");
    assert_eq!(summary.bytes_in, original.len() as u64);
    assert_eq!(summary.bytes_out, fs::metadata(&compressed).unwrap().len());
    assert!(summary.bytes_out < summary.bytes_in);

    run(Direction::Decompress, &args(&compressed, &restored)).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), original);
}

#[test]
fn test_eat_file_layout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("eat.txt");
    let compressed = dir.path().join("eat.nib");
    let restored = dir.path().join("eat.out");
    fs::write(&input, "eat").unwrap();

    run(Direction::Compress, &args(&input, &compressed)).unwrap();
    assert_eq!(fs::read(&compressed).unwrap(), vec![0x27, 0x30]);

    let summary = run(Direction::Decompress, &args(&compressed, &restored)).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), b"eat");
    assert!(summary.trailing_padding);
}

#[test]
fn test_empty_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.txt");
    let compressed = dir.path().join("empty.nib");
    let restored = dir.path().join("empty.out");
    fs::write(&input, "").unwrap();

    run(Direction::Compress, &args(&input, &compressed)).unwrap();
    assert!(fs::read(&compressed).unwrap().is_empty());

    run(Direction::Decompress, &args(&compressed, &restored)).unwrap();
    assert!(fs::read(&restored).unwrap().is_empty());
}

#[rstest]
#[case(Direction::Compress)]
#[case(Direction::Decompress)]
fn test_missing_input_is_an_open_failure(#[case] direction: Direction) {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("never-written");

    let err = run(direction, &args(dir.path().join("missing"), &output)).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CompressionError>(),
        Some(CompressionError::OpenFailure { .. })
    ));
    assert!(!output.exists());
}

#[rstest]
#[case(Direction::Compress)]
#[case(Direction::Decompress)]
fn test_unwritable_output_is_an_open_failure(#[case] direction: Direction) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    fs::write(&input, "data").unwrap();

    let err = run(
        direction,
        &args(&input, dir.path().join("no-such-dir").join("output")),
    )
    .unwrap_err();

    match err.downcast_ref::<CompressionError>() {
        Some(CompressionError::OpenFailure { path, .. }) => assert!(path.ends_with("output")),
        other => panic!("expected an open failure, got {other:?}"),
    }
}
