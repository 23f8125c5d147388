use fastq_header_cleaner::{CleanError, CleanOptions, SpacePolicy, clean_file};
use flate2::read::MultiGzDecoder;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::tempdir;

const INPUT: &str = "read one two\nACGT\n+\n!!!!\nread three\nTTTT\n+\n####\n";
const CLEANED: &str = "read_one_two\nACGT\n+\n!!!!\nread_three\nTTTT\n+\n####\n";

fn gunzip(path: &Path) -> String {
    let mut s = String::new();
    MultiGzDecoder::new(File::open(path).unwrap())
        .read_to_string(&mut s)
        .unwrap();
    s
}

fn write_gz(path: &Path, members: &[&str]) {
    let mut f = File::create(path).unwrap();
    for m in members {
        let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::fast());
        enc.write_all(m.as_bytes()).unwrap();
        f.write_all(&enc.finish().unwrap()).unwrap();
    }
}

#[test]
fn plain_input_to_derived_gz_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sample.fastq");
    fs::write(&input, INPUT).unwrap();

    let report = clean_file(&input, None, &CleanOptions::default()).unwrap();
    assert_eq!(report.output, dir.path().join("sample.cleaned.fastq.gz"));
    assert!(!report.input_gzip);
    assert_eq!(report.stats.lines, 8);
    assert_eq!(report.stats.headers, 2);
    assert_eq!(gunzip(&report.output), CLEANED);
}

#[test]
fn gz_input_with_several_members() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sample.fastq.gz");
    let (a, b) = INPUT.split_at(INPUT.find("read three").unwrap());
    write_gz(&input, &[a, b]);

    let report = clean_file(&input, None, &CleanOptions::default()).unwrap();
    assert!(report.input_gzip);
    assert_eq!(report.output, dir.path().join("sample.cleaned.fastq.gz"));
    assert_eq!(gunzip(&report.output), CLEANED);
}

#[test]
fn gzip_detected_by_magic_bytes() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("reads.fastq");
    write_gz(&input, &[INPUT]);

    let report = clean_file(&input, None, &CleanOptions::default()).unwrap();
    assert!(report.input_gzip);
    assert_eq!(gunzip(&report.output), CLEANED);
}

#[test]
fn explicit_output_and_delete_policy() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fastq");
    fs::write(&input, INPUT).unwrap();
    let out = dir.path().join("out.fastq");

    let opts = CleanOptions {
        space_policy: SpacePolicy::Delete,
        level: 9,
        ..Default::default()
    };
    let report = clean_file(&input, Some(&out), &opts).unwrap();
    assert_eq!(report.output, dir.path().join("out.fastq.gz"));
    assert_eq!(
        gunzip(&report.output),
        "readonetwo\nACGT\n+\n!!!!\nreadthree\nTTTT\n+\n####\n"
    );
}

#[test]
fn cleaning_the_output_again_is_a_no_op() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sample.fastq");
    fs::write(&input, INPUT).unwrap();

    let first = clean_file(&input, None, &CleanOptions::default()).unwrap();
    let again = dir.path().join("again.fastq.gz");
    let second = clean_file(&first.output, Some(&again), &CleanOptions::default()).unwrap();
    assert_eq!(gunzip(&second.output), gunzip(&first.output));
}

#[test]
fn empty_input_gives_valid_empty_gzip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.fastq");
    fs::write(&input, "").unwrap();

    let report = clean_file(&input, None, &CleanOptions::default()).unwrap();
    assert_eq!(report.stats.lines, 0);
    assert_eq!(gunzip(&report.output), "");
}

#[test]
fn missing_input_is_an_open_error_and_creates_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("nope.fastq");

    let err = clean_file(&input, None, &CleanOptions::default()).unwrap_err();
    assert!(matches!(err, CleanError::Open { .. }), "{err}");
    assert!(!dir.path().join("nope.cleaned.fastq.gz").exists());
}

#[test]
fn output_in_missing_directory_is_a_create_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fastq");
    fs::write(&input, INPUT).unwrap();
    let out = dir.path().join("no/such/dir/out.fastq.gz");

    let err = clean_file(&input, Some(&out), &CleanOptions::default()).unwrap_err();
    assert!(matches!(err, CleanError::Create { .. }), "{err}");
}

#[test]
fn refuses_to_overwrite_the_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fastq.gz");
    write_gz(&input, &[INPUT]);

    let err = clean_file(&input, Some(&input), &CleanOptions::default()).unwrap_err();
    assert!(matches!(err, CleanError::SameFile { .. }), "{err}");
    // untouched
    assert_eq!(gunzip(&input), INPUT);
}

#[test]
fn truncated_gzip_input_is_an_io_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.fastq.gz");
    write_gz(&input, &[INPUT]);
    let bytes = fs::read(&input).unwrap();
    fs::write(&input, &bytes[..bytes.len() / 2]).unwrap();

    let err = clean_file(&input, None, &CleanOptions::default()).unwrap_err();
    assert!(matches!(err, CleanError::Io { .. }), "{err}");
    // partial output is left behind
    assert!(dir.path().join("broken.cleaned.fastq.gz").exists());
}
