use fastq_header_cleaner::derive_output_path;
use std::path::{Path, PathBuf};

fn derive(input: &str, output: Option<&str>) -> PathBuf {
    derive_output_path(Path::new(input), output.map(Path::new))
}

#[test]
fn plain_fastq_gets_cleaned_marker_and_gz() {
    assert_eq!(derive("sample.fastq", None), PathBuf::from("sample.cleaned.fastq.gz"));
}

#[test]
fn gz_input_derives_the_same_name() {
    assert_eq!(derive("sample.fastq.gz", None), PathBuf::from("sample.cleaned.fastq.gz"));
}

#[test]
fn directory_is_kept() {
    assert_eq!(
        derive("/data/run1/sample.fastq", None),
        PathBuf::from("/data/run1/sample.cleaned.fastq.gz")
    );
}

#[test]
fn fq_suffix_is_recognised() {
    assert_eq!(derive("reads.fq.gz", None), PathBuf::from("reads.cleaned.fq.gz"));
}

#[test]
fn unknown_suffix_never_maps_onto_the_input() {
    assert_eq!(derive("reads.txt", None), PathBuf::from("reads.txt.cleaned.gz"));
    assert_eq!(derive("reads.gz", None), PathBuf::from("reads.cleaned.gz"));
}

#[test]
fn explicit_output_gets_gz_appended() {
    assert_eq!(derive("in.fastq", Some("out.fastq")), PathBuf::from("out.fastq.gz"));
    assert_eq!(derive("in.fastq", Some("out.fastq.gz")), PathBuf::from("out.fastq.gz"));
}
