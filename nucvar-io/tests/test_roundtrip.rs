//! File-level tests: aligned FASTA on disk in, report files out.

use std::io::{Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use nucvar_core::utils::get_dynamic_writer;
use nucvar_core::{Nuc, NucSeq};
use nucvar_extract::{ExtractParams, extract_batch};
use nucvar_io::{ReportFormat, read_alignment_file, read_reference_file, write_reports};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::tempdir;

const ALIGNED: &str = "\
>MN908947 reference
ACG--TACGTAC
>sample1 score=40
NCGTTT--GTGC
>sample2 score=38
ACGTTTACGAAC
";

fn write_plain(path: &Path, content: &str) {
    std::fs::write(path, content).expect("write fixture");
}

fn write_gz(path: &Path, content: &str) {
    let file = std::fs::File::create(path).expect("create fixture");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(content.as_bytes()).expect("write fixture");
    encoder.finish().expect("finish gzip");
}

#[rstest]
#[case("aligned.fasta")]
#[case("aligned.fasta.gz")]
fn test_read_alignment_file(#[case] file_name: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(file_name);
    if file_name.ends_with(".gz") {
        write_gz(&path, ALIGNED);
    } else {
        write_plain(&path, ALIGNED);
    }

    let batch = read_alignment_file::<Nuc>(path.to_str().unwrap(), None).unwrap();
    assert_eq!(batch.reference.name, "MN908947");
    assert_eq!(batch.names, vec!["sample1".to_string(), "sample2".to_string()]);
    assert_eq!(batch.alignments[1].score(), 38);
}

#[rstest]
fn test_reference_file_must_match() {
    let dir = tempdir().unwrap();
    let aligned = dir.path().join("aligned.fasta");
    write_plain(&aligned, ALIGNED);
    let batch = read_alignment_file::<Nuc>(aligned.to_str().unwrap(), None).unwrap();

    let good = dir.path().join("ref.fasta");
    write_plain(&good, ">MN908947\nACGTA\nCGTAC\n");
    let reference = read_reference_file::<Nuc>(&good).unwrap();
    assert!(batch.check_reference(&reference.seq).is_ok());

    let bad = dir.path().join("bad.fasta");
    write_plain(&bad, ">MN908947\nACGTACGTAA\n");
    let reference = read_reference_file::<Nuc>(&bad).unwrap();
    assert!(batch.check_reference(&reference.seq).is_err());
}

#[rstest]
fn test_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.fasta");
    assert!(read_alignment_file::<Nuc>(path.to_str().unwrap(), None).is_err());
}

#[rstest]
fn test_extract_and_write_gzipped_tsv() {
    let dir = tempdir().unwrap();
    let aligned = dir.path().join("aligned.fasta");
    write_plain(&aligned, ALIGNED);

    let batch = read_alignment_file::<Nuc>(aligned.to_str().unwrap(), None).unwrap();
    let reports = extract_batch(&batch.alignments, &ExtractParams::default());
    let reference: NucSeq = batch.ungapped_reference();

    let out_path = dir.path().join("out/reports.tsv.gz");
    let format = ReportFormat::from_path(&out_path).unwrap();
    let mut writer = get_dynamic_writer(&out_path).unwrap();
    write_reports(&mut writer, format, &batch.names, &reports, &reference).unwrap();
    writer.finish().unwrap();

    let mut text = String::new();
    MultiGzDecoder::new(std::fs::File::open(&out_path).unwrap())
        .read_to_string(&mut text)
        .unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "sample1\t1\t10\t40\t1\t2\t2\t1\tA9G\t5-6\t3:TT\tN:1");
    assert_eq!(lines[2], "sample2\t1\t10\t38\t1\t0\t2\t0\tT8A\t\t3:TT\t");
}
