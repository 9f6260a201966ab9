use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

/// True when the path ends in `.gz`.
pub fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

///
/// Get a reader for either a gzipped or a plain text file.
///
/// # Arguments
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Same as [`get_dynamic_reader`], but `-` reads from stdin.
///
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(Path::new(file_path_str))
    }
}

///
/// Output file opened by [`get_dynamic_writer`].
///
/// Call [`DynamicWriter::finish`] once everything is written: it writes the
/// gzip trailer and flushes, reporting any error that dropping the writer
/// would swallow.
///
pub enum DynamicWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl DynamicWriter {
    pub fn finish(self) -> std::io::Result<()> {
        match self {
            DynamicWriter::Plain(mut writer) => writer.flush(),
            DynamicWriter::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for DynamicWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            DynamicWriter::Plain(writer) => writer.write(buf),
            DynamicWriter::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            DynamicWriter::Plain(writer) => writer.flush(),
            DynamicWriter::Gzip(encoder) => encoder.flush(),
        }
    }
}

///
/// Get a writer for a file, gzip-compressing when the path ends in `.gz`.
/// Parent directories are created as needed.
///
pub fn get_dynamic_writer(path: &Path) -> Result<DynamicWriter> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directories for: {:?}", path))?;
        }
    }

    let file = File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    let writer = match is_gzipped(path) {
        true => DynamicWriter::Gzip(GzEncoder::new(BufWriter::new(file), Compression::default())),
        false => DynamicWriter::Plain(BufWriter::new(file)),
    };

    Ok(writer)
}

///
/// Strip every extension from a file name: `sample.aligned.fasta.gz` -> `sample`.
///
pub fn remove_all_extensions(path: &Path) -> String {
    let file_name = path.file_name().and_then(OsStr::to_str).unwrap_or_default();
    match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name.to_string(),
    }
}
