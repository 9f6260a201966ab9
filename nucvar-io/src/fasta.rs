//! Aligned (multiple-alignment) FASTA input.
//!
//! One record is the gapped reference, every other record is a query
//! aligned to it. Headers look like `>name key=value ...`; the only key read
//! here is `score`, the aligner score for that query.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use anyhow::Context;
use log::{debug, info};
use nucvar_core::utils::get_dynamic_reader_w_stdin;
use nucvar_core::{Alphabet, Nuc, Seq};
use nucvar_extract::{Alignment, check_ungapped};

use crate::error::{ReadError, Result};

/// Header attribute holding the alignment score.
pub const SCORE_ATTRIBUTE: &str = "score";

/// One FASTA record, sequence validated against the alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord<A: Alphabet = Nuc> {
    pub name: String,
    /// `key=value` tokens that followed the name on the header line.
    pub attributes: BTreeMap<String, String>,
    pub seq: Seq<A>,
}

impl<A: Alphabet> FastaRecord<A> {
    /// Alignment score from the `score=` attribute, `0` if absent.
    pub fn score(&self) -> Result<i32> {
        match self.attributes.get(SCORE_ATTRIBUTE) {
            None => Ok(0),
            Some(value) => value.parse().map_err(|_| ReadError::InvalidScore {
                name: self.name.clone(),
                value: value.clone(),
            }),
        }
    }
}

/// Split a header line (without `>`) into the record name and its attributes.
fn parse_header(header: &str) -> (String, BTreeMap<String, String>) {
    let mut tokens = header.split_whitespace();
    let name = tokens.next().unwrap_or_default().to_string();
    let attributes = tokens
        .filter_map(|token| token.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    (name, attributes)
}

fn finish_record<A: Alphabet>(
    header: (String, BTreeMap<String, String>),
    symbols: Vec<u8>,
) -> Result<FastaRecord<A>> {
    let (name, attributes) = header;
    let seq = Seq::new(symbols).map_err(|source| ReadError::InvalidSequence {
        name: name.clone(),
        source,
    })?;
    Ok(FastaRecord {
        name,
        attributes,
        seq,
    })
}

///
/// Read every record from a FASTA stream.
///
/// Sequence lines may be wrapped; whitespace inside them is dropped. Blank
/// lines and `;` comment lines are skipped.
///
pub fn read_fasta<A: Alphabet, R: BufRead>(reader: R) -> Result<Vec<FastaRecord<A>>> {
    let mut records = Vec::new();
    let mut header: Option<(String, BTreeMap<String, String>)> = None;
    let mut symbols: Vec<u8> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = idx + 1;

        if let Some(rest) = line.strip_prefix('>') {
            if let Some(previous) = header.take() {
                records.push(finish_record(previous, std::mem::take(&mut symbols))?);
            }
            let (name, attributes) = parse_header(rest);
            if name.is_empty() {
                return Err(ReadError::EmptyName(line_number));
            }
            header = Some((name, attributes));
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }
        if header.is_none() {
            return Err(ReadError::MissingHeader(line_number));
        }
        symbols.extend(trimmed.bytes().filter(|b| !b.is_ascii_whitespace()));
    }

    if let Some(last) = header {
        records.push(finish_record(last, symbols)?);
    }

    Ok(records)
}

///
/// Queries from an aligned FASTA paired with its reference.
///
/// `names[i]` is the record name of `alignments[i]`, kept apart so the
/// alignments can be handed to batch extraction as a slice.
///
#[derive(Debug, Clone)]
pub struct AlignmentBatch<A: Alphabet = Nuc> {
    pub reference: FastaRecord<A>,
    pub names: Vec<String>,
    pub alignments: Vec<Alignment<A>>,
}

impl<A: Alphabet> AlignmentBatch<A> {
    ///
    /// Pair every query with the reference record.
    ///
    /// The reference is the record named `reference_name`, or the first
    /// record when no name is given. Columns where both the query and the
    /// reference are gaps are dropped from each pair, so a multiple
    /// alignment reads the same as its pairwise projections.
    ///
    pub fn from_records(
        mut records: Vec<FastaRecord<A>>,
        reference_name: Option<&str>,
    ) -> Result<Self> {
        if records.is_empty() {
            return Err(ReadError::NoRecords);
        }

        let ref_idx = match reference_name {
            None => 0,
            Some(wanted) => records
                .iter()
                .position(|r| r.name == wanted)
                .ok_or_else(|| ReadError::ReferenceNotFound(wanted.to_string()))?,
        };
        let reference = records.remove(ref_idx);

        let mut names = Vec::with_capacity(records.len());
        let mut alignments = Vec::with_capacity(records.len());
        for record in records {
            let score = record.score()?;
            let alignment = Alignment::new(record.seq, reference.seq.clone(), score)
                .and_then(Alignment::without_shared_gaps)
                .map_err(|source| ReadError::InvalidAlignment {
                    name: record.name.clone(),
                    source,
                })?;
            names.push(record.name);
            alignments.push(alignment);
        }

        debug!(
            "Paired {} queries with reference '{}'",
            alignments.len(),
            reference.name
        );

        Ok(AlignmentBatch {
            reference,
            names,
            alignments,
        })
    }

    /// The reference with its gaps removed.
    pub fn ungapped_reference(&self) -> Seq<A> {
        self.reference.seq.ungapped()
    }

    ///
    /// Check a separately supplied ungapped reference against the gapped
    /// reference record.
    ///
    pub fn check_reference(&self, ungapped: &Seq<A>) -> Result<()> {
        check_ungapped(&self.reference.seq, ungapped).map_err(|source| {
            ReadError::InvalidAlignment {
                name: self.reference.name.clone(),
                source,
            }
        })
    }

    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }
}

///
/// Read an aligned FASTA file (plain, `.gz`, or `-` for stdin) into an
/// [`AlignmentBatch`].
///
pub fn read_alignment_file<A: Alphabet>(
    path: &str,
    reference_name: Option<&str>,
) -> anyhow::Result<AlignmentBatch<A>> {
    let reader = get_dynamic_reader_w_stdin(path)?;
    let records = read_fasta(reader).with_context(|| format!("Failed to parse FASTA: {}", path))?;
    let batch = AlignmentBatch::from_records(records, reference_name)
        .with_context(|| format!("Failed to pair alignments in: {}", path))?;

    info!(
        "Loaded {} aligned sequences against reference '{}' from {}",
        batch.len(),
        batch.reference.name,
        path
    );

    Ok(batch)
}

///
/// Read an ungapped reference FASTA and return its first record.
///
pub fn read_reference_file<A: Alphabet>(path: &Path) -> anyhow::Result<FastaRecord<A>> {
    let reader = nucvar_core::utils::get_dynamic_reader(path)?;
    let records = read_fasta(reader)
        .with_context(|| format!("Failed to parse reference FASTA: {:?}", path))?;
    records
        .into_iter()
        .next()
        .ok_or(ReadError::NoRecords)
        .with_context(|| format!("Reference FASTA is empty: {:?}", path))
}
