//! Writing analysis reports as JSON or TSV.

use std::fmt::{self, Display};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Result, bail};
use nucvar_core::{Alphabet, Seq};
use nucvar_extract::AnalysisReport;
use serde::{Deserialize, Serialize};

/// TSV column names, in order.
pub const TSV_HEADER: [&str; 12] = [
    "seqName",
    "alignmentStart",
    "alignmentEnd",
    "alignmentScore",
    "totalSubstitutions",
    "totalDeletions",
    "totalInsertions",
    "totalMissing",
    "substitutions",
    "deletions",
    "insertions",
    "missing",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Tsv,
}

impl ReportFormat {
    ///
    /// Guess the format from a file name, looking through a trailing `.gz`.
    ///
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        let (_, ext) = name.rsplit_once('.')?;
        ext.parse().ok()
    }
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Tsv => write!(f, "tsv"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "tsv" => Ok(ReportFormat::Tsv),
            other => bail!("Unknown report format '{}'. Expected 'json' or 'tsv'", other),
        }
    }
}

/// A report paired with the name of the query it came from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase", bound = "")]
struct NamedReport<'a, A: Alphabet> {
    seq_name: &'a str,
    report: &'a AnalysisReport<A>,
}

///
/// Write reports as a JSON array of `{ "seqName": ..., "report": ... }`.
///
pub fn write_json<A: Alphabet, W: Write>(
    mut writer: W,
    names: &[String],
    reports: &[AnalysisReport<A>],
) -> Result<()> {
    let named: Vec<NamedReport<A>> = names
        .iter()
        .zip(reports)
        .map(|(name, report)| NamedReport {
            seq_name: name,
            report,
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &named)?;
    writeln!(writer)?;
    Ok(())
}

fn join<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

///
/// One TSV line (no trailing newline) for a report.
///
/// `reference` is the ungapped reference, needed to spell substitutions as
/// `A4G`. An unaligned query gets empty start and end fields.
///
pub fn tsv_row<A: Alphabet>(name: &str, report: &AnalysisReport<A>, reference: &Seq<A>) -> String {
    let (start, end) = match report.alignment_range {
        Some(range) => ((range.start + 1).to_string(), (range.end + 1).to_string()),
        None => (String::new(), String::new()),
    };

    [
        name.to_string(),
        start,
        end,
        report.alignment_score.to_string(),
        report.total_substitutions().to_string(),
        report.total_deletions().to_string(),
        report.total_insertions().to_string(),
        report.total_missing().to_string(),
        join(report.substitutions(reference)),
        join(report.deletions.values()),
        join(report.insertions.values()),
        join(&report.missing),
    ]
    .join("\t")
}

/// Write reports as TSV with a header line.
pub fn write_tsv<A: Alphabet, W: Write>(
    mut writer: W,
    names: &[String],
    reports: &[AnalysisReport<A>],
    reference: &Seq<A>,
) -> Result<()> {
    writeln!(writer, "{}", TSV_HEADER.join("\t"))?;
    for (name, report) in names.iter().zip(reports) {
        writeln!(writer, "{}", tsv_row(name, report, reference))?;
    }
    Ok(())
}

/// Write reports in `format`, flushing at the end.
pub fn write_reports<A: Alphabet, W: Write>(
    mut writer: W,
    format: ReportFormat,
    names: &[String],
    reports: &[AnalysisReport<A>],
    reference: &Seq<A>,
) -> Result<()> {
    match format {
        ReportFormat::Json => write_json(&mut writer, names, reports)?,
        ReportFormat::Tsv => write_tsv(&mut writer, names, reports, reference)?,
    }
    writer.flush()?;
    Ok(())
}
