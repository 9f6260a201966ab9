use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::ThreadPoolBuilder;

use nucvar_core::utils::{get_dynamic_writer, remove_all_extensions};
use nucvar_core::{Aa, Alphabet, CanonicalPreset, CanonicalSet, GAP, Nuc};
use nucvar_extract::{AnalysisReport, ExtractParams, extract_batch_with};
use nucvar_io::{ReportFormat, read_alignment_file, read_reference_file, write_reports};

use crate::config::ExtractConfig;

/// Everything `extract` needs, after merging flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractSettings {
    pub alphabet: CanonicalPreset,
    pub params: ExtractParams,
    pub reference_name: Option<String>,
    pub reference: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: ReportFormat,
    pub threads: Option<usize>,
    pub progress: bool,
}

fn default_missing(alphabet: CanonicalPreset) -> &'static str {
    match alphabet {
        CanonicalPreset::Aminoacid => "X",
        CanonicalPreset::Dna | CanonicalPreset::Rna => "N",
    }
}

fn parse_missing(value: &str) -> Result<Option<u8>> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match value.as_bytes() {
        [GAP] => bail!("The gap symbol '-' can't be used as the missing-data symbol"),
        [symbol] => Ok(Some(*symbol)),
        _ => bail!(
            "Missing-data symbol must be a single character or 'none', got '{}'",
            value
        ),
    }
}

///
/// Merge command-line flags over the config file. A flag always wins; the
/// output format falls back to the output extension, then JSON.
///
pub fn resolve_settings(matches: &ArgMatches, config: ExtractConfig) -> Result<ExtractSettings> {
    let alphabet = match matches.get_one::<String>("alphabet") {
        Some(name) => name.parse::<CanonicalPreset>()?,
        None => config.alphabet.unwrap_or_default(),
    };

    let canonical = match matches.get_one::<String>("canonical").or(config.canonical.as_ref()) {
        Some(symbols) => CanonicalSet::from_symbols(symbols)?,
        None => CanonicalSet::from_preset(alphabet),
    };

    let missing = matches
        .get_one::<String>("missing")
        .map(String::as_str)
        .or(config.missing.as_deref())
        .unwrap_or(default_missing(alphabet));
    let params = ExtractParams::new(canonical).with_missing_symbol(parse_missing(missing)?);

    let output = matches.get_one::<String>("output").map(PathBuf::from);
    let format = match matches.get_one::<String>("format") {
        Some(name) => name.parse()?,
        None => config
            .format
            .or_else(|| output.as_deref().and_then(ReportFormat::from_path))
            .unwrap_or_default(),
    };

    Ok(ExtractSettings {
        alphabet,
        params,
        reference_name: matches
            .get_one::<String>("reference-name")
            .cloned()
            .or(config.reference_name),
        reference: matches.get_one::<String>("reference").map(PathBuf::from),
        output,
        format,
        threads: matches.get_one::<usize>("threads").copied().or(config.threads),
        progress: !matches.get_flag("no-progress"),
    })
}

pub fn run_extract(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("An aligned FASTA file is required.");

    let config = match matches.get_one::<String>("config") {
        Some(path) => ExtractConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => ExtractConfig::default(),
    };
    let settings = resolve_settings(matches, config)?;

    match settings.alphabet {
        CanonicalPreset::Aminoacid => extract_alignments::<Aa>(input, &settings),
        CanonicalPreset::Dna | CanonicalPreset::Rna => extract_alignments::<Nuc>(input, &settings),
    }
}

fn progress_bar(len: usize, input: &str, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
        )?
        .progress_chars("##-"),
    );
    pb.set_message(remove_all_extensions(Path::new(input)));
    Ok(pb)
}

fn log_summary<A: Alphabet>(names: &[String], reports: &[AnalysisReport<A>]) {
    for (name, report) in names.iter().zip(reports) {
        if !report.is_aligned() {
            warn!("'{}' has no aligned bases", name);
        }
    }

    info!(
        "Extracted {} substitutions, {} deleted bases and {} inserted bases from {} sequences",
        reports.iter().map(|r| r.total_substitutions()).sum::<usize>(),
        reports.iter().map(|r| r.total_deletions()).sum::<usize>(),
        reports.iter().map(|r| r.total_insertions()).sum::<usize>(),
        reports.len()
    );
}

///
/// Read, extract on the worker pool, write. Generic over the alphabet so
/// nucleotide and aminoacid alignments share one path.
///
pub fn extract_alignments<A: Alphabet>(input: &str, settings: &ExtractSettings) -> Result<()> {
    let batch = read_alignment_file::<A>(input, settings.reference_name.as_deref())?;

    let reference = match &settings.reference {
        Some(path) => {
            let record = read_reference_file::<A>(path)?;
            batch
                .check_reference(&record.seq)
                .with_context(|| format!("Reference {:?} doesn't match the alignment", path))?;
            record.seq
        }
        None => batch.ungapped_reference(),
    };

    if batch.is_empty() {
        warn!("No query sequences found in {}", input);
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(settings.threads.unwrap_or(0))
        .build()?;
    let pb = progress_bar(batch.len(), input, settings.progress)?;

    let reports = pool.install(|| {
        extract_batch_with(&batch.alignments, &settings.params, |_| pb.inc(1))
    });
    pb.finish_and_clear();

    log_summary(&batch.names, &reports);

    match &settings.output {
        Some(path) => {
            let mut writer = get_dynamic_writer(path)?;
            write_reports(&mut writer, settings.format, &batch.names, &reports, &reference)?;
            writer
                .finish()
                .with_context(|| format!("Failed to finish writing {:?}", path))?;
            info!("Wrote {} reports to {:?}", reports.len(), path);
        }
        None => {
            let stdout = io::stdout();
            let writer = BufWriter::new(stdout.lock());
            write_reports(writer, settings.format, &batch.names, &reports, &reference)?;
        }
    }

    Ok(())
}
