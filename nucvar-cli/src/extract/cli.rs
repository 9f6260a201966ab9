use clap::{Arg, ArgAction, Command, arg};

pub const EXTRACT_CMD: &str = "extract";

pub fn create_extract_cli() -> Command {
    Command::new(EXTRACT_CMD)
        .about("Extract substitutions, insertions and deletions from an aligned FASTA file.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .required(true)
                .help("Aligned FASTA (plain or .gz, '-' for stdin). The first record is the reference"),
        )
        .arg(
            Arg::new("reference-name")
                .long("reference-name")
                .help("Name of the reference record, if it isn't the first one"),
        )
        .arg(
            arg!(--reference <FASTA>)
                .required(false)
                .help("Ungapped reference FASTA to check the aligned reference against"),
        )
        .arg(
            arg!(-o --output <PATH>)
                .required(false)
                .help("Output path (default: stdout). A .gz suffix compresses the output"),
        )
        .arg(
            arg!(--format <FORMAT>)
                .required(false)
                .value_parser(["json", "tsv"])
                .help("Report format (default: inferred from --output, else json)"),
        )
        .arg(
            arg!(--alphabet <ALPHABET>)
                .required(false)
                .value_parser(["dna", "rna", "aminoacid"])
                .help("Sequence alphabet; also picks the default canonical set"),
        )
        .arg(
            arg!(--canonical <SYMBOLS>)
                .required(false)
                .help("Symbols eligible for substitution calls, e.g. ACGT"),
        )
        .arg(
            arg!(--missing <SYMBOL>)
                .required(false)
                .help("Missing-data symbol to report runs of, or 'none' (default: N, X for aminoacid)"),
        )
        .arg(
            arg!(--config <TOML>)
                .required(false)
                .help("TOML file with defaults for any of the options above"),
        )
        .arg(
            arg!(-t --threads <N>)
                .required(false)
                .value_parser(clap::value_parser!(usize))
                .help("Worker threads (default: all cores)"),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .action(ArgAction::SetTrue)
                .help("Hide the progress bar"),
        )
}
