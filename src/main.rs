use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use fastq_header_cleaner::{CleanOptions, Codec, SpacePolicy, clean_file};

/// Clean FASTQ read headers and write gzip output.
///
/// Every 4th line (the header) is trimmed and its spaces become `_`;
/// all other lines are copied unchanged.
#[derive(Parser, Debug)]
#[command(name = "fastq_clean_headers", version)]
struct Args {
    /// Input FASTQ file (plain or .gz)
    input: PathBuf,

    /// Output file, `.gz` is appended if missing [default: <input>.cleaned.fastq.gz]
    output: Option<PathBuf>,

    /// Remove spaces from headers instead of replacing them with '_'
    #[arg(long)]
    delete_spaces: bool,

    /// Use an external gzip-compatible program (e.g. pigz) for (de)compression
    #[arg(long, value_name = "PROGRAM")]
    helper: Option<String>,

    /// gzip compression level
    #[arg(short, long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
    level: u32,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn options(&self) -> CleanOptions {
        CleanOptions {
            space_policy: if self.delete_spaces {
                SpacePolicy::Delete
            } else {
                SpacePolicy::Underscore
            },
            codec: match &self.helper {
                Some(program) => Codec::External(program.clone()),
                None => Codec::InProcess,
            },
            level: self.level,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help / --version land here too
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        }
    };
    init_logging(args.verbose);
    log::debug!("{args:?}");

    match clean_file(&args.input, args.output.as_deref(), &args.options()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error processing file: {e}");
            ExitCode::FAILURE
        }
    }
}
