use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use log::{info, LevelFilter};

use iq_sigmf::{fallback, Encoding, FallbackPolicy, Template};

/// Convert raw interleaved IQ .dat files into SigMF .bin + .json pairs
#[derive(Parser, Debug)]
#[command(name = "iq-sigmf")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the .dat files to convert
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Output directory for .bin and .json files
    #[arg(short, long, default_value = "./sigmf")]
    output_dir: PathBuf,

    /// JSON metadata template (global, captures, annotations); built-in testbed template if omitted
    #[arg(short, long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Sample encoding to try first: float32, float16
    #[arg(short, long, default_value = "float32")]
    encoding: Encoding,

    /// Retry with the other encoding: batch, per-file, off
    #[arg(long, default_value = "batch")]
    fallback: FallbackPolicy,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let template = match &args.template {
        Some(path) => {
            info!("Loading metadata template from {}", path.display());
            Template::load(path)?
        }
        None => Template::default(),
    };

    let outcome = fallback::run(
        &args.input_dir,
        &args.output_dir,
        &template,
        args.encoding,
        args.fallback,
    )?;

    println!(
        "Converted {} file(s), {} failed, output in {}",
        outcome.processed(),
        outcome.failed(),
        args.output_dir.display()
    );

    Ok(())
}
