//! Signal Code Generator CLI
//!
//! Command-line front end for the signal-codegen library:
//! - Validate a signal schema (`--check`)
//! - Print the signal table (`--list`)
//! - Generate the C++ identifier table and database initializer

use anyhow::{bail, Context, Result};
use clap::Parser;
use signal_codegen::{SignalGenerator, SignalSchema};
use std::path::PathBuf;

mod config;

/// Signal Code Generator - compile a signal schema into C++ sources
#[derive(Parser, Debug)]
#[command(name = "signal-codegen")]
#[command(
    about = "Generate C++ signal identifier and database sources from a signal schema",
    long_about = None
)]
#[command(version)]
struct Args {
    /// Path to the signal schema (JSON or CSV)
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Existing directory receiving the generated files
    #[arg(short, long, value_name = "DIR")]
    target: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Validate the schema without generating anything
    #[arg(long)]
    check: bool,

    /// Print the signals sorted by (category, sub) id
    #[arg(long)]
    list: bool,

    /// Add a creation date line to the generated banners
    #[arg(long)]
    timestamp: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("Signal Code Generator CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using codegen library v{}", signal_codegen::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let mut generator_config = app_config.generator;
    if args.timestamp {
        generator_config.include_timestamp = true;
    }
    let generator = SignalGenerator::with_config(generator_config);

    let schema_path = match args.schema.clone().or(app_config.input.schema) {
        Some(path) => path,
        None => bail!("No schema given; use --schema <FILE> or [input] schema in the config file"),
    };

    let schema = generator
        .load_schema(&schema_path)
        .with_context(|| format!("Failed to load schema {:?}", schema_path))?;

    if args.list {
        print_signal_table(&schema);
    }

    if args.check {
        log::info!(
            "Schema {:?} is valid: {} signals, version {}",
            schema_path,
            schema.len(),
            schema.version()
        );
        return Ok(());
    }

    let target = match args.target.clone().or(app_config.output.target_dir) {
        Some(path) => path,
        None if args.list => return Ok(()),
        None => bail!(
            "No target directory given; use --target <DIR> or [output] target_dir in the config file"
        ),
    };

    let written = generator
        .generate(&schema, &target)
        .with_context(|| format!("Failed to generate sources into {:?}", target))?;

    if !args.quiet {
        for path in &written {
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Print the signal table and per-variant counts to stdout
fn print_signal_table(schema: &SignalSchema) {
    let stats = schema.stats();
    println!("Schema version {} ({} signals)", stats.version, stats.num_signals);

    for (kind, count) in &stats.per_kind {
        println!("  {:<8} {}", kind.as_str(), count);
    }

    if schema.is_empty() {
        return;
    }

    println!();
    println!("{:>3} {:>3}  {:<32} {:<8} {:>8}", "CAT", "SUB", "NAME", "TYPE", "TIMEOUT");
    for signal in schema.sorted_by_id() {
        println!(
            "{:>3} {:>3}  {:<32} {:<8} {:>6}ms",
            signal.category_id,
            signal.sub_id,
            signal.name,
            signal.kind.tag().as_str(),
            signal.timeout_ms
        );
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
