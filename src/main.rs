use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{error, info};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use meshcheck::config::{load_config, CheckerConfig};
use meshcheck::diagnostics::Issue;
use meshcheck::orchestrator::Validator;
use meshcheck::record_loader::{community_name, LoadError, RecordSource};
use meshcheck::tld::{TldError, TldTable};

/// Global consistency checker for community mesh registries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of community descriptor files
    #[arg(short, long)]
    dir: PathBuf,

    /// Newline-separated list of known top-level domains
    #[arg(long)]
    tld_list: Option<PathBuf>,

    /// Checker configuration YAML file (BGP pools)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting meshcheck");
    info!("Record directory: {:?}", args.dir);

    let config = match &args.config {
        Some(path) => load_config(path)
            .wrap_err_with(|| format!("Failed to load configuration '{}'", path.display()))?,
        None => CheckerConfig::default(),
    };

    let tld_source = match &args.tld_list {
        Some(path) => TldTable::load(path),
        None => Err(TldError::NotConfigured),
    };

    let mut validator = Validator::new(config).with_tld_source(tld_source);

    // Malformed descriptors are reported once the stream is drained
    let malformed = RefCell::new(Vec::new());
    let records = RecordSource::open(&args.dir, |path: &Path, e: LoadError| {
        malformed.borrow_mut().push((community_name(path), e.to_string()));
    })
    .wrap_err_with(|| format!("Failed to open record directory '{}'", args.dir.display()))?;

    validator.run(records);

    for (community, reason) in malformed.into_inner() {
        validator.record_issue(Some(&community), Issue::MalformedRecord { reason });
    }

    let report = validator.finish();
    let verdict = report.verdict();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?
        );
    }

    if !verdict.passed() {
        error!(
            "Validation failed with {} error(s) and {} warning(s)",
            verdict.errors, verdict.warnings
        );
        std::process::exit(1);
    }

    info!("Validation passed with {} warning(s)", verdict.warnings);
    Ok(())
}
