mod cli;
mod config;
mod logging;
mod progress;

use std::fs;
use std::process::ExitCode;

use anyhow::{bail, Context};
use articlemeta_engine::{decode_text, BodyExtractor, Harvester, IndexSectionExtractor};
use clap::Parser;
use harvest_logging::{harvest_error, harvest_info};

use cli::{BodyArgs, Cli, Command, DumpArgs};
use config::FileConfig;
use logging::LogDestination;
use progress::LogProgressSink;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let destination = match cli.log_file.clone() {
        Some(path) => LogDestination::File(path),
        None => LogDestination::Terminal,
    };
    logging::initialize(destination, cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            harvest_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = match &cli.config {
        Some(path) => config::load(path)?,
        None => FileConfig::default(),
    };

    match cli.command {
        Command::Dump(args) => dump(&file_config, &args),
        Command::Body(args) => body(&args),
    }
}

fn dump(file_config: &FileConfig, args: &DumpArgs) -> anyhow::Result<()> {
    let config = config::harvest_config(file_config, args);
    harvest_info!("Harvesting from {}", config.api_url);

    // One request in flight at a time; no worker threads needed.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let harvester = Harvester::from_config(config)?;
    let sink = LogProgressSink::new();
    let summary = runtime
        .block_on(harvester.build_archive(&args.zip_file, args.xml_format, &sink))
        .with_context(|| format!("harvest into {} failed", args.zip_file.display()))?;

    println!(
        "archive written: {} ({} documents, {} skipped, schema {})",
        summary.output_path.display(),
        summary.documents_written,
        summary.documents_skipped,
        if summary.schema_included { "included" } else { "absent" }
    );
    Ok(())
}

fn body(args: &BodyArgs) -> anyhow::Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let decoded = decode_text(&bytes, None);

    let extractor = IndexSectionExtractor::with_container_class(args.container_class.as_str());
    match extractor.extract_body(&decoded.text, &args.lang) {
        Some(body) => {
            println!("{body}");
            Ok(())
        }
        None => bail!(
            "no {:?} section found in {}",
            args.lang,
            args.file.display()
        ),
    }
}
