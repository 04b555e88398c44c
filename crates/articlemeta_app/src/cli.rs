use std::path::PathBuf;

use articlemeta_core::{AliasError, CollectionAliases, UnknownFormat, XmlFormat};
use clap::{Args, Parser, Subcommand};
use harvest_logging::{LogLevel, UnknownLogLevel};

#[derive(Debug, Parser)]
#[command(name = "articlemeta_dump", version, about = "Dump SciELO Network metadata")]
pub struct Cli {
    /// Append log output to this file instead of the terminal.
    #[arg(long, short = 'o', global = true)]
    pub log_file: Option<PathBuf>,

    /// DEBUG, INFO, WARNING, ERROR or CRITICAL.
    #[arg(long, short = 'l', global = true, default_value = "INFO", value_parser = parse_log_level)]
    pub log_level: LogLevel,

    /// RON file with endpoint, timeout and alias overrides.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Harvest every ArticleMeta document into a zip archive.
    Dump(DumpArgs),
    /// Print one language section of an article HTML page.
    Body(BodyArgs),
}

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Full path to the zip file that will receive the documents.
    #[arg(long, short = 'f', default_value = "/tmp/dumpdata.zip")]
    pub zip_file: PathBuf,

    /// XML output format: xmlwos or xmlrsps.
    #[arg(long, short = 'x', default_value = "xmlwos", value_parser = parse_format)]
    pub xml_format: XmlFormat,

    /// ArticleMeta API base url.
    #[arg(long, env = "ARTICLEMETA_API")]
    pub api_url: Option<String>,

    /// Where the xmlwos schema is downloaded from.
    #[arg(long)]
    pub schema_url: Option<String>,

    /// Extra CODE=ALIAS collection directory mapping; repeatable.
    #[arg(long = "collection-alias", value_parser = parse_alias)]
    pub collection_aliases: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct BodyArgs {
    /// Language code of the section, e.g. pt.
    #[arg(long, short = 'L')]
    pub lang: String,

    /// Class of the element holding the language sections.
    #[arg(long, default_value = "content")]
    pub container_class: String,

    /// HTML page to read.
    pub file: PathBuf,
}

fn parse_log_level(raw: &str) -> Result<LogLevel, UnknownLogLevel> {
    raw.parse()
}

fn parse_format(raw: &str) -> Result<XmlFormat, UnknownFormat> {
    raw.parse()
}

fn parse_alias(raw: &str) -> Result<(String, String), AliasError> {
    CollectionAliases::parse_pair(raw)
}
