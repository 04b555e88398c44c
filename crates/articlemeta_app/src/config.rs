//! Optional RON configuration file for the `dump` command.
//!
//! ```ron
//! (
//!     api_url: Some("http://articlemeta.scielo.org/api/v1/"),
//!     request_timeout_secs: Some(120),
//!     collection_aliases: { "scl": "bra" },
//! )
//! ```
//!
//! Precedence is command line, then file, then built-in defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use articlemeta_engine::HarvestConfig;
use serde::Deserialize;

use crate::cli::DumpArgs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub schema_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_document_bytes: Option<u64>,
    pub collection_aliases: BTreeMap<String, String>,
}

pub fn load(path: &Path) -> anyhow::Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    ron::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

pub fn harvest_config(file: &FileConfig, args: &DumpArgs) -> HarvestConfig {
    let mut config = HarvestConfig::new();

    if let Some(url) = args.api_url.as_ref().or(file.api_url.as_ref()) {
        config.api_url = url.clone();
    }
    if let Some(url) = args.schema_url.as_ref().or(file.schema_url.as_ref()) {
        config.schema_url = url.clone();
    }
    if let Some(secs) = file.connect_timeout_secs {
        config.fetch.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = file.request_timeout_secs {
        config.fetch.request_timeout = Duration::from_secs(secs);
    }
    if let Some(max) = file.max_document_bytes {
        config.fetch.max_bytes = max;
    }

    config.aliases = config
        .aliases
        .with_overrides(file.collection_aliases.clone())
        .with_overrides(args.collection_aliases.iter().cloned());
    config
}
