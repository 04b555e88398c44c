use std::fmt;
use std::path::PathBuf;

use articlemeta_core::Identifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why a listed document did not make it into the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MalformedIdentifier(String),
    DuplicatePath(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MalformedIdentifier(msg) => write!(f, "malformed identifier: {msg}"),
            SkipReason::DuplicatePath(path) => write!(f, "duplicate archive path {path}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
    PageFetched {
        offset: u64,
        identifiers: usize,
    },
    DocumentStored {
        identifier: Identifier,
        path: String,
        bytes: u64,
    },
    DocumentSkipped {
        identifier: Identifier,
        reason: SkipReason,
    },
    SchemaIncluded {
        entry: String,
    },
    SchemaSkipped {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSummary {
    pub output_path: PathBuf,
    pub pages: u64,
    pub documents_written: u64,
    pub documents_skipped: u64,
    pub schema_included: bool,
}
