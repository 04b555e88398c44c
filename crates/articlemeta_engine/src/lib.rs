//! ArticleMeta dump engine: HTTP fetching, archive building and body extraction.
mod api;
mod archive;
mod body;
mod decode;
mod fetch;
mod harvest;
mod persist;
mod types;

pub use api::{
    ApiError, ArticleMetaClient, IdentifierBatch, IdentifierPager, DEFAULT_API_URL,
    DEFAULT_SCHEMA_URL, PAGE_SIZE,
};
pub use archive::{ArchiveError, ArchiveWriter, EntrySink};
pub use body::{
    collapse_layout_whitespace, remove_related_links, BodyExtractor, IndexSectionExtractor,
    SectionMarker,
};
pub use decode::{decode_text, DecodedText};
pub use fetch::{FetchSettings, Fetcher, NullProgressSink, ProgressSink, ReqwestFetcher};
pub use harvest::{Clock, HarvestConfig, HarvestError, Harvester};
pub use persist::{commit_staged, ensure_output_dir, staging_file, PersistError};
pub use types::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, HarvestEvent, HarvestSummary, SkipReason,
};
