use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use articlemeta_core::{
    render_readme, schema_entry_name, CollectionAliases, XmlFormat, DEFAULT_README_TEMPLATE,
    README_ENTRY,
};
use harvest_logging::{harvest_debug, harvest_error, harvest_info, harvest_warn};

use crate::api::{ApiError, ArticleMetaClient, DEFAULT_API_URL, DEFAULT_SCHEMA_URL};
use crate::archive::{ArchiveError, ArchiveWriter, EntrySink};
use crate::fetch::{FetchSettings, Fetcher, ProgressSink, ReqwestFetcher};
use crate::{FetchError, HarvestEvent, HarvestSummary, SkipReason};

/// Produces the timestamp written into `README.txt`.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct HarvestConfig {
    pub api_url: String,
    pub schema_url: String,
    pub fetch: FetchSettings,
    pub aliases: CollectionAliases,
    pub readme_template: String,
    pub updated_at: Clock,
}

impl HarvestConfig {
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            schema_url: DEFAULT_SCHEMA_URL.to_string(),
            fetch: FetchSettings::default(),
            aliases: CollectionAliases::default(),
            readme_template: DEFAULT_README_TEMPLATE.to_string(),
            updated_at: Arc::new(|| chrono::Local::now().to_rfc3339()),
        }
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HarvestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestConfig")
            .field("api_url", &self.api_url)
            .field("schema_url", &self.schema_url)
            .field("fetch", &self.fetch)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error("http client: {0}")]
    Client(#[from] FetchError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("archive: {0}")]
    Archive(#[from] ArchiveError),
}

/// Full re-harvest of ArticleMeta into a single zip archive.
pub struct Harvester<F> {
    client: ArticleMetaClient<F>,
    config: HarvestConfig,
}

impl Harvester<ReqwestFetcher> {
    pub fn from_config(config: HarvestConfig) -> Result<Self, HarvestError> {
        let fetcher = ReqwestFetcher::new(config.fetch.clone())?;
        Self::new(fetcher, config)
    }
}

impl<F: Fetcher> Harvester<F> {
    pub fn new(fetcher: F, config: HarvestConfig) -> Result<Self, HarvestError> {
        let client = ArticleMetaClient::new(fetcher, &config.api_url)?;
        Ok(Self { client, config })
    }

    pub fn client(&self) -> &ArticleMetaClient<F> {
        &self.client
    }

    /// Writes every listed document, then `README.txt` and, for `xmlwos`, the schema.
    ///
    /// A failed identifier or document request aborts the run and leaves nothing
    /// at `output_path`. Once the listing is exhausted the archive is always
    /// finalized, even if the trailing entries cannot be written.
    pub async fn build_archive(
        &self,
        output_path: &Path,
        format: XmlFormat,
        sink: &dyn ProgressSink,
    ) -> Result<HarvestSummary, HarvestError> {
        harvest_info!("Creating zip file: {}", output_path.display());
        let archive = ArchiveWriter::create(output_path)?;
        self.write_archive(archive, format, sink).await
    }

    /// Same as [`Harvester::build_archive`] over any [`EntrySink`].
    pub async fn write_archive<A: EntrySink>(
        &self,
        mut archive: A,
        format: XmlFormat,
        sink: &dyn ProgressSink,
    ) -> Result<HarvestSummary, HarvestError> {
        harvest_info!("XML Format: {}", format);

        let mut counts = Counts::default();
        self.write_documents(&mut archive, format, sink, &mut counts)
            .await?;

        let trailer = self.write_trailer(&mut archive, format, sink).await;
        let finished = archive.finish();
        let schema_included = trailer.inspect_err(|err| {
            harvest_error!("Failed to write archive trailer: {}", err);
        })?;
        let output_path = finished?;

        harvest_info!(
            "Zip created: {} ({} documents, {} skipped)",
            output_path.display(),
            counts.written,
            counts.skipped
        );
        Ok(HarvestSummary {
            output_path,
            pages: counts.pages,
            documents_written: counts.written,
            documents_skipped: counts.skipped,
            schema_included,
        })
    }

    async fn write_documents(
        &self,
        archive: &mut impl EntrySink,
        format: XmlFormat,
        sink: &dyn ProgressSink,
        counts: &mut Counts,
    ) -> Result<(), HarvestError> {
        let mut seen_paths = HashSet::new();
        let mut pager = self.client.pager();

        while let Some(batch) = pager.next_page().await? {
            counts.pages += 1;
            sink.emit(HarvestEvent::PageFetched {
                offset: batch.offset,
                identifiers: batch.identifiers.len(),
            });

            for identifier in batch.identifiers {
                let path = match identifier.archive_path(&self.config.aliases) {
                    Ok(path) => path.to_string(),
                    Err(err) => {
                        harvest_warn!("Skipping {}: {}", identifier, err);
                        counts.skipped += 1;
                        sink.emit(HarvestEvent::DocumentSkipped {
                            identifier,
                            reason: SkipReason::MalformedIdentifier(err.to_string()),
                        });
                        continue;
                    }
                };
                if !seen_paths.insert(path.clone()) {
                    harvest_warn!("Skipping {}: {} already written", identifier, path);
                    counts.skipped += 1;
                    sink.emit(HarvestEvent::DocumentSkipped {
                        identifier,
                        reason: SkipReason::DuplicatePath(path),
                    });
                    continue;
                }

                let document = self.client.fetch_document(&identifier, format).await?;
                if document.had_errors {
                    harvest_warn!(
                        "Document {} had bytes invalid for {}; replaced",
                        identifier,
                        document.encoding_label
                    );
                }
                archive.add_entry(&path, document.text.as_bytes())?;
                counts.written += 1;
                sink.emit(HarvestEvent::DocumentStored {
                    identifier,
                    path,
                    bytes: document.text.len() as u64,
                });
            }
        }
        Ok(())
    }

    /// README plus the optional schema; returns whether the schema was stored.
    async fn write_trailer(
        &self,
        archive: &mut impl EntrySink,
        format: XmlFormat,
        sink: &dyn ProgressSink,
    ) -> Result<bool, HarvestError> {
        let readme = render_readme(&self.config.readme_template, &(self.config.updated_at)());
        archive.add_entry(README_ENTRY, readme.as_bytes())?;

        if !format.ships_schema() {
            return Ok(false);
        }

        let Some(entry) = schema_entry_name(&self.config.schema_url) else {
            let reason = format!("no file name in schema url {}", self.config.schema_url);
            harvest_warn!("Schema download fail: {}", reason);
            sink.emit(HarvestEvent::SchemaSkipped { reason });
            return Ok(false);
        };

        match self.client.fetch_schema(&self.config.schema_url).await {
            Ok(xsd) => {
                harvest_debug!("Schema download");
                archive.add_entry(&entry, xsd.as_bytes())?;
                sink.emit(HarvestEvent::SchemaIncluded { entry });
                Ok(true)
            }
            Err(err) => {
                harvest_warn!("Schema download fail: {}", err);
                sink.emit(HarvestEvent::SchemaSkipped {
                    reason: err.to_string(),
                });
                Ok(false)
            }
        }
    }
}

#[derive(Debug, Default)]
struct Counts {
    pages: u64,
    written: u64,
    skipped: u64,
}
