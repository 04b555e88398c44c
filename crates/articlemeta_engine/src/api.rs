//! ArticleMeta endpoints: identifier pages, documents and the schema file.
use articlemeta_core::{Identifier, XmlFormat};
use harvest_logging::harvest_debug;
use serde::Deserialize;
use url::Url;

use crate::decode::{decode_text, DecodedText};
use crate::fetch::Fetcher;
use crate::FetchError;

/// Identifiers returned per page; the endpoint does not accept another size.
pub const PAGE_SIZE: u64 = 1000;

pub const DEFAULT_API_URL: &str = "http://articlemeta.scielo.org/api/v1/";

pub const DEFAULT_SCHEMA_URL: &str = "https://raw.githubusercontent.com/scieloorg/articles_meta/master/tests/xsd/scielo_sci/ThomsonReuters_publishing.xsd";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid api url {url}: {message}")]
    BaseUrl { url: String, message: String },
    #[error("identifier page at offset {offset}: {source}")]
    Page {
        offset: u64,
        #[source]
        source: FetchError,
    },
    #[error("identifier page at offset {offset} is not valid json: {message}")]
    InvalidPage { offset: u64, message: String },
    #[error("document {identifier}: {source}")]
    Document {
        identifier: Identifier,
        #[source]
        source: FetchError,
    },
    #[error("schema download: {0}")]
    Schema(#[source] FetchError),
}

#[derive(Debug, Deserialize)]
struct IdentifierPageBody {
    objects: Vec<IdentifierRecord>,
}

#[derive(Debug, Deserialize)]
struct IdentifierRecord {
    code: String,
    collection: String,
}

/// One page of the identifier listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierBatch {
    pub offset: u64,
    pub identifiers: Vec<Identifier>,
}

pub struct ArticleMetaClient<F> {
    fetcher: F,
    base: Url,
}

impl<F: Fetcher> ArticleMetaClient<F> {
    pub fn new(fetcher: F, base_url: &str) -> Result<Self, ApiError> {
        // Url::join drops the last segment unless the base ends with a slash.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized).map_err(|err| ApiError::BaseUrl {
            url: base_url.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self { fetcher, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(|err| ApiError::BaseUrl {
            url: self.base.to_string(),
            message: err.to_string(),
        })
    }

    pub fn identifiers_url(&self, offset: u64) -> Result<Url, ApiError> {
        let mut url = self.endpoint("article/identifiers")?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string());
        Ok(url)
    }

    pub fn document_url(&self, identifier: &Identifier, format: XmlFormat) -> Result<Url, ApiError> {
        let mut url = self.endpoint("article")?;
        url.query_pairs_mut()
            .append_pair("code", &identifier.code)
            .append_pair("collection", &identifier.collection)
            .append_pair("format", format.as_str());
        Ok(url)
    }

    /// Identifiers starting at `offset`; an empty batch means the listing is exhausted.
    pub async fn fetch_identifier_page(&self, offset: u64) -> Result<IdentifierBatch, ApiError> {
        let url = self.identifiers_url(offset)?;
        harvest_debug!("Loading url: {}", url);
        let output = self
            .fetcher
            .fetch(url.as_str())
            .await
            .map_err(|source| ApiError::Page { offset, source })?;
        let body: IdentifierPageBody =
            serde_json::from_slice(&output.bytes).map_err(|err| ApiError::InvalidPage {
                offset,
                message: err.to_string(),
            })?;
        let identifiers = body
            .objects
            .into_iter()
            .map(|record| Identifier::new(record.collection, record.code))
            .collect();
        Ok(IdentifierBatch {
            offset,
            identifiers,
        })
    }

    /// Raw document text; the XML is not checked for well-formedness.
    pub async fn fetch_document(
        &self,
        identifier: &Identifier,
        format: XmlFormat,
    ) -> Result<DecodedText, ApiError> {
        let url = self.document_url(identifier, format)?;
        harvest_debug!("Loading url: {}", url);
        let output = self
            .fetcher
            .fetch(url.as_str())
            .await
            .map_err(|source| ApiError::Document {
                identifier: identifier.clone(),
                source,
            })?;
        Ok(decode_text(
            &output.bytes,
            output.metadata.content_type.as_deref(),
        ))
    }

    pub async fn fetch_schema(&self, schema_url: &str) -> Result<String, ApiError> {
        harvest_debug!("Loading url: {}", schema_url);
        let output = self
            .fetcher
            .fetch(schema_url)
            .await
            .map_err(ApiError::Schema)?;
        Ok(decode_text(&output.bytes, output.metadata.content_type.as_deref()).text)
    }

    pub fn pager(&self) -> IdentifierPager<'_, F> {
        IdentifierPager {
            client: self,
            next_offset: 0,
            exhausted: false,
        }
    }
}

/// Pull-style walk over the identifier listing, [`PAGE_SIZE`] at a time.
pub struct IdentifierPager<'a, F> {
    client: &'a ArticleMetaClient<F>,
    next_offset: u64,
    exhausted: bool,
}

impl<F: Fetcher> IdentifierPager<'_, F> {
    /// Next non-empty batch, or `None` once the endpoint returns an empty page.
    pub async fn next_page(&mut self) -> Result<Option<IdentifierBatch>, ApiError> {
        if self.exhausted {
            return Ok(None);
        }
        let batch = self.client.fetch_identifier_page(self.next_offset).await?;
        if batch.identifiers.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }
        self.next_offset += PAGE_SIZE;
        Ok(Some(batch))
    }
}
