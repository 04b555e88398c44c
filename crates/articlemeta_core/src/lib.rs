//! ArticleMeta dump core: pure identifier, path and manifest helpers.
mod collection;
mod format;
mod identifier;
mod readme;

pub use collection::{AliasError, CollectionAliases};
pub use format::{UnknownFormat, XmlFormat};
pub use identifier::{ArchivePath, Identifier, IdentifierError, ISSN_LEN};
pub use readme::{
    render_readme, schema_entry_name, DEFAULT_README_TEMPLATE, README_ENTRY, SCHEMA_DIR,
};
