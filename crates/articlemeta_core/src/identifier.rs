use std::fmt;

use crate::collection::CollectionAliases;

/// Characters of an ISSN as it appears inside a document code (`0001-3765`).
pub const ISSN_LEN: usize = 9;

/// One document as listed by the identifier endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub collection: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier {code:?} has an empty collection code")]
    EmptyCollection { code: String },
    #[error("document code {code:?} is too short to hold an ISSN")]
    CodeTooShort { code: String },
    #[error("identifier {collection}/{code} contains a path separator")]
    PathSeparator { collection: String, code: String },
    #[error("identifier {collection}/{code} maps to the relative path component {component:?}")]
    RelativeComponent {
        collection: String,
        code: String,
        component: String,
    },
}

/// `{collection}/{issn}/{pid}.xml`, split into its components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchivePath {
    pub collection: String,
    pub issn: String,
    pub pid: String,
}

impl Identifier {
    pub fn new(collection: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            code: code.into(),
        }
    }

    /// Derives the archive entry path for this document.
    ///
    /// The leading character of a code is its document type letter (`S` for
    /// articles); the ISSN is the next [`ISSN_LEN`] characters and the PID is
    /// everything after the type letter.
    pub fn archive_path(&self, aliases: &CollectionAliases) -> Result<ArchivePath, IdentifierError> {
        if self.collection.is_empty() {
            return Err(IdentifierError::EmptyCollection {
                code: self.code.clone(),
            });
        }
        if [&self.collection, &self.code]
            .iter()
            .any(|part| part.contains(['/', '\\']))
        {
            return Err(IdentifierError::PathSeparator {
                collection: self.collection.clone(),
                code: self.code.clone(),
            });
        }

        let too_short = || IdentifierError::CodeTooShort {
            code: self.code.clone(),
        };
        let pid = skip_first_char(&self.code).ok_or_else(too_short)?;
        let issn = char_prefix(pid, ISSN_LEN).ok_or_else(too_short)?;

        let collection = aliases.resolve(&self.collection);
        if collection.contains(['/', '\\']) {
            return Err(IdentifierError::PathSeparator {
                collection: collection.to_string(),
                code: self.code.clone(),
            });
        }
        if let Some(component) = [collection, issn, pid]
            .into_iter()
            .find(|part| is_relative_component(part))
        {
            return Err(IdentifierError::RelativeComponent {
                collection: self.collection.clone(),
                code: self.code.clone(),
                component: component.to_string(),
            });
        }

        Ok(ArchivePath {
            collection: collection.to_string(),
            issn: issn.to_string(),
            pid: pid.to_string(),
        })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.collection, self.code)
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}.xml", self.collection, self.issn, self.pid)
    }
}

/// Components that would step outside the archive root once joined.
fn is_relative_component(part: &str) -> bool {
    matches!(part, "" | "." | "..")
}

fn skip_first_char(s: &str) -> Option<&str> {
    let first = s.chars().next()?;
    Some(&s[first.len_utf8()..])
}

/// First `n` characters of `s`, or `None` when `s` is shorter.
fn char_prefix(s: &str, n: usize) -> Option<&str> {
    match s.char_indices().nth(n) {
        Some((idx, _)) => Some(&s[..idx]),
        None if s.chars().count() == n => Some(s),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{char_prefix, is_relative_component, skip_first_char};

    #[test]
    fn dot_components_are_relative() {
        assert!(is_relative_component("."));
        assert!(is_relative_component(".."));
        assert!(is_relative_component(""));
        assert!(!is_relative_component("..."));
        assert!(!is_relative_component("bra"));
    }

    #[test]
    fn char_prefix_handles_exact_and_short_input() {
        assert_eq!(char_prefix("abcdef", 3), Some("abc"));
        assert_eq!(char_prefix("abc", 3), Some("abc"));
        assert_eq!(char_prefix("ab", 3), None);
        assert_eq!(char_prefix("ção", 2), Some("çã"));
    }

    #[test]
    fn skip_first_char_respects_utf8() {
        assert_eq!(skip_first_char("Sabc"), Some("abc"));
        assert_eq!(skip_first_char("çx"), Some("x"));
        assert_eq!(skip_first_char(""), None);
    }
}
