use std::collections::BTreeMap;

/// Collection codes that are stored under a different directory name.
const DEFAULT_ALIASES: &[(&str, &str)] = &[("scl", "bra")];

/// Read-only mapping from collection code to archive directory name.
///
/// Built once at startup and passed by reference; codes without an entry
/// resolve to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionAliases {
    map: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    #[error("collection alias {0:?} is not of the form CODE=ALIAS")]
    MissingSeparator(String),
    #[error("collection alias {0:?} has an empty code or alias")]
    EmptyPart(String),
}

impl CollectionAliases {
    /// No aliases at all.
    pub fn empty() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Returns a copy with `overrides` layered over the current entries.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn resolve<'a>(&'a self, code: &'a str) -> &'a str {
        self.map.get(code).map(String::as_str).unwrap_or(code)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Parses a `CODE=ALIAS` pair as given on the command line.
    pub fn parse_pair(raw: &str) -> Result<(String, String), AliasError> {
        let (code, alias) = raw
            .split_once('=')
            .ok_or_else(|| AliasError::MissingSeparator(raw.to_string()))?;
        let (code, alias) = (code.trim(), alias.trim());
        if code.is_empty() || alias.is_empty() {
            return Err(AliasError::EmptyPart(raw.to_string()));
        }
        Ok((code.to_string(), alias.to_string()))
    }
}

impl Default for CollectionAliases {
    fn default() -> Self {
        Self::empty().with_overrides(DEFAULT_ALIASES.iter().copied())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CollectionAliases {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::empty().with_overrides(iter)
    }
}
