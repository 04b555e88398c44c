//! Language section extraction from rendered article pages.
use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html};

const DEFAULT_CONTAINER_CLASS: &str = "content";
const INDEX_CLASS: &str = "index";

const NLINKS_HREF: &str = r#"href\s*=\s*"javascript:\s*void\(0\);?""#;
const NLINKS_ONCLICK: &str = r#"onclick\s*=\s*"[^"]*window\.open\([^"]*sci_nlinks[^"]*""#;

lazy_static! {
    /// Citation popup anchors, with the `[ ]` wrapping them when present.
    static ref RELATED_LINKS: Regex = Regex::new(&format!(
        r#"(?is)(?:\[\s*)?<a\s(?:[^>]*?{NLINKS_HREF}[^>]*?{NLINKS_ONCLICK}|[^>]*?{NLINKS_ONCLICK}[^>]*?{NLINKS_HREF})[^>]*>.*?</a>(?:\s*\])?"#
    ))
    .expect("related links pattern compiles");
}

pub trait BodyExtractor: Send + Sync {
    /// Inner markup of the section for `lang`, or `None` when there is none.
    fn extract_body(&self, html: &str, lang: &str) -> Option<String>;
}

/// Ways a language section is marked, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionMarker {
    /// `class="index,pt"`
    IndexComma,
    /// `class="index pt"`, used by older templates.
    IndexClassPair,
    /// `class="index" lang="pt"` (or `xml:lang`).
    IndexLangAttribute,
}

impl SectionMarker {
    pub const ALL: [SectionMarker; 3] = [
        SectionMarker::IndexComma,
        SectionMarker::IndexClassPair,
        SectionMarker::IndexLangAttribute,
    ];

    fn matches(self, element: &ElementRef<'_>, lang: &str) -> bool {
        match self {
            SectionMarker::IndexComma => element
                .value()
                .classes()
                .any(|class| class.strip_prefix("index,") == Some(lang)),
            SectionMarker::IndexClassPair => {
                has_class(element, INDEX_CLASS) && has_class(element, lang)
            }
            SectionMarker::IndexLangAttribute => {
                has_class(element, INDEX_CLASS)
                    && ["lang", "xml:lang"]
                        .iter()
                        .any(|name| element.value().attr(name) == Some(lang))
            }
        }
    }
}

/// Finds the `index` section for a language inside the page's content container.
#[derive(Debug, Clone)]
pub struct IndexSectionExtractor {
    container_class: String,
}

impl IndexSectionExtractor {
    pub fn new() -> Self {
        Self::with_container_class(DEFAULT_CONTAINER_CLASS)
    }

    pub fn with_container_class(class: impl Into<String>) -> Self {
        Self {
            container_class: class.into(),
        }
    }
}

impl Default for IndexSectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyExtractor for IndexSectionExtractor {
    fn extract_body(&self, html: &str, lang: &str) -> Option<String> {
        let lang = lang.trim();
        if lang.is_empty() {
            return None;
        }

        let document = Html::parse_document(&collapse_layout_whitespace(html));
        let container = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| has_class(element, &self.container_class))?;

        let section = SectionMarker::ALL.iter().find_map(|marker| {
            container
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .find(|element| marker.matches(element, lang))
        })?;

        let inner = section.inner_html();
        Some(remove_related_links(inner.trim()).into_owned())
    }
}

/// Joins trimmed, non-blank lines with single spaces.
///
/// Pretty-printed markup then reads as it would unindented: blocks on separate
/// lines end up separated by exactly one space.
pub fn collapse_layout_whitespace(html: &str) -> String {
    html.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces each `sci_nlinks` popup anchor (and its `[ ]` wrapper) with one space.
pub fn remove_related_links(html: &str) -> Cow<'_, str> {
    RELATED_LINKS.replace_all(html, " ")
}

fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}
