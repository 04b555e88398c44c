use articlemeta_engine::{remove_related_links, BodyExtractor, IndexSectionExtractor};
use pretty_assertions::assert_eq;

const FLAT: &str = r#"<html><header></header><body><div class="content"><div class="index,en"><div class="title">Crazy <i>Title</i></div><p>Crazy Body</p><p>Really Crazy Body</p></div></div></body></html>"#;

const PRETTY: &str = r#"
          <html>
            <header></header>
            <body>
              <div class="content">
                <div class="index,en">
                  <div class="title">Crazy <i>Title</i></div>
                  <p>Crazy Body</p>
                  <p>Really Crazy Body</p>
                </div>
              </div>
            </body>
          </html>
          "#;

const TWO_LINKS: &str = r#"<p>ref 1: [ <a href="javascript:void(0);" onclick="javascript: window.open('/scielo.php?script=sci_nlinks&amp;ref=000129&amp;pid=S0001-3765200400030001400030&amp;lng=pt','','width=640,height=500,resizable=yes,scrollbars=1,menubar=yes,');">Links</a> ]</p><p>ref 2:    [ <a href="javascript:void(0);" onclick="javascript: window.open('/scielo.php?script=sci_nlinks&amp;ref=000129&amp;pid=S0001-3765200400030001400030&amp;lng=pt','','width=640,height=500,resizable=yes,scrollbars=1,menubar=yes,');">links</a> ]</p>"#;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(path).expect("fixture readable")
}

fn extract(html: &str, lang: &str) -> Option<String> {
    IndexSectionExtractor::new().extract_body(html, lang)
}

#[test]
fn flat_page_yields_section_children() {
    assert_eq!(
        extract(FLAT, "en").as_deref(),
        Some(r#"<div class="title">Crazy <i>Title</i></div><p>Crazy Body</p><p>Really Crazy Body</p>"#)
    );
}

#[test]
fn pretty_page_separates_blocks_with_one_space() {
    assert_eq!(
        extract(PRETTY, "en").as_deref(),
        Some(r#"<div class="title">Crazy <i>Title</i></div> <p>Crazy Body</p> <p>Really Crazy Body</p>"#)
    );
}

#[test]
fn pretty_and_flat_pages_match_the_same_content() {
    let pretty = extract(PRETTY, "en").unwrap();
    let flat = extract(FLAT, "en").unwrap();
    assert_eq!(pretty.replace("> <", "><"), flat);
}

#[test]
fn other_language_is_not_found() {
    assert_eq!(extract(FLAT, "pt"), None);
    assert_eq!(extract(FLAT, "EN"), None);
}

#[test]
fn empty_container_is_not_found() {
    let html = r#"<html><header></header><body><div class="content"></div></body></html>"#;
    assert_eq!(extract(html, "pt"), None);
}

#[test]
fn page_without_container_is_not_found() {
    let html = r#"<html><body><div class="index,en"><p>orphan</p></div></body></html>"#;
    for lang in ["en", "pt", "es"] {
        assert_eq!(extract(html, lang), None);
    }
}

#[test]
fn malformed_markup_degrades_to_not_found() {
    assert_eq!(extract("<div class=\"content\"><div class=\"index,e", "en"), None);
    assert_eq!(extract("", "en"), None);
    assert_eq!(extract("\u{0}<<>>&&", "en"), None);
}

#[test]
fn related_links_are_removed_case_insensitively() {
    assert_eq!(
        remove_related_links(TWO_LINKS),
        "<p>ref 1:  </p><p>ref 2:     </p>"
    );
}

#[test]
fn related_link_removal_is_idempotent() {
    let once = remove_related_links(TWO_LINKS).into_owned();
    assert_eq!(remove_related_links(&once), once);
}

#[test]
fn bilingual_article_picks_requested_language_and_strips_links() {
    let html = fixture("bilingual_article.html");

    let pt = extract(&html, "pt").unwrap();
    assert!(pt.starts_with(r#"<p class="title">On the one pot syntheses of <i>2H</i>-chromenes</p>"#));
    assert!(pt.contains("<i>Quim. Nova</i> <b>2004</b>, 27, 100."));
    assert!(pt.ends_with("<p>Web Release Date: November 26, 2009</p>"));
    assert!(!pt.contains("sci_nlinks"));
    assert!(!pt.contains("English abstract"));
    assert!(!pt.contains("Sociedade Brasileira"));

    let en = extract(&html, "en").unwrap();
    assert_eq!(
        en,
        r#"<p class="title">One pot syntheses of <i>2H</i>-chromenes</p> <p>English abstract.</p>"#
    );

    assert_eq!(extract(&html, "es"), None);
}

#[test]
fn legacy_template_uses_class_pair() {
    let html = fixture("legacy_template.html");
    let pt = extract(&html, "pt").unwrap();
    assert!(pt.starts_with(r#"<p align="center"><b>Molestia de Carlos Chagas</b></p>"#));
    assert!(pt.ends_with("<p>Full text available only in PDF format</p>"));
    assert_eq!(extract(&html, "en"), None);
}

#[test]
fn lang_attribute_marks_section() {
    let html = fixture("lang_attribute.html");
    assert_eq!(extract(&html, "es").as_deref(), Some("<p>Editorial</p>"));
    assert_eq!(
        extract(&html, "pt").as_deref(),
        Some("<p>Editorial</p> <p>Boa leitura!</p>")
    );
}

#[test]
fn custom_container_class_is_honoured() {
    let html = r#"<div class="article-body"><div class="index,pt"><p>x</p></div></div>"#;
    assert_eq!(extract(html, "pt"), None);
    let extractor = IndexSectionExtractor::with_container_class("article-body");
    assert_eq!(extractor.extract_body(html, "pt").as_deref(), Some("<p>x</p>"));
}
