use articlemeta_engine::decode_text;
use pretty_assertions::assert_eq;

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_text(bytes, Some("text/xml; charset=ISO-8859-1"));
    assert_eq!(decoded.text, "café");
    assert!(
        decoded.encoding_label.eq_ignore_ascii_case("ISO-8859-1")
            || decoded.encoding_label.eq_ignore_ascii_case("windows-1252")
    );
    assert!(!decoded.had_errors);
}

#[test]
fn decode_handles_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_text(bytes, Some("text/xml"));
    assert_eq!(decoded.text, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_uses_xml_declaration_without_header() {
    let bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><t>a\xe7\xe3o</t>";
    let decoded = decode_text(bytes, None);
    assert_eq!(
        decoded.text,
        "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><t>ação</t>"
    );
}

#[test]
fn invalid_utf8_is_replaced_and_flagged() {
    let bytes = b"<t>\xff\xfe broken</t>";
    let decoded = decode_text(bytes, Some("text/xml; charset=utf-8"));
    assert!(decoded.had_errors);
    assert!(decoded.text.contains('\u{FFFD}'));
    assert!(decoded.text.ends_with(" broken</t>"));
}
