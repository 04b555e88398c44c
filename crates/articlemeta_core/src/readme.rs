/// Archive entry holding the dump description.
pub const README_ENTRY: &str = "README.txt";

/// Directory for the supplementary schema inside the archive.
pub const SCHEMA_DIR: &str = "schema";

pub const DEFAULT_README_TEMPLATE: &str = include_str!("../templates/dumparticle_readme.txt");

/// Template verbatim, then a CRLF and the harvest timestamp line.
pub fn render_readme(template: &str, updated_at: &str) -> String {
    format!("{template}\r\n* Documents updated at: {updated_at}\r\n")
}

/// Entry name for a schema downloaded from `schema_url`.
///
/// Uses the last path segment of the URL, ignoring any query or fragment.
pub fn schema_entry_name(schema_url: &str) -> Option<String> {
    let path = schema_url.split(['?', '#']).next().unwrap_or(schema_url);
    let file_name = path.rsplit('/').next()?.trim();
    if file_name.is_empty() || file_name.contains(':') {
        return None;
    }
    Some(format!("{SCHEMA_DIR}/{file_name}"))
}
