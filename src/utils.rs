use std::path::Path;
use time::OffsetDateTime;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace("&", "&amp;")
        .replace("<", "&lt;")
        .replace(">", "&gt;")
        .replace("\"", "&quot;")
        .replace("'", "&#39;")
}

/// Escape HTML attribute values
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
}

/// Format a file's mtime as RFC 3339, for listing metadata
pub fn modified_rfc3339(path: &Path) -> Option<String> {
    let mtime = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
    let dur = mtime.duration_since(std::time::UNIX_EPOCH).ok()?;
    let datetime = OffsetDateTime::from_unix_timestamp(dur.as_secs() as i64).ok()?;
    let fmt = time::format_description::well_known::Rfc3339;
    datetime.format(&fmt).ok()
}
