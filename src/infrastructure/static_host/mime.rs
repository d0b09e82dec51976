use std::path::Path;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const CONTENT_TYPES: [(&str, &str); 7] = [
    ("html", "text/html"),
    ("js", "text/javascript"),
    ("css", "text/css"),
    ("json", "application/json"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("ico", "image/x-icon"),
];

/// Content type by file extension. Extensions are matched case-sensitively.
pub fn content_type(path: &Path) -> &'static str {
    let ext = match path.extension().and_then(|ext| return ext.to_str()) {
        Some(ext) => ext,
        None => return DEFAULT_CONTENT_TYPE,
    };

    return CONTENT_TYPES
        .iter()
        .find(|(known, _)| return *known == ext)
        .map(|(_, content_type)| return *content_type)
        .unwrap_or(DEFAULT_CONTENT_TYPE);
}
