//! Relative path normalization for model-supplied and archive file names.

/// Normalize `raw` into a clean relative path, or `""` when it is invalid.
///
/// Surrounding whitespace is trimmed, backslashes become forward slashes,
/// and empty or `.` segments are dropped. A `..` segment anywhere makes the
/// whole path invalid. Never panics; callers check for emptiness.
pub fn sanitize_path(raw: &str) -> String {
    let normalized = raw.trim().replace('\\', "/");
    let mut segments = Vec::new();

    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => return String::new(),
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// [`sanitize_path`] returning `None` for invalid input.
pub fn try_sanitize_path(raw: &str) -> Option<String> {
    let clean = sanitize_path(raw);
    (!clean.is_empty()).then_some(clean)
}
