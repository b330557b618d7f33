//! URI helpers for `base` filter values.

/// Checks whether the given URI points into the local music library.
///
/// Such a URI is relative (no leading slash), non-empty, and contains no
/// empty, `.` or `..` path segments. A trailing slash produces an empty last
/// segment and is therefore rejected as well.
pub fn uri_safe_local(uri: &str) -> bool {
    uri.split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}
