/// Path prefixes the gate never sees: API routes and built static assets.
const UNGATED_PREFIXES: &[&str] = &["/api", "/_next/static", "/_next/image", "/static"];

const FAVICON: &str = "/favicon.ico";

/// Whether the access gate applies to `path`.
pub fn is_gated_path(path: &str) -> bool {
    let path = strip_query(path);
    if path == FAVICON {
        return false;
    }
    !UNGATED_PREFIXES
        .iter()
        .any(|prefix| matches_prefix(path, prefix))
}

/// Segment-aware prefix match: `/admin` matches `/admin` and `/admin/x`,
/// not `/administrators`.
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    let path = strip_query(path);
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}
