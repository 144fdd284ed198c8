//! Deterministic cache-key derivation from a request's URL and query params.

use url::form_urlencoded;

/// Derive the cache fingerprint for a GET request.
///
/// With no params the key is the URL unchanged. Otherwise params are
/// sorted by name (a stable sort, so repeated names keep their relative
/// order) and appended as a form-urlencoded query string. Identical
/// inputs always produce the identical key regardless of the order the
/// params were supplied in.
pub fn request_cache_key(url: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }

    let mut sorted: Vec<(&str, &str)> = params.to_vec();
    sorted.sort_by_key(|(name, _)| *name);

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(sorted)
        .finish();

    format!("{}?{}", url, query)
}
