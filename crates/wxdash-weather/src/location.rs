//! Location key helpers: coordinate-derived alias keys, canonical
//! "City, State" keys, and per-location cache group naming.

/// Format a coordinate pair as a stable alias key: `coord:<lat>,<lon>`
/// with four decimal places on each axis.
///
/// Inputs arrive as strings from query parameters; anything that does
/// not parse to a finite float yields `None`, which callers treat as
/// "cannot alias this request".
pub fn format_coordinate_alias(lat: &str, lon: &str) -> Option<String> {
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }
    Some(format!("coord:{:.4},{:.4}", lat, lon))
}

/// Build the canonical location key from a city and state, e.g.
/// "Los Angeles, CA". Returns `None` if either part is missing.
pub fn canonical_location_key(city: &str, state: &str) -> Option<String> {
    let city = city.trim();
    let state = state.trim();
    if city.is_empty() || state.is_empty() {
        return None;
    }
    Some(format!("{}, {}", city, state))
}

/// Name of the cache group holding entries for a location.
///
/// An empty key falls back to the shared "default" group.
pub fn location_group(location_key: &str) -> String {
    if location_key.is_empty() {
        "default".to_string()
    } else {
        format!("loc:{}", location_key)
    }
}
