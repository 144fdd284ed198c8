//! Header factories for the two upstream services: the weather API
//! (api.weather.gov, which wants `application/geo+json` and a contact
//! User-Agent) and the geocoder (plain JSON, English results).

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

const DEFAULT_USER_AGENT: &str = "(wxdash.dev, contact@wxdash.dev)";

/// Environment variable overriding the outbound User-Agent string.
pub const USER_AGENT_ENV: &str = "WEATHER_GOV_USER_AGENT";

fn user_agent_value() -> HeaderValue {
    let configured =
        std::env::var(USER_AGENT_ENV).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
    // An override with invalid header characters falls back to the default.
    HeaderValue::from_str(&configured).unwrap_or_else(|_| {
        tracing::warn!("{} contains invalid header characters, using default", USER_AGENT_ENV);
        HeaderValue::from_static(DEFAULT_USER_AGENT)
    })
}

/// Headers for api.weather.gov requests.
pub fn weather_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, user_agent_value());
    headers.insert(ACCEPT, HeaderValue::from_static("application/geo+json"));
    headers
}

/// Headers for geocoder requests.
pub fn geocoder_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, user_agent_value());
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en"));
    headers
}
