//! End-to-end tests of the public fetch-through API against a mock
//! upstream: cache reuse within TTL, group clearing, and the alias
//! registry working alongside the fetch path.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wxdash_weather::{
    canonical_location_key, format_coordinate_alias, location_group, weather_headers, CacheStore,
    CachedClient, FetchOptions,
};

#[tokio::test]
async fn test_points_request_is_fetched_once_within_ttl() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/points/34.05,-118.25"))
        .and(header("Accept", "application/geo+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "properties": {
                "gridId": "LOX",
                "relativeLocation": {
                    "properties": {"city": "Los Angeles", "state": "CA"}
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(CacheStore::new());
    let client = CachedClient::new(Arc::clone(&store)).unwrap();
    let url = format!("{}/points/34.05,-118.25", mock_server.uri());
    let opts = FetchOptions::default();

    let first = client
        .get_json(&url, &weather_headers(), &[], &opts)
        .await
        .unwrap();
    let second = client
        .get_json(&url, &weather_headers(), &[], &opts)
        .await
        .unwrap();
    assert_eq!(first, second);

    // The response is cached under the bare URL (no params).
    assert_eq!(store.get("default", &url), Some(first.clone()));

    // Register the coordinate alias for the location the API resolved.
    let city = first["properties"]["relativeLocation"]["properties"]["city"]
        .as_str()
        .unwrap();
    let state = first["properties"]["relativeLocation"]["properties"]["state"]
        .as_str()
        .unwrap();
    let canonical = canonical_location_key(city, state).unwrap();
    let alias = format_coordinate_alias("34.05", "-118.25").unwrap();
    store.register_alias(&alias, &canonical);

    assert_eq!(
        store.resolve_alias("coord:34.0500,-118.2500").as_deref(),
        Some("Los Angeles, CA")
    );
}

#[tokio::test]
async fn test_clearing_a_location_group_forces_a_refetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gridpoints/LOX/154,44/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"periods": []})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let store = Arc::new(CacheStore::new());
    let client = CachedClient::new(Arc::clone(&store)).unwrap();
    let url = format!("{}/gridpoints/LOX/154,44/forecast", mock_server.uri());
    let opts = FetchOptions::for_group(location_group("Los Angeles, CA"));

    client
        .get_json(&url, &weather_headers(), &[], &opts)
        .await
        .unwrap();
    store.clear_for_location("Los Angeles, CA");
    client
        .get_json(&url, &weather_headers(), &[], &opts)
        .await
        .unwrap();
}
