//! Cached weather/geocoding fetch layer for the wxdash backend
//!
//! Wraps outbound JSON GETs to the weather and geocoding APIs with an
//! in-memory, grouped, TTL-bounded cache that fully resets on calendar-day
//! rollover. Also tracks an in-session registry of location aliases
//! (coordinates, zip codes) mapped to canonical "City, State" keys.

pub mod error;
pub mod fetch;
pub mod headers;
pub mod keys;
pub mod location;
pub mod store;

pub use error::FetchError;
pub use fetch::{CachedClient, FetchOptions};
pub use headers::{geocoder_headers, weather_headers};
pub use keys::request_cache_key;
pub use location::{canonical_location_key, format_coordinate_alias, location_group};
pub use store::CacheStore;
