//! Centralized constants for the geo-lookup crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Earth radius in meters used by the distance calculation
    pub const EARTH_RADIUS_METERS: f64 = 6_378_100.0;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Google Geocoding API
    pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

    /// ipstack IP geolocation API (free tier is plain HTTP only)
    pub const IPSTACK_URL: &str = "http://api.ipstack.com";

    /// ipapi.co IP geolocation API
    pub const IPAPI_URL: &str = "https://ipapi.co";

    /// RapidAPI host for the apility.io IP geolocation endpoint
    pub const RAPIDAPI_HOST: &str = "apility-io-ip-geolocation-v1.p.rapidapi.com";

    /// RapidAPI apility.io IP geolocation endpoint
    pub const RAPIDAPI_URL: &str = "https://apility-io-ip-geolocation-v1.p.rapidapi.com";
}

/// HTTP behaviour
pub mod http {
    /// Delay before every Nominatim request (usage policy: 1 request/second)
    pub const NOMINATIM_DELAY_MS: u64 = 1000;

    /// Nominatim request timeout
    pub const NOMINATIM_TIMEOUT_SECS: u64 = 10;

    /// ipstack request timeout
    pub const IPSTACK_TIMEOUT_SECS: u64 = 5;

    /// Timeout for every other provider
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
}
