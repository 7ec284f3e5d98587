//! Google Geocoding API backend
//!
//! Requires an API key. Docs: https://developers.google.com/maps/documentation/geocoding

use crate::config::Config;
use crate::coord::GeoPoint;
use crate::error::{Error, Result};
use crate::geo::http::{build_client, fetch_json, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

const PROVIDER: &str = "google";

/// Language used when the requested one is not a two-letter code
const FALLBACK_LANGUAGE: &str = "en";

/// A geocoding result from Google
///
/// Geocoding responses fill the address and geometry fields; the place detail
/// fields (opening hours, photos, reviews, ...) are only present when the same
/// shape comes back from the Places API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GooglePlace {
    pub geometry: Geometry,
    /// Textual identifier that uniquely identifies a place
    pub place_id: String,
    pub formatted_address: String,
    pub address_components: Vec<AddressComponent>,
    pub types: Vec<String>,
    /// True when the geocoder did not return an exact match
    pub partial_match: bool,
    pub name: String,
    pub icon: String,
    pub vicinity: String,
    pub adr_address: String,
    pub formatted_phone_number: String,
    pub international_phone_number: String,
    pub opening_hours: Option<OpeningHours>,
    pub photos: Vec<Photo>,
    pub reviews: Vec<Review>,
    pub rating: Option<f64>,
    /// 0 (free) to 4 (very expensive)
    pub price_level: Option<u8>,
    pub user_ratings_total: Option<u64>,
    /// Offset from UTC in minutes
    pub utc_offset: Option<i64>,
    pub permanently_closed: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl GooglePlace {
    pub fn coords(&self) -> GeoPoint {
        GeoPoint::new(self.geometry.location.lat, self.geometry.location.lng)
    }

    /// Long name of the first component carrying `kind` (e.g. "locality")
    pub fn component(&self, kind: &str) -> Option<&str> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
            .map(|c| c.long_name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub location: LatLng,
    /// ROOFTOP, RANGE_INTERPOLATED, GEOMETRIC_CENTER or APPROXIMATE
    pub location_type: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    pub open_now: bool,
    /// Seven formatted lines, one per day, localized to the request language
    pub weekday_text: Vec<String>,
    pub periods: Vec<Period>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    pub open: DayTime,
    pub close: Option<DayTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayTime {
    /// 0 (Sunday) to 6 (Saturday)
    pub day: u8,
    /// "hhmm", place-local time
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub height: u32,
    pub width: u32,
    pub html_attributions: Vec<String>,
    pub photo_reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub author_name: String,
    pub author_url: String,
    pub language: String,
    pub profile_photo_url: String,
    pub rating: u8,
    pub text: String,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub time: Option<DateTime<Utc>>,
}

/// Geocoding response envelope
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GooglePlace>,
    /// OK, ZERO_RESULTS, OVER_QUERY_LIMIT, REQUEST_DENIED, INVALID_REQUEST, UNKNOWN_ERROR
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

impl GeocodeResponse {
    fn into_results(self) -> Result<Vec<GooglePlace>> {
        if self.status != "OK" {
            let message = match self.error_message {
                Some(msg) if !msg.is_empty() => format!("{}: {} ({})", PROVIDER, self.status, msg),
                _ => format!("{}: {}", PROVIDER, self.status),
            };
            return Err(Error::Provider(message));
        }
        if self.results.is_empty() {
            return Err(Error::Provider(format!("{}: ZERO_RESULTS", PROVIDER)));
        }
        Ok(self.results)
    }
}

/// Google geocoding backend
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleGeocoder {
    /// Create a geocoder from config (endpoint, timeout, key)
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(&config.http.user_agent, config.http_timeout())?,
            base_url: config.endpoints.google.clone(),
            api_key: config.api_keys.google.clone(),
        })
    }

    /// Replace the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.set_api_key(api_key);
        self
    }

    /// Replace the API key in place
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Override the endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Two-letter language code, or the fallback
    fn language(lg: &str) -> &str {
        let lg = lg.trim();
        if lg.chars().count() == 2 {
            lg
        } else {
            FALLBACK_LANGUAGE
        }
    }

    fn geocode_url(&self, address: &str, language: &str, key: &str) -> String {
        format!(
            "{}?address={}&language={}&key={}",
            self.base_url,
            urlencoding::encode(address),
            Self::language(language),
            urlencoding::encode(key)
        )
    }

    /// Every result Google returns for `address`
    pub async fn geocode_all(&self, address: &str, language: &str) -> Result<Vec<GooglePlace>> {
        let address = require(address, "address")?;
        let key = require(&self.api_key, "Google API key")?;

        debug!(address, "geocoding with Google");
        let url = self.geocode_url(address, language, key);
        let response: GeocodeResponse = fetch_json(PROVIDER, self.client.get(&url)).await?;
        response.into_results()
    }

    /// Best result for `address`
    pub async fn geocode(&self, address: &str, language: &str) -> Result<GooglePlace> {
        let mut results = self.geocode_all(address, language).await?;
        // into_results guarantees at least one
        Ok(results.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "results": [{
            "address_components": [
                {"long_name": "24", "short_name": "24", "types": ["street_number"]},
                {"long_name": "Avenue Louise", "short_name": "Av. Louise", "types": ["route"]},
                {"long_name": "Bruxelles", "short_name": "Bruxelles", "types": ["locality", "political"]}
            ],
            "formatted_address": "Av. Louise 24, 1050 Bruxelles, Belgium",
            "geometry": {
                "location": {"lat": 50.8333, "lng": 4.3616},
                "location_type": "ROOFTOP"
            },
            "place_id": "ChIJ-abc",
            "types": ["street_address"]
        }],
        "status": "OK"
    }"#;

    fn geocoder() -> GoogleGeocoder {
        GoogleGeocoder::new(&Config::default())
            .unwrap()
            .with_base_url("http://localhost:9000/geocode/json")
    }

    #[test]
    fn test_language_fallback() {
        assert_eq!(GoogleGeocoder::language("fr"), "fr");
        assert_eq!(GoogleGeocoder::language(""), "en");
        assert_eq!(GoogleGeocoder::language("fra"), "en");
    }

    #[test]
    fn test_geocode_url() {
        let url = geocoder().geocode_url("Avenue Louise 24, Bruxelles", "fr", "k/1");
        assert_eq!(
            url,
            "http://localhost:9000/geocode/json?address=Avenue%20Louise%2024%2C%20Bruxelles&language=fr&key=k%2F1"
        );
    }

    #[test]
    fn test_parse_ok_response() {
        let response: GeocodeResponse = serde_json::from_str(SAMPLE).unwrap();
        let results = response.into_results().unwrap();

        let place = &results[0];
        assert_eq!(place.place_id, "ChIJ-abc");
        assert_eq!(place.coords(), GeoPoint::new(50.8333, 4.3616));
        assert_eq!(place.geometry.location_type, "ROOFTOP");
        assert_eq!(place.component("locality"), Some("Bruxelles"));
        assert_eq!(place.component("country"), None);
        assert!(place.opening_hours.is_none());
        assert!(!place.partial_match);
    }

    #[test]
    fn test_status_not_ok_is_provider_error() {
        let response: GeocodeResponse = serde_json::from_str(
            r#"{"results": [], "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#,
        )
        .unwrap();

        match response.into_results() {
            Err(Error::Provider(msg)) => {
                assert_eq!(msg, "google: REQUEST_DENIED (The provided API key is invalid.)")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_ok_without_results_is_zero_results() {
        let response: GeocodeResponse =
            serde_json::from_str(r#"{"results": [], "status": "OK"}"#).unwrap();
        assert!(matches!(response.into_results(), Err(Error::Provider(msg)) if msg.ends_with("ZERO_RESULTS")));
    }

    #[test]
    fn test_review_time_is_unix_seconds() {
        let review: Review = serde_json::from_str(
            r#"{"author_name": "A", "rating": 5, "text": "Great", "time": 1700000000}"#,
        )
        .unwrap();
        assert_eq!(review.time.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_place_details_fields() {
        let place: GooglePlace = serde_json::from_str(
            r#"{
                "name": "Town in Town",
                "opening_hours": {
                    "open_now": true,
                    "periods": [{"open": {"day": 1, "time": "0900"}, "close": {"day": 1, "time": "1700"}}],
                    "weekday_text": ["Monday: 9:00 AM – 5:00 PM"]
                },
                "price_level": 2,
                "rating": 4.3,
                "utc_offset": 420
            }"#,
        )
        .unwrap();

        let hours = place.opening_hours.unwrap();
        assert!(hours.open_now);
        assert_eq!(hours.periods[0].open.time, "0900");
        assert_eq!(hours.periods[0].close.as_ref().unwrap().day, 1);
        assert_eq!(place.price_level, Some(2));
        assert_eq!(place.utc_offset, Some(420));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let result = geocoder().geocode("Avenue Louise 24", "en").await;
        assert!(matches!(result, Err(Error::Missing(what)) if what == "Google API key"));
    }

    #[tokio::test]
    async fn test_missing_address_fails_before_request() {
        let result = geocoder().with_api_key("k").geocode("  ", "en").await;
        assert!(matches!(result, Err(Error::Missing(what)) if what == "address"));
    }
}
