//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for reverse and forward geocoding.
//! Usage policy: at most 1 request per second and an identifying User-Agent.
//! Every request waits the configured delay before it is sent.

use crate::config::Config;
use crate::coord::GeoPoint;
use crate::error::{Error, Result};
use crate::geo::de::{f64_from_any, string_from_any};
use crate::geo::http::{build_client, fetch_json};
use crate::geo::{ForwardGeocoder, ReverseGeocoder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const PROVIDER: &str = "nominatim";

/// Reverse geocoding result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nominatim {
    pub display_name: String,
    pub address: Option<Address>,
}

/// Structured address
///
/// Returned by reverse lookups and used as the query for structured search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// ISO 3166-1 alpha-2 country code (lowercase from Nominatim)
    #[serde(rename = "country_code", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(rename = "state", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_road(mut self, road: impl Into<String>) -> Self {
        self.road = Some(road.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Structured-search query parameters for the non-empty fields
    fn query_params(&self) -> Vec<(&'static str, &str)> {
        [
            ("street", &self.road),
            ("city", &self.city),
            ("state", &self.region),
            ("postalcode", &self.postcode),
            ("countrycodes", &self.country),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v))
        })
        .collect()
    }
}

/// Forward geocoding candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(deserialize_with = "f64_from_any")]
    pub lat: f64,
    #[serde(deserialize_with = "f64_from_any")]
    pub lon: f64,
    #[serde(default, deserialize_with = "string_from_any")]
    pub place_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub class: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub importance: f64,
    #[serde(default)]
    pub osm_type: String,
}

impl Place {
    pub fn coords(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// Raw reverse response; Nominatim reports misses as `{"error": "..."}` with 200
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    address: Option<Address>,
}

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    delay: Duration,
}

impl NominatimClient {
    /// Create a client from config (base URL, delay, timeout, User-Agent)
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(&config.http.user_agent, config.nominatim_timeout())?,
            base_url: config.nominatim.url.trim_end_matches('/').to_string(),
            delay: config.nominatim_delay(),
        })
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the delay before each request
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Delay applied before each request
    pub fn request_delay(&self) -> Duration {
        self.delay
    }

    async fn wait(&self) {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "waiting for Nominatim rate limit");
            tokio::time::sleep(self.delay).await;
        }
    }

    fn reverse_url(&self, lat: f64, lng: f64) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom=18&addressdetails=1",
            self.base_url, lat, lng
        )
    }

    fn search_url(&self, address: &Address) -> Result<String> {
        let params = address.query_params();
        if params.is_empty() {
            return Err(Error::Missing("address fields".to_string()));
        }

        let query = params
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}/search?format=json&{}", self.base_url, query))
    }

    fn search_text_url(&self, query: &str) -> String {
        format!(
            "{}/search?format=json&q={}",
            self.base_url,
            urlencoding::encode(query.trim())
        )
    }

    /// Address for the given coordinates
    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<Nominatim> {
        let url = self.reverse_url(lat, lng);
        self.wait().await;

        let response: ReverseResponse = fetch_json(PROVIDER, self.client.get(&url)).await?;

        if let Some(error) = response.error {
            return Err(Error::Provider(format!("{}: {}", PROVIDER, error)));
        }

        Ok(Nominatim {
            display_name: response.display_name,
            address: response.address,
        })
    }

    /// Candidate places for a structured address, best match first
    pub async fn search(&self, address: &Address) -> Result<Vec<Place>> {
        let url = self.search_url(address)?;
        self.wait().await;
        fetch_json(PROVIDER, self.client.get(&url)).await
    }

    /// Candidate places for a free-text query, best match first
    pub async fn search_text(&self, query: &str) -> Result<Vec<Place>> {
        if query.trim().is_empty() {
            return Err(Error::Missing("search query".to_string()));
        }
        let url = self.search_text_url(query);
        self.wait().await;
        fetch_json(PROVIDER, self.client.get(&url)).await
    }

    /// Coordinates of the best match for `address`, if any
    pub async fn geolocate(&self, address: &Address) -> Result<Option<GeoPoint>> {
        let places = NominatimClient::search(self, address).await?;
        Ok(places.first().map(Place::coords))
    }
}

impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, lat: f64, lng: f64) -> Result<Nominatim> {
        NominatimClient::reverse(self, lat, lng).await
    }
}

impl ForwardGeocoder for NominatimClient {
    async fn search(&self, address: &Address) -> Result<Vec<Place>> {
        NominatimClient::search(self, address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> NominatimClient {
        NominatimClient::new(&Config::default())
            .unwrap()
            .with_base_url("http://localhost:8080/")
    }

    #[test]
    fn test_defaults_from_config() {
        let client = NominatimClient::new(&Config::default()).unwrap();
        assert_eq!(client.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(client.request_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_reverse_url() {
        assert_eq!(
            client().reverse_url(13.7665269, 100.6068431),
            "http://localhost:8080/reverse?format=json&lat=13.7665269&lon=100.6068431&zoom=18&addressdetails=1"
        );
    }

    #[test]
    fn test_search_url_encodes_and_skips_empty_fields() {
        let address = Address::new()
            .with_city("Bangkok")
            .with_road("Latprao 94, Town in Town")
            .with_postcode("10310")
            .with_region("");

        assert_eq!(
            client().search_url(&address).unwrap(),
            "http://localhost:8080/search?format=json&street=Latprao%2094%2C%20Town%20in%20Town&city=Bangkok&postalcode=10310"
        );
    }

    #[test]
    fn test_search_url_requires_a_field() {
        let address = Address::new().with_city("   ");
        assert!(matches!(client().search_url(&address), Err(Error::Missing(_))));
    }

    #[test]
    fn test_search_text_url() {
        assert_eq!(
            client().search_text_url(" Avenue Louise 24, Bruxelles "),
            "http://localhost:8080/search?format=json&q=Avenue%20Louise%2024%2C%20Bruxelles"
        );
    }

    #[test]
    fn test_place_from_nominatim_json() {
        let json = r#"{
            "place_id": 282601,
            "licence": "Data © OpenStreetMap contributors",
            "osm_type": "way",
            "osm_id": 123,
            "lat": "13.7665269",
            "lon": "100.6068431",
            "display_name": "Town in Town, Bangkok, Thailand",
            "class": "place",
            "type": "neighbourhood",
            "importance": 0.35
        }"#;

        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.place_id, "282601");
        assert_eq!(place.coords(), GeoPoint::new(13.7665269, 100.6068431));
        assert_eq!(place.kind, "neighbourhood");
        assert_eq!(place.osm_type, "way");
        assert!((place.importance - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_reverse_response_with_address() {
        let json = r#"{
            "display_name": "Soi Lat Phrao 94, Bangkok 10310, Thailand",
            "address": {
                "road": "Soi Lat Phrao 94",
                "city": "Bangkok",
                "state": "Bangkok",
                "postcode": "10310",
                "country": "Thailand",
                "country_code": "th"
            }
        }"#;

        let response: ReverseResponse = serde_json::from_str(json).unwrap();
        assert!(response.error.is_none());
        let address = response.address.unwrap();
        assert_eq!(address.country.as_deref(), Some("th"));
        assert_eq!(address.region.as_deref(), Some("Bangkok"));
        assert_eq!(address.postcode.as_deref(), Some("10310"));
    }

    #[test]
    fn test_reverse_error_payload() {
        let response: ReverseResponse =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert_eq!(response.error.as_deref(), Some("Unable to geocode"));
    }

    #[test]
    fn test_address_serializes_provider_names() {
        let address = Address::new().with_country("be").with_region("Brabant wallon");
        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(json["country_code"], "be");
        assert_eq!(json["state"], "Brabant wallon");
        assert!(json.get("road").is_none());
    }
}
