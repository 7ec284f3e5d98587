//! apility.io IP geolocation over RapidAPI
//!
//! Requires a RapidAPI key: https://rapidapi.com/apility.io/api/ip-geolocation

use crate::config::Config;
use crate::coord::GeoPoint;
use crate::error::Result;
use crate::geo::de::{opt_f64_from_any, opt_string_from_any};
use crate::geo::http::{build_client, fetch_json, require};
use crate::geo::{IpGeolocator, IpLocation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const PROVIDER: &str = "rapidapi";

/// apility.io lookup result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApilityLocation {
    pub ip: ApilityIp,
}

/// Geolocation block for one address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApilityIp {
    pub address: String,
    pub hostname: Option<String>,
    /// Continent code, e.g. "EU"
    pub continent: Option<String>,
    /// ISO country code
    pub country: Option<String>,
    /// Region code
    pub region: Option<String>,
    pub city: Option<String>,
    #[serde(deserialize_with = "opt_string_from_any")]
    pub postal: Option<String>,
    #[serde(deserialize_with = "opt_f64_from_any")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "opt_f64_from_any")]
    pub longitude: Option<f64>,
    pub time_zone: Option<String>,
    /// Kilometers
    pub accuracy_radius: Option<u32>,
    /// Localized names keyed by language code
    pub continent_names: HashMap<String, String>,
    pub country_names: HashMap<String, String>,
    pub region_names: HashMap<String, String>,
    pub city_names: HashMap<String, String>,
    #[serde(rename = "asystem")]
    pub autonomous_system: Option<AutonomousSystem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutonomousSystem {
    #[serde(deserialize_with = "opt_string_from_any")]
    pub asn: Option<String>,
    pub name: Option<String>,
}

impl ApilityIp {
    /// English name from a localized map, falling back to `code`
    fn english(names: &HashMap<String, String>, code: &Option<String>) -> Option<String> {
        names.get("en").cloned().or_else(|| code.clone())
    }
}

impl From<ApilityLocation> for IpLocation {
    fn from(loc: ApilityLocation) -> Self {
        let ip = loc.ip;
        let coords = match (ip.latitude, ip.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };

        IpLocation {
            country_name: ApilityIp::english(&ip.country_names, &ip.country),
            region: ApilityIp::english(&ip.region_names, &ip.region),
            city: ApilityIp::english(&ip.city_names, &ip.city),
            country_code: ip.country,
            coords,
            timezone: ip.time_zone,
            ip: ip.address,
            provider: PROVIDER.to_string(),
        }
    }
}

/// RapidAPI backend
#[derive(Debug, Clone)]
pub struct RapidApiClient {
    client: reqwest::Client,
    base_url: String,
    host: String,
    api_key: String,
}

impl RapidApiClient {
    /// Create a client from config (endpoint, host header, timeout, key)
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(&config.http.user_agent, config.http_timeout())?,
            base_url: config.endpoints.rapidapi.trim_end_matches('/').to_string(),
            host: config.endpoints.rapidapi_host.clone(),
            api_key: config.api_keys.rapidapi.clone(),
        })
    }

    /// Replace the RapidAPI key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.set_api_key(api_key);
        self
    }

    /// Replace the RapidAPI key in place
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Override the endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Full apility.io record for `ip`
    pub async fn locate_ip(&self, ip: &str) -> Result<ApilityLocation> {
        let ip = require(ip, "IP address")?;
        let key = require(&self.api_key, "RapidAPI key")?;

        let url = format!("{}/{}", self.base_url, urlencoding::encode(ip));
        let request = self
            .client
            .get(&url)
            .header("x-rapidapi-host", &self.host)
            .header("x-rapidapi-key", key)
            .header(reqwest::header::ACCEPT, "application/json");

        fetch_json(PROVIDER, request).await
    }
}

impl IpGeolocator for RapidApiClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn locate(&self, ip: &str) -> Result<IpLocation> {
        Ok(self.locate_ip(ip).await?.into())
    }
}
