//! ipapi.co IP geolocation backend
//!
//! No key required. Docs: https://ipapi.co/api/

use crate::config::Config;
use crate::coord::GeoPoint;
use crate::error::{Error, Result};
use crate::geo::de::{opt_f64_from_any, opt_string_from_any};
use crate::geo::http::{build_client, fetch_json, require};
use crate::geo::{IpGeolocator, IpLocation};
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "ipapi";

/// ipapi.co lookup result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpApiLocation {
    pub ip: String,
    pub network: Option<String>,
    /// "IPv4" or "IPv6"
    pub version: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub region_code: Option<String>,
    pub country_code: Option<String>,
    pub country_code_iso3: Option<String>,
    pub country_name: Option<String>,
    pub country_capital: Option<String>,
    pub country_tld: Option<String>,
    pub continent_code: Option<String>,
    pub in_eu: Option<bool>,
    #[serde(deserialize_with = "opt_string_from_any")]
    pub postal: Option<String>,
    #[serde(deserialize_with = "opt_f64_from_any")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "opt_f64_from_any")]
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    /// e.g. "+0700"
    pub utc_offset: Option<String>,
    pub country_calling_code: Option<String>,
    pub currency: Option<String>,
    pub currency_name: Option<String>,
    /// Comma-separated language tags
    pub languages: Option<String>,
    #[serde(deserialize_with = "opt_f64_from_any")]
    pub country_area: Option<f64>,
    #[serde(deserialize_with = "opt_f64_from_any")]
    pub country_population: Option<f64>,
    pub asn: Option<String>,
    pub org: Option<String>,
}

impl From<IpApiLocation> for IpLocation {
    fn from(loc: IpApiLocation) -> Self {
        let coords = match (loc.latitude, loc.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };

        IpLocation {
            ip: loc.ip,
            country_code: loc.country_code,
            country_name: loc.country_name,
            region: loc.region,
            city: loc.city,
            coords,
            timezone: loc.timezone,
            provider: PROVIDER.to_string(),
        }
    }
}

/// `{"error": true, "reason": "..."}` bodies, sent for reserved or invalid addresses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
    message: Option<String>,
}

impl ErrorEnvelope {
    fn into_error(self) -> Option<Error> {
        if !self.error {
            return None;
        }
        let reason = self.reason.unwrap_or_else(|| "unknown error".to_string());
        Some(Error::Provider(match self.message {
            Some(message) => format!("{}: {} ({})", PROVIDER, reason, message),
            None => format!("{}: {}", PROVIDER, reason),
        }))
    }
}

/// ipapi.co backend
#[derive(Debug, Clone)]
pub struct IpApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl IpApiClient {
    /// Create a client from config (endpoint, timeout)
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(&config.http.user_agent, config.http_timeout())?,
            base_url: config.endpoints.ipapi.trim_end_matches('/').to_string(),
        })
    }

    /// Override the endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn lookup_url(&self, ip: Option<&str>) -> String {
        match ip {
            Some(ip) => format!("{}/{}/json/", self.base_url, urlencoding::encode(ip)),
            None => format!("{}/json/", self.base_url),
        }
    }

    async fn fetch(&self, url: &str) -> Result<IpApiLocation> {
        let body: serde_json::Value = fetch_json(PROVIDER, self.client.get(url)).await?;

        if let Ok(envelope) = serde_json::from_value::<ErrorEnvelope>(body.clone()) {
            if let Some(err) = envelope.into_error() {
                return Err(err);
            }
        }

        serde_json::from_value(body).map_err(|source| Error::Decode {
            provider: PROVIDER,
            source,
        })
    }

    /// Full ipapi.co record for `ip`
    pub async fn locate_ip(&self, ip: &str) -> Result<IpApiLocation> {
        let ip = require(ip, "IP address")?;
        self.fetch(&self.lookup_url(Some(ip))).await
    }

    /// Record for the caller's own public address
    pub async fn locate_self(&self) -> Result<IpApiLocation> {
        self.fetch(&self.lookup_url(None)).await
    }
}

impl IpGeolocator for IpApiClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn locate(&self, ip: &str) -> Result<IpLocation> {
        Ok(self.locate_ip(ip).await?.into())
    }
}
