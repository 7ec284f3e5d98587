//! ipstack IP geolocation backend
//!
//! Requires an access key: https://ipstack.com/quickstart
//! Errors come back as HTTP 200 with `{"success": false, "error": {...}}`.

use crate::config::Config;
use crate::coord::GeoPoint;
use crate::error::{Error, Result};
use crate::geo::de::{opt_f64_from_any, opt_string_from_any};
use crate::geo::http::{build_client, fetch_json, require};
use crate::geo::{IpGeolocator, IpLocation};
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "ipstack";

/// ipstack lookup result
///
/// Most fields are `null` for private or unknown addresses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpStackLocation {
    pub ip: String,
    /// "ipv4" or "ipv6"
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub continent_code: Option<String>,
    pub continent_name: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub region_code: Option<String>,
    pub region_name: Option<String>,
    pub city: Option<String>,
    #[serde(deserialize_with = "opt_string_from_any")]
    pub zip: Option<String>,
    #[serde(deserialize_with = "opt_f64_from_any")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "opt_f64_from_any")]
    pub longitude: Option<f64>,
    pub location: Option<IpStackCountryInfo>,
    /// Only on paid plans
    pub time_zone: Option<IpStackTimeZone>,
}

/// Country details block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpStackCountryInfo {
    pub geoname_id: Option<u64>,
    pub capital: Option<String>,
    pub languages: Vec<Language>,
    pub country_flag: Option<String>,
    pub country_flag_emoji: Option<String>,
    pub country_flag_emoji_unicode: Option<String>,
    pub calling_code: Option<String>,
    pub is_eu: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub native: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpStackTimeZone {
    pub id: Option<String>,
    pub code: Option<String>,
    pub gmt_offset: Option<i64>,
    pub is_daylight_saving: Option<bool>,
}

impl From<IpStackLocation> for IpLocation {
    fn from(loc: IpStackLocation) -> Self {
        let coords = match (loc.latitude, loc.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };

        IpLocation {
            ip: loc.ip,
            country_code: loc.country_code,
            country_name: loc.country_name,
            region: loc.region_name,
            city: loc.city,
            coords,
            timezone: loc.time_zone.and_then(|tz| tz.id),
            provider: PROVIDER.to_string(),
        }
    }
}

/// Error envelope
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    success: Option<bool>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    info: Option<String>,
}

impl ErrorEnvelope {
    fn into_error(self) -> Option<Error> {
        if self.success != Some(false) && self.error.is_none() {
            return None;
        }
        let body = self.error?;
        let detail = body
            .info
            .or(body.kind)
            .unwrap_or_else(|| "unknown error".to_string());
        Some(Error::Provider(match body.code {
            Some(code) => format!("{}: {} (code {})", PROVIDER, detail, code),
            None => format!("{}: {}", PROVIDER, detail),
        }))
    }
}

/// ipstack backend
#[derive(Debug, Clone)]
pub struct IpStackClient {
    client: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl IpStackClient {
    /// Create a client from config (endpoint, 5 s timeout, access key)
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(&config.http.user_agent, config.ipstack_timeout())?,
            base_url: config.endpoints.ipstack.trim_end_matches('/').to_string(),
            access_key: config.api_keys.ipstack.clone(),
        })
    }

    /// Replace the access key
    pub fn with_api_key(mut self, access_key: impl Into<String>) -> Self {
        self.set_api_key(access_key);
        self
    }

    /// Replace the access key in place
    pub fn set_api_key(&mut self, access_key: impl Into<String>) {
        self.access_key = access_key.into();
    }

    /// Override the endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn lookup_url(&self, ip: &str, key: &str) -> String {
        format!(
            "{}/{}?access_key={}",
            self.base_url,
            urlencoding::encode(ip),
            urlencoding::encode(key)
        )
    }

    /// Full ipstack record for `ip`
    pub async fn locate_ip(&self, ip: &str) -> Result<IpStackLocation> {
        let ip = require(ip, "IP address")?;
        let key = require(&self.access_key, "ipstack API key")?;

        let url = self.lookup_url(ip, key);
        let body: serde_json::Value = fetch_json(PROVIDER, self.client.get(&url)).await?;

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
}

impl IpGeolocator for IpStackClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn locate(&self, ip: &str) -> Result<IpLocation> {
        Ok(self.locate_ip(ip).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "ip": "134.201.250.155",
        "type": "ipv4",
        "continent_code": "NA",
        "continent_name": "North America",
        "country_code": "US",
        "country_name": "United States",
        "region_code": "CA",
        "region_name": "California",
        "city": "Los Angeles",
        "zip": "90013",
        "latitude": 34.0453,
        "longitude": -118.2413,
        "location": {
            "geoname_id": 5368361,
            "capital": "Washington D.C.",
            "languages": [{"code": "en", "name": "English", "native": "English"}],
            "country_flag": "https://assets.ipstack.com/images/assets/flags_svg/us.svg",
            "country_flag_emoji": "🇺🇸",
            "country_flag_emoji_unicode": "U+1F1FA U+1F1F8",
            "calling_code": "1",
            "is_eu": false
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let loc: IpStackLocation = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(loc.kind.as_deref(), Some("ipv4"));
        assert_eq!(loc.latitude, Some(34.0453));
        let info = loc.location.as_ref().unwrap();
        assert_eq!(info.geoname_id, Some(5368361));
        assert_eq!(info.languages[0].code, "en");
        assert_eq!(info.is_eu, Some(false));
    }

    #[test]
    fn test_private_address_nulls() {
        let loc: IpStackLocation = serde_json::from_str(
            r#"{"ip": "10.8.2.1", "type": "ipv4", "continent_code": null, "city": null,
                "zip": null, "latitude": 0, "longitude": 0, "location": {"geoname_id": null, "languages": []}}"#,
        )
        .unwrap();
        assert_eq!(loc.city, None);
        assert_eq!(loc.latitude, Some(0.0));
        assert_eq!(loc.location.unwrap().geoname_id, None);
    }

    #[test]
    fn test_into_ip_location() {
        let loc: IpStackLocation = serde_json::from_str(SAMPLE).unwrap();
        let summary = IpLocation::from(loc);
        assert_eq!(summary.provider, "ipstack");
        assert_eq!(summary.region.as_deref(), Some("California"));
        assert_eq!(summary.coords, Some(GeoPoint::new(34.0453, -118.2413)));
        assert_eq!(summary.display_name(), "Los Angeles, California, United States");
    }

    #[test]
    fn test_error_envelope() {
        let envelope: ErrorEnvelope = serde_json::from_str(
            r#"{"success": false, "error": {"code": 101, "type": "invalid_access_key", "info": "You have not supplied a valid API Access Key."}}"#,
        )
        .unwrap();
        match envelope.into_error() {
            Some(Error::Provider(msg)) => {
                assert_eq!(msg, "ipstack: You have not supplied a valid API Access Key. (code 101)")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_success_body_is_not_an_error() {
        let envelope: ErrorEnvelope = serde_json::from_str(SAMPLE).unwrap();
        assert!(envelope.into_error().is_none());
    }

    #[test]
    fn test_lookup_url() {
        let client = IpStackClient::new(&Config::default()).unwrap();
        assert_eq!(
            client.lookup_url("10.8.2.1", "abc"),
            "http://api.ipstack.com/10.8.2.1?access_key=abc"
        );
    }

    #[tokio::test]
    async fn test_missing_key() {
        let client = IpStackClient::new(&Config::default()).unwrap();
        let result = client.locate_ip("10.8.2.1").await;
        assert!(matches!(result, Err(Error::Missing(what)) if what == "ipstack API key"));
    }

    #[tokio::test]
    async fn test_missing_ip() {
        let client = IpStackClient::new(&Config::default()).unwrap().with_api_key("abc");
        let result = client.locate_ip("").await;
        assert!(matches!(result, Err(Error::Missing(what)) if what == "IP address"));
    }
}
