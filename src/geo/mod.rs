//! Geocoding and IP geolocation providers
//!
//! One client per provider:
//! - `nominatim`: OpenStreetMap reverse + forward geocoding
//! - `google`: Google Geocoding API
//! - `ipstack`, `ipapi`, `rapidapi`: IP geolocation
//!
//! `GeoClient` bundles them behind a single set of credentials.

pub mod client;
pub mod de;
pub mod google;
pub(crate) mod http;
pub mod ipapi;
pub mod ipstack;
pub mod nominatim;
pub mod rapidapi;

pub use client::GeoClient;
pub use nominatim::{Address, Nominatim, Place};

use crate::coord::GeoPoint;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Trait for reverse geocoding backends (coordinates to address)
pub trait ReverseGeocoder: Send + Sync {
    fn reverse(&self, lat: f64, lng: f64) -> impl std::future::Future<Output = Result<Nominatim>> + Send;
}

/// Trait for forward geocoding backends (address to ranked candidates)
pub trait ForwardGeocoder: Send + Sync {
    /// Candidate places for a partial address, best match first
    fn search(&self, address: &Address) -> impl std::future::Future<Output = Result<Vec<Place>>> + Send;
}

/// Trait for IP geolocation backends
pub trait IpGeolocator: Send + Sync {
    /// Provider name, as used in config and on the command line
    fn name(&self) -> &'static str;

    /// Locate an IP address
    fn locate(&self, ip: &str) -> impl std::future::Future<Output = Result<IpLocation>> + Send;
}

/// Provider-neutral IP geolocation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpLocation {
    pub ip: String,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub coords: Option<GeoPoint>,
    pub timezone: Option<String>,
    /// Provider that produced this result
    pub provider: String,
}

impl IpLocation {
    /// "City, Region, Country" from whatever fields are present
    pub fn display_name(&self) -> String {
        let name = [&self.city, &self.region, &self.country_name]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        if name.is_empty() {
            "Unknown Location".to_string()
        } else {
            name
        }
    }
}

/// Available IP geolocation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpProvider {
    /// ipstack.com (access key)
    IpStack,
    /// ipapi.co (no key)
    IpApi,
    /// apility.io via RapidAPI (RapidAPI key)
    RapidApi,
}

impl IpProvider {
    /// All providers, in display order
    pub fn all() -> [IpProvider; 3] {
        [Self::IpStack, Self::IpApi, Self::RapidApi]
    }
}

impl Default for IpProvider {
    fn default() -> Self {
        Self::IpApi
    }
}

impl std::fmt::Display for IpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IpStack => write!(f, "ipstack"),
            Self::IpApi => write!(f, "ipapi"),
            Self::RapidApi => write!(f, "rapidapi"),
        }
    }
}

impl std::str::FromStr for IpProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ipstack" => Ok(Self::IpStack),
            "ipapi" | "ipapi.co" => Ok(Self::IpApi),
            "rapidapi" | "apility" => Ok(Self::RapidApi),
            _ => Err(format!("Unknown IP provider: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn location() -> IpLocation {
        IpLocation {
            ip: "203.0.113.7".to_string(),
            country_code: Some("TH".to_string()),
            country_name: Some("Thailand".to_string()),
            region: Some("Bangkok".to_string()),
            city: Some("Bang Kapi".to_string()),
            coords: Some(GeoPoint::new(13.7665, 100.6068)),
            timezone: Some("Asia/Bangkok".to_string()),
            provider: "ipapi".to_string(),
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(location().display_name(), "Bang Kapi, Bangkok, Thailand");
    }

    #[test]
    fn test_display_name_skips_missing_parts() {
        let mut loc = location();
        loc.city = None;
        loc.region = Some(String::new());
        assert_eq!(loc.display_name(), "Thailand");

        loc.country_name = None;
        assert_eq!(loc.display_name(), "Unknown Location");
    }

    #[test]
    fn test_ip_provider_from_str() {
        assert_eq!(IpProvider::from_str("ipstack").unwrap(), IpProvider::IpStack);
        assert_eq!(IpProvider::from_str("IPAPI").unwrap(), IpProvider::IpApi);
        assert_eq!(IpProvider::from_str("apility").unwrap(), IpProvider::RapidApi);
        assert!(IpProvider::from_str("maxmind").is_err());
    }

    #[test]
    fn test_ip_provider_display_round_trips() {
        for provider in IpProvider::all() {
            assert_eq!(IpProvider::from_str(&provider.to_string()).unwrap(), provider);
        }
    }

    #[test]
    fn test_ip_location_serialization() {
        let json = serde_json::to_string(&location()).unwrap();
        let parsed: IpLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, location());
    }
}
