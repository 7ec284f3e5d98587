//! Output formatters
//!
//! Provides trait-based output formatting for lookup results.

pub mod json;
pub mod text;

use crate::coord::GeoPoint;
use crate::error::Result;
use crate::geo::google::GooglePlace;
use crate::geo::{IpLocation, Nominatim, Place};
use serde::{Deserialize, Serialize};

/// Result of one CLI lookup
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Distance {
        from: GeoPoint,
        to: GeoPoint,
        meters: f64,
    },
    Reverse(Nominatim),
    Places(Vec<Place>),
    Geolocate {
        coords: Option<GeoPoint>,
    },
    Google(Box<GooglePlace>),
    Ip(IpLocation),
    /// Full provider record, passed through as-is
    Raw(serde_json::Value),
}

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a lookup report
    fn format(&self, report: &Report) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Pretty-printed JSON".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable text".to_string(),
        },
    ]
}
