//! JSON output formatter

use crate::error::Result;
use crate::format::{OutputFormatter, Report};

/// JSON formatter - outputs the report payload as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }

    fn format(&self, report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::GeoPoint;
    use crate::geo::Place;

    #[test]
    fn test_distance_json() {
        let report = Report::Distance {
            from: GeoPoint::new(13.7665217, 100.6068431),
            to: GeoPoint::new(13.7199345, 100.5197898),
            meters: 10747.271299236845,
        };

        let output = JsonFormatter.format(&report).unwrap();
        assert!(output.contains("\"meters\": 10747.271299236845"), "{}", output);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["meters"].as_f64(), Some(10747.271299236845));
        assert_eq!(parsed["from"]["lat"], 13.7665217);
    }

    #[test]
    fn test_places_json_is_an_array() {
        let report = Report::Places(vec![Place {
            lat: 50.67,
            lon: 4.61,
            place_id: "1".to_string(),
            display_name: "Ottignies".to_string(),
            class: "place".to_string(),
            kind: "town".to_string(),
            importance: 0.5,
            osm_type: "relation".to_string(),
        }]);

        let output = JsonFormatter.format(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed[0]["type"], "town");
    }

    #[test]
    fn test_raw_passes_through() {
        let report = Report::Raw(serde_json::json!({"ip": "8.8.8.8", "org": "GOOGLE"}));
        let output = JsonFormatter.format(&report).unwrap();
        assert!(output.contains("\"org\": \"GOOGLE\""));
    }
}
