//! Human-readable text output formatter

use crate::error::Result;
use crate::format::{OutputFormatter, Report};
use crate::geo::google::GooglePlace;
use crate::geo::{IpLocation, Nominatim, Place};

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Distance { from, to, meters } => {
                format!("{} -> {}: {:.3} m ({:.3} km)", from, to, meters, meters / 1000.0)
            }
            Report::Reverse(nominatim) => reverse(nominatim),
            Report::Places(places) => self::places(places),
            Report::Geolocate { coords } => match coords {
                Some(point) => point.to_string(),
                None => "No match".to_string(),
            },
            Report::Google(place) => google(place),
            Report::Ip(location) => ip(location),
            Report::Raw(value) => serde_json::to_string_pretty(value)?,
        })
    }
}

fn push_field(output: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        output.push_str(&format!("{:<10}{}\n", format!("{}:", label), value));
    }
}

fn reverse(nominatim: &Nominatim) -> String {
    let mut output = format!("{}\n", nominatim.display_name);
    if let Some(address) = &nominatim.address {
        push_field(&mut output, "Road", address.road.as_deref());
        push_field(&mut output, "City", address.city.as_deref());
        push_field(&mut output, "Postcode", address.postcode.as_deref());
        push_field(&mut output, "Region", address.region.as_deref());
        push_field(&mut output, "Country", address.country.as_deref());
    }
    output.trim_end().to_string()
}

fn places(places: &[Place]) -> String {
    if places.is_empty() {
        return "No results".to_string();
    }

    places
        .iter()
        .enumerate()
        .map(|(i, place)| {
            format!(
                "{}. {} {}\n   {}/{} importance {:.3}",
                i + 1,
                place.coords(),
                place.display_name,
                place.class,
                place.kind,
                place.importance
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn google(place: &GooglePlace) -> String {
    let mut output = format!("{}\n", place.formatted_address);
    push_field(&mut output, "Location", Some(&place.coords().to_string()));
    push_field(&mut output, "Accuracy", Some(&place.geometry.location_type));
    push_field(&mut output, "Place ID", Some(&place.place_id));
    if place.partial_match {
        output.push_str("Partial match\n");
    }
    output.trim_end().to_string()
}

fn ip(location: &IpLocation) -> String {
    let mut output = format!("{} ({})\n", location.ip, location.provider);
    push_field(&mut output, "Location", Some(&location.display_name()));
    if let Some(coords) = location.coords {
        push_field(&mut output, "Coords", Some(&coords.to_string()));
    }
    push_field(&mut output, "Country", location.country_code.as_deref());
    push_field(&mut output, "Timezone", location.timezone.as_deref());
    output.trim_end().to_string()
}
