//! Parsing of geocoding (city search) responses.
//!
//! A search may match several places with the same name; the caller shows
//! the list and lets the user disambiguate. Unlike the weather schemas this
//! format is fixed, so it is deserialized with typed structs.

use serde::Deserialize;

use crate::parser::ParseError;

/// One place matched by a city-name search.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundLocation {
    pub name: String,
    /// Country name, empty when the provider omits it.
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// First-level administrative area, used to disambiguate same-named
    /// places. Empty when omitted.
    pub admin_area: String,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
    admin1: Option<String>,
}

/// Parse a geocoding response into candidate locations.
///
/// A response without a "results" array means no matches and yields an
/// empty list; malformed JSON is an error, since the caller must be able to
/// tell "city not found" from a broken response.
pub fn parse_locations(json: &str) -> Result<Vec<FoundLocation>, ParseError> {
    let response: GeocodingResponse = serde_json::from_str(json)?;

    let locations = response
        .results
        .unwrap_or_default()
        .into_iter()
        .map(|result| FoundLocation {
            name: result.name,
            country: result.country.unwrap_or_default(),
            latitude: result.latitude,
            longitude: result.longitude,
            admin_area: result.admin1.unwrap_or_default(),
        })
        .collect();

    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_candidate_locations() {
        let json = r#"{
            "results": [
                {"name": "Springfield", "country": "United States", "latitude": 39.8, "longitude": -89.64, "admin1": "Illinois"},
                {"name": "Springfield", "country": "United States", "latitude": 42.1, "longitude": -72.59, "admin1": "Massachusetts"},
                {"name": "Springfield", "latitude": -23.5, "longitude": 30.3}
            ]
        }"#;
        let locations = parse_locations(json).unwrap();
        assert_eq!(locations.len(), 3);
        assert_eq!(locations[0].name, "Springfield");
        assert_eq!(locations[0].admin_area, "Illinois");
        assert_eq!(locations[1].latitude, 42.1);
        assert_eq!(locations[2].country, "");
        assert_eq!(locations[2].admin_area, "");
    }

    #[test]
    fn no_results_means_no_matches() {
        assert_eq!(parse_locations("{}").unwrap(), vec![]);
        assert_eq!(
            parse_locations(r#"{"results": []}"#).unwrap(),
            vec![]
        );
    }

    #[test]
    fn malformed_responses_are_errors() {
        assert!(matches!(
            parse_locations("{broken"),
            Err(ParseError::MalformedInput(_))
        ));
    }
}
