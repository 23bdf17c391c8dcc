//! The boundary between the normalization core and whatever fetches JSON.
//!
//! The core never performs network I/O. Callers implement [`WeatherSource`]
//! with their transport of choice and hand the raw response text to the
//! parsers. The endpoint builders here produce the exact request URLs the
//! upstream forecast and geocoding services expect.

use async_trait::async_trait;
use std::fmt::Debug;
use url::Url;

const FORECAST_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";
const GEOCODING_ENDPOINT: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Hourly variables requested from the forecast endpoint; must stay in sync
/// with the arrays the series parser reads.
const HOURLY_VARIABLES: &str = "temperature_2m,relativehumidity_2m,weathercode,pressure_msl,\
                                windspeed_10m,winddirection_10m,rain,precipitation_probability";

/// Coordinates for a forecast request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// A free-text city search against the geocoding endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub name: String,
    /// Two-letter response language, already normalized by
    /// [`language_code`].
    pub language: String,
}

impl LocationQuery {
    pub fn new(name: impl Into<String>, locale_language: &str) -> LocationQuery {
        LocationQuery {
            name: name.into(),
            language: language_code(locale_language),
        }
    }
}

/// Abstract `fetch() -> raw JSON text` collaborator.
///
/// Transport, retries and timeouts live behind this trait; a caller that
/// times out simply never invokes the parsers.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Fetch the current+hourly+daily forecast document.
    async fn fetch_forecast(&self, query: &ForecastQuery) -> anyhow::Result<String>;

    /// Fetch geocoding matches for a city name.
    async fn fetch_locations(&self, query: &LocationQuery) -> anyhow::Result<String>;
}

/// Build the forecast request URL for the given coordinates.
pub fn forecast_url(query: &ForecastQuery) -> String {
    Url::parse_with_params(
        FORECAST_ENDPOINT,
        &[
            ("latitude", query.latitude.to_string()),
            ("longitude", query.longitude.to_string()),
            ("current_weather", "true".to_owned()),
            ("hourly", HOURLY_VARIABLES.to_owned()),
            ("daily", "sunrise,sunset".to_owned()),
            ("timezone", "auto".to_owned()),
            ("timeformat", "unixtime".to_owned()),
        ],
    )
    .expect("forecast endpoint is a valid base URL")
    .into()
}

/// Build the geocoding request URL for a city-name search.
pub fn geocoding_url(query: &LocationQuery) -> String {
    Url::parse_with_params(
        GEOCODING_ENDPOINT,
        &[
            ("name", query.name.as_str()),
            ("count", "10"),
            ("language", query.language.as_str()),
            ("format", "json"),
        ],
    )
    .expect("geocoding endpoint is a valid base URL")
    .into()
}

/// Normalize a locale's language tag to the code the upstream services use.
///
/// A handful of languages are keyed differently upstream than in BCP 47;
/// everything else passes through lowercased.
pub fn language_code(locale_language: &str) -> String {
    match locale_language.to_lowercase().as_str() {
        "cs" => "cz".to_owned(), // Czech
        "ko" => "kr".to_owned(), // Korean
        "lv" => "la".to_owned(), // Latvian
        other => other.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_pairs(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .expect("builders should emit valid URLs")
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    #[test]
    fn forecast_url_carries_all_request_parameters() {
        let url = forecast_url(&ForecastQuery {
            latitude: 49.1951,
            longitude: 16.6068,
        });
        assert!(url.starts_with("https://api.open-meteo.com/v1/forecast?"));

        let pairs = query_pairs(&url);
        let expected = [
            ("latitude", "49.1951"),
            ("longitude", "16.6068"),
            ("current_weather", "true"),
            (
                "hourly",
                "temperature_2m,relativehumidity_2m,weathercode,pressure_msl,\
                 windspeed_10m,winddirection_10m,rain,precipitation_probability",
            ),
            ("daily", "sunrise,sunset"),
            ("timezone", "auto"),
            ("timeformat", "unixtime"),
        ];
        for (key, value) in expected {
            assert!(
                pairs.iter().any(|(k, v)| k == key && v == value),
                "missing {key}={value} in {url}"
            );
        }
    }

    #[test]
    fn geocoding_url_encodes_the_city_name() {
        let url = geocoding_url(&LocationQuery::new("Nové Město", "cs"));
        assert!(url.starts_with("https://geocoding-api.open-meteo.com/v1/search?"));
        // Non-ASCII and whitespace must be escaped in the raw URL.
        assert!(url.contains("name=Nov%C3%A9+M%C4%9Bsto"));

        let pairs = query_pairs(&url);
        for (key, value) in [
            ("name", "Nové Město"),
            ("count", "10"),
            ("language", "cz"),
            ("format", "json"),
        ] {
            assert!(
                pairs.iter().any(|(k, v)| k == key && v == value),
                "missing {key}={value} in {url}"
            );
        }
    }

    #[test]
    fn language_codes_normalize_upstream_quirks() {
        assert_eq!(language_code("cs"), "cz");
        assert_eq!(language_code("ko"), "kr");
        assert_eq!(language_code("lv"), "la");
        assert_eq!(language_code("en"), "en");
        assert_eq!(language_code("DE"), "de");
    }

    #[derive(Debug)]
    struct CannedSource(String);

    #[async_trait]
    impl WeatherSource for CannedSource {
        async fn fetch_forecast(&self, _query: &ForecastQuery) -> anyhow::Result<String> {
            Ok(self.0.clone())
        }

        async fn fetch_locations(&self, _query: &LocationQuery) -> anyhow::Result<String> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn canned_source_feeds_the_parser() {
        let source = CannedSource(r#"{"main": {"temp": 280.0}}"#.to_owned());
        let body = source
            .fetch_forecast(&ForecastQuery {
                latitude: 0.0,
                longitude: 0.0,
            })
            .await
            .unwrap();
        let snapshot = crate::parser::parse(&body, 1);
        assert_eq!(snapshot.temperature, Some(280.0));
    }
}
