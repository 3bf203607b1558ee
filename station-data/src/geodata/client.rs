//! Overpass API client.

use tracing::info;

use crate::domain::RawStationRecord;

use super::error::GeodataError;
use super::types::{OverpassResponse, raw_records};

/// Default Overpass interpreter endpoint.
const DEFAULT_BASE_URL: &str = "https://overpass-api.de/api/interpreter";

/// Query for every node tagged with a CRS code.
const DEFAULT_QUERY: &str = r#"[out:json][timeout:25];
(node["ref:crs"];);
out body;"#;

/// Configuration for the Overpass client.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter endpoint
    pub base_url: String,
    /// Overpass QL query sent as the `data` form field
    pub query: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OverpassConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            query: DEFAULT_QUERY.to_string(),
            timeout_secs: 60,
        }
    }
}

/// Client for the Overpass API.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    base_url: String,
    query: String,
}

impl OverpassClient {
    /// Create a new Overpass client.
    pub fn new(config: OverpassConfig) -> Result<Self, GeodataError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            query: config.query,
        })
    }

    /// Run the station query and return every element with a CRS tag.
    ///
    /// Any non-success status is an error; there is no retry.
    pub async fn fetch_stations(&self) -> Result<Vec<RawStationRecord>, GeodataError> {
        info!(url = %self.base_url, "Querying Overpass");

        let response = self
            .http
            .post(&self.base_url)
            .form(&[("data", self.query.as_str())])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeodataError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        info!("Processing results");
        let response = parse_response(&body)?;
        let records = raw_records(&response.elements);
        info!(
            elements = response.elements.len(),
            stations = records.len(),
            "Received geodata"
        );

        Ok(records)
    }
}

/// Parse an Overpass JSON body.
pub fn parse_response(body: &str) -> Result<OverpassResponse, GeodataError> {
    serde_json::from_str(body).map_err(|e| GeodataError::Json {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OverpassConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.query.contains(r#"node["ref:crs"]"#));
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_builders() {
        let config = OverpassConfig::default()
            .with_base_url("http://localhost:8080")
            .with_query("[out:json];node(1);out;")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.query, "[out:json];node(1);out;");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn parse_response_rejects_garbage() {
        let err = parse_response("<html>busy</html>").unwrap_err();
        assert!(matches!(err, GeodataError::Json { .. }));
    }

    #[test]
    fn parse_response_accepts_elements() {
        let response =
            parse_response(r#"{"elements": [{"lat": 1.5, "tags": {"ref:crs": "ABC"}}]}"#).unwrap();
        let records = raw_records(&response.elements);
        assert_eq!(records[0].lat, 1.5);
        assert_eq!(records[0].lon, 0.0);
    }
}
