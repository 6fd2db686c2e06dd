//! Street View static image adapter.

use reqwest::Url;
use tracing::debug;

use crate::directions::DEFAULT_MAPS_API_URL;
use crate::error::FlythroughError;
use crate::geometry::Coordinate;
use crate::traits::ImageryProvider;

#[derive(Debug, Clone)]
pub struct StreetViewConfig {
    pub base_url: String,
    /// Image size as `WIDTHxHEIGHT` pixels.
    pub size: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for StreetViewConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MAPS_API_URL.to_string(),
            size: "600x300".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StreetViewClient {
    config: StreetViewConfig,
    endpoint: Url,
    client: reqwest::blocking::Client,
}

impl StreetViewClient {
    pub fn new(config: StreetViewConfig) -> Result<Self, FlythroughError> {
        let raw = format!("{}/streetview", config.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&raw).map_err(|err| FlythroughError::InvalidUrl {
            url: raw.clone(),
            message: err.to_string(),
        })?;
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            endpoint,
            client,
        })
    }

    fn frame_request_url(&self, point: Coordinate, heading: f64) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("location", &format!("{},{}", point.lat, point.lng))
                .append_pair("heading", &format!("{:.2}", heading))
                .append_pair("size", &self.config.size)
                .append_pair("sensor", "false");
            if let Some(key) = &self.config.api_key {
                query.append_pair("key", key);
            }
        }
        url
    }
}

impl ImageryProvider for StreetViewClient {
    fn frame_url(&self, point: Coordinate, heading: f64) -> String {
        self.frame_request_url(point, heading).into()
    }

    fn fetch_frame(&self, point: Coordinate, heading: f64) -> Result<Vec<u8>, FlythroughError> {
        let url = self.frame_request_url(point, heading);
        debug!(%url, "fetching frame");
        let bytes = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())?;
        Ok(bytes.to_vec())
    }
}
