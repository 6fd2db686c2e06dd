//! Directions HTTP adapter (Google Directions JSON API shape).

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::FlythroughError;
use crate::route::Route;
use crate::traits::DirectionsProvider;

pub const DEFAULT_MAPS_API_URL: &str = "https://maps.googleapis.com/maps/api";

#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MAPS_API_URL.to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectionsClient {
    config: DirectionsConfig,
    client: reqwest::blocking::Client,
}

impl DirectionsClient {
    pub fn new(config: DirectionsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn url(&self) -> String {
        format!("{}/directions/json", self.config.base_url.trim_end_matches('/'))
    }

    fn query<'a>(&'a self, origin: &'a str, destination: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![
            ("origin", origin),
            ("destination", destination),
            ("sensor", "false"),
        ];
        if let Some(key) = &self.config.api_key {
            params.push(("key", key.as_str()));
        }
        params
    }
}

impl DirectionsProvider for DirectionsClient {
    fn route_between(&self, origin: &str, destination: &str) -> Result<Route, FlythroughError> {
        let body = self
            .client
            .get(self.url())
            .query(&self.query(origin, destination))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<DirectionsResponse>())?;

        let route = first_route(body, origin, destination)?;
        info!(
            origin,
            destination,
            legs = route.legs.len(),
            steps = route.step_count(),
            "fetched route"
        );
        Ok(route)
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    routes: Vec<serde_json::Value>,
}

/// Picks `routes[0]` out of a directions response.
fn first_route(
    response: DirectionsResponse,
    origin: &str,
    destination: &str,
) -> Result<Route, FlythroughError> {
    match response.status.as_deref() {
        None | Some("OK") => {}
        Some("ZERO_RESULTS") => {
            return Err(FlythroughError::NoRoute {
                origin: origin.to_string(),
                destination: destination.to_string(),
            });
        }
        Some(status) => {
            let message = response.error_message.unwrap_or_default();
            warn!(status, message = %message, "directions request rejected");
            return Err(FlythroughError::Service {
                status: status.to_string(),
                message,
            });
        }
    }

    let Some(first) = response.routes.first() else {
        return Err(FlythroughError::NoRoute {
            origin: origin.to_string(),
            destination: destination.to_string(),
        });
    };

    Ok(Route::from_json(first)?)
}
