// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Geolocation sources for the "locate me" action.

use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;

use crate::model::GeoPoint;

/// Why a position could not be determined. The message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("location services are not available: {0}")]
    Unavailable(String),

    #[error("could not determine your location: {0}")]
    Lookup(String),
}

/// A source of the user's current position.
pub trait Locator: Send + Sync {
    /// Blocking query; run it off the UI thread.
    fn locate(&self) -> Result<GeoPoint, LocateError>;
}

/// Always reports the configured coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub GeoPoint);

impl Locator for FixedLocator {
    fn locate(&self) -> Result<GeoPoint, LocateError> {
        Ok(self.0)
    }
}

/// Locator for environments without any position source.
#[derive(Debug, Clone)]
pub struct DisabledLocator {
    reason: String,
}

impl DisabledLocator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Locator for DisabledLocator {
    fn locate(&self) -> Result<GeoPoint, LocateError> {
        Err(LocateError::Unavailable(self.reason.clone()))
    }
}

/// A JSON geolocation endpoint and the keys holding the coordinates.
#[derive(Debug, Clone)]
pub struct IpEndpoint {
    pub url: String,
    pub lat_key: String,
    pub lon_key: String,
}

impl IpEndpoint {
    fn new(url: &str, lat_key: &str, lon_key: &str) -> Self {
        Self {
            url: url.to_string(),
            lat_key: lat_key.to_string(),
            lon_key: lon_key.to_string(),
        }
    }
}

/// IP-based geolocation, trying each endpoint in turn.
#[derive(Debug, Clone)]
pub struct IpLocator {
    endpoints: Vec<IpEndpoint>,
    timeout: Duration,
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::with_endpoints(
            vec![
                IpEndpoint::new("https://ipapi.co/json/", "latitude", "longitude"),
                // No API key needed
                IpEndpoint::new("http://ip-api.com/json/", "lat", "lon"),
            ],
            Duration::from_secs(5),
        )
    }
}

impl IpLocator {
    #[must_use]
    pub fn with_endpoints(endpoints: Vec<IpEndpoint>, timeout: Duration) -> Self {
        Self { endpoints, timeout }
    }

    fn query(&self, client: &reqwest::blocking::Client, endpoint: &IpEndpoint) -> Option<GeoPoint> {
        let response = client
            .get(&endpoint.url)
            .send()
            .map_err(|e| debug!("Geolocation request to {} failed: {e}", endpoint.url))
            .ok()?;
        let text = response
            .text()
            .map_err(|e| debug!("Geolocation response from {} unreadable: {e}", endpoint.url))
            .ok()?;
        parse_coordinates(&text, &endpoint.lat_key, &endpoint.lon_key)
    }
}

impl Locator for IpLocator {
    fn locate(&self) -> Result<GeoPoint, LocateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LocateError::Unavailable(e.to_string()))?;

        for endpoint in &self.endpoints {
            if let Some(point) = self.query(&client, endpoint) {
                info!("Location found via {}: {point}", endpoint.url);
                return Ok(point);
            }
        }

        warn!("Failed to fetch location from all sources");
        Err(LocateError::Lookup(
            "no geolocation service responded".to_string(),
        ))
    }
}

/// Pull a coordinate pair out of a JSON object.
#[must_use]
pub fn parse_coordinates(body: &str, lat_key: &str, lon_key: &str) -> Option<GeoPoint> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let lat = value.get(lat_key).and_then(serde_json::Value::as_f64)?;
    let lon = value.get(lon_key).and_then(serde_json::Value::as_f64)?;
    Some(GeoPoint::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipapi_shape() {
        let body = r#"{"ip": "203.0.113.7", "city": "Singapore", "latitude": 1.2897, "longitude": 103.8501}"#;
        assert_eq!(
            parse_coordinates(body, "latitude", "longitude"),
            Some(GeoPoint::new(1.2897, 103.8501))
        );
    }

    #[test]
    fn test_parse_ip_api_shape() {
        let body = r#"{"status": "success", "lat": 1.3, "lon": 103.9}"#;
        assert_eq!(parse_coordinates(body, "lat", "lon"), Some(GeoPoint::new(1.3, 103.9)));
    }

    #[test]
    fn test_parse_rejects_error_responses() {
        let body = r#"{"error": true, "reason": "RateLimited"}"#;
        assert_eq!(parse_coordinates(body, "latitude", "longitude"), None);
        assert_eq!(parse_coordinates("not json", "lat", "lon"), None);
    }

    #[test]
    fn test_fixed_locator() {
        let locator = FixedLocator(GeoPoint::new(1.0, 2.0));
        assert_eq!(locator.locate(), Ok(GeoPoint::new(1.0, 2.0)));
    }

    #[test]
    fn test_disabled_locator_reports_reason() {
        let err = DisabledLocator::new("offline mode").locate().unwrap_err();
        assert_eq!(err.to_string(), "location services are not available: offline mode");
    }

    #[test]
    fn test_ip_locator_without_reachable_endpoints() {
        let locator = IpLocator::with_endpoints(
            vec![IpEndpoint::new("not a url", "lat", "lon")],
            Duration::from_millis(100),
        );
        assert!(matches!(locator.locate(), Err(LocateError::Lookup(_))));
    }
}
