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

//! HTTP conditions provider with synthetic fallback.

use chrono::{Local, NaiveDate};
use log::{info, warn};

use super::{
    forecast::conditions_from_body, synthetic::synthetic_conditions, ConditionsConfig,
    ConditionsResult, ConditionsView, WeatherError,
};

/// Fetches forecast data and never fails towards its caller.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: reqwest::Client,
    config: ConditionsConfig,
}

impl WeatherProvider {
    #[must_use]
    pub fn new(config: ConditionsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout ({e}), using defaults");
                reqwest::Client::new()
            });
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &ConditionsConfig {
        &self.config
    }

    /// Fetch conditions, anchoring any synthetic fallback to today's date.
    pub async fn fetch_conditions(&self) -> ConditionsResult {
        self.fetch_conditions_on(Local::now().date_naive()).await
    }

    /// Fetch conditions, anchoring any synthetic fallback to `today`.
    pub async fn fetch_conditions_on(&self, today: NaiveDate) -> ConditionsResult {
        let live = if self.config.offline {
            Err(WeatherError::Offline)
        } else {
            self.fetch_live().await
        };

        match live {
            Ok(view) => {
                info!(
                    "Live conditions: {:.1}°C, {}",
                    view.current.temperature_c, view.current.summary
                );
                ConditionsResult::Live(view)
            }
            Err(reason) => {
                warn!("Using demo conditions data: {reason}");
                ConditionsResult::Synthetic {
                    view: synthetic_conditions(today),
                    reason,
                }
            }
        }
    }

    async fn fetch_live(&self) -> Result<ConditionsView, WeatherError> {
        info!("Fetching forecast from {}", self.config.forecast_url);

        let response = self
            .client
            .get(&self.config.forecast_url)
            .send()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        conditions_from_body(&body, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{WaveHeight, SYNTHETIC_WATER_TEMP_C};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single request with `status` and `body`, returning the URL to hit.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}/forecast")
    }

    fn provider_for(url: String) -> WeatherProvider {
        WeatherProvider::new(ConditionsConfig {
            forecast_url: url,
            ..Default::default()
        })
    }

    fn today() -> NaiveDate {
        NaiveDate::parse_from_str("2025-06-02", "%Y-%m-%d").expect("valid date")
    }

    #[tokio::test]
    async fn test_request_failure_falls_back_to_synthetic() {
        let provider = WeatherProvider::new(ConditionsConfig {
            forecast_url: "not a url".to_string(),
            ..Default::default()
        });

        let result = provider.fetch_conditions_on(today()).await;

        assert!(result.is_synthetic());
        assert!(matches!(result.fallback_reason(), Some(WeatherError::Request(_))));
        assert_eq!(result.view(), &synthetic_conditions(today()));
        assert!((result.view().water.temperature_c - SYNTHETIC_WATER_TEMP_C).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_offline_skips_request() {
        let provider = WeatherProvider::new(ConditionsConfig {
            offline: true,
            ..Default::default()
        });

        let result = provider.fetch_conditions_on(today()).await;

        assert_eq!(result.fallback_reason(), Some(&WeatherError::Offline));
    }

    #[tokio::test]
    async fn test_server_error_falls_back_to_synthetic() {
        let url = serve_once("500 Internal Server Error", "").await;

        let result = provider_for(url).fetch_conditions_on(today()).await;

        assert_eq!(result.fallback_reason(), Some(&WeatherError::Status(500)));
        assert!((result.view().water.temperature_c - SYNTHETIC_WATER_TEMP_C).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_body_without_items_falls_back_to_synthetic() {
        let url = serve_once("200 OK", r#"{"api_info":{}}"#).await;

        let result = provider_for(url).fetch_conditions_on(today()).await;

        assert_eq!(result.fallback_reason(), Some(&WeatherError::MissingForecast));
        assert_eq!(result.view(), &synthetic_conditions(today()));
    }

    #[tokio::test]
    async fn test_live_forecast_is_mapped() {
        let body = r#"{"items":[{"forecasts":[
            {"date":"2025-06-02","forecast":"Fair",
             "temperature":{"low":26,"high":32},
             "wind":{"direction":"NE","speed":{"low":12,"high":25}}},
            {"date":"2025-06-03","forecast":"Cloudy",
             "temperature":{"low":25,"high":31},
             "wind":{"direction":"N","speed":{"low":5,"high":15}}}
        ]}]}"#;
        let url = serve_once("200 OK", body).await;

        let result = provider_for(url).fetch_conditions_on(today()).await;

        assert!(!result.is_synthetic());
        let view = result.view();
        assert!((view.current.temperature_c - 29.0).abs() < f64::EPSILON);
        assert!((view.water.temperature_c - 27.0).abs() < f64::EPSILON);
        assert_eq!(view.water.wave_height, WaveHeight::Higher);
        assert_eq!(view.forecast.len(), 2);
    }
}
