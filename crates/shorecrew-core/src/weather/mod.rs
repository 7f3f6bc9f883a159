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

//! Beach conditions: forecast, water temperature and wave height.
//!
//! The provider makes one request to a 4-day forecast endpoint. Whatever goes
//! wrong with that request (transport error, bad status, unexpected payload)
//! the caller still receives a complete [`ConditionsView`], built from a
//! deterministic synthetic dataset and flagged as such through
//! [`ConditionsResult::Synthetic`].

mod forecast;
mod provider;
mod synthetic;

pub use forecast::{conditions_from_body, ForecastEntry, ForecastItem, ForecastPayload};
pub use provider::WeatherProvider;
pub use synthetic::{synthetic_conditions, SYNTHETIC_WATER_TEMP_C};

use std::time::Duration;

use thiserror::Error;

/// Public 4-day forecast endpoint.
pub const DEFAULT_FORECAST_URL: &str =
    "https://api.data.gov.sg/v1/environment/4-day-weather-forecast";

/// Wind speed above which the higher wave-height bucket is reported.
pub const DEFAULT_WAVE_WIND_THRESHOLD: f64 = 10.0;

/// Degrees subtracted from the air temperature to estimate the water.
pub const DEFAULT_WATER_TEMP_OFFSET: f64 = 2.0;

/// Number of forecast days shown.
pub const FORECAST_DAYS: usize = 4;

/// Reasons a live forecast could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("forecast request failed: {0}")]
    Request(String),

    #[error("forecast endpoint returned HTTP {0}")]
    Status(u16),

    #[error("forecast payload could not be decoded: {0}")]
    Decode(String),

    #[error("forecast payload contains no forecast entries")]
    MissingForecast,

    #[error("live conditions disabled (offline mode)")]
    Offline,
}

/// Tunables for the conditions provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsConfig {
    pub forecast_url: String,
    pub request_timeout: Duration,
    pub wave_wind_threshold: f64,
    pub water_temp_offset: f64,
    /// Skip the request and serve synthetic data.
    pub offline: bool,
}

impl Default for ConditionsConfig {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            wave_wind_threshold: DEFAULT_WAVE_WIND_THRESHOLD,
            water_temp_offset: DEFAULT_WATER_TEMP_OFFSET,
            offline: false,
        }
    }
}

/// Wave-height estimate derived from wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveHeight {
    Lower,
    Higher,
}

impl WaveHeight {
    /// Pick the bucket for a wind speed; strictly greater than the threshold
    /// selects [`WaveHeight::Higher`].
    #[must_use]
    pub fn from_wind_speed(speed: f64, threshold: f64) -> Self {
        if speed > threshold {
            Self::Higher
        } else {
            Self::Lower
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Lower => "0.5-1.0 m",
            Self::Higher => "1.0-1.5 m",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub summary: String,
    pub wind: String,
    /// Relative humidity range in percent, when reported.
    pub humidity: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub label: String,
    pub summary: String,
    pub high_c: f64,
    pub low_c: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaterConditions {
    pub temperature_c: f64,
    pub wave_height: WaveHeight,
}

/// Everything the conditions panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsView {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
    pub water: WaterConditions,
}

/// Outcome of a conditions fetch; callers can tell which branch ran.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionsResult {
    Live(ConditionsView),
    Synthetic {
        view: ConditionsView,
        reason: WeatherError,
    },
}

impl ConditionsResult {
    #[must_use]
    pub fn view(&self) -> &ConditionsView {
        match self {
            Self::Live(view) | Self::Synthetic { view, .. } => view,
        }
    }

    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic { .. })
    }

    #[must_use]
    pub fn fallback_reason(&self) -> Option<&WeatherError> {
        match self {
            Self::Live(_) => None,
            Self::Synthetic { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_height_threshold_is_strict() {
        assert_eq!(WaveHeight::from_wind_speed(12.0, 10.0), WaveHeight::Higher);
        assert_eq!(WaveHeight::from_wind_speed(10.0, 10.0), WaveHeight::Lower);
        assert_eq!(WaveHeight::from_wind_speed(8.0, 10.0), WaveHeight::Lower);
    }

    #[test]
    fn test_wave_height_threshold_is_configurable() {
        assert_eq!(WaveHeight::from_wind_speed(8.0, 5.0), WaveHeight::Higher);
    }
}
