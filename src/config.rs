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

//! Application configuration management.
//!
//! Settings are stored as TOML through `confy`. Every field has a serde
//! default so older or hand-edited files keep loading.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shorecrew_core::markers::{DEFAULT_CENTER, DEFAULT_ZOOM};
use shorecrew_core::weather::{
    DEFAULT_FORECAST_URL, DEFAULT_WATER_TEMP_OFFSET, DEFAULT_WAVE_WIND_THRESHOLD,
};
use shorecrew_core::{ConditionsConfig, GeoPoint};

const APP_NAME: &str = "shorecrew-desktop";
const CONFIG_NAME: &str = "config";

/// Default OpenStreetMap tile server
pub const DEFAULT_TILE_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Configuration schema version
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// 4-day forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Forecast request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Wind speed above which the higher wave-height bucket is shown
    #[serde(default = "default_wave_wind_threshold")]
    pub wave_wind_threshold: f64,

    /// Degrees subtracted from air temperature to estimate water temperature
    #[serde(default = "default_water_temp_offset")]
    pub water_temp_offset: f64,

    /// Never contact the forecast or geolocation services
    #[serde(default)]
    pub offline: bool,

    /// Map tile URL with {z}, {x}, {y} and optional {s} subdomain placeholders
    #[serde(default = "default_tile_url_template")]
    pub tile_url_template: String,

    /// Initial map center latitude
    #[serde(default = "default_center_latitude")]
    pub default_center_latitude: f64,

    /// Initial map center longitude
    #[serde(default = "default_center_longitude")]
    pub default_center_longitude: f64,

    /// Initial map zoom level
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,

    /// Override latitude (for devices without a usable location source)
    #[serde(default)]
    pub override_latitude: Option<f64>,

    /// Override longitude (for devices without a usable location source)
    #[serde(default)]
    pub override_longitude: Option<f64>,

    /// Page opened by the "Learn more" button
    #[serde(default = "default_learn_more_url")]
    pub learn_more_url: String,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    1
}

fn default_forecast_url() -> String {
    DEFAULT_FORECAST_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_wave_wind_threshold() -> f64 {
    DEFAULT_WAVE_WIND_THRESHOLD
}

fn default_water_temp_offset() -> f64 {
    DEFAULT_WATER_TEMP_OFFSET
}

fn default_tile_url_template() -> String {
    DEFAULT_TILE_URL_TEMPLATE.to_string()
}

fn default_center_latitude() -> f64 {
    DEFAULT_CENTER.lat
}

fn default_center_longitude() -> f64 {
    DEFAULT_CENTER.lng
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

fn default_learn_more_url() -> String {
    "https://www.nea.gov.sg/our-services/public-cleanliness".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            forecast_url: default_forecast_url(),
            request_timeout_secs: default_request_timeout_secs(),
            wave_wind_threshold: default_wave_wind_threshold(),
            water_temp_offset: default_water_temp_offset(),
            offline: false,
            tile_url_template: default_tile_url_template(),
            default_center_latitude: default_center_latitude(),
            default_center_longitude: default_center_longitude(),
            default_zoom: default_zoom(),
            override_latitude: None,
            override_longitude: None,
            learn_more_url: default_learn_more_url(),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Load configuration, falling back to defaults if the file is unreadable
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::warn!("Failed to load configuration ({e}), using defaults");
            Self::default()
        })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Settings for the conditions provider
    pub fn conditions_config(&self) -> ConditionsConfig {
        ConditionsConfig {
            forecast_url: self.forecast_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            wave_wind_threshold: self.wave_wind_threshold,
            water_temp_offset: self.water_temp_offset,
            offline: self.offline,
        }
    }

    pub fn default_center(&self) -> GeoPoint {
        GeoPoint::new(self.default_center_latitude, self.default_center_longitude)
    }

    /// Take the map settings from a freshly loaded config, keeping the rest
    pub fn apply_map_settings(&mut self, fresh: &AppConfig) {
        self.tile_url_template.clone_from(&fresh.tile_url_template);
        self.default_center_latitude = fresh.default_center_latitude;
        self.default_center_longitude = fresh.default_center_longitude;
        self.default_zoom = fresh.default_zoom;
    }

    /// Fixed user location, only when both coordinates are set
    pub fn override_location(&self) -> Option<GeoPoint> {
        match (self.override_latitude, self.override_longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").expect("defaults apply");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"offline": true, "water_temp_offset": 3.5}"#)
                .expect("partial config");

        assert!(config.offline);
        assert!((config.water_temp_offset - 3.5).abs() < f64::EPSILON);
        assert_eq!(config.tile_url_template, DEFAULT_TILE_URL_TEMPLATE);
    }

    #[test]
    fn test_conditions_config_mapping() {
        let config = AppConfig {
            forecast_url: "http://localhost:8080/forecast".to_string(),
            request_timeout_secs: 3,
            wave_wind_threshold: 15.0,
            offline: true,
            ..Default::default()
        };

        let conditions = config.conditions_config();

        assert_eq!(conditions.forecast_url, "http://localhost:8080/forecast");
        assert_eq!(conditions.request_timeout, Duration::from_secs(3));
        assert!((conditions.wave_wind_threshold - 15.0).abs() < f64::EPSILON);
        assert!(conditions.offline);
    }

    #[test]
    fn test_map_settings_reload_keeps_cli_overrides() {
        let mut config = AppConfig {
            tile_url_template: "https://tiles.invalid/".to_string(),
            offline: true,
            forecast_url: "http://localhost/f".to_string(),
            ..Default::default()
        };
        let fresh = AppConfig {
            default_zoom: 13.0,
            ..Default::default()
        };

        config.apply_map_settings(&fresh);

        assert_eq!(config.tile_url_template, DEFAULT_TILE_URL_TEMPLATE);
        assert!((config.default_zoom - 13.0).abs() < f64::EPSILON);
        assert!(config.offline);
        assert_eq!(config.forecast_url, "http://localhost/f");
    }

    #[test]
    fn test_override_requires_both_coordinates() {
        let mut config = AppConfig {
            override_latitude: Some(1.3),
            ..Default::default()
        };
        assert_eq!(config.override_location(), None);

        config.override_longitude = Some(103.8);
        assert_eq!(config.override_location(), Some(GeoPoint::new(1.3, 103.8)));
    }
}
