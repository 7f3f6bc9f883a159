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

//! Forecast payload decoding and live conditions derivation.

use chrono::NaiveDate;
use serde::Deserialize;

use super::{
    ConditionsConfig, ConditionsView, CurrentConditions, ForecastDay, WaterConditions, WaveHeight,
    WeatherError, FORECAST_DAYS,
};

/// Top-level response of the 4-day forecast endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub items: Vec<ForecastItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastItem {
    #[serde(default)]
    pub forecasts: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub date: String,
    pub forecast: String,
    pub temperature: Range,
    pub wind: Wind,
    #[serde(default)]
    pub relative_humidity: Option<Range>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    fn midpoint(self) -> f64 {
        (self.high + self.low) / 2.0
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub direction: String,
    pub speed: Range,
}

/// Decode a response body and derive the conditions view from it.
pub fn conditions_from_body(
    body: &str,
    config: &ConditionsConfig,
) -> Result<ConditionsView, WeatherError> {
    let payload: ForecastPayload =
        serde_json::from_str(body).map_err(|e| WeatherError::Decode(e.to_string()))?;
    live_conditions(&payload, config)
}

/// Derive the conditions view from the first item's forecasts.
pub(super) fn live_conditions(
    payload: &ForecastPayload,
    config: &ConditionsConfig,
) -> Result<ConditionsView, WeatherError> {
    let forecasts = payload
        .items
        .first()
        .map(|item| item.forecasts.as_slice())
        .unwrap_or_default();
    let first = forecasts.first().ok_or(WeatherError::MissingForecast)?;

    let temperature_c = first.temperature.midpoint();

    let current = CurrentConditions {
        temperature_c,
        summary: first.forecast.clone(),
        wind: format_wind(&first.wind),
        humidity: first.relative_humidity.map(|h| (h.low, h.high)),
    };

    let forecast = forecasts
        .iter()
        .take(FORECAST_DAYS)
        .map(|entry| ForecastDay {
            label: day_label(&entry.date),
            summary: entry.forecast.clone(),
            high_c: entry.temperature.high,
            low_c: entry.temperature.low,
        })
        .collect();

    let water = WaterConditions {
        temperature_c: temperature_c - config.water_temp_offset,
        wave_height: WaveHeight::from_wind_speed(first.wind.speed.low, config.wave_wind_threshold),
    };

    Ok(ConditionsView {
        current,
        forecast,
        water,
    })
}

fn format_wind(wind: &Wind) -> String {
    let speed = format!("{:.0}-{:.0} km/h", wind.speed.low, wind.speed.high);
    if wind.direction.is_empty() {
        speed
    } else {
        format!("{} {speed}", wind.direction)
    }
}

/// Short weekday label for a `YYYY-MM-DD` date (trailing time ignored).
/// Unparseable dates are shown as given.
pub(super) fn day_label(date: &str) -> String {
    date.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map_or_else(|| date.to_string(), |d| d.format("%a %d %b").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_with_wind_low(wind_low: f64) -> String {
        format!(
            r#"{{
                "items": [{{
                    "forecasts": [
                        {{"date": "2025-06-02", "forecast": "Thundery Showers",
                          "temperature": {{"low": 25, "high": 33}},
                          "wind": {{"direction": "SSE", "speed": {{"low": {wind_low}, "high": 20}}}},
                          "relative_humidity": {{"low": 60, "high": 95}}}},
                        {{"date": "2025-06-03", "forecast": "Fair",
                          "temperature": {{"low": 26, "high": 32}},
                          "wind": {{"direction": "S", "speed": {{"low": 10, "high": 20}}}}}},
                        {{"date": "2025-06-04", "forecast": "Cloudy",
                          "temperature": {{"low": 25, "high": 31}},
                          "wind": {{"direction": "S", "speed": {{"low": 10, "high": 20}}}}}},
                        {{"date": "2025-06-05", "forecast": "Light Rain",
                          "temperature": {{"low": 24, "high": 30}},
                          "wind": {{"direction": "SW", "speed": {{"low": 5, "high": 15}}}}}},
                        {{"date": "2025-06-06", "forecast": "Fair",
                          "temperature": {{"low": 24, "high": 30}},
                          "wind": {{"direction": "SW", "speed": {{"low": 5, "high": 15}}}}}}
                    ]
                }}]
            }}"#
        )
    }

    #[test]
    fn test_current_is_midpoint_of_first_entry() {
        let view = conditions_from_body(&body_with_wind_low(8.0), &ConditionsConfig::default())
            .expect("valid payload");

        assert!((view.current.temperature_c - 29.0).abs() < f64::EPSILON);
        assert_eq!(view.current.summary, "Thundery Showers");
        assert_eq!(view.current.wind, "SSE 8-20 km/h");
        assert_eq!(view.current.humidity, Some((60.0, 95.0)));
    }

    #[test]
    fn test_forecast_limited_to_four_days() {
        let view = conditions_from_body(&body_with_wind_low(8.0), &ConditionsConfig::default())
            .expect("valid payload");

        let labels: Vec<&str> = view.forecast.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Mon 02 Jun", "Tue 03 Jun", "Wed 04 Jun", "Thu 05 Jun"]);
    }

    #[test]
    fn test_water_temperature_offset() {
        let view = conditions_from_body(&body_with_wind_low(8.0), &ConditionsConfig::default())
            .expect("valid payload");
        assert!((view.water.temperature_c - 27.0).abs() < f64::EPSILON);

        let config = ConditionsConfig {
            water_temp_offset: 5.0,
            ..Default::default()
        };
        let view = conditions_from_body(&body_with_wind_low(8.0), &config).expect("valid payload");
        assert!((view.water.temperature_c - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_strong_wind_selects_higher_waves() {
        let view = conditions_from_body(&body_with_wind_low(12.0), &ConditionsConfig::default())
            .expect("valid payload");
        assert_eq!(view.water.wave_height, WaveHeight::Higher);
    }

    #[test]
    fn test_light_wind_selects_lower_waves() {
        let view = conditions_from_body(&body_with_wind_low(8.0), &ConditionsConfig::default())
            .expect("valid payload");
        assert_eq!(view.water.wave_height, WaveHeight::Lower);
    }

    #[test]
    fn test_missing_items_is_rejected() {
        let result = conditions_from_body(r#"{"api_info": {"status": "healthy"}}"#, &ConditionsConfig::default());
        assert_eq!(result, Err(WeatherError::MissingForecast));
    }

    #[test]
    fn test_empty_forecasts_is_rejected() {
        let result = conditions_from_body(r#"{"items": [{"forecasts": []}]}"#, &ConditionsConfig::default());
        assert_eq!(result, Err(WeatherError::MissingForecast));
    }

    #[test]
    fn test_garbage_body_is_decode_error() {
        let result = conditions_from_body("<html>Bad Gateway</html>", &ConditionsConfig::default());
        assert!(matches!(result, Err(WeatherError::Decode(_))));
    }

    #[test]
    fn test_day_label_keeps_unparseable_dates() {
        assert_eq!(day_label("soon"), "soon");
        assert_eq!(day_label("2025-06-02T00:00:00+08:00"), "Mon 02 Jun");
    }
}
