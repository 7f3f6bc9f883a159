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

//! Background work for the UI thread.
//!
//! Each task runs on its own thread and hands its single result back over a
//! channel that the app polls every frame, then asks egui for a repaint.

use std::sync::mpsc;
use std::sync::Arc;

use chrono::Local;
use eframe::egui;
use log::{info, warn};
use shorecrew_core::weather::synthetic_conditions;
use shorecrew_core::{ConditionsConfig, ConditionsResult, GeoPoint, LocateError, Locator, WeatherError, WeatherProvider};
use tokio_util::sync::CancellationToken;

/// Fetch conditions once on a dedicated tokio runtime.
///
/// Nothing is sent if the token is cancelled before the fetch completes.
pub fn spawn_conditions_fetch(
    config: ConditionsConfig,
    cancel_token: CancellationToken,
    ctx: egui::Context,
) -> mpsc::Receiver<ConditionsResult> {
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        let result = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(async {
                let provider = WeatherProvider::new(config);
                tokio::select! {
                    () = cancel_token.cancelled() => None,
                    result = provider.fetch_conditions() => Some(result),
                }
            }),
            Err(e) => {
                warn!("Failed to start runtime for conditions fetch: {e}");
                Some(ConditionsResult::Synthetic {
                    view: synthetic_conditions(Local::now().date_naive()),
                    reason: WeatherError::Request(e.to_string()),
                })
            }
        };

        match result {
            Some(result) => {
                if tx.send(result).is_ok() {
                    ctx.request_repaint();
                }
            }
            None => info!("Conditions fetch cancelled"),
        }
    });

    rx
}

/// Run one location query off the UI thread.
pub fn spawn_locate(
    locator: Arc<dyn Locator>,
    ctx: egui::Context,
) -> mpsc::Receiver<Result<GeoPoint, LocateError>> {
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        info!("Fetching current location...");
        if tx.send(locator.locate()).is_ok() {
            ctx.request_repaint();
        }
    });

    rx
}
