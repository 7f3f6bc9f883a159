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

use eframe::egui;
use shorecrew_core::view::ConditionsPanel;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(100, 180, 220);
const DEMO_BADGE: egui::Color32 = egui::Color32::from_rgb(255, 200, 100);

/// Draw the conditions section; `None` while the first fetch is running
pub fn show(ui: &mut egui::Ui, panel: Option<&ConditionsPanel>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("◈ CONDITIONS").color(ACCENT).size(13.0).strong());
        if let Some(label) = panel.and_then(ConditionsPanel::indicator) {
            let badge = ui.label(
                egui::RichText::new(format!(" {label} "))
                    .color(egui::Color32::BLACK)
                    .background_color(DEMO_BADGE)
                    .size(10.0)
                    .strong(),
            );
            if let Some(reason) = panel.and_then(|p| p.demo_reason.as_deref()) {
                badge.on_hover_text(format!("Live forecast unavailable: {reason}"));
            }
        }
    });

    let Some(panel) = panel else {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading conditions...");
        });
        return;
    };

    let view = &panel.view;

    // Current conditions
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.label(
            egui::RichText::new(format!("{:.1}°C", view.current.temperature_c))
                .size(22.0)
                .strong(),
        );
        ui.label(&view.current.summary);
        ui.label(egui::RichText::new(format!("💨 {}", view.current.wind)).size(11.0));
        if let Some((low, high)) = view.current.humidity {
            ui.label(egui::RichText::new(format!("💧 {low:.0}-{high:.0}% humidity")).size(11.0));
        }
    });

    // Forecast
    egui::Grid::new("forecast_grid")
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            for day in &view.forecast {
                ui.label(egui::RichText::new(&day.label).monospace().size(11.0));
                ui.label(&day.summary);
                ui.label(
                    egui::RichText::new(format!("{:.0}-{:.0}°C", day.low_c, day.high_c))
                        .monospace()
                        .size(11.0),
                );
                ui.end_row();
            }
        });

    // Water
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("🌊 Water {:.1}°C", view.water.temperature_c)).strong());
        ui.label(format!("Waves {}", view.water.wave_height.label()));
    });
}
