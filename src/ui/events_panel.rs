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
use shorecrew_core::view::EventsView;

use super::UiAction;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(220, 170, 80);
const DIM: egui::Color32 = egui::Color32::from_rgb(150, 150, 150);

/// Draw the event list in store order, each with a join button
pub fn show(ui: &mut egui::Ui, events: &EventsView, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("◈ EVENTS").color(ACCENT).size(13.0).strong());
        ui.label(
            egui::RichText::new(format!("TOTAL: {}", events.rows.len()))
                .color(DIM)
                .size(10.0)
                .monospace(),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("➕ Create event").clicked() {
                actions.push(UiAction::OpenCreateDialog);
            }
        });
    });

    if events.rows.is_empty() {
        ui.label(egui::RichText::new("No events yet").color(DIM));
        return;
    }

    for row in &events.rows {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                if ui
                    .link(egui::RichText::new(&row.name).strong())
                    .on_hover_text("Show on map")
                    .clicked()
                {
                    actions.push(UiAction::ShowOnMap(row.id.clone()));
                }
            });

            ui.label(
                egui::RichText::new(format!("📅 {} {}   📍 {}", row.date, row.time, row.location))
                    .color(DIM)
                    .size(10.0)
                    .monospace(),
            );
            ui.label(egui::RichText::new(&row.description).size(11.0));

            ui.horizontal(|ui| {
                ui.label(format!("👥 {}", row.participant_count));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button("🤝 Join")
                        .on_hover_text(format!("Join {}", row.name))
                        .clicked()
                    {
                        actions.push(UiAction::Join(row.id.clone()));
                    }
                });
            });
        });
        ui.add_space(3.0);
    }
}
