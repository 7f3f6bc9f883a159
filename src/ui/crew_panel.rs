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
use shorecrew_core::view::CrewView;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);
const DIM: egui::Color32 = egui::Color32::from_rgb(150, 150, 150);

fn counter(ui: &mut egui::Ui, value: String, caption: &str) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(value).size(18.0).strong());
        ui.label(egui::RichText::new(caption).color(DIM).size(9.0));
    });
}

/// Draw the crew roster with its summary counters
pub fn show(ui: &mut egui::Ui, crew: &CrewView) {
    ui.label(egui::RichText::new("◈ CREW").color(ACCENT).size(13.0).strong());

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 18.0;
        counter(ui, crew.member_count.to_string(), "MEMBERS");
        counter(ui, crew.total_cleanups.to_string(), "CLEANUPS");
        counter(ui, crew.total_items.to_string(), "ITEMS COLLECTED");
    });

    ui.add_space(4.0);

    for row in &crew.rows {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&row.avatar).size(20.0));
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&row.name).strong());
                    ui.label(
                        egui::RichText::new(format!(
                            "{} cleanups │ {} items",
                            row.cleanups_completed, row.items_collected
                        ))
                        .color(DIM)
                        .size(10.0)
                        .monospace(),
                    );
                });
            });
        });
        ui.add_space(2.0);
    }
}
