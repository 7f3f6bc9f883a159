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

//! Slippy map widget backed by `walkers`.
//!
//! Markers live in a [`MarkerLayer`]; every frame they are handed to a map
//! plugin that projects and paints them and reports clicks. Clicking an
//! event marker opens a popup with a join button.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use eframe::egui;
use log::{info, warn};
use shorecrew_core::markers::{
    fallback_map_url, validate_tile_template, Marker, MarkerHandle, MarkerLayer, MarkerPayload,
};
use shorecrew_core::view::EventsView;
use shorecrew_core::{EventId, GeoPoint, MapAdapter, MapError};
use walkers::{HttpOptions, HttpTiles, Map, MapMemory, Plugin, Position, Projector};

use super::tiles::TemplateTileSource;

/// Click radius around a marker, in points
const MARKER_HIT_RADIUS: f32 = 12.0;
const EVENT_MARKER_RADIUS: f32 = 7.0;
const USER_MARKER_RADIUS: f32 = 8.0;

/// Something the user asked the map to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapAction {
    Join(EventId),
    Retry,
}

fn to_position(point: GeoPoint) -> Position {
    walkers::lat_lon(point.lat, point.lng)
}

fn tile_cache_dir() -> Option<PathBuf> {
    let dir = dirs::cache_dir().map(|d| d.join("shorecrew-desktop").join("tiles"));
    if dir.is_none() {
        info!("No cache directory available, map tiles will not be cached");
    }
    dir
}

/// Map widget implementing the core map adapter
pub struct MapWidget {
    ctx: egui::Context,
    tile_template: String,
    tiles: Option<HttpTiles>,
    memory: MapMemory,
    layer: MarkerLayer,
    init_error: Option<MapError>,
    selected: Option<EventId>,
}

impl std::fmt::Debug for MapWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapWidget")
            .field("tile_template", &self.tile_template)
            .field("layer", &self.layer)
            .field("init_error", &self.init_error)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl MapWidget {
    /// Create an uninitialized widget; call [`MapAdapter::init`] before use.
    pub fn new(ctx: egui::Context, tile_template: String) -> Self {
        Self {
            ctx,
            tile_template,
            tiles: None,
            memory: MapMemory::default(),
            layer: MarkerLayer::new(),
            init_error: Some(MapError::Unavailable("map not initialized".to_string())),
            selected: None,
        }
    }

    pub fn set_tile_template(&mut self, template: String) {
        self.tile_template = template;
    }

    fn apply_zoom(&mut self, zoom: f64) {
        if self.memory.set_zoom(zoom).is_err() {
            warn!("Zoom level {zoom} is out of range, keeping current zoom");
        }
    }

    pub fn init_error(&self) -> Option<&MapError> {
        self.init_error.as_ref()
    }

    /// Center on an event and open its popup
    pub fn focus_event(&mut self, id: &EventId) {
        let target = self.layer.event_markers().find(|m| m.payload == MarkerPayload::Event(id.clone()));
        if let Some(position) = target.map(|m| m.position) {
            self.memory.center_at(to_position(position));
            self.selected = Some(id.clone());
        }
    }

    /// Draw the map, or the static fallback if it failed to initialize
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        events: &EventsView,
        fallback_center: GeoPoint,
    ) -> Option<MapAction> {
        if let Some(error) = self.init_error.clone() {
            return Self::show_fallback(ui, events, fallback_center, &error);
        }
        let Some(tiles) = self.tiles.as_mut() else {
            let error = MapError::Unavailable("tile source missing".to_string());
            return Self::show_fallback(ui, events, fallback_center, &error);
        };

        let map_rect = ui.available_rect_before_wrap();
        let clicked = Arc::new(Mutex::new(None));
        let screen_positions = Arc::new(Mutex::new(Vec::new()));

        let plugin = MarkersPlugin {
            markers: self.layer.markers().to_vec(),
            selected: self.selected.clone(),
            clicked: Arc::clone(&clicked),
            screen_positions: Arc::clone(&screen_positions),
        };

        let my_position = self
            .layer
            .user_marker()
            .map_or_else(|| to_position(self.layer.center()), |m| to_position(m.position));

        let response = ui.add(Map::new(Some(tiles), &mut self.memory, my_position).with_plugin(plugin));

        // Plugin reports a marker hit; a click anywhere else closes the popup
        let hit = clicked.lock().ok().and_then(|mut slot| slot.take());
        if hit.is_some() {
            self.selected = hit;
        } else if response.clicked() {
            self.selected = None;
        }

        // Instructions
        ui.painter().text(
            map_rect.left_top() + egui::vec2(10.0, 10.0),
            egui::Align2::LEFT_TOP,
            "Drag to pan | Scroll to zoom | Click a marker to join",
            egui::FontId::proportional(12.0),
            egui::Color32::from_black_alpha(200),
        );

        // Attribution (required by OpenStreetMap)
        ui.painter().text(
            map_rect.right_bottom() - egui::vec2(5.0, 5.0),
            egui::Align2::RIGHT_BOTTOM,
            "© OpenStreetMap contributors",
            egui::FontId::proportional(10.0),
            egui::Color32::from_black_alpha(180),
        );

        let positions = screen_positions.lock().map(|p| p.clone()).unwrap_or_default();
        self.show_popup(ui, events, &positions)
    }

    fn show_popup(
        &mut self,
        ui: &egui::Ui,
        events: &EventsView,
        positions: &[(EventId, egui::Pos2)],
    ) -> Option<MapAction> {
        let selected = self.selected.clone()?;
        let anchor = positions.iter().find(|(id, _)| *id == selected).map(|(_, pos)| *pos)?;
        let row = events.rows.iter().find(|r| r.id == selected)?;

        let mut action = None;
        let mut close = false;

        egui::Area::new(egui::Id::new("event_popup"))
            .order(egui::Order::Foreground)
            .fixed_pos(anchor + egui::vec2(14.0, -14.0))
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(240.0);
                    ui.horizontal(|ui| {
                        ui.strong(&row.name);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("✕").on_hover_text("Close").clicked() {
                                close = true;
                            }
                        });
                    });
                    ui.label(format!("{} at {}", row.date, row.time));
                    ui.label(&row.description);
                    ui.label(
                        egui::RichText::new(format!("👥 {} participants", row.participant_count))
                            .strong(),
                    );
                    if ui.button("🤝 Join").clicked() {
                        action = Some(MapAction::Join(row.id.clone()));
                    }
                });
            });

        if close {
            self.selected = None;
        }
        action
    }

    fn show_fallback(
        ui: &mut egui::Ui,
        events: &EventsView,
        center: GeoPoint,
        error: &MapError,
    ) -> Option<MapAction> {
        let mut action = None;
        let url = fallback_map_url(center);

        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("🗺 Map unavailable");
            ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error.to_string());
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("🌐 Open in web map").on_hover_text(&url).clicked() {
                    if let Err(e) = webbrowser::open(&url) {
                        warn!("Failed to open browser: {e}");
                    }
                }
                if ui.button("⟳ Retry").clicked() {
                    action = Some(MapAction::Retry);
                }
            });

            ui.add_space(10.0);
            ui.label(egui::RichText::new(format!("Centered on {center}")).weak());
            for row in &events.rows {
                ui.label(
                    egui::RichText::new(format!("📍 {}  ({})", row.name, row.location))
                        .monospace()
                        .size(11.0),
                );
            }
        });

        action
    }
}

impl MapAdapter for MapWidget {
    fn init(&mut self, center: GeoPoint, zoom: f64) -> Result<(), MapError> {
        self.tiles = None;

        if let Err(e) = validate_tile_template(&self.tile_template) {
            warn!("Map initialization failed: {e}");
            self.init_error = Some(e.clone());
            return Err(e);
        }

        let http_options = HttpOptions {
            cache: tile_cache_dir(),
            ..Default::default()
        };
        let source = TemplateTileSource::new(self.tile_template.clone());
        self.tiles = Some(HttpTiles::with_options(source, http_options, self.ctx.clone()));

        self.memory = MapMemory::default();
        self.memory.center_at(to_position(center));
        self.apply_zoom(zoom);
        self.layer.init(center, zoom)?;

        self.init_error = None;
        info!("Map initialized at {center}, zoom {zoom}");
        Ok(())
    }

    fn add_marker(&mut self, lat: f64, lng: f64, label: &str, payload: MarkerPayload) -> MarkerHandle {
        self.layer.add_marker(lat, lng, label, payload)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.layer.remove_marker(handle);
    }

    fn set_user_marker(&mut self, lat: f64, lng: f64) {
        self.layer.set_user_marker(lat, lng);
    }

    fn recenter(&mut self, lat: f64, lng: f64, zoom: f64) {
        self.layer.recenter(lat, lng, zoom);
        self.memory.center_at(walkers::lat_lon(lat, lng));
        self.apply_zoom(zoom);
    }

    fn center(&self) -> GeoPoint {
        self.memory
            .detached()
            .map_or_else(|| self.layer.center(), |p| GeoPoint::new(p.y(), p.x()))
    }
}

/// Plugin that paints markers and detects marker clicks
struct MarkersPlugin {
    markers: Vec<Marker>,
    selected: Option<EventId>,
    clicked: Arc<Mutex<Option<EventId>>>,
    screen_positions: Arc<Mutex<Vec<(EventId, egui::Pos2)>>>,
}

impl Plugin for MarkersPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let painter = ui.painter();
        let click_pos = if response.clicked() { response.interact_pointer_pos() } else { None };

        let mut positions = Vec::with_capacity(self.markers.len());
        let mut closest = MARKER_HIT_RADIUS;
        let mut hit = None;

        for marker in &self.markers {
            let screen = projector.project(to_position(marker.position));
            let pos = egui::pos2(screen.x, screen.y);

            match &marker.payload {
                MarkerPayload::User => draw_user_marker(painter, pos),
                MarkerPayload::Event(id) => {
                    let is_selected = self.selected.as_ref() == Some(id);
                    draw_event_marker(painter, pos, &marker.label, is_selected);
                    positions.push((id.clone(), pos));

                    if let Some(click) = click_pos {
                        let distance = click.distance(pos);
                        if distance <= closest {
                            closest = distance;
                            hit = Some(id.clone());
                        }
                    }
                }
            }
        }

        if let Ok(mut slot) = self.screen_positions.lock() {
            *slot = positions;
        }
        if let (Some(id), Ok(mut slot)) = (hit, self.clicked.lock()) {
            *slot = Some(id);
        }
    }
}

fn draw_event_marker(painter: &egui::Painter, pos: egui::Pos2, label: &str, selected: bool) {
    let fill = if selected {
        egui::Color32::from_rgb(255, 140, 0)
    } else {
        egui::Color32::from_rgb(0, 150, 200)
    };

    // Shadow for depth
    painter.circle_filled(pos + egui::vec2(2.0, 2.0), EVENT_MARKER_RADIUS, egui::Color32::from_black_alpha(100));
    painter.circle_filled(pos, EVENT_MARKER_RADIUS, fill);
    painter.circle_stroke(pos, EVENT_MARKER_RADIUS, egui::Stroke::new(2.0, egui::Color32::WHITE));

    // Label box to the right of the marker
    let text_pos = pos + egui::vec2(12.0, 0.0);
    let galley = painter.layout_no_wrap(
        label.to_string(),
        egui::FontId::proportional(11.0),
        egui::Color32::WHITE,
    );
    let padding = egui::vec2(3.0, 2.0);
    let box_rect = egui::Rect::from_min_size(
        text_pos - egui::vec2(padding.x, galley.size().y / 2.0 + padding.y),
        galley.size() + padding * 2.0,
    );
    painter.rect_filled(box_rect, 2.0, egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180));
    painter.text(
        text_pos,
        egui::Align2::LEFT_CENTER,
        label,
        egui::FontId::proportional(11.0),
        egui::Color32::WHITE,
    );
}

fn draw_user_marker(painter: &egui::Painter, pos: egui::Pos2) {
    let stroke = egui::Stroke::new(2.0, egui::Color32::from_rgb(0, 180, 0));
    painter.circle_filled(pos, USER_MARKER_RADIUS, egui::Color32::from_rgb(50, 255, 50));
    painter.circle_stroke(pos, USER_MARKER_RADIUS, stroke);

    // Crosshair
    let size = 12.0;
    painter.line_segment([pos + egui::vec2(-size, 0.0), pos + egui::vec2(size, 0.0)], stroke);
    painter.line_segment([pos + egui::vec2(0.0, -size), pos + egui::vec2(0.0, size)], stroke);

    painter.text(
        pos + egui::vec2(0.0, -20.0),
        egui::Align2::CENTER_BOTTOM,
        "You",
        egui::FontId::proportional(11.0),
        egui::Color32::from_rgb(0, 180, 0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_template_records_init_error() {
        let mut widget = MapWidget::new(egui::Context::default(), "https://tiles.invalid/".to_string());

        let result = widget.init(GeoPoint::new(1.35, 103.82), 11.0);

        assert!(matches!(result, Err(MapError::InvalidTileTemplate(_))));
        assert!(matches!(widget.init_error(), Some(MapError::InvalidTileTemplate(_))));
    }

    #[test]
    fn test_retry_uses_replaced_template() {
        let mut widget = MapWidget::new(egui::Context::default(), "https://tiles.invalid/".to_string());
        widget.set_tile_template("https://tiles.invalid/{x}".to_string());

        let result = widget.init(GeoPoint::new(1.35, 103.82), 11.0);

        assert_eq!(
            result,
            Err(MapError::InvalidTileTemplate("https://tiles.invalid/{x}".to_string()))
        );
    }

    #[test]
    fn test_out_of_range_zoom_still_recenters() {
        let mut widget = MapWidget::new(egui::Context::default(), "https://tiles.invalid/".to_string());

        widget.recenter(1.30, 103.90, 1000.0);

        assert_eq!(widget.center(), GeoPoint::new(1.30, 103.90));
    }
}
