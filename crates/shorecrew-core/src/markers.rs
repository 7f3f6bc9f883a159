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

//! Map adapter seam and marker bookkeeping.
//!
//! [`MapAdapter`] is the contract the application's map widget fulfils.
//! [`MarkerLayer`] is the widget-independent marker registry behind it, and
//! [`EventMarkers`] applies the full-refresh policy: whenever the event
//! collection changes every event marker is removed and recreated in
//! collection order.

use thiserror::Error;

use crate::model::{CleanupEvent, EventId, GeoPoint};

/// Center used when no event or user location is known.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(1.3521, 103.8198);

/// Zoom level for the initial overview.
pub const DEFAULT_ZOOM: f64 = 11.0;

/// Zoom level used after centering on the user.
pub const USER_ZOOM: f64 = 14.0;

/// Errors raised while bringing up the map widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("invalid tile URL template '{0}': expected {{z}}, {{x}} and {{y}} placeholders")]
    InvalidTileTemplate(String),

    #[error("map widget unavailable: {0}")]
    Unavailable(String),
}

/// Opaque reference to a marker placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(u64);

/// What a marker stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerPayload {
    /// A cleanup event; its popup offers a join action.
    Event(EventId),
    /// The user's own position.
    User,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub handle: MarkerHandle,
    pub position: GeoPoint,
    pub label: String,
    pub payload: MarkerPayload,
}

/// Operations the application needs from a map widget.
pub trait MapAdapter {
    /// (Re)initialize the widget. On error the caller shows a static fallback.
    fn init(&mut self, center: GeoPoint, zoom: f64) -> Result<(), MapError>;

    fn add_marker(&mut self, lat: f64, lng: f64, label: &str, payload: MarkerPayload)
        -> MarkerHandle;

    /// Remove a marker. Unknown handles are ignored.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Place the user marker, or move it if already placed.
    fn set_user_marker(&mut self, lat: f64, lng: f64);

    fn recenter(&mut self, lat: f64, lng: f64, zoom: f64);

    /// Current view center.
    fn center(&self) -> GeoPoint;
}

/// In-memory marker registry and view state.
#[derive(Debug, Clone)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    next_handle: u64,
    center: GeoPoint,
    zoom: f64,
}

impl Default for MarkerLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerLayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
            next_handle: 0,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// All markers, event markers in insertion order followed by the user
    /// marker wherever it was first placed.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn event_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers
            .iter()
            .filter(|m| matches!(m.payload, MarkerPayload::Event(_)))
    }

    #[must_use]
    pub fn user_marker(&self) -> Option<&Marker> {
        self.markers.iter().find(|m| m.payload == MarkerPayload::User)
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    fn allocate_handle(&mut self) -> MarkerHandle {
        self.next_handle += 1;
        MarkerHandle(self.next_handle)
    }
}

impl MapAdapter for MarkerLayer {
    fn init(&mut self, center: GeoPoint, zoom: f64) -> Result<(), MapError> {
        self.center = center;
        self.zoom = zoom;
        Ok(())
    }

    fn add_marker(
        &mut self,
        lat: f64,
        lng: f64,
        label: &str,
        payload: MarkerPayload,
    ) -> MarkerHandle {
        let handle = self.allocate_handle();
        self.markers.push(Marker {
            handle,
            position: GeoPoint::new(lat, lng),
            label: label.to_string(),
            payload,
        });
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.retain(|m| m.handle != handle);
    }

    fn set_user_marker(&mut self, lat: f64, lng: f64) {
        if let Some(marker) = self
            .markers
            .iter_mut()
            .find(|m| m.payload == MarkerPayload::User)
        {
            marker.position = GeoPoint::new(lat, lng);
            return;
        }
        self.add_marker(lat, lng, "You are here", MarkerPayload::User);
    }

    fn recenter(&mut self, lat: f64, lng: f64, zoom: f64) {
        self.center = GeoPoint::new(lat, lng);
        self.zoom = zoom;
    }

    fn center(&self) -> GeoPoint {
        self.center
    }
}

/// Handles of the markers currently standing for events.
#[derive(Debug, Default)]
pub struct EventMarkers {
    handles: Vec<MarkerHandle>,
}

impl EventMarkers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every event marker and recreate one per event, in order.
    pub fn refresh<M: MapAdapter + ?Sized>(&mut self, map: &mut M, events: &[CleanupEvent]) {
        for handle in self.handles.drain(..) {
            map.remove_marker(handle);
        }
        self.handles = events
            .iter()
            .map(|event| {
                map.add_marker(
                    event.lat,
                    event.lng,
                    &event.name,
                    MarkerPayload::Event(event.id.clone()),
                )
            })
            .collect();
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.handles.len()
    }
}

/// Check that a tile URL template carries the three tile placeholders.
pub fn validate_tile_template(template: &str) -> Result<(), MapError> {
    if ["{z}", "{x}", "{y}"].iter().all(|p| template.contains(p)) {
        Ok(())
    } else {
        Err(MapError::InvalidTileTemplate(template.to_string()))
    }
}

/// Center for the static fallback view: the first event, else the default.
#[must_use]
pub fn fallback_center(events: &[CleanupEvent]) -> GeoPoint {
    events.first().map_or(DEFAULT_CENTER, CleanupEvent::position)
}

/// Web map link shown when the embedded map cannot be initialized.
#[must_use]
pub fn fallback_map_url(center: GeoPoint) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={lat:.4}&mlon={lng:.4}#map=13/{lat:.4}/{lng:.4}",
        lat = center.lat,
        lng = center.lng
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DomainStore;

    #[test]
    fn test_refresh_creates_one_marker_per_event() {
        let store = DomainStore::seeded();
        let mut layer = MarkerLayer::new();
        let mut markers = EventMarkers::new();

        markers.refresh(&mut layer, store.events());

        let labels: Vec<&str> = layer.event_markers().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "East Coast Park Sweep",
                "Pasir Ris Mangrove Cleanup",
                "Changi Beach Microplastics Survey"
            ]
        );
        assert_eq!(markers.len(), 3);
    }

    #[test]
    fn test_refresh_replaces_all_markers() {
        let mut store = DomainStore::seeded();
        let mut layer = MarkerLayer::new();
        let mut markers = EventMarkers::new();

        markers.refresh(&mut layer, store.events());
        let first: Vec<MarkerHandle> = layer.event_markers().map(|m| m.handle).collect();

        store.add_event("Fourth", "2025-07-01", 1.31, 103.9);
        markers.refresh(&mut layer, store.events());
        let second: Vec<MarkerHandle> = layer.event_markers().map(|m| m.handle).collect();

        assert_eq!(second.len(), 4);
        assert!(first.iter().all(|h| !second.contains(h)));
    }

    #[test]
    fn test_refresh_leaves_user_marker() {
        let store = DomainStore::seeded();
        let mut layer = MarkerLayer::new();
        let mut markers = EventMarkers::new();

        layer.set_user_marker(1.30, 103.85);
        markers.refresh(&mut layer, store.events());
        markers.refresh(&mut layer, store.events());

        assert_eq!(layer.markers().len(), 4);
        assert!(layer.user_marker().is_some());
    }

    #[test]
    fn test_user_marker_moves_in_place() {
        let mut layer = MarkerLayer::new();
        layer.set_user_marker(1.0, 103.0);
        let handle = layer.user_marker().map(|m| m.handle);

        layer.set_user_marker(1.5, 103.5);

        let user = layer.user_marker().expect("user marker placed");
        assert_eq!(Some(user.handle), handle);
        assert_eq!(user.position, GeoPoint::new(1.5, 103.5));
        assert_eq!(layer.markers().len(), 1);
    }

    #[test]
    fn test_remove_unknown_marker_is_ignored() {
        let mut layer = MarkerLayer::new();
        let handle = layer.add_marker(1.0, 103.0, "a", MarkerPayload::User);
        layer.remove_marker(handle);
        layer.remove_marker(handle);
        assert!(layer.markers().is_empty());
    }

    #[test]
    fn test_tile_template_validation() {
        assert!(validate_tile_template("https://tile.openstreetmap.org/{z}/{x}/{y}.png").is_ok());
        assert_eq!(
            validate_tile_template("https://tiles.example/{z}/{x}.png"),
            Err(MapError::InvalidTileTemplate(
                "https://tiles.example/{z}/{x}.png".to_string()
            ))
        );
    }

    #[test]
    fn test_fallback_center_prefers_first_event() {
        let store = DomainStore::seeded();
        assert_eq!(fallback_center(store.events()), GeoPoint::new(1.3008, 103.9122));
        assert_eq!(fallback_center(&[]), DEFAULT_CENTER);
    }

    #[test]
    fn test_fallback_map_url() {
        assert_eq!(
            fallback_map_url(GeoPoint::new(1.3008, 103.9122)),
            "https://www.openstreetmap.org/?mlat=1.3008&mlon=103.9122#map=13/1.3008/103.9122"
        );
    }
}
