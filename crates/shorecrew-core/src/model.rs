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

//! Domain records shared by the store, the marker layer and the views.

use std::fmt;

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Identifier of a cleanup event (`event-1`, `event-1718000000000`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A member of the cleanup crew. Fixed after seeding.
#[derive(Debug, Clone, PartialEq)]
pub struct CrewMember {
    pub id: u32,
    pub name: String,
    /// Short glyph shown in place of a picture (emoji or initials).
    pub avatar: String,
    pub cleanups_completed: u32,
    pub items_collected: u32,
}

/// A scheduled beach-cleanup activity.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupEvent {
    pub id: EventId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Calendar date as entered (`YYYY-MM-DD` for seeded events).
    pub date: String,
    pub time: String,
    /// Never decreases within a session; there is no leave operation.
    pub participant_count: u32,
    pub description: String,
}

impl CleanupEvent {
    #[must_use]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}
