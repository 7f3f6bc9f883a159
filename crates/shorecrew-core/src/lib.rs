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

//! Core of the ShoreCrew beach-cleanup app.
//!
//! Everything here is independent of the UI toolkit:
//!
//! - **Store**: crew, events and user location ([`store::DomainStore`])
//! - **Weather**: forecast fetch with deterministic fallback ([`weather`])
//! - **Markers**: the map adapter seam and the full-refresh marker policy
//! - **View**: pure projections of the store into view models
//! - **Handlers**: join, create and locate, each followed by a re-render
//!
//! # Example
//!
//! ```
//! use shorecrew_core::handlers::CleanupSession;
//! use shorecrew_core::markers::MarkerLayer;
//! use shorecrew_core::store::DomainStore;
//!
//! let mut session = CleanupSession::new(DomainStore::seeded(), MarkerLayer::new());
//! session.join(&"event-2".into());
//! assert_eq!(session.events_view().rows[1].participant_count, 19);
//! ```

pub mod handlers;
pub mod locate;
pub mod markers;
pub mod model;
pub mod store;
pub mod view;
pub mod weather;

pub use handlers::{CleanupSession, Notice, NoticeLevel, Notices};
pub use locate::{LocateError, Locator};
pub use markers::{MapAdapter, MapError, MarkerHandle, MarkerLayer, MarkerPayload};
pub use model::{CleanupEvent, CrewMember, EventId, GeoPoint};
pub use store::DomainStore;
pub use weather::{ConditionsConfig, ConditionsResult, ConditionsView, WeatherError, WeatherProvider};
