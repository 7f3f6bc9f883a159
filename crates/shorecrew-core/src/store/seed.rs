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

//! Fixed sample data loaded by [`DomainStore::seed`](super::DomainStore::seed).

use crate::model::{CleanupEvent, CrewMember, EventId};

pub(super) fn crew() -> Vec<CrewMember> {
    [
        (1, "Aisha Rahman", "🐢", 42, 1_280),
        (2, "Marcus Tan", "🦀", 35, 960),
        (3, "Priya Nair", "🐚", 28, 742),
        (4, "Jonas Weber", "🐬", 19, 515),
        (5, "Mei Lin", "🌊", 12, 301),
    ]
    .into_iter()
    .map(|(id, name, avatar, cleanups_completed, items_collected)| CrewMember {
        id,
        name: name.to_string(),
        avatar: avatar.to_string(),
        cleanups_completed,
        items_collected,
    })
    .collect()
}

pub(super) fn events() -> Vec<CleanupEvent> {
    vec![
        CleanupEvent {
            id: EventId::new("event-1"),
            name: "East Coast Park Sweep".to_string(),
            lat: 1.3008,
            lng: 103.9122,
            date: "2025-06-14".to_string(),
            time: "08:00".to_string(),
            participant_count: 24,
            description: "Shoreline litter pick between carparks C and F.".to_string(),
        },
        CleanupEvent {
            id: EventId::new("event-2"),
            name: "Pasir Ris Mangrove Cleanup".to_string(),
            lat: 1.3817,
            lng: 103.9510,
            date: "2025-06-21".to_string(),
            time: "07:30".to_string(),
            participant_count: 18,
            description: "Boardwalk and mangrove edge, gloves provided.".to_string(),
        },
        CleanupEvent {
            id: EventId::new("event-3"),
            name: "Changi Beach Microplastics Survey".to_string(),
            lat: 1.3900,
            lng: 103.9925,
            date: "2025-06-28".to_string(),
            time: "09:00".to_string(),
            participant_count: 31,
            description: "Sieve sampling along the high-tide line.".to_string(),
        },
    ]
}
