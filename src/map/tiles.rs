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

use walkers::sources::{Attribution, TileSource};
use walkers::TileId;

/// Tile source built from a URL template such as
/// `https://{s}.tile.example.org/{z}/{x}/{y}.png`.
/// `{s}` load-balances across the a-d subdomains based on tile coordinates.
#[derive(Debug, Clone)]
pub struct TemplateTileSource {
    template: String,
}

impl TemplateTileSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl TileSource for TemplateTileSource {
    fn tile_url(&self, tile_id: TileId) -> String {
        let subdomain = ['a', 'b', 'c', 'd'][((tile_id.x + tile_id.y) % 4) as usize];

        self.template
            .replace("{s}", &subdomain.to_string())
            .replace("{z}", &tile_id.zoom.to_string())
            .replace("{x}", &tile_id.x.to_string())
            .replace("{y}", &tile_id.y.to_string())
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© OpenStreetMap contributors",
            url: "https://www.openstreetmap.org/copyright",
            logo_light: None,
            logo_dark: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_substitution() {
        let source = TemplateTileSource::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png");
        let url = source.tile_url(TileId { x: 6, y: 3, zoom: 4 });
        assert_eq!(url, "https://tile.openstreetmap.org/4/6/3.png");
    }

    #[test]
    fn test_subdomain_rotation() {
        let source = TemplateTileSource::new("https://{s}.tiles.example/{z}/{x}/{y}.png");
        assert_eq!(
            source.tile_url(TileId { x: 1, y: 1, zoom: 2 }),
            "https://c.tiles.example/2/1/1.png"
        );
        assert_eq!(
            source.tile_url(TileId { x: 2, y: 2, zoom: 2 }),
            "https://a.tiles.example/2/2/2.png"
        );
    }
}
