//! Marker map of the most visited places.
//!
//! Geocodes the top places and renders a standalone Leaflet page. Marker
//! colour encodes rank in bands of four: the first four places are dark red,
//! the next four red, then orange, then beige.

use std::fs;
use std::path::Path;

use serde_json::json;
use tracing::{info, warn};

use crate::error::Error;
use crate::places::Place;
use crate::traits::{Coordinates, RouteOracle};

pub const MARKER_COLORS: [&str; 4] = ["darkred", "red", "orange", "beige"];

const DEFAULT_ZOOM: u8 = 14;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinates,
    pub popup: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerMap {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

/// Colour band for the place at `rank` (0-based).
pub fn marker_color(rank: usize) -> &'static str {
    let band = (rank / MARKER_COLORS.len()).min(MARKER_COLORS.len() - 1);
    MARKER_COLORS[band]
}

/// Geocode the first `top` places into a marker map.
///
/// Places that cannot be geocoded are left out but keep their rank for
/// colouring. Returns `None` if no place could be placed on the map.
pub fn build_marker_map<O>(oracle: &O, places: &[Place], top: usize) -> Option<MarkerMap>
where
    O: RouteOracle + ?Sized,
{
    let mut markers = Vec::new();
    for (rank, place) in places.iter().take(top).enumerate() {
        match oracle.geocode(&place.address) {
            Ok(Some(position)) => markers.push(Marker {
                position,
                popup: place.address.clone(),
                color: marker_color(rank),
            }),
            Ok(None) => warn!(address = %place.address, "no coordinates, leaving off map"),
            Err(err) => warn!(address = %place.address, error = %err, "geocode failed"),
        }
    }

    let center = markers.first()?.position;
    info!(markers = markers.len(), "built marker map");
    Some(MarkerMap {
        center,
        zoom: DEFAULT_ZOOM,
        markers,
    })
}

impl MarkerMap {
    /// Render as a self-contained HTML page.
    pub fn to_html(&self) -> String {
        let markers: Vec<_> = self
            .markers
            .iter()
            .map(|m| {
                json!({
                    "lat": m.position.0,
                    "lng": m.position.1,
                    "popup": m.popup,
                    "color": m.color,
                })
            })
            .collect();
        // serde_json escapes quotes; `</` is split so popups cannot close the script tag.
        let data = serde_json::Value::Array(markers).to_string().replace("</", "<\\/");

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{lat}, {lng}], {zoom});
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
var markers = {data};
markers.forEach(function (m) {{
  L.circleMarker([m.lat, m.lng], {{color: m.color, fillColor: m.color, fillOpacity: 0.8, radius: 9}})
    .bindPopup(document.createTextNode(m.popup))
    .addTo(map);
}});
</script>
</body>
</html>
"#,
            lat = self.center.0,
            lng = self.center.1,
            zoom = self.zoom,
        )
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        fs::write(path, self.to_html())?;
        Ok(())
    }
}
