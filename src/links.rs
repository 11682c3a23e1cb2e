//! Shareable directions links.

use url::Url;

use crate::google::TravelMode;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1";

/// Google Maps directions link from `origin` to `destination`.
pub fn directions_link(origin: &str, destination: &str, mode: TravelMode) -> String {
    let params = [
        ("origin", origin),
        ("destination", destination),
        ("mode", mode.as_str()),
    ];
    match Url::parse_with_params(DIRECTIONS_BASE, &params) {
        Ok(url) => url.to_string(),
        // The base is a valid constant; parsing cannot fail.
        Err(_) => DIRECTIONS_BASE.to_string(),
    }
}
