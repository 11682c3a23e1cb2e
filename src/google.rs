//! Google Maps HTTP adapter for geocoding and route durations.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::OracleError;
use crate::traits::{Coordinates, RouteOracle};

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    Driving,
    #[default]
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    pub geocode_url: String,
    pub directions_url: String,
    pub api_key: String,
    pub travel_mode: TravelMode,
    pub timeout_secs: u64,
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            geocode_url: GEOCODE_URL.to_string(),
            directions_url: DIRECTIONS_URL.to_string(),
            api_key: String::new(),
            travel_mode: TravelMode::default(),
            timeout_secs: 10,
        }
    }
}

impl GoogleMapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Point both endpoints at another host, e.g. a local stand-in.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.geocode_url = format!("{base}/maps/api/geocode/json");
        self.directions_url = format!("{base}/maps/api/directions/json");
        self
    }

    pub fn with_travel_mode(mut self, mode: TravelMode) -> Self {
        self.travel_mode = mode;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    config: GoogleMapsConfig,
    client: reqwest::blocking::Client,
}

impl GoogleMapsClient {
    pub fn new(config: GoogleMapsConfig) -> Result<Self, OracleError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(OracleError::ClientBuild)?;

        Ok(Self { config, client })
    }

    fn geocode_request(&self, address: &str) -> Result<GeocodeResponse, OracleError> {
        let url = &self.config.geocode_url;
        self.client
            .get(url)
            .query(&[("address", address), ("key", self.config.api_key.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<GeocodeResponse>())
            .map_err(|source| OracleError::Transport {
                url: url.clone(),
                source,
            })
    }
}

impl RouteOracle for GoogleMapsClient {
    fn geocode(&self, address: &str) -> Result<Option<Coordinates>, OracleError> {
        let body = self.geocode_request(address)?;
        if !body.is_ok() {
            warn!(address, status = %body.status, message = ?body.error_message, "geocode failed");
            return Ok(None);
        }
        Ok(body
            .results
            .first()
            .map(|result| (result.geometry.location.lat, result.geometry.location.lng)))
    }

    fn route_duration(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[&str],
    ) -> Result<Option<u32>, OracleError> {
        let url = &self.config.directions_url;
        let mut params = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("mode", self.config.travel_mode.as_str().to_string()),
            ("key", self.config.api_key.clone()),
        ];
        if !waypoints.is_empty() {
            params.push(("waypoints", waypoints.join("|")));
        }

        let body = self
            .client
            .get(url)
            .query(&params)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<DirectionsResponse>())
            .map_err(|source| OracleError::Transport {
                url: url.clone(),
                source,
            })?;

        if !body.is_ok() {
            warn!(origin, destination, status = %body.status, message = ?body.error_message, "directions failed");
            return Ok(None);
        }

        let duration = body.total_duration(waypoints.len() + 1);
        debug!(origin, destination, ?waypoints, ?duration, "route duration");
        Ok(duration)
    }

    fn resolve_name_to_address(&self, name: &str) -> Result<Option<String>, OracleError> {
        let body = self.geocode_request(name)?;
        if !body.is_ok() {
            debug!(name, status = %body.status, "name did not resolve");
            return Ok(None);
        }
        Ok(body
            .results
            .into_iter()
            .next()
            .map(|result| result.formatted_address))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

impl GeocodeResponse {
    fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

impl DirectionsResponse {
    fn is_ok(&self) -> bool {
        self.status == "OK"
    }

    /// Sum of leg durations of the first route, if it has `expected_legs` legs.
    fn total_duration(&self, expected_legs: usize) -> Option<u32> {
        let route = self.routes.first()?;
        if route.legs.len() != expected_legs {
            warn!(
                expected = expected_legs,
                actual = route.legs.len(),
                "unexpected number of route legs"
            );
            return None;
        }
        route
            .legs
            .iter()
            .try_fold(0u32, |total, leg| total.checked_add(leg.duration.value))
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    duration: TextValue,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: u32,
}
