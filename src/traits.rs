//! Core seams of the planner.
//!
//! The selector and the collaborators only ever talk to the outside world
//! through these traits, so they can be driven by in-memory doubles in tests.

use crate::error::OracleError;

/// Latitude/longitude pair in degrees.
pub type Coordinates = (f64, f64);

/// External service answering geocoding and route-duration queries.
///
/// Every method issues at most one outbound request. `Ok(None)` means the
/// service answered but could not resolve the query; `Err` is reserved for
/// transport failures the caller cannot interpret.
pub trait RouteOracle {
    /// Resolve an address to coordinates.
    fn geocode(&self, address: &str) -> Result<Option<Coordinates>, OracleError>;

    /// Travel time in whole seconds along origin -> waypoints... -> destination.
    ///
    /// Waypoints are visited in the given order; an empty slice means a
    /// direct route.
    fn route_duration(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[&str],
    ) -> Result<Option<u32>, OracleError>;

    /// Resolve a free-text place name to a canonical address.
    fn resolve_name_to_address(&self, name: &str) -> Result<Option<String>, OracleError>;
}

/// Source of free-text answers to interactive questions.
pub trait InputSource {
    /// Ask a question. `None` signals the input is exhausted.
    fn prompt(&mut self, message: &str) -> Option<String>;
}
