//! Test fixtures for detour-planner.
//!
//! Provides:
//! - Real Jerusalem street addresses
//! - A scripted oracle that answers from a table and records every query
//! - A scripted input source for interactive flows

#![allow(dead_code)]

pub mod jerusalem_places;

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use detour_planner::error::OracleError;
use detour_planner::traits::{Coordinates, InputSource, RouteOracle};

pub use jerusalem_places::*;

/// A single call made against [`ScriptedOracle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Geocode(String),
    Route {
        origin: String,
        destination: String,
        waypoints: Vec<String>,
    },
    Resolve(String),
}

#[derive(Debug, Clone)]
enum Answer<T> {
    Value(T),
    Unavailable,
    Fail,
}

/// Oracle answering from pre-registered tables.
///
/// Anything not registered is reported as unavailable.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    routes: HashMap<(String, String, Vec<String>), Answer<u32>>,
    coordinates: HashMap<String, Answer<Coordinates>>,
    names: HashMap<String, Answer<String>>,
    log: Mutex<Vec<Query>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct route duration.
    pub fn route(self, origin: &str, destination: &str, seconds: u32) -> Self {
        self.via(origin, &[], destination, seconds)
    }

    /// Route duration through the given waypoints.
    pub fn via(mut self, origin: &str, waypoints: &[&str], destination: &str, seconds: u32) -> Self {
        self.routes
            .insert(route_key(origin, destination, waypoints), Answer::Value(seconds));
        self
    }

    /// Route query that fails at the transport level.
    pub fn failing_route(mut self, origin: &str, waypoints: &[&str], destination: &str) -> Self {
        self.routes
            .insert(route_key(origin, destination, waypoints), Answer::Fail);
        self
    }

    pub fn coordinates(mut self, address: &str, lat: f64, lng: f64) -> Self {
        self.coordinates
            .insert(address.to_string(), Answer::Value((lat, lng)));
        self
    }

    pub fn failing_geocode(mut self, address: &str) -> Self {
        self.coordinates.insert(address.to_string(), Answer::Fail);
        self
    }

    pub fn name(mut self, name: &str, address: &str) -> Self {
        self.names
            .insert(name.to_string(), Answer::Value(address.to_string()));
        self
    }

    pub fn unresolvable_name(mut self, name: &str) -> Self {
        self.names.insert(name.to_string(), Answer::Unavailable);
        self
    }

    pub fn queries(&self) -> Vec<Query> {
        self.log.lock().unwrap().clone()
    }

    /// Route queries in the order they were made.
    pub fn route_queries(&self) -> Vec<(String, String, Vec<String>)> {
        self.queries()
            .into_iter()
            .filter_map(|query| match query {
                Query::Route {
                    origin,
                    destination,
                    waypoints,
                } => Some((origin, destination, waypoints)),
                _ => None,
            })
            .collect()
    }

    /// Addresses used as sole waypoint, in evaluation order.
    pub fn evaluated_waypoints(&self) -> Vec<String> {
        self.route_queries()
            .into_iter()
            .filter_map(|(_, _, mut waypoints)| waypoints.pop())
            .collect()
    }

    /// Every address that appeared anywhere in a route query.
    pub fn touched_addresses(&self) -> Vec<String> {
        self.route_queries()
            .into_iter()
            .flat_map(|(origin, destination, waypoints)| {
                std::iter::once(origin)
                    .chain(std::iter::once(destination))
                    .chain(waypoints)
            })
            .collect()
    }

    fn record(&self, query: Query) {
        self.log.lock().unwrap().push(query);
    }
}

fn route_key(origin: &str, destination: &str, waypoints: &[&str]) -> (String, String, Vec<String>) {
    (
        origin.to_string(),
        destination.to_string(),
        waypoints.iter().map(|w| w.to_string()).collect(),
    )
}

fn answer<T: Clone>(entry: Option<&Answer<T>>) -> Result<Option<T>, OracleError> {
    match entry {
        Some(Answer::Value(value)) => Ok(Some(value.clone())),
        Some(Answer::Fail) => Err(OracleError::Unreachable("scripted failure".to_string())),
        Some(Answer::Unavailable) | None => Ok(None),
    }
}

impl RouteOracle for ScriptedOracle {
    fn geocode(&self, address: &str) -> Result<Option<Coordinates>, OracleError> {
        self.record(Query::Geocode(address.to_string()));
        answer(self.coordinates.get(address))
    }

    fn route_duration(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[&str],
    ) -> Result<Option<u32>, OracleError> {
        let key = route_key(origin, destination, waypoints);
        self.record(Query::Route {
            origin: key.0.clone(),
            destination: key.1.clone(),
            waypoints: key.2.clone(),
        });
        answer(self.routes.get(&key))
    }

    fn resolve_name_to_address(&self, name: &str) -> Result<Option<String>, OracleError> {
        self.record(Query::Resolve(name.to_string()));
        answer(self.names.get(name))
    }
}

/// Input source replaying canned answers, then reporting end of input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn prompt(&mut self, message: &str) -> Option<String> {
        self.prompts.push(message.to_string());
        self.answers.pop_front()
    }
}
