//! Waypoint selection.
//!
//! Chooses one candidate place to stop at between an origin and a
//! destination so that the trip grows by at most a fixed number of seconds.
//! Oracle calls are bounded: one per candidate for the distance to the
//! destination, one for the direct route, and at most one per candidate for
//! the route through it.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::places::{CandidateList, Place};
use crate::traits::RouteOracle;

#[derive(Debug, Clone)]
pub struct SelectOptions {
    /// Only the first `max_candidates` places are ever sent to the oracle.
    pub max_candidates: usize,
    /// Largest acceptable detour in seconds (inclusive).
    pub max_detour_seconds: u32,
    /// Look up destination distances on the rayon pool.
    pub parallel_lookups: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            max_candidates: 20,
            max_detour_seconds: 120,
            parallel_lookups: false,
        }
    }
}

/// The chosen waypoint and the durations that justified it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub place: &'a Place,
    /// Direct origin -> destination duration.
    pub baseline_seconds: u32,
    /// Origin -> place -> destination duration.
    pub route_seconds: u32,
    /// `route_seconds - baseline_seconds`; negative if the oracle found the
    /// stop faster than the direct route.
    pub detour_seconds: i64,
}

/// A truncated candidate annotated once with its travel time to the
/// destination. `None` sorts after every known time.
#[derive(Debug, Clone)]
struct Annotated<'a> {
    place: &'a Place,
    distance_to_destination: Option<u32>,
}

/// Pick the first candidate, in order of proximity to `destination`, whose
/// detour stays within `options.max_detour_seconds`.
///
/// Returns `None` when the list is empty, the direct route is unknown, or no
/// candidate fits the bound. Oracle failures never abort the search.
pub fn select_waypoint<'a, O>(
    oracle: &O,
    origin: &str,
    destination: &str,
    candidates: &'a CandidateList,
    options: &SelectOptions,
) -> Option<Selection<'a>>
where
    O: RouteOracle + Sync,
{
    let truncated = candidates.top(options.max_candidates);
    if truncated.is_empty() {
        debug!("no candidates to evaluate");
        return None;
    }

    let mut annotated = annotate(oracle, destination, truncated, options.parallel_lookups);
    // Stable: equal distances keep their priority order.
    annotated.sort_by_key(|c| (c.distance_to_destination.is_none(), c.distance_to_destination));

    let Some(baseline) = query_duration(oracle, origin, destination, &[]) else {
        warn!(origin, destination, "direct route unavailable, cannot measure detours");
        return None;
    };
    debug!(baseline, candidates = annotated.len(), "direct route");

    let bound = i64::from(options.max_detour_seconds);
    for candidate in &annotated {
        let place = candidate.place;
        let Some(route) = query_duration(oracle, origin, destination, &[&place.address]) else {
            continue;
        };

        let detour = i64::from(route) - i64::from(baseline);
        debug!(address = %place.address, route, detour, "evaluated waypoint");

        if detour <= bound {
            info!(address = %place.address, detour, "selected waypoint");
            return Some(Selection {
                place,
                baseline_seconds: baseline,
                route_seconds: route,
                detour_seconds: detour,
            });
        }
    }

    info!(evaluated = annotated.len(), "no waypoint within detour bound");
    None
}

fn annotate<'a, O>(
    oracle: &O,
    destination: &str,
    places: &'a [Place],
    parallel: bool,
) -> Vec<Annotated<'a>>
where
    O: RouteOracle + Sync,
{
    let lookup = |place: &'a Place| Annotated {
        place,
        distance_to_destination: query_duration(oracle, &place.address, destination, &[]),
    };

    if parallel {
        // `collect` on an indexed parallel iterator keeps input order.
        places.par_iter().map(lookup).collect()
    } else {
        places.iter().map(lookup).collect()
    }
}

/// Route duration with transport errors folded into "unavailable".
fn query_duration<O: RouteOracle>(
    oracle: &O,
    origin: &str,
    destination: &str,
    waypoints: &[&str],
) -> Option<u32> {
    match oracle.route_duration(origin, destination, waypoints) {
        Ok(Some(seconds)) => Some(seconds),
        Ok(None) => {
            warn!(origin, destination, ?waypoints, "route unavailable");
            None
        }
        Err(err) => {
            warn!(origin, destination, ?waypoints, error = %err, "route query failed");
            None
        }
    }
}
