//! detour-planner core
//!
//! Picks a single favourite place to stop at on the way between two
//! addresses, using an external route-time oracle to bound the detour.

pub mod error;
pub mod traits;
pub mod places;
pub mod selector;
pub mod google;
pub mod history;
pub mod favorites;
pub mod map;
pub mod links;
