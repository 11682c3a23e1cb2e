//! Real Jerusalem addresses for realistic fixtures.

use detour_planner::places::{CandidateList, Place};

pub const ORIGIN: &str = "Betsal'el St 8, Jerusalem, Israel";
pub const DESTINATION: &str = "Ben Sira St 8, Jerusalem, Israel";

pub const CAFES: &[(&str, &str)] = &[
    ("Shlomtzion HaMalka St 18, Jerusalem, Israel", "Cafe Nadi"),
    ("Yoel Moshe Salomon St 12, Jerusalem, Israel", "Nahalat Shiva Bakery"),
    ("King George St 31, Jerusalem, Israel", "Hamashbir"),
    ("Agripas St 90, Jerusalem, Israel", "Mahane Yehuda Market"),
    ("Hillel St 8, Jerusalem, Israel", "Hillel Cafe"),
    ("Jaffa St 43, Jerusalem, Israel", "Zion Square"),
    ("Emek Refaim St 23, Jerusalem, Israel", "German Colony Deli"),
    ("Keren HaYesod St 1, Jerusalem, Israel", "Windmill Cafe"),
];

/// The first `n` cafes as a candidate list, in fixture order.
pub fn cafes(n: usize) -> CandidateList {
    CAFES
        .iter()
        .take(n)
        .map(|(address, name)| Place::named(*address, *name))
        .collect()
}
