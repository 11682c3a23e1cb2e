//! Places and the ordered candidate list.
//!
//! The candidate list is persisted between pipeline stages as a flat CSV
//! file with `address,name,visits` columns. Row order is priority order.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Error;

const HEADER: [&str; 3] = ["address", "name", "visits"];

/// A visited or favourite place, keyed by its free-text address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Number of recorded visits. Only meaningful during aggregation.
    #[serde(default)]
    pub visits: Option<u32>,
}

impl Place {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
            visits: None,
        }
    }

    pub fn named(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: Some(name.into()),
            visits: None,
        }
    }

    pub fn with_visits(mut self, visits: u32) -> Self {
        self.visits = Some(visits);
        self
    }

    /// Name if known, otherwise the address.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.address)
    }
}

/// Places in priority order, most relevant first.
///
/// Addresses are unique; a later duplicate is dropped so the first
/// occurrence keeps its priority.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateList {
    places: Vec<Place>,
    seen: HashSet<String>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a place at the lowest priority.
    ///
    /// Returns `false` when the address is already present.
    pub fn push(&mut self, place: Place) -> bool {
        if !self.seen.insert(place.address.clone()) {
            debug!(address = %place.address, "duplicate candidate ignored");
            return false;
        }
        self.places.push(place);
        true
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    pub fn as_slice(&self) -> &[Place] {
        &self.places
    }

    /// The `n` highest-priority places (or all of them if fewer).
    pub fn top(&self, n: usize) -> &[Place] {
        &self.places[..n.min(self.places.len())]
    }
}

impl FromIterator<Place> for CandidateList {
    fn from_iter<I: IntoIterator<Item = Place>>(iter: I) -> Self {
        let mut list = CandidateList::new();
        for place in iter {
            list.push(place);
        }
        list
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.iter()
    }
}

/// Load a candidate list from a CSV file.
pub fn read_places(path: &Path) -> Result<CandidateList, Error> {
    read_places_from(File::open(path)?)
}

/// Load a candidate list from CSV data with a header row.
///
/// Rows that fail to parse or carry a blank address are skipped.
pub fn read_places_from<R: Read>(reader: R) -> Result<CandidateList, Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut list = CandidateList::new();

    for (row, record) in reader.deserialize::<Place>().enumerate() {
        match record {
            Ok(mut place) => {
                let address = place.address.trim();
                if address.is_empty() {
                    warn!(row = row + 1, "skipping place without address");
                    continue;
                }
                place.address = address.to_string();
                list.push(place);
            }
            Err(err) => {
                warn!(row = row + 1, error = %err, "skipping malformed place record");
            }
        }
    }

    Ok(list)
}

/// Write a candidate list as CSV, preserving priority order.
pub fn write_places(path: &Path, places: &CandidateList) -> Result<(), Error> {
    write_places_to(File::create(path)?, places)
}

pub fn write_places_to<W: Write>(writer: W, places: &CandidateList) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(HEADER)?;
    for place in places {
        writer.serialize(place)?;
    }
    writer.flush()?;
    Ok(())
}
