//! Aggregation of location-history exports into a candidate list.
//!
//! Reads every `*.json` file in a directory (semantic location history
//! format), keeps place visits whose address matches a pattern, counts
//! repeat visits and orders places by how often they were visited.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::places::{CandidateList, Place};

/// Places need more than this many visits to be kept.
const MIN_VISITS_EXCLUSIVE: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineExport {
    #[serde(default)]
    timeline_objects: Vec<TimelineObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineObject {
    place_visit: Option<PlaceVisit>,
}

#[derive(Debug, Deserialize)]
struct PlaceVisit {
    location: Option<VisitLocation>,
}

#[derive(Debug, Deserialize)]
struct VisitLocation {
    address: Option<String>,
    name: Option<String>,
}

/// Running visit counts, remembering first-seen order.
#[derive(Debug, Default)]
struct VisitCounter {
    order: Vec<String>,
    entries: HashMap<String, (Option<String>, u32)>,
}

impl VisitCounter {
    fn record(&mut self, address: &str, name: Option<String>) {
        match self.entries.get_mut(address) {
            Some((known, visits)) => {
                *visits += 1;
                if known.is_none() {
                    *known = name;
                }
            }
            None => {
                self.order.push(address.to_string());
                self.entries.insert(address.to_string(), (name, 1));
            }
        }
    }

    fn into_ranked(mut self) -> CandidateList {
        let mut places: Vec<Place> = self
            .order
            .into_iter()
            .filter_map(|address| {
                let (name, visits) = self.entries.remove(&address)?;
                (visits > MIN_VISITS_EXCLUSIVE).then_some(Place {
                    address,
                    name,
                    visits: Some(visits),
                })
            })
            .collect();
        // Stable: ties keep first-seen order.
        places.sort_by(|a, b| b.visits.cmp(&a.visits));
        places.into_iter().collect()
    }
}

/// Aggregate every export in `dir` into a ranked candidate list.
///
/// `pattern` is matched against the address text; `None` keeps every
/// address. Unreadable or malformed files are logged and skipped.
pub fn aggregate_exports(dir: &Path, pattern: Option<&str>) -> Result<CandidateList, Error> {
    let filter = pattern.map(Regex::new).transpose()?;
    let mut counter = VisitCounter::default();

    for path in export_files(dir)? {
        let export = match read_export(&path) {
            Ok(export) => export,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable export");
                continue;
            }
        };
        debug!(path = %path.display(), objects = export.timeline_objects.len(), "read export");
        collect_visits(export, filter.as_ref(), &mut counter);
    }

    let ranked = counter.into_ranked();
    info!(places = ranked.len(), "aggregated location history");
    Ok(ranked)
}

/// Aggregate already-loaded export documents (JSON text).
pub fn aggregate_documents<'a, I>(documents: I, pattern: Option<&str>) -> Result<CandidateList, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let filter = pattern.map(Regex::new).transpose()?;
    let mut counter = VisitCounter::default();

    for (index, text) in documents.into_iter().enumerate() {
        match serde_json::from_str::<TimelineExport>(text) {
            Ok(export) => collect_visits(export, filter.as_ref(), &mut counter),
            Err(err) => warn!(index, error = %err, "skipping malformed export"),
        }
    }

    Ok(counter.into_ranked())
}

fn collect_visits(export: TimelineExport, filter: Option<&Regex>, counter: &mut VisitCounter) {
    for object in export.timeline_objects {
        let Some(location) = object.place_visit.and_then(|visit| visit.location) else {
            continue;
        };
        let Some(address) = location.address else {
            continue;
        };
        if filter.is_none_or(|re| re.is_match(&address)) {
            let name = location.name.filter(|name| !name.trim().is_empty());
            counter.record(&address, name);
        }
    }
}

/// JSON files in `dir`, sorted by file name.
fn export_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_export(path: &Path) -> Result<TimelineExport, Error> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
