use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::model::{Season, SeasonError};

/// Keeps one record per key. A re-registered key replaces the earlier
/// record but keeps its place in the list.
fn merge_registrations<T>(records: Vec<T>, key: impl Fn(&T) -> &str) -> Vec<T> {
    let mut merged: Vec<T> = Vec::with_capacity(records.len());
    for record in records {
        match merged.iter().position(|existing| key(existing) == key(&record)) {
            Some(i) => {
                warn!("duplicate registration for {}, keeping the later one", key(&record));
                merged[i] = record;
            }
            None => merged.push(record),
        }
    }
    merged
}

/// Parses a season document from JSON text
pub fn parse_season(json: &str) -> Result<Season, SeasonError> {
    let mut season: Season = serde_json::from_str(json)?;
    season.boats = merge_registrations(season.boats, |b| b.key.as_str());
    season.crews = merge_registrations(season.crews, |c| c.key.as_str());
    debug!(
        "season with {} events, {} boats, {} crews",
        season.events.len(),
        season.boats.len(),
        season.crews.len()
    );
    Ok(season)
}

/// Loads a season document from a JSON file
pub fn load_season<P: AsRef<Path>>(path: P) -> Result<Season, SeasonError> {
    let text = fs::read_to_string(path)?;
    parse_season(&text)
}
