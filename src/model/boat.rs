use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::rank::BoatRank;

/// A registered boat as supplied by the registration system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boat {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub min_berths: u8,
    pub max_berths: u8,
    #[serde(default)]
    pub assistance: bool,
    /// event id -> berths offered for that event
    #[serde(default)]
    pub berths: BTreeMap<String, u8>,
    /// event id -> whether the boat sailed that event
    #[serde(default)]
    pub history: BTreeMap<String, bool>,
    #[serde(default)]
    pub rank: BoatRank,
}

impl Boat {
    pub fn new(key: &str, min_berths: u8, max_berths: u8) -> Self {
        Boat {
            key: key.to_string(),
            name: key.to_string(),
            min_berths,
            max_berths,
            assistance: false,
            berths: BTreeMap::new(),
            history: BTreeMap::new(),
            rank: BoatRank::default(),
        }
    }

    /// Berths offered for an event, 0 if the owner hasn't offered any
    pub fn offered_berths(&self, event_id: &str) -> u8 {
        self.berths.get(event_id).copied().unwrap_or(0)
    }
}
