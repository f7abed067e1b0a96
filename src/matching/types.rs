use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Boat, Crew, Skill};
use super::rules::Rule;

/// Which capacity branch a selection went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityRegime {
    NoBoats,
    TooFewCrews,
    TooManyCrews,
    PerfectFit,
}

/// Outcome of selection for one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub regime: CapacityRegime,
    pub boats: Vec<Boat>,
    pub crews: Vec<Crew>,
    pub waitlist_boats: Vec<Boat>,
    pub waitlist_crews: Vec<Crew>,
    /// boat key -> occupied berths, only for selected boats
    pub occupied: BTreeMap<String, u8>,
}

impl Selection {
    pub fn occupied_berths(&self, boat_key: &str) -> u8 {
        self.occupied.get(boat_key).copied().unwrap_or(0)
    }

    pub fn total_occupied(&self) -> usize {
        self.occupied.values().map(|&n| n as usize).sum()
    }
}

/// A selected boat and the crew sailing on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewedBoat {
    pub boat: Boat,
    pub crews: Vec<Crew>,
}

impl CrewedBoat {
    pub fn new(boat: Boat) -> Self {
        CrewedBoat { boat, crews: Vec::new() }
    }

    pub fn contains(&self, crew_key: &str) -> bool {
        self.crews.iter().any(|c| c.key == crew_key)
    }

    pub fn has_max_skill(&self) -> bool {
        self.crews.iter().any(|c| c.skill == Skill::MAX)
    }

    /// Highest minus lowest skill level aboard, 0 for an empty roster
    pub fn skill_spread(&self) -> u32 {
        let levels = self.crews.iter().map(|c| c.skill.level());
        match (levels.clone().max(), levels.min()) {
            (Some(high), Some(low)) => high - low,
            _ => 0,
        }
    }

    /// Sum of the rule's loss over this roster
    pub fn roster_loss(&self, rule: Rule, event_id: &str) -> u32 {
        self.crews.iter().map(|c| rule.loss(c, self, event_id)).sum()
    }

    /// # Panics
    ///
    /// Panics if no crew with `crew_key` is aboard.
    pub fn crew(&self, crew_key: &str) -> &Crew {
        self.crews
            .iter()
            .find(|c| c.key == crew_key)
            .unwrap_or_else(|| panic!("crew {} is not aboard boat {}", crew_key, self.boat.key))
    }

    /// Puts `incoming` in the seat held by `outgoing_key`.
    ///
    /// # Panics
    ///
    /// Panics if no crew with `outgoing_key` is aboard.
    pub fn replace(&mut self, outgoing_key: &str, incoming: Crew) -> Crew {
        let seat = self
            .crews
            .iter()
            .position(|c| c.key == outgoing_key)
            .unwrap_or_else(|| {
                panic!(
                    "crew {} is not aboard boat {}",
                    outgoing_key, self.boat.key
                )
            });
        std::mem::replace(&mut self.crews[seat], incoming)
    }
}

/// Matching result for one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flotilla {
    pub event_id: String,
    pub crewed_boats: Vec<CrewedBoat>,
    pub waitlist_boats: Vec<Boat>,
    pub waitlist_crews: Vec<Crew>,
}

impl Flotilla {
    /// Index of the boat currently carrying a crew
    pub fn boat_of(&self, crew_key: &str) -> Option<usize> {
        self.crewed_boats.iter().position(|b| b.contains(crew_key))
    }

    pub fn crew(&self, crew_key: &str) -> Option<&Crew> {
        self.crewed_boats
            .iter()
            .flat_map(|b| b.crews.iter())
            .find(|c| c.key == crew_key)
    }

    /// Keys of every crew aboard, boat by boat in roster order
    pub fn crew_keys(&self) -> Vec<String> {
        self.crewed_boats
            .iter()
            .flat_map(|b| b.crews.iter().map(|c| c.key.clone()))
            .collect()
    }

    /// Sum of the rule's loss over every crew aboard
    pub fn total_loss(&self, rule: Rule) -> u32 {
        self.crewed_boats
            .iter()
            .map(|crewed| crewed.roster_loss(rule, &self.event_id))
            .sum()
    }
}
