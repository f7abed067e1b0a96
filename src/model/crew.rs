use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::rank::CrewRank;

/// Sailing skill, ordered from least to most experienced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    #[default]
    Low,
    Medium,
    High,
}

impl Skill {
    pub const MAX: Skill = Skill::High;

    pub fn level(self) -> u32 {
        self as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            Skill::Low => "low",
            Skill::Medium => "medium",
            Skill::High => "high",
        }
    }
}

/// Availability of a crew member for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrewStatus {
    #[default]
    Unavailable,
    Available,
    /// Wait-listed last time, so promised a place this time
    Guaranteed,
    Withdrawn,
}

impl CrewStatus {
    /// Whether a crew with this status is a candidate for selection
    pub fn is_candidate(self) -> bool {
        matches!(self, CrewStatus::Available | CrewStatus::Guaranteed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skill: Skill,
    #[serde(default)]
    pub partner: Option<String>,
    #[serde(default)]
    pub availability: BTreeMap<String, CrewStatus>,
    /// event id -> boat key sailed on, empty when the crew wasn't placed
    #[serde(default)]
    pub history: BTreeMap<String, String>,
    #[serde(default)]
    pub whitelist: BTreeSet<String>,
    #[serde(default)]
    pub rank: CrewRank,
}

impl Crew {
    pub fn new(key: &str, skill: Skill) -> Self {
        Crew {
            key: key.to_string(),
            name: key.to_string(),
            skill,
            partner: None,
            availability: BTreeMap::new(),
            history: BTreeMap::new(),
            whitelist: BTreeSet::new(),
            rank: CrewRank::default(),
        }
    }

    pub fn status(&self, event_id: &str) -> CrewStatus {
        self.availability.get(event_id).copied().unwrap_or_default()
    }

    /// Boat sailed on for an event, "" if none recorded
    pub fn assigned_boat(&self, event_id: &str) -> &str {
        self.history.get(event_id).map(String::as_str).unwrap_or("")
    }

    pub fn is_partner(&self, other: &Crew) -> bool {
        self.partner.as_deref() == Some(other.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_unavailable() {
        let mut crew = Crew::new("ana", Skill::Medium);
        crew.availability.insert("Fri May 29".to_string(), CrewStatus::Guaranteed);
        assert_eq!(crew.status("Fri May 29"), CrewStatus::Guaranteed);
        assert_eq!(crew.status("Fri Jun 05"), CrewStatus::Unavailable);
        assert!(crew.status("Fri May 29").is_candidate());
        assert!(!CrewStatus::Withdrawn.is_candidate());
    }

    #[test]
    fn skill_levels_are_ordinal() {
        assert_eq!(Skill::Low.level(), 0);
        assert_eq!(Skill::MAX.level(), 2);
        assert!(Skill::Medium < Skill::High);
    }

    #[test]
    fn partner_is_one_directional() {
        let mut ana = Crew::new("ana", Skill::Low);
        let bo = Crew::new("bo", Skill::Low);
        ana.partner = Some("bo".to_string());
        assert!(ana.is_partner(&bo));
        assert!(!bo.is_partner(&ana));
    }
}
