use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Crew, Skill};
use super::types::CrewedBoat;

/// Placement rules, optimized one at a time in `Rule::PRIORITY` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Boats needing assistance should carry a high-skill crew
    Assist,
    /// Crews should sail boats on their whitelist
    Whitelist,
    /// High-skill crews shouldn't sit on boats spanning the full skill range
    HighSkill,
    /// Nor should low-skill crews
    LowSkill,
    /// Partners are split across boats
    Partner,
    /// Crews shouldn't keep sailing the same boat
    Repeat,
}

impl Rule {
    pub const PRIORITY: [Rule; 6] = [
        Rule::Assist,
        Rule::Whitelist,
        Rule::HighSkill,
        Rule::LowSkill,
        Rule::Partner,
        Rule::Repeat,
    ];

    /// This rule and every rule ranked above it, highest first
    pub fn and_above(self) -> &'static [Rule] {
        let all: &'static [Rule] = &Rule::PRIORITY;
        let position = all.iter().position(|r| *r == self).unwrap_or(all.len() - 1);
        &all[..=position]
    }

    /// How badly this rule is violated for `crew` aboard `boat`.
    ///
    /// # Panics
    ///
    /// Panics if `crew` isn't aboard `boat`.
    pub fn loss(self, crew: &Crew, boat: &CrewedBoat, event_id: &str) -> u32 {
        assert!(
            boat.contains(&crew.key),
            "crew {} is not aboard boat {}",
            crew.key,
            boat.boat.key
        );

        match self {
            Rule::Assist => {
                if !boat.boat.assistance || boat.has_max_skill() {
                    0
                } else {
                    Skill::MAX.level() - crew.skill.level()
                }
            }
            Rule::Whitelist => u32::from(!crew.whitelist.contains(&boat.boat.key)),
            Rule::HighSkill => {
                u32::from(boat.skill_spread() == Skill::MAX.level() && crew.skill == Skill::MAX)
            }
            Rule::LowSkill => {
                u32::from(boat.skill_spread() == Skill::MAX.level() && crew.skill == Skill::Low)
            }
            Rule::Partner => u32::from(
                boat.crews
                    .iter()
                    .any(|other| other.key != crew.key && crew.is_partner(other)),
            ),
            Rule::Repeat => crew
                .history
                .iter()
                .filter(|(event, sailed)| event.as_str() != event_id && **sailed == boat.boat.key)
                .count() as u32,
        }
    }

    /// How well suited `crew` is to relieve this rule somewhere else
    pub fn gradient(self, crew: &Crew) -> u32 {
        match self {
            Rule::Assist => crew.skill.level(),
            Rule::Whitelist => crew.whitelist.len() as u32,
            Rule::HighSkill => u32::from(crew.skill != Skill::MAX),
            Rule::LowSkill => u32::from(crew.skill != Skill::Low),
            Rule::Partner => u32::from(crew.partner.is_none()),
            Rule::Repeat => crew.history.values().filter(|boat| boat.is_empty()).count() as u32,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Assist => "ASSIST",
            Rule::Whitelist => "WHITELIST",
            Rule::HighSkill => "HIGH_SKILL",
            Rule::LowSkill => "LOW_SKILL",
            Rule::Partner => "PARTNER",
            Rule::Repeat => "REPEAT",
        };
        f.write_str(name)
    }
}
