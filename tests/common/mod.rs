#![allow(dead_code)]

use flotilla_match::model::{Boat, BoatRank, Crew, CrewRank, CrewStatus, Skill};

pub const EVENT: &str = "Fri May 29";

pub fn boat(key: &str, min: u8, offered: u8, rank: [i32; 2]) -> Boat {
    let mut boat = Boat::new(key, min, offered.max(min));
    boat.berths.insert(EVENT.to_string(), offered);
    boat.rank = BoatRank::new(rank.to_vec()).unwrap();
    boat
}

pub fn crew(key: &str, skill: Skill, rank: [i32; 4]) -> Crew {
    let mut crew = Crew::new(key, skill);
    crew.availability.insert(EVENT.to_string(), CrewStatus::Available);
    crew.rank = CrewRank::new(rank.to_vec()).unwrap();
    crew
}

pub fn sorted_keys<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut keys: Vec<String> = keys.map(str::to_string).collect();
    keys.sort();
    keys
}
