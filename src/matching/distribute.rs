use log::warn;

use super::types::{CrewedBoat, Flotilla, Selection};

/// Deals the selected crews round-robin onto the selected boats, in rank
/// order, never past a boat's occupied berths
pub fn distribute(selection: Selection, event_id: &str) -> Flotilla {
    let capacity: Vec<usize> = selection
        .boats
        .iter()
        .map(|b| selection.occupied_berths(&b.key) as usize)
        .collect();
    let mut crewed_boats: Vec<CrewedBoat> = selection.boats.into_iter().map(CrewedBoat::new).collect();
    let mut waitlist_crews = Vec::new();
    let mut next = 0;

    for crew in selection.crews {
        // Find the next boat with a free berth, starting where we left off
        let open = (0..crewed_boats.len())
            .map(|offset| (next + offset) % crewed_boats.len())
            .find(|&i| crewed_boats[i].crews.len() < capacity[i]);

        match open {
            Some(i) => {
                crewed_boats[i].crews.push(crew);
                next = (i + 1) % crewed_boats.len();
            }
            None => {
                warn!("{}: no berth left for crew {}, wait-listing", event_id, crew.key);
                waitlist_crews.push(crew);
            }
        }
    }

    waitlist_crews.extend(selection.waitlist_crews);

    Flotilla {
        event_id: event_id.to_string(),
        crewed_boats,
        waitlist_boats: selection.waitlist_boats,
        waitlist_crews,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::matching::types::CapacityRegime;
    use crate::model::{Boat, Crew, Skill};

    fn selection(berths: &[(&str, u8)], crew_count: usize) -> Selection {
        let boats: Vec<Boat> = berths.iter().map(|(key, _)| Boat::new(key, 1, 6)).collect();
        let occupied: BTreeMap<String, u8> = berths.iter().map(|(k, n)| (k.to_string(), *n)).collect();
        Selection {
            regime: CapacityRegime::PerfectFit,
            boats,
            crews: (0..crew_count).map(|i| Crew::new(&format!("c{}", i), Skill::Low)).collect(),
            waitlist_boats: Vec::new(),
            waitlist_crews: Vec::new(),
            occupied,
        }
    }

    fn roster(flotilla: &Flotilla, boat: usize) -> Vec<String> {
        flotilla.crewed_boats[boat].crews.iter().map(|c| c.key.clone()).collect()
    }

    #[test]
    fn deals_round_robin() {
        let flotilla = distribute(selection(&[("a", 2), ("b", 2)], 4), "Fri May 29");
        assert_eq!(roster(&flotilla, 0), vec!["c0", "c2"]);
        assert_eq!(roster(&flotilla, 1), vec!["c1", "c3"]);
    }

    #[test]
    fn skips_full_boats() {
        let flotilla = distribute(selection(&[("a", 1), ("b", 3)], 4), "Fri May 29");
        assert_eq!(roster(&flotilla, 0), vec!["c0"]);
        assert_eq!(roster(&flotilla, 1), vec!["c1", "c2", "c3"]);
        assert!(flotilla.waitlist_crews.is_empty());
    }

    #[test]
    fn overflow_is_wait_listed() {
        let flotilla = distribute(selection(&[("a", 1)], 2), "Fri May 29");
        assert_eq!(roster(&flotilla, 0), vec!["c0"]);
        assert_eq!(flotilla.waitlist_crews.len(), 1);
    }
}
