use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::model::{Boat, Crew};
use super::shuffle::shuffle_for_event;
use super::types::{CapacityRegime, Selection};

/// Shuffles the candidates for the event, then stable-sorts them by rank,
/// highest first. Equal ranks keep their shuffled order.
pub fn rank_order(boats: &[Boat], crews: &[Crew], event_id: &str) -> (Vec<Boat>, Vec<Crew>) {
    let mut boats = boats.to_vec();
    let mut crews = crews.to_vec();

    shuffle_for_event(&mut boats, event_id);
    shuffle_for_event(&mut crews, event_id);

    // sort_by is stable
    boats.sort_by(|a, b| b.rank.cmp(&a.rank));
    crews.sort_by(|a, b| b.rank.cmp(&a.rank));

    (boats, crews)
}

/// Decides which boats and crews sail an event and how many berths each
/// selected boat fills
pub fn select(boats: &[Boat], crews: &[Crew], event_id: &str) -> Selection {
    let (boats, crews) = rank_order(boats, crews, event_id);
    let selection = cut(boats, crews, event_id);

    info!(
        "{}: {:?}, {} boats / {} crews selected, {} boats / {} crews wait-listed",
        event_id,
        selection.regime,
        selection.boats.len(),
        selection.crews.len(),
        selection.waitlist_boats.len(),
        selection.waitlist_crews.len()
    );

    selection
}

/// Resolves supply against demand over rank-ordered candidates
pub fn cut(boats: Vec<Boat>, crews: Vec<Crew>, event_id: &str) -> Selection {
    // Crews are never placed without boats
    if boats.is_empty() {
        return Selection {
            regime: CapacityRegime::NoBoats,
            boats: Vec::new(),
            crews: Vec::new(),
            waitlist_boats: Vec::new(),
            waitlist_crews: Vec::new(),
            occupied: BTreeMap::new(),
        };
    }

    let crew_count = crews.len();
    let min_berths: usize = boats.iter().map(|b| b.min_berths as usize).sum();
    let max_berths: usize = boats.iter().map(|b| b.offered_berths(event_id) as usize).sum();

    debug!(
        "{}: {} crews for {} boats, berths min {} max {}",
        event_id,
        crew_count,
        boats.len(),
        min_berths,
        max_berths
    );

    if crew_count < min_berths {
        too_few_crews(boats, crews, event_id)
    } else if crew_count > max_berths {
        too_many_crews(boats, crews, event_id)
    } else {
        perfect_fit(boats, crews, event_id)
    }
}

/// Wait-lists the lowest ranked boats until the remaining minimums fit
fn too_few_crews(mut boats: Vec<Boat>, crews: Vec<Crew>, event_id: &str) -> Selection {
    let crew_count = crews.len();
    let mut total: usize = boats.iter().map(|b| b.min_berths as usize).sum();
    let mut waitlist_boats = Vec::new();

    while total > crew_count {
        match boats.pop() {
            Some(boat) => {
                total -= boat.min_berths as usize;
                debug!("{}: wait-listing boat {} (min {})", event_id, boat.key, boat.min_berths);
                waitlist_boats.push(boat);
            }
            None => break,
        }
    }
    // Keep the wait-list in rank order
    waitlist_boats.reverse();

    if total == crew_count {
        let occupied = boats
            .iter()
            .map(|b| (b.key.clone(), b.min_berths))
            .collect();
        return Selection {
            regime: CapacityRegime::TooFewCrews,
            boats,
            crews,
            waitlist_boats,
            waitlist_crews: Vec::new(),
            occupied,
        };
    }

    let flexible: usize = boats.iter().map(|b| b.offered_berths(event_id) as usize).sum();
    let mut selection = if crew_count <= flexible {
        perfect_fit(boats, crews, event_id)
    } else {
        warn!(
            "{}: {} crews exceed the {} flexible berths left after cutting boats, wait-listing crews",
            event_id, crew_count, flexible
        );
        too_many_crews(boats, crews, event_id)
    };

    selection.regime = CapacityRegime::TooFewCrews;
    waitlist_boats.extend(selection.waitlist_boats);
    selection.waitlist_boats = waitlist_boats;
    selection
}

/// Fills every boat to its offer and wait-lists the lowest ranked crews
fn too_many_crews(boats: Vec<Boat>, mut crews: Vec<Crew>, event_id: &str) -> Selection {
    let max_berths: usize = boats.iter().map(|b| b.offered_berths(event_id) as usize).sum();
    let waitlist_crews = if crews.len() > max_berths {
        crews.split_off(max_berths)
    } else {
        Vec::new()
    };

    let occupied = boats
        .iter()
        .map(|b| (b.key.clone(), b.offered_berths(event_id)))
        .collect();

    Selection {
        regime: CapacityRegime::TooManyCrews,
        boats,
        crews,
        waitlist_boats: Vec::new(),
        waitlist_crews,
        occupied,
    }
}

/// Starts every boat at its minimum, then hands out the remaining crews one
/// berth at a time to whichever boat has the most slack
fn perfect_fit(boats: Vec<Boat>, crews: Vec<Crew>, event_id: &str) -> Selection {
    let crew_count = crews.len();
    let mut occupied: Vec<u8> = boats.iter().map(|b| b.min_berths).collect();
    let mut total: usize = occupied.iter().map(|&n| n as usize).sum();

    while total < crew_count {
        // Earliest boat wins ties
        let mut best: Option<(usize, i32)> = None;
        for (i, boat) in boats.iter().enumerate() {
            let slack = boat.offered_berths(event_id) as i32 - occupied[i] as i32;
            if best.map_or(true, |(_, top)| slack > top) {
                best = Some((i, slack));
            }
        }

        match best {
            Some((i, slack)) if slack > 0 => {
                occupied[i] += 1;
                total += 1;
            }
            _ => {
                // Unreachable when the crews fit the offered berths
                warn!("{}: no slack left with {} of {} crews placed", event_id, total, crew_count);
                break;
            }
        }
    }

    let occupied = boats
        .iter()
        .zip(occupied)
        .map(|(b, n)| (b.key.clone(), n))
        .collect();

    Selection {
        regime: CapacityRegime::PerfectFit,
        boats,
        crews,
        waitlist_boats: Vec::new(),
        waitlist_crews: Vec::new(),
        occupied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoatDimension, BoatRank, CrewRank, Skill};

    const EVENT: &str = "Fri May 29";

    fn boat(key: &str, min: u8, offered: u8, flexibility: i32) -> Boat {
        let mut boat = Boat::new(key, min, offered);
        boat.berths.insert(EVENT.to_string(), offered);
        boat.rank = BoatRank::default().with(BoatDimension::Flexibility, flexibility);
        boat
    }

    fn crews(n: usize) -> Vec<Crew> {
        (0..n)
            .map(|i| {
                let mut crew = Crew::new(&format!("crew{}", i), Skill::Medium);
                crew.rank = CrewRank::new(vec![0, 0, 0, i as i32]).unwrap();
                crew
            })
            .collect()
    }

    fn keys<T>(items: &[T], key: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|i| key(i).to_string()).collect()
    }

    #[test]
    fn no_boats_selects_nothing() {
        let selection = select(&[], &crews(4), EVENT);
        assert_eq!(selection.regime, CapacityRegime::NoBoats);
        assert!(selection.crews.is_empty());
        assert!(selection.waitlist_crews.is_empty());
    }

    #[test]
    fn too_few_crews_wait_lists_lowest_boat() {
        let boats = vec![boat("low", 2, 3, 0), boat("high", 2, 4, 5)];
        let selection = select(&boats, &crews(3), EVENT);

        assert_eq!(selection.regime, CapacityRegime::TooFewCrews);
        assert_eq!(keys(&selection.boats, |b| &b.key), vec!["high"]);
        assert_eq!(keys(&selection.waitlist_boats, |b| &b.key), vec!["low"]);
        assert_eq!(selection.occupied_berths("high"), 3);
        assert_eq!(selection.crews.len(), 3);
        assert!(selection.waitlist_crews.is_empty());
    }

    #[test]
    fn too_few_crews_exact_minimum_keeps_minimums() {
        let boats = vec![boat("a", 2, 4, 3), boat("b", 3, 4, 2), boat("c", 2, 4, 1)];
        let selection = select(&boats, &crews(5), EVENT);

        assert_eq!(keys(&selection.boats, |b| &b.key), vec!["a", "b"]);
        assert_eq!(selection.occupied_berths("a"), 2);
        assert_eq!(selection.occupied_berths("b"), 3);
        assert_eq!(selection.total_occupied(), 5);
    }

    #[test]
    fn too_few_crews_falls_back_to_wait_listing_crews() {
        // Dropping "b" leaves min 1 but only one offered berth for two crews
        let boats = vec![boat("a", 1, 1, 2), boat("b", 3, 6, 1)];
        let selection = select(&boats, &crews(2), EVENT);

        assert_eq!(selection.regime, CapacityRegime::TooFewCrews);
        assert_eq!(keys(&selection.waitlist_boats, |b| &b.key), vec!["b"]);
        assert_eq!(selection.occupied_berths("a"), 1);
        assert_eq!(selection.crews.len(), 1);
        assert_eq!(selection.waitlist_crews.len(), 1);
    }

    #[test]
    fn too_many_crews_wait_lists_lowest_ranked_crews() {
        let boats = vec![boat("a", 1, 2, 1), boat("b", 1, 3, 0)];
        let selection = select(&boats, &crews(8), EVENT);

        assert_eq!(selection.regime, CapacityRegime::TooManyCrews);
        assert_eq!(selection.occupied_berths("a"), 2);
        assert_eq!(selection.occupied_berths("b"), 3);
        assert_eq!(selection.crews.len(), 5);
        // crew rank grows with index, so the three lowest are wait-listed
        let mut waitlisted = keys(&selection.waitlist_crews, |c| &c.key);
        waitlisted.sort();
        assert_eq!(waitlisted, vec!["crew0", "crew1", "crew2"]);
    }

    #[test]
    fn perfect_fit_spreads_by_slack() {
        let boats = vec![boat("a", 1, 2, 2), boat("b", 1, 5, 1)];
        let selection = select(&boats, &crews(4), EVENT);

        assert_eq!(selection.regime, CapacityRegime::PerfectFit);
        assert_eq!(selection.occupied_berths("a"), 1);
        assert_eq!(selection.occupied_berths("b"), 3);
        assert!(selection.waitlist_boats.is_empty());
        assert!(selection.waitlist_crews.is_empty());
    }

    #[test]
    fn perfect_fit_ties_go_to_earlier_boat() {
        let boats = vec![boat("a", 1, 3, 2), boat("b", 1, 3, 1)];
        let selection = select(&boats, &crews(3), EVENT);
        assert_eq!(selection.occupied_berths("a"), 2);
        assert_eq!(selection.occupied_berths("b"), 1);
    }

    #[test]
    fn rank_order_is_descending() {
        let boats = vec![boat("a", 1, 3, 0), boat("b", 1, 3, 7), boat("c", 1, 3, 3)];
        let (sorted, _) = rank_order(&boats, &[], EVENT);
        assert_eq!(keys(&sorted, |b| &b.key), vec!["b", "c", "a"]);
    }
}
