pub mod types;
pub mod shuffle;
pub mod selection;
pub mod distribute;
pub mod rules;
pub mod assignment;

pub use types::{CapacityRegime, CrewedBoat, Flotilla, Selection};
pub use selection::{rank_order, select};
pub use distribute::distribute;
pub use rules::Rule;
pub use assignment::{assign, Optimizer};

use log::warn;

use crate::model::{Boat, Crew};

/// Boats offering berths and crews available for the event, input order kept.
/// A boat offering fewer berths than its minimum can't sail and is left out.
pub fn candidates(boats: &[Boat], crews: &[Crew], event_id: &str) -> (Vec<Boat>, Vec<Crew>) {
    let boats = boats
        .iter()
        .filter(|b| {
            let offered = b.offered_berths(event_id);
            if offered > 0 && offered < b.min_berths {
                warn!(
                    "{}: boat {} offers {} berths, below its minimum of {}, skipping",
                    event_id, b.key, offered, b.min_berths
                );
                return false;
            }
            offered > 0
        })
        .cloned()
        .collect();
    let crews = crews
        .iter()
        .filter(|c| c.status(event_id).is_candidate())
        .cloned()
        .collect();
    (boats, crews)
}

/// Full matching run for one event: select, distribute, assign
pub fn plan_event(boats: &[Boat], crews: &[Crew], event_id: &str) -> Flotilla {
    let (boats, crews) = candidates(boats, crews, event_id);
    let selection = select(&boats, &crews, event_id);
    let flotilla = distribute(selection, event_id);
    assign(flotilla)
}
