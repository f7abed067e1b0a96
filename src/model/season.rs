use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Boat, Crew};
use crate::matching::{plan_event, Flotilla};

#[derive(Debug, Error)]
pub enum SeasonError {
    #[error("failed to read season file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid season document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event {0:?} is not on the season calendar")]
    UnknownEvent(String),
    #[error("season calendar has no events")]
    EmptyCalendar,
}

/// Formats an event date the way event ids are keyed, e.g. "Fri May 29"
pub fn event_id(date: NaiveDate) -> String {
    date.format("%a %b %d").to_string()
}

/// The calendar plus every registered boat and crew member
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Season {
    pub events: Vec<NaiveDate>,
    #[serde(default)]
    pub boats: Vec<Boat>,
    #[serde(default)]
    pub crews: Vec<Crew>,
}

impl Season {
    /// Event ids in calendar order
    pub fn event_ids(&self) -> Vec<String> {
        let mut dates = self.events.clone();
        dates.sort();
        dates.into_iter().map(event_id).collect()
    }

    fn date_of(&self, id: &str) -> Option<NaiveDate> {
        self.events.iter().copied().find(|date| event_id(*date) == id)
    }

    /// Ids of the events held strictly before `id`
    pub fn past_events(&self, id: &str) -> Result<Vec<String>, SeasonError> {
        let date = self
            .date_of(id)
            .ok_or_else(|| SeasonError::UnknownEvent(id.to_string()))?;
        let mut past: Vec<NaiveDate> = self.events.iter().copied().filter(|d| *d < date).collect();
        past.sort();
        Ok(past.into_iter().map(event_id).collect())
    }

    pub fn first_event(&self) -> Result<String, SeasonError> {
        self.event_ids()
            .into_iter()
            .next()
            .ok_or(SeasonError::EmptyCalendar)
    }

    /// Runs selection and assignment for one event on the calendar.
    /// Crew history outside the event's past is ignored, so stale rows from
    /// an earlier run of the same or a later event never count as repeats.
    pub fn plan(&self, id: &str) -> Result<Flotilla, SeasonError> {
        let past = self.past_events(id)?;
        let crews: Vec<Crew> = self
            .crews
            .iter()
            .map(|crew| {
                let mut crew = crew.clone();
                crew.history.retain(|event, _| past.contains(event));
                crew
            })
            .collect();
        Ok(plan_event(&self.boats, &crews, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season() -> Season {
        serde_json::from_str(
            r#"{ "events": ["2026-06-05", "2026-05-29", "2026-06-12"], "boats": [], "crews": [] }"#,
        )
        .unwrap()
    }

    #[test]
    fn event_ids_follow_calendar_order() {
        assert_eq!(
            season().event_ids(),
            vec!["Fri May 29", "Fri Jun 05", "Fri Jun 12"]
        );
    }

    #[test]
    fn past_events_are_strictly_earlier() {
        let season = season();
        assert_eq!(season.past_events("Fri Jun 12").unwrap(), vec!["Fri May 29", "Fri Jun 05"]);
        assert!(season.past_events("Fri May 29").unwrap().is_empty());
        assert!(matches!(
            season.past_events("Sat May 30"),
            Err(SeasonError::UnknownEvent(_))
        ));
    }

    #[test]
    fn plan_rejects_unknown_event() {
        assert!(matches!(season().plan("Mon Jan 01"), Err(SeasonError::UnknownEvent(_))));
        let empty = Season::default();
        assert!(matches!(empty.first_event(), Err(SeasonError::EmptyCalendar)));
    }
}
