pub mod rank;
pub mod boat;
pub mod crew;
pub mod season;

pub use rank::{BoatDimension, BoatRank, CrewDimension, CrewRank, Dimension, Rank, RankError};
pub use boat::Boat;
pub use crew::{Crew, CrewStatus, Skill};
pub use season::{event_id, Season, SeasonError};
