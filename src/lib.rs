pub mod model;
pub mod matching;
pub mod parser;
pub mod display;
pub mod export;
pub mod web;

pub use matching::{assign, plan_event, select, Flotilla};
pub use model::{Boat, Crew, Season};
