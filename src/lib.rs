#![doc = include_str!("../README.md")]
mod error;
mod models;
mod oudia;
mod parsing;
mod schedule;
mod scheduler_config;
mod utils;

pub use error::{OResult, OudiaError};
pub use models::*;
pub use oudia::Oudia;
pub use parsing::error::ParsingError;
pub use parsing::{load_diagrams, load_stations, load_trains, parse_cell, parse_station_times};
pub use schedule::{build_table, empty_table, leg_at};
pub use scheduler_config::{MergeReport, merge, merge_file};
