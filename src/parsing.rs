mod diagram_parser;
pub(crate) mod error;
pub(crate) mod helpers;
mod station_parser;
mod time_cell_parser;
mod train_parser;

pub use diagram_parser::parse as load_diagrams;
pub use station_parser::parse as load_stations;
pub use time_cell_parser::{parse_cell, parse_station_times};
pub use train_parser::parse as load_trains;
