/// # Train parsing
///
/// Trains (`Ressya.` blocks) carry their direction (`Houkou`) and one time cell per station
/// (`EkiJikoku`). Cells are kept as raw text, see the time cell parser for their layout.
///
/// ## Example (excerpt):
///
/// `
/// Ressya.
/// Houkou=Kudari
/// Syubetsu=0
/// Ressyabangou=101M
/// EkiJikoku=1;600,1;603/604,2,1;610/
/// .
/// `
use crate::{
    models::{Direction, Model, Train},
    parsing::{
        error::PResult,
        helpers::{block_starts, get_property},
    },
    utils::AutoIncrement,
};

pub(crate) const HEADER: &str = "Ressya.";

pub fn parse(lines: &[String]) -> PResult<Vec<Train>> {
    log::info!("Parsing Ressya blocks...");
    let auto_increment = AutoIncrement::new();

    block_starts(lines, HEADER)
        .map(|index| {
            let station_times = get_property(lines, index, "EkiJikoku")?;
            let direction = Direction::from_houkou(get_property(lines, index, "Houkou")?);
            let train = Train::new(auto_increment.next(), direction, station_times.to_string());
            log::debug!("Train {} ({}) at line {}", train.id(), direction, index);
            Ok(train)
        })
        .collect()
}
