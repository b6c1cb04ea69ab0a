/// # Time cell parsing
///
/// The `EkiJikoku` property of a train holds one cell per station, separated by commas. A cell
/// is laid out as follows:
///
/// - Stop type (1 = stops, 2 = passes, 3 = does not run there)
/// - `;`
/// - Times: either a lone departure time, or `arrival/departure` where either side may be empty
/// - (optional) `$` followed by the track number
///
/// Times are written `HMM` or `HHMM`.
///
/// ## Example (excerpt):
///
/// `
/// EkiJikoku=1;600,1;603/604,2,,1;610/$1
/// `
///
/// - 06:00 departure at the 1st station
/// - arrival 06:03, departure 06:04 at the 2nd station
/// - passes the 3rd station without a time
/// - no event at the 4th station
/// - arrival 06:10 at the 5th station, on track 1, without a departure time
use crate::{
    models::ClockTime,
    parsing::{
        error::{PResult, ParsingError},
        helpers::hhmm_parser,
    },
};

/// Decodes every cell of an `EkiJikoku` value, in file order.
pub fn parse_station_times(station_times: &str) -> PResult<Vec<Option<ClockTime>>> {
    station_times.split(',').map(parse_cell).collect()
}

/// Departure time of a single cell, if it has one.
pub fn parse_cell(cell: &str) -> PResult<Option<ClockTime>> {
    if cell.is_empty() {
        return Ok(None);
    }
    // A cell without times, e.g. a pass without a time.
    let Some(times) = cell.split(';').nth(1) else {
        return Ok(None);
    };
    parse_time_token(departure_token(times))
}

/// When both an arrival and a departure are given, the departure is the one a train leaves the
/// station pair with. A `$` suffix on the selected time is dropped.
fn departure_token(times: &str) -> &str {
    let departure = times.split('/').nth(1).unwrap_or(times);
    departure.split('$').next().unwrap_or_default()
}

fn parse_time_token(token: &str) -> PResult<Option<ClockTime>> {
    let padded = match token.len() {
        0 => return Ok(None),
        3 => format!("0{token}"),
        4 => token.to_string(),
        _ => return Err(ParsingError::InvalidTimeToken(token.to_string())),
    };
    let (_, (hour, minute)) =
        hhmm_parser(&padded).map_err(|_| ParsingError::InvalidTimeToken(token.to_string()))?;
    Ok(Some(ClockTime::new(hour, minute)))
}
