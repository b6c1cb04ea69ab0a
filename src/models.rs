use std::{fmt, hash::Hash};

use chrono::NaiveTime;
use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::{
    parsing::error::{PResult, ParsingError},
    utils::create_time,
};

// ------------------------------------------------------------------------------------------------
// --- Model
// ------------------------------------------------------------------------------------------------

pub trait Model<M: Model<M>> {
    // Primary key type.
    type K: Copy + Eq + Hash + Serialize + for<'a> Deserialize<'a>;

    fn id(&self) -> M::K;
}

macro_rules! impl_Model {
    ($m:ty) => {
        impl Model<$m> for $m {
            type K = i32;

            fn id(&self) -> Self::K {
                self.id
            }
        }
    };
}

// ------------------------------------------------------------------------------------------------
// --- ClockTime
// ------------------------------------------------------------------------------------------------

/// Time of day as written in a timetable cell.
///
/// Hour and minute are taken verbatim from the source and are not range-checked, use
/// [`ClockTime::to_naive_time`] when a validated value is needed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Parses the `HHMM` rendering produced by `Display`.
    pub fn parse_hhmm(value: &str) -> PResult<Self> {
        if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParsingError::InvalidTimeToken(value.to_string()));
        }
        Ok(Self::new(value[..2].parse()?, value[2..].parse()?))
    }

    // Getters/Setters

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        create_time(u32::from(self.hour), u32::from(self.minute))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.hour, self.minute)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ParsingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ClockTime::parse_hhmm(&value)
    }
}

// ------------------------------------------------------------------------------------------------
// --- Diagram
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct Diagram {
    id: i32,
    name: String,
    line_index: usize, // Index of the "Dia." header line.
}

impl_Model!(Diagram);

impl Diagram {
    pub fn new(id: i32, name: String, line_index: usize) -> Self {
        Self {
            id,
            name,
            line_index,
        }
    }

    // Getters/Setters

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }
}

// ------------------------------------------------------------------------------------------------
// --- Direction
// ------------------------------------------------------------------------------------------------

/// Direction of travel along the station list.
///
/// Outbound trains visit stations in file order, inbound trains in reverse file order.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, EnumString, Serialize, Deserialize,
)]
pub enum Direction {
    #[default]
    #[strum(serialize = "Kudari")]
    Outbound,

    #[strum(serialize = "Nobori")]
    Inbound,
}

impl Direction {
    /// Reads a `Houkou` value. Anything but `Nobori` is outbound.
    pub fn from_houkou(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Position in the station list of the `cursor`-th station visited.
    pub fn station_index(&self, cursor: usize, station_count: usize) -> Option<usize> {
        if cursor >= station_count {
            return None;
        }
        match self {
            Direction::Outbound => Some(cursor),
            Direction::Inbound => Some(station_count - 1 - cursor),
        }
    }

    /// Position of the station visited right after the one at `index`.
    pub fn next_station_index(&self, index: usize, station_count: usize) -> Option<usize> {
        match self {
            Direction::Outbound => Some(index + 1).filter(|next| *next < station_count),
            Direction::Inbound => index.checked_sub(1),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// --- SourceEncoding
// ------------------------------------------------------------------------------------------------

/// Text encoding of an OuDia file. Older editors write Shift_JIS.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, EnumString, Serialize, Deserialize,
)]
pub enum SourceEncoding {
    #[default]
    #[strum(to_string = "shift_jis", serialize = "sjis")]
    ShiftJis,

    #[strum(to_string = "utf-8", serialize = "utf8")]
    Utf8,
}

impl SourceEncoding {
    pub fn encoding(&self) -> &'static Encoding {
        match self {
            SourceEncoding::ShiftJis => SHIFT_JIS,
            SourceEncoding::Utf8 => UTF_8,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// --- Station
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct Station {
    id: i32,
    name: String,
}

impl_Model!(Station);

impl Station {
    pub fn new(id: i32, name: String) -> Self {
        Self { id, name }
    }

    // Getters/Setters

    pub fn name(&self) -> &str {
        &self.name
    }
}

// ------------------------------------------------------------------------------------------------
// --- Train
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct Train {
    id: i32,
    direction: Direction,
    station_times: String, // Raw EkiJikoku value, one comma-separated cell per station.
}

impl_Model!(Train);

impl Train {
    pub fn new(id: i32, direction: Direction, station_times: String) -> Self {
        Self {
            id,
            direction,
            station_times,
        }
    }

    // Getters/Setters

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn station_times(&self) -> &str {
        &self.station_times
    }

    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.station_times.split(',')
    }
}

// ------------------------------------------------------------------------------------------------
// --- StationPair
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct StationPair {
    origin: String,
    destination: String,
}

impl StationPair {
    pub fn new(origin: &str, destination: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
        }
    }

    // Getters/Setters

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }
}

// ------------------------------------------------------------------------------------------------
// --- StationPairTable
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StationPairEntry {
    origin: String,
    destination: String,
    departures: Vec<ClockTime>,
}

/// Departure times keyed by directed station pair.
///
/// Keys keep the order in which they were registered, times keep the order in which they were
/// added.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(into = "Vec<StationPairEntry>", from = "Vec<StationPairEntry>")]
pub struct StationPairTable {
    pairs: Vec<StationPair>,
    departures: FxHashMap<StationPair, Vec<ClockTime>>,
}

impl StationPairTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pair with no departures. Does nothing if the pair is already known.
    pub fn insert_pair(&mut self, pair: StationPair) {
        if !self.departures.contains_key(&pair) {
            self.pairs.push(pair.clone());
            self.departures.insert(pair, Vec::new());
        }
    }

    pub fn add_departure(&mut self, pair: StationPair, time: ClockTime) {
        self.insert_pair(pair.clone());
        if let Some(times) = self.departures.get_mut(&pair) {
            times.push(time);
        }
    }

    // Getters/Setters

    pub fn get(&self, origin: &str, destination: &str) -> Option<&[ClockTime]> {
        self.departures
            .get(&StationPair::new(origin, destination))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StationPair, &[ClockTime])> {
        self.pairs.iter().map(|pair| {
            let times = self.departures.get(pair).map_or(&[][..], Vec::as_slice);
            (pair, times)
        })
    }
}

impl From<StationPairTable> for Vec<StationPairEntry> {
    fn from(table: StationPairTable) -> Self {
        let StationPairTable {
            pairs,
            mut departures,
        } = table;
        pairs
            .into_iter()
            .map(|pair| {
                let times = departures.remove(&pair).unwrap_or_default();
                StationPairEntry {
                    origin: pair.origin,
                    destination: pair.destination,
                    departures: times,
                }
            })
            .collect()
    }
}

impl From<Vec<StationPairEntry>> for StationPairTable {
    fn from(entries: Vec<StationPairEntry>) -> Self {
        let mut table = StationPairTable::new();
        for entry in entries {
            let pair = StationPair::new(&entry.origin, &entry.destination);
            table.insert_pair(pair.clone());
            for time in entry.departures {
                table.add_departure(pair.clone(), time);
            }
        }
        table
    }
}
