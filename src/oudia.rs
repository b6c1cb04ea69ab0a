use crate::{
    error::{OResult, OudiaError},
    models::{Diagram, SourceEncoding, Station, StationPairTable, Train},
    parsing::{helpers::read_lines, load_diagrams, load_stations, load_trains},
    schedule::build_table,
};

/// Timetable read from an OuDia file.
#[derive(Debug)]
pub struct Oudia {
    diagram: Diagram,
    stations: Vec<Station>,
    trains: Vec<Train>,
}

impl Oudia {
    pub fn from_path(path: &str, encoding: SourceEncoding) -> OResult<Self> {
        log::info!("Reading {path} ({encoding})...");
        let lines = read_lines(path, encoding)?;
        Self::from_lines(&lines)
    }

    /// Fails if the file does not hold exactly one diagram. This is checked before stations and
    /// trains are read.
    pub fn from_lines(lines: &[String]) -> OResult<Self> {
        let [diagram]: [Diagram; 1] = load_diagrams(lines)?
            .try_into()
            .map_err(|diagrams: Vec<Diagram>| OudiaError::DiagramCount(diagrams.len()))?;
        let stations = load_stations(lines)?;
        let trains = load_trains(lines)?;

        log::info!(
            "Diagram \"{}\": {} stations, {} trains",
            diagram.name(),
            stations.len(),
            trains.len()
        );
        Ok(Self {
            diagram,
            stations,
            trains,
        })
    }

    // Getters/Setters

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn station_pair_table(&self) -> OResult<StationPairTable> {
        Ok(build_table(&self.stations, &self.trains)?)
    }
}
