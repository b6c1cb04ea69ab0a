//! Aggregation of train times into the station pair table.
//!
//! Every cell of a train belongs to the station the train is at after as many steps as there are
//! cells before it. A time found at that station is a departure towards the next station in the
//! train's direction, so it is filed under that directed pair.

use crate::{
    models::{Direction, Model, Station, StationPair, StationPairTable, Train},
    parsing::{error::PResult, parse_station_times},
};

/// Positions in the station list of the pair a train travels after `cursor` steps, or `None` when
/// there is no station after it.
pub fn leg_at(direction: Direction, cursor: usize, station_count: usize) -> Option<(usize, usize)> {
    let current = direction.station_index(cursor, station_count)?;
    let next = direction.next_station_index(current, station_count)?;
    Some((current, next))
}

/// Table with both directions of every pair of adjacent stations and no departures.
pub fn empty_table(stations: &[Station]) -> StationPairTable {
    let mut table = StationPairTable::new();
    // Pairs are registered from both ends at once.
    for (forward, backward) in stations.windows(2).zip(stations.windows(2).rev()) {
        table.insert_pair(StationPair::new(forward[0].name(), forward[1].name()));
        table.insert_pair(StationPair::new(backward[1].name(), backward[0].name()));
    }
    table
}

pub fn build_table(stations: &[Station], trains: &[Train]) -> PResult<StationPairTable> {
    log::info!(
        "Building station pair table for {} stations and {} trains...",
        stations.len(),
        trains.len()
    );
    let mut table = empty_table(stations);

    for train in trains {
        let times = parse_station_times(train.station_times())?;
        if times.len() > stations.len() {
            log::warn!(
                "Train {} has {} cells for {} stations, the extra cells are ignored",
                train.id(),
                times.len(),
                stations.len()
            );
        }

        for (cursor, time) in times.into_iter().enumerate() {
            let Some(time) = time else {
                continue;
            };
            let Some((current, next)) = leg_at(train.direction(), cursor, stations.len()) else {
                continue;
            };
            table.add_departure(
                StationPair::new(stations[current].name(), stations[next].name()),
                time,
            );
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClockTime;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn stations(names: &[&str]) -> Vec<Station> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| Station::new(index as i32 + 1, name.to_string()))
            .collect()
    }

    fn train(id: i32, direction: Direction, station_times: &str) -> Train {
        Train::new(id, direction, station_times.to_string())
    }

    fn times(table: &StationPairTable, origin: &str, destination: &str) -> Vec<String> {
        table
            .get(origin, destination)
            .unwrap_or_else(|| panic!("missing pair {origin} -> {destination}"))
            .iter()
            .map(ClockTime::to_string)
            .collect()
    }

    #[test]
    fn leg_at_both_directions() {
        assert_eq!(leg_at(Direction::Outbound, 0, 3), Some((0, 1)));
        assert_eq!(leg_at(Direction::Outbound, 1, 3), Some((1, 2)));
        assert_eq!(leg_at(Direction::Outbound, 2, 3), None);
        assert_eq!(leg_at(Direction::Inbound, 0, 3), Some((2, 1)));
        assert_eq!(leg_at(Direction::Inbound, 1, 3), Some((1, 0)));
        assert_eq!(leg_at(Direction::Inbound, 2, 3), None);
        assert_eq!(leg_at(Direction::Inbound, 5, 3), None);
        assert_eq!(leg_at(Direction::Outbound, 0, 0), None);
    }

    #[test]
    fn every_adjacent_pair_in_both_directions() {
        for count in 2..8 {
            let names: Vec<String> = (0..count).map(|i| format!("S{i}")).collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let table = build_table(&stations(&names), &[]).unwrap();
            assert_eq!(table.len(), 2 * (count - 1));
            for pair in names.windows(2) {
                assert_eq!(table.get(pair[0], pair[1]), Some(&[][..]));
                assert_eq!(table.get(pair[1], pair[0]), Some(&[][..]));
            }
        }
    }

    #[test]
    fn fewer_than_two_stations() {
        assert!(build_table(&stations(&[]), &[]).unwrap().is_empty());
        let trains = [train(1, Direction::Outbound, "1;600")];
        let table = build_table(&stations(&["A"]), &trains).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn outbound_train() {
        let table = build_table(
            &stations(&["A", "B", "C"]),
            &[train(1, Direction::Outbound, "1;600,1;610/612,1;620")],
        )
        .unwrap();
        assert_eq!(times(&table, "A", "B"), vec!["0600"]);
        assert_eq!(times(&table, "B", "C"), vec!["0612"]);
        assert!(times(&table, "C", "B").is_empty());
        assert!(times(&table, "B", "A").is_empty());
    }

    #[test]
    fn inbound_train() {
        let table = build_table(
            &stations(&["A", "B", "C"]),
            &[train(1, Direction::Inbound, "1;700,1;710,1;720")],
        )
        .unwrap();
        assert_eq!(times(&table, "C", "B"), vec!["0700"]);
        assert_eq!(times(&table, "B", "A"), vec!["0710"]);
        assert!(times(&table, "A", "B").is_empty());
        assert!(times(&table, "B", "C").is_empty());
    }

    #[test]
    fn absent_cells_still_advance() {
        let table = build_table(
            &stations(&["A", "B", "C", "D"]),
            &[
                train(1, Direction::Outbound, ",1;805,2,1;830"),
                train(2, Direction::Inbound, "1;900,,1;920"),
            ],
        )
        .unwrap();
        assert!(times(&table, "A", "B").is_empty());
        assert_eq!(times(&table, "B", "C"), vec!["0805"]);
        assert!(times(&table, "C", "D").is_empty());
        assert_eq!(times(&table, "D", "C"), vec!["0900"]);
        assert!(times(&table, "C", "B").is_empty());
        assert_eq!(times(&table, "B", "A"), vec!["0920"]);
    }

    #[test]
    fn times_keep_train_order() {
        let table = build_table(
            &stations(&["A", "B"]),
            &[
                train(1, Direction::Outbound, "1;1000,1;1010"),
                train(2, Direction::Outbound, "1;900,1;910"),
                train(3, Direction::Inbound, "1;1100,1;1110"),
                train(4, Direction::Outbound, "1;1200"),
            ],
        )
        .unwrap();
        assert_eq!(times(&table, "A", "B"), vec!["1000", "0900", "1200"]);
        assert_eq!(times(&table, "B", "A"), vec!["1100"]);
    }

    #[test]
    fn extra_cells_are_ignored() {
        let table = build_table(
            &stations(&["A", "B"]),
            &[
                train(1, Direction::Outbound, "1;600,1;610,1;620,1;630"),
                train(2, Direction::Inbound, "1;700,1;710,1;720"),
            ],
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(times(&table, "A", "B"), vec!["0600"]);
        assert_eq!(times(&table, "B", "A"), vec!["0700"]);
    }

    #[test]
    fn invalid_cell_aborts() {
        let result = build_table(
            &stations(&["A", "B"]),
            &[train(1, Direction::Outbound, "1;6:00,")],
        );
        assert!(result.is_err());
    }
}
