/// # Station parsing
///
/// Stations (`Eki.` blocks) are listed in route order, so the position of a station in the
/// returned list is what makes two stations adjacent.
///
/// ## Example (excerpt):
///
/// `
/// Eki.
/// Ekimei=Tokyo
/// Ekijikokukeisiki=Jikokukeisiki_Hatsu
/// Ekikibo=Ekikibo_Syuyou
/// .
/// `
use crate::{
    models::{Model, Station},
    parsing::{
        error::PResult,
        helpers::{block_starts, get_property},
    },
    utils::AutoIncrement,
};

pub(crate) const HEADER: &str = "Eki.";

pub fn parse(lines: &[String]) -> PResult<Vec<Station>> {
    log::info!("Parsing Eki blocks...");
    let auto_increment = AutoIncrement::new();

    let stations = block_starts(lines, HEADER)
        .map(|index| {
            let name = get_property(lines, index, "Ekimei")?;
            Ok(Station::new(auto_increment.next(), name.to_string()))
        })
        .collect::<PResult<Vec<_>>>()?;

    if let Some(last) = stations.last() {
        log::debug!("{} stations, last one is {}", last.id(), last.name());
    }
    Ok(stations)
}

#[cfg(test)]
mod tests {
    // Note this useful idiom: importing names from outer (for mod tests) scope.
    use super::*;
    use crate::parsing::{error::ParsingError, helpers::to_lines, tests::get_json_values};
    use pretty_assertions::assert_eq;

    const ROUTE: &str = "
        Rosen.
        Rosenmei=Sample
        Eki.
        Ekimei=Tokyo
        Ekijikokukeisiki=Jikokukeisiki_Hatsu
        .
        Eki.
        Ekimei=Kanda
        .
        Ressyasyubetsu.
        Syubetsumei=Futsu
        .
        Eki.
        Ekimei=Akihabara
        EkiTrack2Cont.
        .
    ";

    #[test]
    fn stations_in_file_order() {
        let lines = to_lines(ROUTE);
        let names: Vec<_> = parse(&lines)
            .unwrap()
            .iter()
            .map(|station| station.name().to_string())
            .collect();
        assert_eq!(names, vec!["Tokyo", "Kanda", "Akihabara"]);
    }

    #[test]
    fn station_ids_follow_order() {
        let lines = to_lines(ROUTE);
        let stations = parse(&lines).unwrap();
        let reference = r#"
            {
                "id":3,
                "name":"Akihabara"
            }"#;
        let (station, reference) = get_json_values(&stations[2], reference).unwrap();
        assert_eq!(station, reference);
    }

    #[test]
    fn header_must_match_exactly() {
        let lines = vec![
            "Eki. ".to_string(),
            "Ekimei=Ignored".to_string(),
            ".".to_string(),
            "EkiTrack2Cont.".to_string(),
            "Ekimei=Ignored".to_string(),
            ".".to_string(),
        ];
        assert!(parse(&lines).unwrap().is_empty());
    }

    #[test]
    fn missing_name() {
        let lines = to_lines("Eki.\nEkimei=Tokyo\n.\nEki.\nEkikibo=Ekikibo_Ippan\n.");
        match parse(&lines) {
            Err(ParsingError::PropertyNotFound {
                property,
                block_start,
            }) => {
                assert_eq!(property, "Ekimei");
                assert_eq!(block_start, 3);
            }
            other => panic!("PropertyNotFound expected but got {other:?}"),
        }
    }
}
