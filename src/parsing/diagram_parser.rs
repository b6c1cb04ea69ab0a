/// # Diagram parsing
///
/// A diagram (`Dia.` block) is one complete set of trains for the route, e.g. the weekday or the
/// holiday timetable. Only its name is read here.
///
/// ## Example (excerpt):
///
/// `
/// Dia.
/// DiaName=Heijitsu
/// Kudari.
/// ...
/// `
use crate::{
    models::{Diagram, Model},
    parsing::{
        error::PResult,
        helpers::{block_starts, get_property},
    },
    utils::AutoIncrement,
};

pub(crate) const HEADER: &str = "Dia.";

pub fn parse(lines: &[String]) -> PResult<Vec<Diagram>> {
    log::info!("Parsing Dia blocks...");
    let auto_increment = AutoIncrement::new();

    block_starts(lines, HEADER)
        .map(|index| {
            let name = get_property(lines, index, "DiaName")?;
            let diagram = Diagram::new(auto_increment.next(), name.to_string(), index);
            log::debug!("Diagram {} \"{}\" at line {}", diagram.id(), name, index);
            Ok(diagram)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    // Note this useful idiom: importing names from outer (for mod tests) scope.
    use super::*;
    use crate::parsing::{error::ParsingError, helpers::to_lines, tests::get_json_values};
    use pretty_assertions::assert_eq;

    #[test]
    fn single_diagram() {
        let lines = to_lines("Rosen.\nDia.\nDiaName=Heijitsu\nKudari.\n.\n.");
        let diagrams = parse(&lines).unwrap();
        assert_eq!(diagrams.len(), 1);

        let reference = r#"
            {
                "id":1,
                "name":"Heijitsu",
                "line_index":1
            }"#;
        let (diagram, reference) = get_json_values(&diagrams[0], reference).unwrap();
        assert_eq!(diagram, reference);
    }

    #[test]
    fn several_diagrams_in_order() {
        let lines = to_lines("Dia.\nDiaName=Heijitsu\n.\nDia.\nDiaName=Kyujitsu\n.");
        let names: Vec<_> = parse(&lines)
            .unwrap()
            .iter()
            .map(|diagram| diagram.name().to_string())
            .collect();
        assert_eq!(names, vec!["Heijitsu", "Kyujitsu"]);
    }

    #[test]
    fn no_diagram() {
        let lines = to_lines("Rosen.\nRosenmei=Sample\n.");
        assert!(parse(&lines).unwrap().is_empty());
    }

    #[test]
    fn missing_name() {
        let lines = to_lines("Dia.\nKudari.\nDiaName=TooLate\n.");
        assert!(matches!(
            parse(&lines),
            Err(ParsingError::PropertyNotFound { block_start: 0, .. })
        ));
    }
}
