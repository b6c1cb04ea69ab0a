use quick_xml::events::attributes::AttrError;
use thiserror::Error;

use crate::parsing::error::ParsingError;

#[derive(Debug, Error)]
pub enum OudiaError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] ParsingError),
    #[error("Expected exactly 1 diagram, found {0}")]
    DiagramCount(usize),
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Xml attribute error: {0}")]
    XmlAttribute(#[from] AttrError),
    #[error("Missing attribute \"{attribute}\" on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
}

pub type OResult<T> = Result<T, OudiaError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_display() {
        let err = OudiaError::DiagramCount(2);
        assert_eq!(err.to_string(), "Expected exactly 1 diagram, found 2");

        let err = OudiaError::from(ParsingError::PropertyNotFound {
            property: "EkiJikoku".to_string(),
            block_start: 12,
        });
        assert_eq!(
            err.to_string(),
            "Parsing error: Property not found (EkiJikoku) in block starting at line 12"
        );

        let err = OudiaError::from(ParsingError::InvalidTimeToken("9a0".to_string()));
        assert_eq!(err.to_string(), "Parsing error: Invalid time token \"9a0\"");

        let err = OudiaError::MissingAttribute {
            element: "Stop",
            attribute: "NextName",
        };
        assert_eq!(err.to_string(), "Missing attribute \"NextName\" on <Stop>");
    }
}
