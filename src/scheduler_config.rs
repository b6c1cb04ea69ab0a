//! Writes a station pair table into a train scheduler configuration.
//!
//! The configuration is an XML document shaped like this:
//!
//! ```xml
//! <TimeTables>
//!   <Lines>
//!     <Line LineID="118">
//!       <Stops>
//!         <Stop Name="Tokyo" NextName="Kanda">
//!           <Departures>
//!             <Departure>0600</Departure>
//!           </Departures>
//!         </Stop>
//!       </Stops>
//!     </Line>
//!   </Lines>
//! </TimeTables>
//! ```
//!
//! For the selected line, the departures of every stop whose `Name`/`NextName` pair is in the
//! table are replaced. The new times go into the stop's first `Departures` element. Everything
//! else is copied through as read.

use std::{fs, io};

use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    error::{OResult, OudiaError},
    models::{ClockTime, StationPair, StationPairTable},
};

#[derive(Debug, Default)]
pub struct MergeReport {
    updated: Vec<StationPair>,
    unmatched: Vec<StationPair>,
}

impl MergeReport {
    // Getters/Setters

    /// Stops whose departures were replaced.
    pub fn updated(&self) -> &[StationPair] {
        &self.updated
    }

    /// Stops of the selected line with no entry in the table. They are left untouched.
    pub fn unmatched(&self) -> &[StationPair] {
        &self.unmatched
    }
}

struct StopState<'t> {
    departures: Option<&'t [ClockTime]>,
    // Set once the times went into a <Departures> element.
    written: bool,
}

impl<'t> StopState<'t> {
    /// Times for the first <Departures> of a matched stop, `None` for any later one.
    fn take_times(&mut self) -> Option<&'t [ClockTime]> {
        if self.written {
            return None;
        }
        self.written = self.departures.is_some();
        self.departures
    }
}

/// A <Departures> element of a matched stop. Its <Departure> children are dropped.
struct DeparturesState<'i, 't> {
    // Appended before the element closes.
    times: Option<&'t [ClockTime]>,
    // Indentation held back until it is known whether a dropped <Departure> follows.
    blank: Option<BytesText<'i>>,
}

/// Open elements from the document root down to (not including) the current one.
struct ElementPath(Vec<Vec<u8>>);

impl ElementPath {
    fn is(&self, names: &[&str]) -> bool {
        // The root element name is free.
        self.0.len() == names.len() + 1
            && self.0[1..]
                .iter()
                .zip(names)
                .all(|(open, expected)| open.as_slice() == expected.as_bytes())
    }

    fn at_line(&self) -> bool {
        self.is(&["Lines"])
    }

    fn at_stop(&self) -> bool {
        self.is(&["Lines", "Line", "Stops"])
    }

    fn at_departures(&self) -> bool {
        self.is(&["Lines", "Line", "Stops", "Stop"])
    }

    fn in_departures(&self) -> bool {
        self.is(&["Lines", "Line", "Stops", "Stop", "Departures"])
    }
}

pub fn merge(xml: &str, table: &StationPairTable, line_id: &str) -> OResult<(String, MergeReport)> {
    log::info!("Merging departures into line {line_id}...");
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());
    let mut report = MergeReport::default();

    let mut path = ElementPath(Vec::new());
    let mut line_selected = false;
    let mut stop: Option<StopState> = None;
    let mut departures: Option<DeparturesState> = None;
    // Depth inside a <Departure> element being dropped.
    let mut skipping = 0usize;

    loop {
        let event = reader.read_event()?;
        if skipping > 0 {
            match event {
                Event::Start(_) => skipping += 1,
                Event::End(_) => skipping -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        if let Some(state) = departures.as_mut().filter(|_| path.in_departures()) {
            match &event {
                Event::Text(e) if e.iter().all(u8::is_ascii_whitespace) => {
                    if let Some(blank) = state.blank.replace(e.clone()) {
                        writer.write_event(Event::Text(blank))?;
                    }
                    continue;
                }
                Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"Departure" => {
                    state.blank = None;
                    skipping = usize::from(matches!(event, Event::Start(_)));
                    continue;
                }
                // Only the closing </Departures> ends at this depth.
                Event::End(_) => {}
                _ => {
                    if let Some(blank) = state.blank.take() {
                        writer.write_event(Event::Text(blank))?;
                    }
                }
            }
        }

        match event {
            Event::Eof => break,
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if name == b"Line" && path.at_line() {
                    line_selected = attribute(&e, "Line", "LineID")? == line_id;
                } else if name == b"Stop" && line_selected && path.at_stop() {
                    stop = Some(stop_state(&e, table, &mut report)?);
                } else if name == b"Departures" && path.at_departures() {
                    departures = departures_state(stop.as_mut());
                }
                writer.write_event(Event::Start(e))?;
                path.0.push(name);
            }
            Event::Empty(e) => {
                let name = e.name().as_ref().to_vec();
                if name == b"Stop" && line_selected && path.at_stop() {
                    let state = stop_state(&e, table, &mut report)?;
                    if let Some(times) = state.departures {
                        writer.write_event(Event::Start(e))?;
                        write_departures_element(&mut writer, times)?;
                        writer.write_event(Event::End(BytesEnd::new("Stop")))?;
                        continue;
                    }
                } else if name == b"Departures" && path.at_departures() {
                    let times = departures_state(stop.as_mut()).and_then(|state| state.times);
                    if let Some(times) = times {
                        write_departures_element(&mut writer, times)?;
                        continue;
                    }
                }
                writer.write_event(Event::Empty(e))?;
            }
            Event::End(e) => {
                let name = path.0.pop().unwrap_or_default();
                if name == b"Departures" && path.at_departures() {
                    close_departures(&mut writer, departures.take())?;
                } else if name == b"Stop" && path.at_stop() {
                    // A matched stop without any <Departures> gets one.
                    let times = stop.take().and_then(|mut stop| stop.take_times());
                    if let Some(times) = times {
                        write_departures_element(&mut writer, times)?;
                    }
                } else if name == b"Line" && path.at_line() {
                    line_selected = false;
                }
                writer.write_event(Event::End(e))?;
            }
            event => writer.write_event(event)?,
        }
    }

    log::info!(
        "{} stops updated, {} stops without departures",
        report.updated.len(),
        report.unmatched.len()
    );
    let xml = String::from_utf8(writer.into_inner())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok((xml, report))
}

/// Merges the table into the configuration file at `path`, in place.
pub fn merge_file(path: &str, table: &StationPairTable, line_id: &str) -> OResult<MergeReport> {
    let xml = fs::read_to_string(path)?;
    let (xml, report) = merge(&xml, table, line_id)?;
    fs::write(path, xml)?;
    Ok(report)
}

// ------------------------------------------------------------------------------------------------
// --- Helper Functions
// ------------------------------------------------------------------------------------------------

fn attribute(e: &BytesStart, element: &'static str, name: &'static str) -> OResult<String> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name.as_bytes() {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(OudiaError::MissingAttribute {
        element,
        attribute: name,
    })
}

fn stop_state<'t>(
    e: &BytesStart,
    table: &'t StationPairTable,
    report: &mut MergeReport,
) -> OResult<StopState<'t>> {
    let origin = attribute(e, "Stop", "Name")?;
    let destination = attribute(e, "Stop", "NextName")?;
    let departures = table.get(&origin, &destination);
    let pair = StationPair::new(&origin, &destination);
    if departures.is_some() {
        report.updated.push(pair);
    } else {
        log::warn!("No departures found for {origin} to {destination}");
        report.unmatched.push(pair);
    }
    Ok(StopState {
        departures,
        written: false,
    })
}

fn departures_state<'i, 't>(stop: Option<&mut StopState<'t>>) -> Option<DeparturesState<'i, 't>> {
    let stop = stop.filter(|stop| stop.departures.is_some())?;
    Some(DeparturesState {
        times: stop.take_times(),
        blank: None,
    })
}

fn close_departures<W: io::Write>(
    writer: &mut Writer<W>,
    state: Option<DeparturesState>,
) -> OResult<()> {
    let Some(state) = state else {
        return Ok(());
    };
    write_departures(writer, state.times.unwrap_or_default())?;
    if let Some(blank) = state.blank {
        writer.write_event(Event::Text(blank))?;
    }
    Ok(())
}

fn write_departures<W: io::Write>(writer: &mut Writer<W>, times: &[ClockTime]) -> OResult<()> {
    for time in times {
        writer.write_event(Event::Start(BytesStart::new("Departure")))?;
        writer.write_event(Event::Text(BytesText::new(&time.to_string())))?;
        writer.write_event(Event::End(BytesEnd::new("Departure")))?;
    }
    Ok(())
}

fn write_departures_element<W: io::Write>(
    writer: &mut Writer<W>,
    times: &[ClockTime],
) -> OResult<()> {
    writer.write_event(Event::Start(BytesStart::new("Departures")))?;
    write_departures(writer, times)?;
    writer.write_event(Event::End(BytesEnd::new("Departures")))?;
    Ok(())
}
