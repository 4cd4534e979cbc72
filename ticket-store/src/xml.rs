//! Event-driven reader for XML ticket dumps.
//!
//! Expected shape: a `<Tickets>` root listing `<Ticket>` elements whose
//! children are field name → text. Each `<Ticket>` becomes a flat map.

use crate::errors::StoreError;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads and parses one XML ticket file.
pub fn read_ticket_file(path: &Path) -> Result<Vec<BTreeMap<String, String>>, StoreError> {
    let xml = fs::read_to_string(path)?;
    let tickets = parse_tickets(&xml)?;
    debug!("loaded {} tickets from {:?}", tickets.len(), path);
    Ok(tickets)
}

/// Parses `<Tickets><Ticket>…</Ticket>…</Tickets>` markup.
///
/// Empty elements (`<tag_5/>`) contribute no field. A field appearing
/// twice inside one ticket keeps the last value.
pub fn parse_tickets(xml: &str) -> Result<Vec<BTreeMap<String, String>>, StoreError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut tickets = Vec::new();
    let mut current: Option<BTreeMap<String, String>> = None;
    let mut field: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "Ticket" {
                    current = Some(BTreeMap::new());
                } else if current.is_some() {
                    field = Some(name);
                }
            }
            Event::Text(t) => {
                if let (Some(ticket), Some(name)) = (current.as_mut(), field.as_ref()) {
                    ticket.insert(name.clone(), t.unescape()?.into_owned());
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"Ticket" {
                    if let Some(ticket) = current.take() {
                        tickets.push(ticket);
                    }
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tickets)
}
