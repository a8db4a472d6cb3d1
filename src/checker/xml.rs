use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::record::Diagnostic;

use super::{CheckFinding, CheckOutcome};

/// Well-formedness check only; no schema validation.
pub(crate) fn check(path: &Path) -> CheckOutcome {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::unknown(format!(
                "read failed during XML check: {e}"
            )));
        }
    };

    let mut reader = Reader::from_reader(BufReader::new(file));
    let mut buf = Vec::new();
    let mut root_element: Option<String> = None;
    let mut elements = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                elements += 1;
                if root_element.is_none() {
                    root_element =
                        Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
            }
            Ok(Event::Empty(e)) => {
                elements += 1;
                if root_element.is_none() {
                    root_element =
                        Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return CheckOutcome::diagnostic_only(Diagnostic::corrupted(format!(
                    "malformed XML at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
        buf.clear();
    }

    if root_element.is_none() {
        return CheckOutcome::diagnostic_only(Diagnostic::corrupted(
            "document contains no root element",
        ));
    }

    CheckOutcome::with_finding(CheckFinding::Xml {
        root_element,
        elements,
    })
}

#[cfg(test)]
#[path = "xml_tests.rs"]
mod tests;
