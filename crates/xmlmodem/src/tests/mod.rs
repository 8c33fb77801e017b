use alloc::{string::String, vec::Vec};

use crate::{Attributes, EventCollector, ParserOptions, SaxError, SaxEvent, SaxParser};

mod chunking;
mod parse_bad;

/// Parses every chunk in order, returning the dispatched events alongside
/// the final outcome (events dispatched before an error stand).
pub(crate) fn parse_all(
    options: ParserOptions,
    chunks: &[&[u8]],
) -> (Vec<SaxEvent>, Result<(), SaxError>) {
    let mut parser = SaxParser::new(options);
    let collector = EventCollector::new();
    collector.attach_to(&mut parser);
    let mut result = Ok(());
    for chunk in chunks {
        result = parser.parse(chunk);
        if result.is_err() {
            break;
        }
    }
    (collector.take(), result)
}

/// Like [`parse_all`] but for inputs that must parse cleanly.
pub(crate) fn events_for(options: ParserOptions, chunks: &[&[u8]]) -> Vec<SaxEvent> {
    let (events, result) = parse_all(options, chunks);
    result.unwrap();
    events
}

pub(crate) fn open(name: &str) -> SaxEvent {
    SaxEvent::ElementOpen {
        name: String::from(name),
        attributes: Attributes::default(),
    }
}

pub(crate) fn open_with(name: &str, attrs: &[(&str, &str)]) -> SaxEvent {
    SaxEvent::ElementOpen {
        name: String::from(name),
        attributes: attrs
            .iter()
            .map(|(n, v)| (String::from(*n), String::from(*v)))
            .collect(),
    }
}

pub(crate) fn data(element: &str, text: &str) -> SaxEvent {
    SaxEvent::CharacterData {
        element: String::from(element),
        text: String::from(text),
    }
}

pub(crate) fn close(name: &str) -> SaxEvent {
    SaxEvent::ElementClose {
        name: String::from(name),
    }
}
