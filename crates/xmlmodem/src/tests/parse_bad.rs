use alloc::{string::ToString, vec};

use super::{close, open, parse_all};
use crate::{EventKind, ParserOptions, SaxError, SaxEvent, SaxParser, SyntaxError};

fn defaults() -> ParserOptions {
    ParserOptions::default()
}

#[test]
fn mismatched_close_tag_fails_after_the_open_was_dispatched() {
    let (events, result) = parse_all(defaults(), &[b"<a></b>"]);
    assert_eq!(events, vec![open("a")]);
    assert!(matches!(
        result,
        Err(SaxError::MalformedXml {
            source: SyntaxError::MismatchedCloseTag { expected, found },
            ..
        }) if expected == "a" && found == "b"
    ));
}

#[test]
fn stray_close_tag_fails() {
    let (events, result) = parse_all(defaults(), &[b"</x>"]);
    assert!(events.is_empty());
    assert!(matches!(
        result,
        Err(SaxError::MalformedXml {
            source: SyntaxError::StrayCloseTag(name),
            ..
        }) if name == "x"
    ));
}

#[test]
fn non_utf8_chunk_is_invalid_argument_and_mutates_nothing() {
    let mut parser = SaxParser::new(defaults());
    let collector = crate::EventCollector::new();
    collector.attach_to(&mut parser);

    let err = parser.parse(b"<a>\xFF</a>").unwrap_err();
    assert!(matches!(err, SaxError::InvalidArgument { offset: 3 }));
    assert!(collector.is_empty());

    // The rejected chunk left no trace; the parser still works.
    parser.parse("<ok/>").unwrap();
    assert_eq!(collector.take(), vec![open("ok"), close("ok")]);
}

#[test]
fn split_code_points_are_not_invalid_arguments() {
    let bytes = "<a>\u{3b1}</a>".as_bytes();
    let mut parser = SaxParser::new(defaults());
    let collector = crate::EventCollector::new();
    collector.attach_to(&mut parser);
    // Split inside the two-byte alpha.
    parser.parse(&bytes[..4]).unwrap();
    parser.parse(&bytes[4..]).unwrap();
    assert_eq!(
        collector.take(),
        vec![
            open("a"),
            SaxEvent::CharacterData {
                element: "a".into(),
                text: "\u{3b1}".into()
            },
            close("a"),
        ]
    );
}

#[test]
fn parse_after_close_fails() {
    let mut parser = SaxParser::new(defaults());
    parser.parse("<a>").unwrap();
    parser.close();
    assert!(matches!(
        parser.parse("</a>"),
        Err(SaxError::UseAfterClose)
    ));
}

#[test]
fn observer_failure_propagates_and_aborts_the_chunk() {
    let mut parser = SaxParser::new(defaults());
    let collector = crate::EventCollector::new();
    collector.attach_to(&mut parser);
    parser.register_observer(EventKind::ElementOpen, |event: &SaxEvent| {
        let SaxEvent::ElementOpen { name, .. } = event else {
            return Ok(());
        };
        if name == "bad" {
            return Err("refusing <bad>".to_string().into());
        }
        Ok(())
    });

    let err = parser.parse("<a><bad/><c/></a>").unwrap_err();
    assert!(matches!(err, SaxError::Observer(_)));
    // Events up to and including the failing dispatch stand; <c> never ran.
    assert_eq!(collector.take(), vec![open("a"), open("bad")]);
}

#[test]
fn unknown_entity_fails() {
    let (events, result) = parse_all(defaults(), &[b"<a>&nbsp;</a>"]);
    assert_eq!(events, vec![open("a")]);
    assert!(matches!(
        result,
        Err(SaxError::MalformedXml {
            source: SyntaxError::UnknownEntity(name),
            ..
        }) if name == "nbsp"
    ));
}

#[test]
fn invalid_character_reference_fails() {
    let (_, result) = parse_all(defaults(), &[b"<a>&#xD800;</a>"]);
    assert!(matches!(
        result,
        Err(SaxError::MalformedXml {
            source: SyntaxError::InvalidCharacterReference,
            ..
        })
    ));
}

#[test]
fn duplicate_attribute_fails() {
    let (_, result) = parse_all(defaults(), &[b"<a x=\"1\" x=\"2\"/>"]);
    assert!(matches!(
        result,
        Err(SaxError::MalformedXml {
            source: SyntaxError::DuplicateAttribute(name),
            ..
        }) if name == "x"
    ));
}

#[test]
fn double_hyphen_inside_comment_fails() {
    let (_, result) = parse_all(defaults(), &[b"<a><!-- x -- y --></a>"]);
    assert!(matches!(
        result,
        Err(SaxError::MalformedXml {
            source: SyntaxError::DoubleHyphenInComment,
            ..
        })
    ));
}

#[test]
fn raw_angle_bracket_in_attribute_value_fails() {
    let (_, result) = parse_all(defaults(), &[b"<a t=\"1<2\"/>"]);
    assert!(matches!(
        result,
        Err(SaxError::MalformedXml {
            source: SyntaxError::InvalidCharacter('<'),
            ..
        })
    ));
}

#[test]
fn invalid_name_start_fails_with_position() {
    let (_, result) = parse_all(defaults(), &[b"<a>\n<1/></a>"]);
    assert!(matches!(
        result,
        Err(SaxError::MalformedXml {
            source: SyntaxError::InvalidCharacter('1'),
            line: 2,
            column: 2,
        })
    ));
}

#[test]
fn a_failed_parser_keeps_failing() {
    let mut parser = SaxParser::new(defaults());
    assert!(parser.parse("<a>&broken;</a>").is_err());
    assert!(parser.parse("<fresh/>").is_err());
}

#[test]
fn errors_display_with_position() {
    let (_, result) = parse_all(defaults(), &[b"<a></b>"]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "malformed XML at 1:8: mismatched close tag: expected </a>, found </b>"
    );
}
