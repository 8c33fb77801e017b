#![expect(missing_docs)]

use std::fmt::Write;

use insta::assert_snapshot;
use xmlmodem::{EventCollector, ParserOptions, SaxEvent, SaxParser};

const DOC: &str = r#"<?xml version="1.0"?>
<library name="city">
  <book id="b1" lang="en">
    <title>Dune &amp; more</title>
    <blurb><![CDATA[1 < 2]]></blurb>
  </book>
  <!-- catalogue truncated -->
</library>"#;

fn render(events: &[SaxEvent]) -> String {
    let mut lines = Vec::new();
    for event in events {
        let mut line = String::new();
        match event {
            SaxEvent::ElementOpen { name, attributes } => {
                write!(line, "open  {name}").unwrap();
                for (attr, value) in attributes.iter() {
                    write!(line, " {attr}={value:?}").unwrap();
                }
            }
            SaxEvent::CharacterData { element, text } => {
                write!(line, "data  {element:?} {text:?}").unwrap();
            }
            SaxEvent::ElementClose { name } => {
                write!(line, "close {name}").unwrap();
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn events(doc: &str, options: ParserOptions) -> Vec<SaxEvent> {
    let mut parser = SaxParser::new(options);
    let collector = EventCollector::new();
    collector.attach_to(&mut parser);
    parser.parse(doc).unwrap();
    collector.take()
}

#[test]
fn snapshot_library_document() {
    let rendered = render(&events(DOC, ParserOptions::default()));
    assert_snapshot!(rendered, @r#"
    open  library name="city"
    open  book id="b1" lang="en"
    open  title
    data  "title" "Dune & more"
    close title
    open  blurb
    data  "blurb" "1 < 2"
    close blurb
    close book
    close library
    "#);
}

#[test]
fn snapshot_library_document_with_whitespace() {
    let options = ParserOptions {
        skip_whitespace: false,
        ..ParserOptions::default()
    };
    let rendered = render(&events(DOC, options));
    assert_snapshot!(rendered, @r#"
    data  "" "\n"
    open  library name="city"
    data  "library" "\n  "
    open  book id="b1" lang="en"
    data  "book" "\n    "
    open  title
    data  "title" "Dune & more"
    close title
    data  "book" "\n    "
    open  blurb
    data  "blurb" "1 < 2"
    close blurb
    data  "book" "\n  "
    close book
    data  "library" "\n  "
    data  "library" "\n"
    close library
    "#);
}

#[test]
fn snapshot_folded_names() {
    let options = ParserOptions {
        fold_case: true,
        ..ParserOptions::default()
    };
    let rendered = render(&events("<item id=\"7\">x</item>", options));
    assert_snapshot!(rendered, @r#"
    open  ITEM ID="7"
    data  "ITEM" "x"
    close ITEM
    "#);
}

#[test]
fn snapshot_mismatched_close_error() {
    let mut parser = SaxParser::new(ParserOptions::default());
    let err = parser.parse("<a></b>").unwrap_err();
    assert_snapshot!(err.to_string(), @"malformed XML at 1:8: mismatched close tag: expected </a>, found </b>");
}
