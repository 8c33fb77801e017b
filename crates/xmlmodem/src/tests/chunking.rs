//! The incremental round-trip law: however a document is partitioned into
//! chunks, the notification sequence is identical to a one-shot parse.

use alloc::vec;
use alloc::vec::Vec;

use super::{close, data, events_for, open};
use crate::{ParserOptions, produce_chunks, split_points};

/// Documents exercising every construct the scanner knows, including
/// multi-byte characters that chunk splits will cut in half.
const CORPUS: &[&str] = &[
    "<a><b>hi</b></a>",
    "<item id=\"7\"/>",
    "<r\u{e9}sum\u{e9} lang=\"fran\u{e7}ais\">\u{1F600} &#x2764;</r\u{e9}sum\u{e9}>",
    "<?xml version=\"1.0\"?><!DOCTYPE d [<!ENTITY x \"y\">]><d a='1' b=\"2\"><e/>\n<f>text</f></d>",
    "<a>one<![CDATA[1 < 2 ]] ok]]>two<!-- c --></a>",
    "<l>line1\r\nline2\rline3</l>",
    "<a t=\"x &amp; y\">&lt;&#65;&gt;</a>",
];

fn both_option_sets() -> [ParserOptions; 2] {
    [
        ParserOptions::default(),
        ParserOptions {
            skip_whitespace: false,
            fold_case: true,
        },
    ]
}

#[test]
fn a_text_run_split_across_chunks_is_one_event() {
    let whole = events_for(ParserOptions::default(), &[b"<a><b>hi</b></a>"]);
    let split = events_for(ParserOptions::default(), &[b"<a><b>h", b"i</b></a>"]);
    assert_eq!(whole, split);
    assert_eq!(
        split,
        vec![
            open("a"),
            open("b"),
            data("b", "hi"),
            close("b"),
            close("a"),
        ]
    );
}

#[test]
fn every_two_way_split_matches_the_one_shot_parse() {
    for doc in CORPUS {
        for options in both_option_sets() {
            let whole = events_for(options, &[doc.as_bytes()]);
            for (head, tail) in split_points(doc.as_bytes()) {
                let split = events_for(options, &[head, tail]);
                assert_eq!(
                    whole, split,
                    "split at byte {} of {doc:?}",
                    head.len()
                );
            }
        }
    }
}

#[test]
fn every_chunk_count_matches_the_one_shot_parse() {
    for doc in CORPUS {
        let whole = events_for(ParserOptions::default(), &[doc.as_bytes()]);
        for parts in 1..=doc.len() {
            let chunks = produce_chunks(doc.as_bytes(), parts);
            let chunked = events_for(ParserOptions::default(), &chunks);
            assert_eq!(whole, chunked, "{parts} chunks of {doc:?}");
        }
    }
}

#[test]
fn byte_at_a_time_feeding() {
    let doc = "<r\u{e9}sum\u{e9}>\u{1F600}</r\u{e9}sum\u{e9}>";
    let whole = events_for(ParserOptions::default(), &[doc.as_bytes()]);
    let singles: Vec<&[u8]> = doc.as_bytes().chunks(1).collect();
    let chunked = events_for(ParserOptions::default(), &singles);
    assert_eq!(whole, chunked);
}

#[test]
fn interleaved_empty_chunks_change_nothing() {
    let doc = b"<a><b>hi</b></a>";
    let whole = events_for(ParserOptions::default(), &[&doc[..]]);
    let padded = events_for(
        ParserOptions::default(),
        &[&b""[..], &doc[..7], b"", b"", &doc[7..], b""],
    );
    assert_eq!(whole, padded);
}
