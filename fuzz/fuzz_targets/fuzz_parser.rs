#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlmodem::{EventCollector, ParserOptions, SaxEvent, SaxParser};

const HEADER: usize = 5; // 1 flag byte + 4-byte split seed

fn run(options: ParserOptions, chunks: &[&[u8]]) -> Result<Vec<SaxEvent>, ()> {
    let mut parser = SaxParser::new(options);
    let collector = EventCollector::new();
    collector.attach_to(&mut parser);
    for chunk in chunks {
        parser.parse(chunk).map_err(drop)?;
    }
    Ok(collector.take())
}

/// Split `data` into chunks at byte offsets derived from `seed`. Splits may
/// land anywhere, including inside multi-byte scalars — the parser must cope.
fn split_into_chunks(data: &[u8], seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < data.len() {
        let remaining = data.len() - start;
        let size = (seed as usize % remaining) + 1;
        chunks.push(&data[start..start + size]);
        start += size;
    }
    chunks
}

fn parser(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u64::from(u32::from_le_bytes(data[1..5].try_into().unwrap()));
    let data = &data[HEADER..];
    if data.is_empty() {
        return;
    }

    let options = ParserOptions {
        skip_whitespace: flags & 1 != 0,
        fold_case: flags & 2 != 0,
    };

    // The chunk-split law: when the one-shot parse succeeds, every
    // partition of the same bytes must succeed with the same events.
    let whole = run(options, &[data]);
    let chunked = run(options, &split_into_chunks(data, split_seed));
    if let Ok(expected) = whole {
        assert_eq!(Ok(expected), chunked);
    }
}

fuzz_target!(|data: &[u8]| parser(data));
