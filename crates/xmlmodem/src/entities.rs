//! Entity and character-reference decoding.
//!
//! Handles the five predefined entities (`&lt; &gt; &amp; &quot; &apos;`) and
//! numeric character references (`&#123;`, `&#x7B;`). Anything else is a
//! well-formedness error: general entities would require DTD processing,
//! which is out of scope.

use crate::error::SyntaxError;

/// Decodes one reference body — the text between `&` and `;`.
pub(crate) fn decode_reference(body: &str) -> Result<char, SyntaxError> {
    if let Some(num) = body.strip_prefix('#') {
        let value = if let Some(hex) = num.strip_prefix('x') {
            u32::from_str_radix(hex, 16).ok()
        } else {
            num.parse::<u32>().ok()
        };
        return value
            .and_then(char::from_u32)
            .filter(|&c| is_xml_char(c))
            .ok_or(SyntaxError::InvalidCharacterReference);
    }
    match body {
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "amp" => Ok('&'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        _ => Err(SyntaxError::UnknownEntity(body.into())),
    }
}

/// XML 1.0 `Char` production: the code points a character reference may
/// legally produce.
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
