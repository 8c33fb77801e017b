//! The lexical scanner: an incremental XML lexer.
//!
//! [`XmlScanner`] consumes byte chunks via [`feed`](XmlScanner::feed) and
//! yields lexical tokens via repeated [`next_token`](XmlScanner::next_token)
//! calls — a lazy, finite-per-call sequence. All lexer state (the unread
//! ring, the current [`LexState`], the token scratch buffers, position
//! counters) persists between calls, so a token split across chunk
//! boundaries resumes exactly where it left off; the token sequence over all
//! calls equals scanning the concatenated input as one stream.
//!
//! Comments, processing instructions, the XML declaration, and DOCTYPE
//! declarations are consumed and discarded. Entity references are decoded
//! here, so the dispatch layer above only ever sees plain text.

use alloc::{string::String, vec::Vec};

use crate::{
    buffer::ChunkBuffer,
    entities,
    error::{SaxError, SyntaxError},
    event::Attributes,
    options::ParserOptions,
};

/// One lexical token, prior to any structural interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LexToken {
    /// A start tag. Self-closing tags are reported with `self_closing` set;
    /// the layer above synthesizes the close.
    Open {
        name: String,
        attributes: Attributes,
        self_closing: bool,
    },
    /// A run of character data, entity references decoded, line ends
    /// normalized.
    Text(String),
    /// An end tag.
    Close(String),
}

/// Lexer states. The scanner is always in exactly one; a chunk boundary can
/// interrupt it anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    /// Character data, or the gap between constructs.
    Text,
    /// Consumed `<`.
    TagOpen,
    /// Consumed `<!`.
    Bang,
    /// Consumed `<!-`, a second `-` is required.
    CommentOpen,
    /// Inside a comment body.
    Comment,
    /// Seen `-` inside a comment.
    CommentDash,
    /// Seen `--` inside a comment; only `>` may follow.
    CommentDashDash,
    /// Consumed `<![`, matching the `CDATA[` keyword.
    CdataKeyword,
    /// Inside a CDATA section.
    Cdata,
    /// Seen `]` inside a CDATA section.
    CdataBracket,
    /// Seen `]]` inside a CDATA section.
    CdataBracketBracket,
    /// Consumed `<!` followed by `D`, matching the `DOCTYPE` keyword.
    DoctypeKeyword,
    /// Inside `<!DOCTYPE ...>`, tracking internal-subset brackets.
    Doctype,
    /// Inside `<? ... ?>` (processing instruction or XML declaration).
    Pi,
    /// Seen `?` inside a processing instruction.
    PiQuestion,
    /// Consumed `</`.
    CloseTagStart,
    /// Accumulating an end-tag name.
    CloseTagName,
    /// After an end-tag name, skipping whitespace up to `>`.
    CloseTagEnd,
    /// Accumulating a start-tag name.
    OpenTagName,
    /// Inside a start tag, before an attribute name (or `>` / `/`).
    BeforeAttrName,
    /// Accumulating an attribute name.
    AttrName,
    /// After an attribute name, expecting `=`.
    AfterAttrName,
    /// After `=`, expecting the opening quote.
    BeforeAttrValue,
    /// Inside a quoted attribute value.
    AttrValue,
    /// Inside `&...;`, accumulating the reference body.
    Reference,
    /// Seen `/` inside a start tag; only `>` may follow.
    SelfClose,
    /// A lexical error was reported; the scanner produces nothing further.
    Failed,
}

/// Where a decoded reference's character belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefContext {
    Text,
    AttrValue,
}

/// Steps through a fixed keyword (`CDATA[`, `DOCTYPE`) one character at a
/// time, surviving chunk boundaries mid-keyword.
#[derive(Debug, Clone, Copy)]
struct KeywordMatcher {
    expected: &'static [u8],
    matched: usize,
}

enum KeywordStep {
    NeedMore,
    Done,
    Reject,
}

impl KeywordMatcher {
    fn new(expected: &'static [u8]) -> Self {
        Self { expected, matched: 0 }
    }

    fn step(&mut self, c: char) -> KeywordStep {
        if self.expected[self.matched] as char == c {
            self.matched += 1;
            if self.matched == self.expected.len() {
                KeywordStep::Done
            } else {
                KeywordStep::NeedMore
            }
        } else {
            KeywordStep::Reject
        }
    }
}

/// XML 1.0 whitespace.
fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// XML 1.0 `NameStartChar` production.
fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | '_' | 'A'..='Z' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}' | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// XML 1.0 `NameChar` production.
fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// The incremental XML lexer.
#[derive(Debug)]
pub(crate) struct XmlScanner {
    input: ChunkBuffer,
    state: LexState,

    /// 1-based line/column of the next unconsumed character.
    line: usize,
    column: usize,
    /// Whether the last consumed character was a carriage return; used for
    /// `\r\n` line-end normalization across chunk boundaries.
    last_was_cr: bool,

    skip_whitespace: bool,
    fold_case: bool,

    // Token scratch, reused across tokens and carried across feeds.
    text: String,
    /// Set when `text` holds explicitly referenced content (a decoded
    /// character reference), which exempts the run from whitespace skipping.
    text_referenced: bool,
    name: String,
    attr_name: String,
    attr_value: String,
    attrs: Vec<(String, String)>,
    refbuf: String,
    ref_context: RefContext,
    quote: char,
    keyword: KeywordMatcher,
    doctype_depth: usize,

    /// The error already reported, re-surfaced on any further call.
    error: Option<(SyntaxError, usize, usize)>,
}

impl XmlScanner {
    pub(crate) fn new(options: ParserOptions) -> Self {
        Self {
            input: ChunkBuffer::new(),
            state: LexState::Text,
            line: 1,
            column: 1,
            last_was_cr: false,
            skip_whitespace: options.skip_whitespace,
            fold_case: options.fold_case,
            text: String::new(),
            text_referenced: false,
            name: String::new(),
            attr_name: String::new(),
            attr_value: String::new(),
            attrs: Vec::new(),
            refbuf: String::new(),
            ref_context: RefContext::Text,
            quote: '"',
            keyword: KeywordMatcher::new(b""),
            doctype_depth: 0,
            error: None,
        }
    }

    /// Appends a chunk to the unread input.
    ///
    /// The chunk is validated as UTF-8 before anything is admitted; on
    /// failure nothing changes and the offset of the bad byte is reported.
    pub(crate) fn feed(&mut self, chunk: &[u8]) -> Result<(), SaxError> {
        self.input
            .push_bytes(chunk)
            .map_err(|offset| SaxError::InvalidArgument { offset })
    }

    /// Line and column of the next unconsumed character.
    pub(crate) fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Releases the continuation buffers. Used at parser teardown.
    pub(crate) fn release(&mut self) {
        self.input = ChunkBuffer::new();
        self.text = String::new();
        self.name = String::new();
        self.attr_name = String::new();
        self.attr_value = String::new();
        self.attrs = Vec::new();
        self.refbuf = String::new();
    }

    /// Produces the next token, `Ok(None)` when the available input is
    /// exhausted (feed more and call again), or the lexical error that ends
    /// the stream.
    pub(crate) fn next_token(&mut self) -> Result<Option<LexToken>, SaxError> {
        if let Some((source, line, column)) = &self.error {
            return Err(SaxError::MalformedXml {
                source: source.clone(),
                line: *line,
                column: *column,
            });
        }
        loop {
            let Some(c) = self.input.peek() else {
                return Ok(None);
            };
            match self.step(c) {
                Ok(Some(token)) => return Ok(Some(token)),
                Ok(None) => {}
                Err(source) => {
                    self.state = LexState::Failed;
                    self.error = Some((source.clone(), self.line, self.column));
                    return Err(SaxError::MalformedXml {
                        source,
                        line: self.line,
                        column: self.column,
                    });
                }
            }
        }
    }

    /// Consumes one character, maintaining position counters. `\r` counts as
    /// a line end; the `\n` of a `\r\n` pair does not count twice.
    fn advance(&mut self) {
        if let Some(ch) = self.input.next() {
            match ch {
                '\n' if self.last_was_cr => self.last_was_cr = false,
                '\n' | '\r' => {
                    self.line += 1;
                    self.column = 1;
                    self.last_was_cr = ch == '\r';
                }
                _ => {
                    self.column += 1;
                    self.last_was_cr = false;
                }
            }
        }
    }

    /// Position bookkeeping for characters that went through
    /// [`ChunkBuffer::copy_while`] instead of [`advance`](Self::advance).
    /// Every bulk-copy predicate rejects `\r` and `\n`, so no line ends pass
    /// through here.
    fn bump_copied(&mut self, copied: usize) {
        self.column += copied;
        self.last_was_cr = false;
    }

    /// One state-machine step for the peeked character `c`. Returns a token,
    /// nothing (keep looping), or the lexical error.
    #[allow(clippy::too_many_lines)]
    fn step(&mut self, c: char) -> Result<Option<LexToken>, SyntaxError> {
        use LexState::*;
        match self.state {
            Failed => Ok(None),

            Text => match c {
                '<' => {
                    self.advance();
                    self.state = TagOpen;
                    Ok(self.produce_text())
                }
                '&' => {
                    self.advance();
                    self.refbuf.clear();
                    self.ref_context = RefContext::Text;
                    self.state = Reference;
                    Ok(None)
                }
                '\r' => {
                    self.advance();
                    self.text.push('\n');
                    Ok(None)
                }
                '\n' => {
                    let folded = self.last_was_cr;
                    self.advance();
                    if !folded {
                        self.text.push('\n');
                    }
                    Ok(None)
                }
                _ => {
                    let copied = self.input.copy_while(&mut self.text, |c| {
                        !matches!(c, '<' | '&' | '\r' | '\n')
                    });
                    self.bump_copied(copied);
                    Ok(None)
                }
            },

            TagOpen => match c {
                '/' => {
                    self.advance();
                    self.state = CloseTagStart;
                    Ok(None)
                }
                '!' => {
                    self.advance();
                    self.state = Bang;
                    Ok(None)
                }
                '?' => {
                    self.advance();
                    self.state = Pi;
                    Ok(None)
                }
                c if is_name_start_char(c) => {
                    self.name.clear();
                    self.attrs.clear();
                    self.state = OpenTagName;
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            OpenTagName => match c {
                c if is_name_char(c) => {
                    let copied = self.input.copy_while(&mut self.name, is_name_char);
                    self.bump_copied(copied);
                    Ok(None)
                }
                c if is_xml_whitespace(c) => {
                    self.advance();
                    self.state = BeforeAttrName;
                    Ok(None)
                }
                '/' => {
                    self.advance();
                    self.state = SelfClose;
                    Ok(None)
                }
                '>' => {
                    self.advance();
                    Ok(Some(self.produce_open(false)))
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            BeforeAttrName => match c {
                c if is_xml_whitespace(c) => {
                    self.advance();
                    Ok(None)
                }
                '>' => {
                    self.advance();
                    Ok(Some(self.produce_open(false)))
                }
                '/' => {
                    self.advance();
                    self.state = SelfClose;
                    Ok(None)
                }
                c if is_name_start_char(c) => {
                    self.attr_name.clear();
                    self.attr_value.clear();
                    self.state = AttrName;
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            AttrName => match c {
                c if is_name_char(c) => {
                    let copied =
                        self.input.copy_while(&mut self.attr_name, is_name_char);
                    self.bump_copied(copied);
                    Ok(None)
                }
                '=' => {
                    self.advance();
                    self.state = BeforeAttrValue;
                    Ok(None)
                }
                c if is_xml_whitespace(c) => {
                    self.advance();
                    self.state = AfterAttrName;
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            AfterAttrName => match c {
                c if is_xml_whitespace(c) => {
                    self.advance();
                    Ok(None)
                }
                '=' => {
                    self.advance();
                    self.state = BeforeAttrValue;
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            BeforeAttrValue => match c {
                c if is_xml_whitespace(c) => {
                    self.advance();
                    Ok(None)
                }
                q @ ('"' | '\'') => {
                    self.advance();
                    self.quote = q;
                    self.state = AttrValue;
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            AttrValue => match c {
                q if q == self.quote => {
                    self.advance();
                    self.finish_attribute()?;
                    self.state = BeforeAttrName;
                    Ok(None)
                }
                '&' => {
                    self.advance();
                    self.refbuf.clear();
                    self.ref_context = RefContext::AttrValue;
                    self.state = Reference;
                    Ok(None)
                }
                '<' => Err(SyntaxError::InvalidCharacter('<')),
                // Attribute-value normalization: raw whitespace becomes a
                // space; characters written as references stay literal.
                '\t' | '\r' => {
                    self.advance();
                    self.attr_value.push(' ');
                    Ok(None)
                }
                '\n' => {
                    let folded = self.last_was_cr;
                    self.advance();
                    if !folded {
                        self.attr_value.push(' ');
                    }
                    Ok(None)
                }
                _ => {
                    let quote = self.quote;
                    let copied = self.input.copy_while(&mut self.attr_value, |c| {
                        c != quote && !matches!(c, '&' | '<' | '\t' | '\r' | '\n')
                    });
                    self.bump_copied(copied);
                    Ok(None)
                }
            },

            SelfClose => match c {
                '>' => {
                    self.advance();
                    Ok(Some(self.produce_open(true)))
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            CloseTagStart => match c {
                c if is_name_start_char(c) => {
                    self.name.clear();
                    self.state = CloseTagName;
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            CloseTagName => match c {
                c if is_name_char(c) => {
                    let copied = self.input.copy_while(&mut self.name, is_name_char);
                    self.bump_copied(copied);
                    Ok(None)
                }
                c if is_xml_whitespace(c) => {
                    self.advance();
                    self.state = CloseTagEnd;
                    Ok(None)
                }
                '>' => {
                    self.advance();
                    Ok(Some(self.produce_close()))
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            CloseTagEnd => match c {
                c if is_xml_whitespace(c) => {
                    self.advance();
                    Ok(None)
                }
                '>' => {
                    self.advance();
                    Ok(Some(self.produce_close()))
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            Reference => match c {
                ';' => {
                    self.advance();
                    let decoded = entities::decode_reference(&self.refbuf)?;
                    self.refbuf.clear();
                    match self.ref_context {
                        RefContext::Text => {
                            self.text.push(decoded);
                            self.text_referenced = true;
                            self.state = Text;
                        }
                        RefContext::AttrValue => {
                            self.attr_value.push(decoded);
                            self.state = AttrValue;
                        }
                    }
                    Ok(None)
                }
                c if is_name_char(c) || (self.refbuf.is_empty() && c == '#') => {
                    self.advance();
                    self.refbuf.push(c);
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            Bang => match c {
                '-' => {
                    self.advance();
                    self.state = CommentOpen;
                    Ok(None)
                }
                '[' => {
                    self.advance();
                    self.keyword = KeywordMatcher::new(b"CDATA[");
                    self.state = CdataKeyword;
                    Ok(None)
                }
                'D' => {
                    self.keyword = KeywordMatcher::new(b"DOCTYPE");
                    self.state = DoctypeKeyword;
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            CommentOpen => match c {
                '-' => {
                    self.advance();
                    self.state = Comment;
                    Ok(None)
                }
                c => Err(SyntaxError::InvalidCharacter(c)),
            },

            Comment => {
                self.advance();
                if c == '-' {
                    self.state = CommentDash;
                }
                Ok(None)
            }

            CommentDash => {
                self.advance();
                self.state = if c == '-' { CommentDashDash } else { Comment };
                Ok(None)
            }

            CommentDashDash => match c {
                '>' => {
                    self.advance();
                    self.state = Text;
                    Ok(None)
                }
                _ => Err(SyntaxError::DoubleHyphenInComment),
            },

            CdataKeyword => match self.keyword.step(c) {
                KeywordStep::NeedMore => {
                    self.advance();
                    Ok(None)
                }
                KeywordStep::Done => {
                    self.advance();
                    self.state = Cdata;
                    Ok(None)
                }
                KeywordStep::Reject => Err(SyntaxError::InvalidCharacter(c)),
            },

            Cdata => match c {
                ']' => {
                    self.advance();
                    self.state = CdataBracket;
                    Ok(None)
                }
                '\r' => {
                    self.advance();
                    self.text.push('\n');
                    Ok(None)
                }
                '\n' => {
                    let folded = self.last_was_cr;
                    self.advance();
                    if !folded {
                        self.text.push('\n');
                    }
                    Ok(None)
                }
                _ => {
                    let copied = self.input.copy_while(&mut self.text, |c| {
                        !matches!(c, ']' | '\r' | '\n')
                    });
                    self.bump_copied(copied);
                    Ok(None)
                }
            },

            CdataBracket => match c {
                ']' => {
                    self.advance();
                    self.state = CdataBracketBracket;
                    Ok(None)
                }
                // Not a terminator; the pending `]` was content. The current
                // character is re-dispatched by the Cdata state.
                _ => {
                    self.text.push(']');
                    self.state = Cdata;
                    Ok(None)
                }
            },

            CdataBracketBracket => match c {
                '>' => {
                    self.advance();
                    self.state = Text;
                    Ok(self.produce_cdata())
                }
                ']' => {
                    // `]]]` — the first bracket was content, still two pending.
                    self.advance();
                    self.text.push(']');
                    Ok(None)
                }
                _ => {
                    self.text.push_str("]]");
                    self.state = Cdata;
                    Ok(None)
                }
            },

            DoctypeKeyword => match self.keyword.step(c) {
                KeywordStep::NeedMore => {
                    self.advance();
                    Ok(None)
                }
                KeywordStep::Done => {
                    self.advance();
                    self.doctype_depth = 0;
                    self.state = Doctype;
                    Ok(None)
                }
                KeywordStep::Reject => Err(SyntaxError::InvalidCharacter(c)),
            },

            Doctype => {
                self.advance();
                match c {
                    '[' => self.doctype_depth += 1,
                    ']' => self.doctype_depth = self.doctype_depth.saturating_sub(1),
                    '>' if self.doctype_depth == 0 => self.state = Text,
                    _ => {}
                }
                Ok(None)
            }

            Pi => {
                self.advance();
                if c == '?' {
                    self.state = PiQuestion;
                }
                Ok(None)
            }

            PiQuestion => {
                self.advance();
                match c {
                    '>' => self.state = Text,
                    '?' => {}
                    _ => self.state = Pi,
                }
                Ok(None)
            }
        }
    }

    /// Flushes the accumulated character data, if it survives whitespace
    /// skipping.
    fn produce_text(&mut self) -> Option<LexToken> {
        let referenced = core::mem::take(&mut self.text_referenced);
        if self.text.is_empty() {
            return None;
        }
        let text = core::mem::take(&mut self.text);
        if self.skip_whitespace && !referenced && text.chars().all(is_xml_whitespace) {
            return None;
        }
        Some(LexToken::Text(text))
    }

    /// Flushes CDATA content, which is never whitespace-skipped.
    fn produce_cdata(&mut self) -> Option<LexToken> {
        if self.text.is_empty() {
            return None;
        }
        Some(LexToken::Text(core::mem::take(&mut self.text)))
    }

    fn produce_open(&mut self, self_closing: bool) -> LexToken {
        let mut name = core::mem::take(&mut self.name);
        if self.fold_case {
            name.make_ascii_uppercase();
        }
        self.state = LexState::Text;
        LexToken::Open {
            name,
            attributes: Attributes::from_pairs(core::mem::take(&mut self.attrs)),
            self_closing,
        }
    }

    fn produce_close(&mut self) -> LexToken {
        let mut name = core::mem::take(&mut self.name);
        if self.fold_case {
            name.make_ascii_uppercase();
        }
        self.state = LexState::Text;
        LexToken::Close(name)
    }

    /// Completes the pending attribute: folds the name, rejects duplicates,
    /// and records the pair in document order.
    fn finish_attribute(&mut self) -> Result<(), SyntaxError> {
        let mut name = core::mem::take(&mut self.attr_name);
        if self.fold_case {
            name.make_ascii_uppercase();
        }
        if self.attrs.iter().any(|(n, _)| *n == name) {
            return Err(SyntaxError::DuplicateAttribute(name));
        }
        let value = core::mem::take(&mut self.attr_value);
        self.attrs.push((name, value));
        Ok(())
    }
}
