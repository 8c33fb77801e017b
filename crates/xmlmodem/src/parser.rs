//! The event dispatcher core: translates scanner tokens into notifications
//! with correct state attribution and delivers them to registered observers.

use alloc::{boxed::Box, string::String, vec::Vec};

use crate::{
    dispatch::{Dispatcher, Observer},
    error::{SaxError, SyntaxError},
    event::{EventKind, SaxEvent},
    options::ParserOptions,
    scanner::{LexToken, XmlScanner},
};

/// A streaming SAX-style XML parser.
///
/// `SaxParser` is fed input in chunks via [`parse`](Self::parse) and
/// dispatches one notification per element start, character-data run, and
/// element end to the observers registered for each kind — synchronously, in
/// emission order, before `parse` returns. No document tree is built and no
/// event is retained.
///
/// Chunks may be split anywhere, including in the middle of a tag, an
/// attribute, a text run, or a multi-byte character; the notification
/// sequence is identical no matter how the document is partitioned.
///
/// The parser does not verify end-of-document completeness: a well-formed
/// document ends with an empty [`open_elements`](Self::open_elements) stack,
/// and callers that require a complete document should check exactly that
/// after the final chunk. Multiple top-level elements (fragment input) are
/// accepted.
///
/// # Examples
///
/// ```
/// use xmlmodem::{EventCollector, ParserOptions, SaxEvent, SaxParser};
///
/// let mut parser = SaxParser::new(ParserOptions::default());
/// let collector = EventCollector::new();
/// collector.attach_to(&mut parser);
///
/// // Feed the document in two arbitrary pieces.
/// parser.parse("<a><b>h")?;
/// parser.parse("i</b></a>")?;
///
/// let events = collector.take();
/// assert_eq!(events.len(), 5);
/// assert_eq!(
///     events[2],
///     SaxEvent::CharacterData { element: "b".into(), text: "hi".into() }
/// );
/// assert!(parser.open_elements().is_empty());
/// # Ok::<(), xmlmodem::SaxError>(())
/// ```
#[derive(Debug)]
pub struct SaxParser {
    scanner: XmlScanner,
    open_elements: Vec<String>,
    dispatcher: Dispatcher,
    closed: bool,
}

impl SaxParser {
    /// Creates a parser with the given options. No parsing occurs yet.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            scanner: XmlScanner::new(options),
            open_elements: Vec::new(),
            dispatcher: Dispatcher::default(),
            closed: false,
        }
    }

    /// Registers an observer for one event kind.
    ///
    /// Observers of the same kind are invoked in registration order; nothing
    /// is deduplicated, so registering the same logical observer twice means
    /// it runs twice.
    pub fn register_observer(&mut self, kind: EventKind, observer: impl Observer + 'static) {
        self.dispatcher.register(kind, Box::new(observer));
    }

    /// Feeds one chunk of input, dispatching every notification it completes.
    ///
    /// Zero-length chunks are no-ops. A chunk may end mid-token; the partial
    /// token is carried and resumed by the next call. A character-data run is
    /// complete only when markup follows it, so a trailing run not terminated
    /// by any tag stays buffered — in a well-formed document the root close
    /// tag always terminates the last run.
    ///
    /// # Errors
    ///
    /// - [`SaxError::UseAfterClose`] if [`close`](Self::close) was called.
    /// - [`SaxError::InvalidArgument`] if the chunk is not UTF-8 text;
    ///   nothing is mutated and nothing is dispatched.
    /// - [`SaxError::MalformedXml`] on the first well-formedness violation;
    ///   notifications dispatched earlier in the chunk stand, and the parser
    ///   should be considered unusable for further parsing.
    /// - [`SaxError::Observer`] if an observer fails; the rest of the chunk
    ///   is not processed.
    pub fn parse(&mut self, chunk: impl AsRef<[u8]>) -> Result<(), SaxError> {
        if self.closed {
            return Err(SaxError::UseAfterClose);
        }
        self.scanner.feed(chunk.as_ref())?;

        while let Some(token) = self.scanner.next_token()? {
            match token {
                LexToken::Open {
                    name,
                    attributes,
                    self_closing,
                } => {
                    self.open_elements.push(name.clone());
                    let event = SaxEvent::ElementOpen { name, attributes };
                    self.dispatcher.dispatch(&event)?;
                    if self_closing {
                        let SaxEvent::ElementOpen { name, .. } = event else {
                            unreachable!()
                        };
                        self.open_elements.pop();
                        self.dispatcher.dispatch(&SaxEvent::ElementClose { name })?;
                    }
                }
                LexToken::Text(text) => {
                    // Attribution policy: the innermost open element owns the
                    // run; outside any element the owner is the empty string.
                    let element = self.open_elements.last().cloned().unwrap_or_default();
                    self.dispatcher
                        .dispatch(&SaxEvent::CharacterData { element, text })?;
                }
                LexToken::Close(name) => {
                    match self.open_elements.last() {
                        None => {
                            return Err(self.structural_error(SyntaxError::StrayCloseTag(name)));
                        }
                        Some(top) if *top != name => {
                            let expected = top.clone();
                            return Err(self.structural_error(SyntaxError::MismatchedCloseTag {
                                expected,
                                found: name,
                            }));
                        }
                        Some(_) => {
                            self.open_elements.pop();
                            self.dispatcher.dispatch(&SaxEvent::ElementClose { name })?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// The names of the currently open elements, outermost first.
    ///
    /// Empty whenever parsing sits between top-level constructs; a caller
    /// that wants "complete document" verification checks this after the
    /// final chunk.
    #[must_use]
    pub fn open_elements(&self) -> &[String] {
        &self.open_elements
    }

    /// Tears the parser down, releasing the scanner's continuation buffers.
    ///
    /// Any later [`parse`](Self::parse) call fails with
    /// [`SaxError::UseAfterClose`]. Dropping the parser releases the same
    /// resources; `close` exists for callers that keep the instance around.
    pub fn close(&mut self) {
        self.closed = true;
        self.scanner.release();
    }

    fn structural_error(&self, source: SyntaxError) -> SaxError {
        let (line, column) = self.scanner.position();
        SaxError::MalformedXml {
            source,
            line,
            column,
        }
    }
}
