//! A streaming, incremental SAX-style XML parser.
//!
//! Feed input in chunks of any size — split anywhere, even in the middle of
//! a tag name or a multi-byte character — and receive element-open,
//! character-data, and element-close notifications, synchronously and in
//! document order. No document tree is built; this is strictly a
//! forward-only event stream.
//!
//! # Examples
//!
//! ```
//! use xmlmodem::{EventCollector, ParserOptions, SaxEvent, SaxParser, attributes};
//!
//! let mut parser = SaxParser::new(ParserOptions::default());
//! let collector = EventCollector::new();
//! collector.attach_to(&mut parser);
//!
//! parser.parse("<item id=\"7\"/>")?;
//!
//! assert_eq!(
//!     collector.take(),
//!     vec![
//!         SaxEvent::ElementOpen {
//!             name: "item".into(),
//!             attributes: attributes! { "id" => "7" },
//!         },
//!         SaxEvent::ElementClose { name: "item".into() },
//!     ]
//! );
//! # Ok::<(), xmlmodem::SaxError>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod chunk_utils;
mod collector;
mod dispatch;
mod entities;
mod error;
mod event;
mod options;
mod parser;
mod scanner;

#[cfg(test)]
mod tests;

pub use chunk_utils::{produce_chunks, split_points};
pub use collector::EventCollector;
pub use dispatch::{Observer, ObserverError};
pub use error::{SaxError, SyntaxError};
pub use event::{Attributes, EventKind, SaxEvent};
pub use options::ParserOptions;
pub use parser::SaxParser;

#[doc(hidden)]
pub use alloc::string;
