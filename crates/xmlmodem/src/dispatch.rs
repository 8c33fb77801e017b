//! Observer registration and synchronous event delivery.
//!
//! Each parser instance owns its own registry — there is no process-wide
//! event bus. Observers are registered per [`EventKind`] and invoked in
//! registration order, with no deduplication.

use alloc::{boxed::Box, vec::Vec};

use crate::{
    error::SaxError,
    event::{EventKind, SaxEvent},
};

/// The error type observers may return to abort dispatch.
///
/// It is surfaced to the `parse` caller as
/// [`SaxError::Observer`](crate::SaxError::Observer); the parser does not
/// catch or suppress it.
pub type ObserverError = Box<dyn core::error::Error + Send + Sync>;

/// External code that receives parser notifications.
///
/// An observer is registered for one [`EventKind`] via
/// [`SaxParser::register_observer`](crate::SaxParser::register_observer) and
/// receives only events of that kind. Closures of type
/// `FnMut(&SaxEvent) -> Result<(), ObserverError>` are observers too.
///
/// Observers are owned by the parser, so calling `parse` from inside an
/// observer is not merely disallowed — the borrow checker makes it
/// unrepresentable.
///
/// # Examples
///
/// ```
/// use xmlmodem::{EventKind, ParserOptions, SaxEvent, SaxParser};
///
/// let mut parser = SaxParser::new(ParserOptions::default());
/// parser.register_observer(EventKind::ElementOpen, |event: &SaxEvent| {
///     if let SaxEvent::ElementOpen { name, .. } = event {
///         assert_eq!(name, "root");
///     }
///     Ok(())
/// });
/// parser.parse("<root/>").unwrap();
/// ```
pub trait Observer {
    /// Receives one event. Returning an error aborts the current `parse`
    /// call.
    ///
    /// # Errors
    ///
    /// Whatever the observer decides is fatal; the parser propagates it
    /// verbatim.
    fn notify(&mut self, event: &SaxEvent) -> Result<(), ObserverError>;
}

impl<F> Observer for F
where
    F: FnMut(&SaxEvent) -> Result<(), ObserverError>,
{
    fn notify(&mut self, event: &SaxEvent) -> Result<(), ObserverError> {
        self(event)
    }
}

/// Per-parser observer registry: one ordered list per event kind.
#[derive(Default)]
pub(crate) struct Dispatcher {
    open: Vec<Box<dyn Observer>>,
    data: Vec<Box<dyn Observer>>,
    close: Vec<Box<dyn Observer>>,
}

impl Dispatcher {
    pub(crate) fn register(&mut self, kind: EventKind, observer: Box<dyn Observer>) {
        match kind {
            EventKind::ElementOpen => self.open.push(observer),
            EventKind::CharacterData => self.data.push(observer),
            EventKind::ElementClose => self.close.push(observer),
        }
    }

    /// Delivers `event` to every observer registered for its kind, in
    /// registration order, stopping at the first failure.
    pub(crate) fn dispatch(&mut self, event: &SaxEvent) -> Result<(), SaxError> {
        let observers = match event.kind() {
            EventKind::ElementOpen => &mut self.open,
            EventKind::CharacterData => &mut self.data,
            EventKind::ElementClose => &mut self.close,
        };
        for observer in observers {
            observer.notify(event).map_err(SaxError::Observer)?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("open", &self.open.len())
            .field("data", &self.data.len())
            .field("close", &self.close.len())
            .finish()
    }
}
