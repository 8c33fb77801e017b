use alloc::{rc::Rc, vec::Vec};
use core::cell::RefCell;

use crate::{
    dispatch::{Observer, ObserverError},
    event::{EventKind, SaxEvent},
    parser::SaxParser,
};

/// An [`Observer`] that records every event it receives.
///
/// The collector is a cheap clonable handle over shared storage, so the
/// caller can keep one handle while the parser owns the registered clones.
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
/// parser.parse("<a><b>hi</b></a>").unwrap();
/// let events = collector.take();
/// assert_eq!(events.len(), 5);
/// assert_eq!(
///     events[2],
///     SaxEvent::CharacterData { element: "b".into(), text: "hi".into() }
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventCollector {
    events: Rc<RefCell<Vec<SaxEvent>>>,
}

impl EventCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers clones of this collector for all three event kinds.
    pub fn attach_to(&self, parser: &mut SaxParser) {
        for kind in [
            EventKind::ElementOpen,
            EventKind::CharacterData,
            EventKind::ElementClose,
        ] {
            parser.register_observer(kind, self.clone());
        }
    }

    /// Removes and returns everything recorded so far.
    #[must_use]
    pub fn take(&self) -> Vec<SaxEvent> {
        self.events.borrow_mut().split_off(0)
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl Observer for EventCollector {
    fn notify(&mut self, event: &SaxEvent) -> Result<(), ObserverError> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}
