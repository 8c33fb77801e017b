//! Notifications emitted by the parser and the attribute collection that
//! rides along with element-open notifications.

use alloc::{string::String, vec::Vec};

/// One notification from the parser.
///
/// Events are constructed per token, dispatched synchronously to the
/// observers registered for their kind, and discarded; the parser never
/// retains them.
///
/// # Examples
///
/// ```
/// use xmlmodem::{attributes, SaxEvent};
///
/// let event = SaxEvent::ElementOpen {
///     name: "item".into(),
///     attributes: attributes! { "id" => "7" },
/// };
/// assert_eq!(event.kind(), xmlmodem::EventKind::ElementOpen);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SaxEvent {
    /// A start tag was parsed. Self-closing tags produce an `ElementOpen`
    /// immediately followed by an `ElementClose`.
    ElementOpen {
        /// Element name, raw (prefixes included), case-folded if the parser
        /// was configured to do so.
        name: String,
        /// The tag's attributes, in document order, with entity references
        /// already decoded.
        attributes: Attributes,
    },

    /// A run of character data was parsed.
    ///
    /// One event covers the whole run regardless of how the input was split
    /// into chunks. CDATA sections produce their own events.
    CharacterData {
        /// Name of the innermost open element, or the empty string for data
        /// outside any element.
        element: String,
        /// The decoded text.
        text: String,
    },

    /// An end tag was parsed (or synthesized for a self-closing tag).
    ElementClose {
        /// Element name; always matches the corresponding `ElementOpen`.
        name: String,
    },
}

impl SaxEvent {
    /// The kind of this event, as used for observer registration.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            SaxEvent::ElementOpen { .. } => EventKind::ElementOpen,
            SaxEvent::CharacterData { .. } => EventKind::CharacterData,
            SaxEvent::ElementClose { .. } => EventKind::ElementClose,
        }
    }
}

/// The three notification kinds, used to pick which events an observer
/// receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Element start notifications.
    ElementOpen,
    /// Character data notifications.
    CharacterData,
    /// Element end notifications.
    ElementClose,
}

/// The attributes of one start tag, in document order.
///
/// Insertion order is preserved so that event streams are deterministic and
/// comparable; lookup by name is linear, which is the right trade-off for the
/// handful of attributes a real-world tag carries.
///
/// # Examples
///
/// ```
/// use xmlmodem::attributes;
///
/// let attrs = attributes! { "id" => "7", "class" => "x" };
/// assert_eq!(attrs.get("id"), Some("7"));
/// assert_eq!(attrs.iter().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Builds the collection from name/value pairs, preserving their order.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// The value of the first attribute named `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether an attribute named `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over `(name, value)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tag carried no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Builds an [`Attributes`] collection from `name => value` pairs.
///
/// ```
/// use xmlmodem::attributes;
///
/// let attrs = attributes! { "id" => "7" };
/// assert_eq!(attrs.get("id"), Some("7"));
/// assert!(attributes! {}.is_empty());
/// ```
#[macro_export]
macro_rules! attributes {
    () => { $crate::Attributes::default() };
    ( $( $name:expr => $value:expr ),+ $(,)? ) => {
        $crate::Attributes::from_pairs([
            $( (
                $crate::string::String::from($name),
                $crate::string::String::from($value),
            ) ),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::Attributes;
    use alloc::string::String;

    #[test]
    fn order_is_preserved() {
        let attrs = Attributes::from_pairs([
            (String::from("z"), String::from("1")),
            (String::from("a"), String::from("2")),
        ]);
        let names: alloc::vec::Vec<&str> = attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["z", "a"]);
    }

    #[test]
    fn lookup() {
        let attrs = attributes! { "id" => "7" };
        assert_eq!(attrs.get("id"), Some("7"));
        assert_eq!(attrs.get("missing"), None);
        assert!(attrs.contains("id"));
        assert_eq!(attrs.len(), 1);
    }
}
