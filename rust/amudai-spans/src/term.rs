//! Term identity: a field name paired with the term's raw bytes.

use std::{fmt, sync::Arc};

/// A term within a named field.
///
/// Terms are cheap to clone; both the field name and the term bytes are
/// reference counted so the same term can be shared by many span iterators
/// of one query.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term {
    field: Arc<str>,
    bytes: Arc<[u8]>,
}

impl Term {
    /// Creates a term from a textual value.
    pub fn new(field: impl Into<Arc<str>>, text: &str) -> Term {
        Term::from_bytes(field, text.as_bytes())
    }

    /// Creates a term from raw bytes (e.g. an encoded numeric term).
    pub fn from_bytes(field: impl Into<Arc<str>>, bytes: &[u8]) -> Term {
        Term {
            field: field.into(),
            bytes: Arc::from(bytes),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the term text, if the bytes are valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, String::from_utf8_lossy(&self.bytes))
    }
}
