//! Tagged cursor states for document and position iteration.
//!
//! Span consumers historically compare raw integers against reserved sentinel
//! values (`-1` before the first advance, a maximum value once exhausted). The
//! types in this module make those states explicit while preserving the same
//! total order: `Unstarted/Unpositioned < any real value < Exhausted`. Code that
//! still needs the raw representation can use `to_raw`.

use std::fmt;

/// Document identifier within the indexed data.
pub type DocId = u32;

/// Ordinal position of a token within a document field.
pub type Position = u32;

/// Raw "no more documents" value. Never reported by a posting source as a real
/// document id.
pub const NO_MORE_DOCS: DocId = DocId::MAX;

/// Raw "no more positions" value. Never reported by a posting source as a real
/// position. A term indexed at this position cannot be iterated.
pub const NO_MORE_POSITIONS: Position = Position::MAX;

/// Document-level cursor state.
///
/// Variant order defines the comparison order, so the derived `Ord` matches the
/// raw sentinel ordering (`-1 < doc < NO_MORE_DOCS`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocCursor {
    /// No document advance has happened yet.
    #[default]
    Unstarted,
    /// Positioned on a document containing the term.
    At(DocId),
    /// All matching documents have been consumed.
    Exhausted,
}

impl DocCursor {
    /// Returns the current document id, if positioned on one.
    #[inline]
    pub fn doc(self) -> Option<DocId> {
        match self {
            DocCursor::At(doc) => Some(doc),
            _ => None,
        }
    }

    #[inline]
    pub fn is_exhausted(self) -> bool {
        self == DocCursor::Exhausted
    }

    /// Raw sentinel form: `-1`, the document id, or [`NO_MORE_DOCS`].
    #[inline]
    pub fn to_raw(self) -> i64 {
        match self {
            DocCursor::Unstarted => -1,
            DocCursor::At(doc) => doc as i64,
            DocCursor::Exhausted => NO_MORE_DOCS as i64,
        }
    }
}

impl fmt::Display for DocCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocCursor::Unstarted => f.write_str("START"),
            DocCursor::At(doc) => write!(f, "{doc}"),
            DocCursor::Exhausted => f.write_str("ENDDOC"),
        }
    }
}

/// Position-level cursor state within the current document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpanPosition {
    /// No position has been requested in the current document.
    #[default]
    Unpositioned,
    /// Positioned on an occurrence.
    At(Position),
    /// All occurrences in the current document have been consumed.
    Exhausted,
}

impl SpanPosition {
    #[inline]
    pub fn position(self) -> Option<Position> {
        match self {
            SpanPosition::At(pos) => Some(pos),
            _ => None,
        }
    }

    #[inline]
    pub fn is_exhausted(self) -> bool {
        self == SpanPosition::Exhausted
    }

    /// Exclusive end of a single-slot span starting at `self`.
    ///
    /// `Unpositioned` and `Exhausted` map to themselves. `At(p)` maps to
    /// `At(p + 1)`; for `p == NO_MORE_POSITIONS - 1` this collides with the
    /// exhausted sentinel, same as the raw integer representation.
    #[inline]
    pub fn end(self) -> SpanPosition {
        match self {
            SpanPosition::At(pos) => {
                let end = pos.saturating_add(1);
                if end == NO_MORE_POSITIONS {
                    SpanPosition::Exhausted
                } else {
                    SpanPosition::At(end)
                }
            }
            other => other,
        }
    }

    /// Raw sentinel form: `-1`, the position, or [`NO_MORE_POSITIONS`].
    #[inline]
    pub fn to_raw(self) -> i64 {
        match self {
            SpanPosition::Unpositioned => -1,
            SpanPosition::At(pos) => pos as i64,
            SpanPosition::Exhausted => NO_MORE_POSITIONS as i64,
        }
    }
}

impl fmt::Display for SpanPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanPosition::Unpositioned => f.write_str("-1"),
            SpanPosition::At(pos) => write!(f, "{pos}"),
            SpanPosition::Exhausted => f.write_str("ENDPOS"),
        }
    }
}

/// A matched occurrence region: `start..end` within `doc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub doc: DocId,
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
