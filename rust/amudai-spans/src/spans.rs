//! The span consumer contract.
//!
//! [`Spans`] is what span composition operators (near, containment, ordered
//! sequences, disjunctions) consume. It combines a forward-only document cursor
//! with a forward-only position cursor scoped to the current document.

use amudai_common::{Result, try_next};

use crate::cursor::{DocCursor, DocId, NO_MORE_POSITIONS, Span, SpanPosition};

/// Two-level cursor over matching spans: documents first, then start
/// positions within the current document.
///
/// # Protocol
///
/// 1. Call [`next_doc`](Self::next_doc) or [`advance_to`](Self::advance_to)
///    until it returns [`DocCursor::Exhausted`].
/// 2. On each document, call [`next_start_position`](Self::next_start_position)
///    until it returns [`SpanPosition::Exhausted`].
/// 3. While positioned, [`end_position`](Self::end_position) and the payload
///    accessors describe the current span.
///
/// Document ids strictly increase and start positions never decrease within a
/// document.
pub trait Spans {
    /// Current document: `Unstarted` before the first advance, `Exhausted`
    /// after the last.
    fn doc_id(&self) -> DocCursor;

    /// Advances to the next matching document.
    fn next_doc(&mut self) -> Result<DocCursor>;

    /// Advances to the first matching document `>= target`.
    ///
    /// `target` must be strictly greater than the current document.
    fn advance_to(&mut self, target: DocId) -> Result<DocCursor>;

    /// Advances to the next start position in the current document.
    fn next_start_position(&mut self) -> Result<SpanPosition>;

    fn start_position(&self) -> SpanPosition;

    /// Exclusive end of the current span.
    fn end_position(&self) -> SpanPosition;

    /// Number of position slots skipped inside the current span.
    fn width(&self) -> u32;

    /// Traversal cost estimate, used to order sub-spans in compound operators.
    fn cost(&self) -> u64;

    /// Fetches a copy of the payload at the current position.
    ///
    /// `None` means no payload is attached to this occurrence. The returned
    /// bytes are owned by the caller.
    fn payload(&mut self) -> Result<Option<Vec<u8>>>;

    /// Whether a payload exists at the current position and has not been
    /// fetched yet.
    fn payload_available(&self) -> Result<bool>;

    /// The current span, if positioned on one.
    fn current_span(&self) -> Option<Span> {
        let doc = self.doc_id().doc()?;
        let start = self.start_position().position()?;
        let end = self.end_position().position().unwrap_or(NO_MORE_POSITIONS);
        Some(Span { doc, start, end })
    }

    /// Flattens the remaining spans into an iterator.
    fn into_span_iter(self) -> SpanIter<Self>
    where
        Self: Sized,
    {
        SpanIter::new(self)
    }
}

impl<S: Spans + ?Sized> Spans for Box<S> {
    #[inline]
    fn doc_id(&self) -> DocCursor {
        (**self).doc_id()
    }

    #[inline]
    fn next_doc(&mut self) -> Result<DocCursor> {
        (**self).next_doc()
    }

    #[inline]
    fn advance_to(&mut self, target: DocId) -> Result<DocCursor> {
        (**self).advance_to(target)
    }

    #[inline]
    fn next_start_position(&mut self) -> Result<SpanPosition> {
        (**self).next_start_position()
    }

    #[inline]
    fn start_position(&self) -> SpanPosition {
        (**self).start_position()
    }

    #[inline]
    fn end_position(&self) -> SpanPosition {
        (**self).end_position()
    }

    #[inline]
    fn width(&self) -> u32 {
        (**self).width()
    }

    #[inline]
    fn cost(&self) -> u64 {
        (**self).cost()
    }

    #[inline]
    fn payload(&mut self) -> Result<Option<Vec<u8>>> {
        (**self).payload()
    }

    #[inline]
    fn payload_available(&self) -> Result<bool> {
        (**self).payload_available()
    }
}

/// Iterator over every remaining span of a [`Spans`] cursor, in document and
/// then start position order.
///
/// Iteration continues from wherever the cursor currently is: spans already
/// consumed through the cursor are not revisited.
pub struct SpanIter<S> {
    spans: S,
}

impl<S: Spans> SpanIter<S> {
    pub fn new(spans: S) -> SpanIter<S> {
        SpanIter { spans }
    }

    pub fn into_inner(self) -> S {
        self.spans
    }
}

impl<S: Spans> Iterator for SpanIter<S> {
    type Item = Result<Span>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.spans.doc_id() {
                DocCursor::Exhausted => return None,
                DocCursor::Unstarted => {
                    try_next!(self.spans.next_doc());
                }
                DocCursor::At(_) => {
                    if try_next!(self.spans.next_start_position()).is_exhausted() {
                        try_next!(self.spans.next_doc());
                    } else if let Some(span) = self.spans.current_span() {
                        return Some(Ok(span));
                    }
                }
            }
        }
    }
}
