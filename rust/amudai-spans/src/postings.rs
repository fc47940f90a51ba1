//! The storage-facing boundary of span iteration.

use amudai_common::{Result, error::Error};

use crate::cursor::{DocCursor, DocId, Position};

/// Access to one term's postings: the documents containing the term and, per
/// document, the ordered positions and optional payloads of its occurrences.
///
/// Implementations wrap whatever decodes the postings (an on-disk block
/// decoder, an in-memory buffer, etc.). Storage failures are reported through
/// `Err` and are passed through to span consumers unchanged.
///
/// # Contract
///
/// - Document ids are strictly increasing across `next_doc`/`advance_to` calls.
/// - `frequency` is at least 1 for every document returned.
/// - `next_position` is called at most `frequency` times per document and returns
///   non-decreasing positions, none equal to
///   [`NO_MORE_POSITIONS`](crate::NO_MORE_POSITIONS).
/// - The slice returned by `payload` may be overwritten by the next call on the
///   source; callers that keep it must copy it.
pub trait PostingSource {
    /// Current document state of the source.
    fn doc(&self) -> DocCursor;

    /// Advances to the next document containing the term. Returns `None` once
    /// all documents are consumed.
    fn next_doc(&mut self) -> Result<Option<DocId>>;

    /// Advances to the first document `>= target`. Returns `None` if there is
    /// no such document.
    fn advance_to(&mut self, target: DocId) -> Result<Option<DocId>>;

    /// Number of occurrences of the term in the current document.
    fn frequency(&self) -> Result<u32>;

    /// Next occurrence position in the current document.
    fn next_position(&mut self) -> Result<Position>;

    /// Payload attached to the occurrence at the last returned position.
    fn payload(&self) -> Result<Option<&[u8]>>;

    /// Estimated traversal cost, typically the number of documents.
    fn cost(&self) -> u64;
}

impl<S: PostingSource + ?Sized> PostingSource for &mut S {
    #[inline]
    fn doc(&self) -> DocCursor {
        (**self).doc()
    }

    #[inline]
    fn next_doc(&mut self) -> Result<Option<DocId>> {
        (**self).next_doc()
    }

    #[inline]
    fn advance_to(&mut self, target: DocId) -> Result<Option<DocId>> {
        (**self).advance_to(target)
    }

    #[inline]
    fn frequency(&self) -> Result<u32> {
        (**self).frequency()
    }

    #[inline]
    fn next_position(&mut self) -> Result<Position> {
        (**self).next_position()
    }

    #[inline]
    fn payload(&self) -> Result<Option<&[u8]>> {
        (**self).payload()
    }

    #[inline]
    fn cost(&self) -> u64 {
        (**self).cost()
    }
}

impl<S: PostingSource + ?Sized> PostingSource for Box<S> {
    #[inline]
    fn doc(&self) -> DocCursor {
        (**self).doc()
    }

    #[inline]
    fn next_doc(&mut self) -> Result<Option<DocId>> {
        (**self).next_doc()
    }

    #[inline]
    fn advance_to(&mut self, target: DocId) -> Result<Option<DocId>> {
        (**self).advance_to(target)
    }

    #[inline]
    fn frequency(&self) -> Result<u32> {
        (**self).frequency()
    }

    #[inline]
    fn next_position(&mut self) -> Result<Position> {
        (**self).next_position()
    }

    #[inline]
    fn payload(&self) -> Result<Option<&[u8]>> {
        (**self).payload()
    }

    #[inline]
    fn cost(&self) -> u64 {
        (**self).cost()
    }
}

/// Postings of a term that occurs in no document.
#[derive(Debug, Clone, Default)]
pub struct EmptyPostings {
    doc: DocCursor,
}

impl EmptyPostings {
    pub fn new() -> EmptyPostings {
        EmptyPostings::default()
    }
}

impl PostingSource for EmptyPostings {
    fn doc(&self) -> DocCursor {
        self.doc
    }

    fn next_doc(&mut self) -> Result<Option<DocId>> {
        self.doc = DocCursor::Exhausted;
        Ok(None)
    }

    fn advance_to(&mut self, _target: DocId) -> Result<Option<DocId>> {
        self.doc = DocCursor::Exhausted;
        Ok(None)
    }

    fn frequency(&self) -> Result<u32> {
        Ok(0)
    }

    fn next_position(&mut self) -> Result<Position> {
        Err(Error::invalid_operation("next_position on empty postings"))
    }

    fn payload(&self) -> Result<Option<&[u8]>> {
        Ok(None)
    }

    fn cost(&self) -> u64 {
        0
    }
}
