//! Span iteration over the occurrences of a single term.

use std::fmt;

use amudai_common::{Result, error::Error, verify_arg, verify_data};

use crate::{
    cursor::{DocCursor, DocId, NO_MORE_DOCS, NO_MORE_POSITIONS, SpanPosition},
    postings::PostingSource,
    spans::Spans,
    term::Term,
};

/// [`Spans`] over the occurrences of one term, one span per position.
///
/// Each span covers exactly one position slot: `end_position()` is
/// `start_position() + 1`. A term occurring at [`NO_MORE_POSITIONS`] cannot be
/// represented and is reported as inconsistent postings.
///
/// Contract breaches by the caller and inconsistencies reported by the posting
/// source panic in debug builds. In release builds they surface as errors and
/// the cursor is left where it was.
#[derive(Debug)]
pub struct TermSpans<P> {
    postings: P,
    term: Term,
    doc: DocCursor,
    /// Occurrences of the term in `doc`.
    freq: u32,
    /// Positions already returned for `doc`.
    count: u32,
    position: SpanPosition,
    payload_read: bool,
}

impl<P: PostingSource> TermSpans<P> {
    pub fn new(postings: P, term: Term) -> TermSpans<P> {
        log::trace!("term spans for {term}, cost {}", postings.cost());
        TermSpans {
            postings,
            term,
            doc: DocCursor::Unstarted,
            freq: 0,
            count: 0,
            position: SpanPosition::Unpositioned,
            payload_read: false,
        }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn postings(&self) -> &P {
        &self.postings
    }

    pub fn into_postings(self) -> P {
        self.postings
    }

    /// Occurrence count of the term in the current document, or 0 when not
    /// positioned on a document.
    pub fn freq(&self) -> u32 {
        self.freq
    }

    /// Installs the document the posting source moved to.
    fn on_doc(&mut self, doc: Option<DocId>) -> Result<DocCursor> {
        let Some(doc) = doc else {
            log::trace!("{self}: no more documents");
            self.doc = DocCursor::Exhausted;
            self.freq = 0;
            self.count = 0;
            self.position = SpanPosition::Unpositioned;
            self.payload_read = false;
            return Ok(self.doc);
        };

        debug_assert!(
            doc != NO_MORE_DOCS,
            "postings for {} report the reserved doc value",
            self.term
        );
        verify_data!(doc, doc != NO_MORE_DOCS);
        debug_assert!(
            DocCursor::At(doc) > self.doc,
            "postings for {} went back from doc {} to {doc}",
            self.term,
            self.doc
        );
        verify_data!(doc, DocCursor::At(doc) > self.doc);

        let freq = self.postings.frequency()?;
        debug_assert!(freq >= 1, "postings for {} report freq 0 in doc {doc}", self.term);
        verify_data!(freq, freq >= 1);

        self.doc = DocCursor::At(doc);
        self.freq = freq;
        self.count = 0;
        self.position = SpanPosition::Unpositioned;
        self.payload_read = false;
        Ok(self.doc)
    }
}

impl<P: PostingSource> Spans for TermSpans<P> {
    fn doc_id(&self) -> DocCursor {
        self.doc
    }

    fn next_doc(&mut self) -> Result<DocCursor> {
        if self.doc.is_exhausted() {
            return Ok(self.doc);
        }
        let doc = self.postings.next_doc()?;
        self.on_doc(doc)
    }

    fn advance_to(&mut self, target: DocId) -> Result<DocCursor> {
        debug_assert!(
            DocCursor::At(target) > self.doc,
            "advance target {target} must be beyond current doc {}",
            self.doc
        );
        verify_arg!(target, DocCursor::At(target) > self.doc);

        let doc = self.postings.advance_to(target)?;
        if let Some(doc) = doc {
            debug_assert!(doc >= target, "postings advanced to {doc} < target {target}");
            verify_data!(doc, doc >= target);
        }
        self.on_doc(doc)
    }

    fn next_start_position(&mut self) -> Result<SpanPosition> {
        if self.count == self.freq {
            self.position = SpanPosition::Exhausted;
            return Ok(self.position);
        }

        let prev_position = self.position;
        let position = self.postings.next_position()?;
        debug_assert!(
            position != NO_MORE_POSITIONS,
            "postings for {} report the reserved position value",
            self.term
        );
        verify_data!(position, position != NO_MORE_POSITIONS);
        debug_assert!(
            SpanPosition::At(position) >= prev_position,
            "prev_position={prev_position} > position={position}"
        );
        verify_data!(position, SpanPosition::At(position) >= prev_position);

        self.position = SpanPosition::At(position);
        self.count += 1;
        self.payload_read = false;
        Ok(self.position)
    }

    fn start_position(&self) -> SpanPosition {
        self.position
    }

    fn end_position(&self) -> SpanPosition {
        self.position.end()
    }

    fn width(&self) -> u32 {
        0
    }

    fn cost(&self) -> u64 {
        self.postings.cost()
    }

    fn payload(&mut self) -> Result<Option<Vec<u8>>> {
        if self.position.position().is_none() {
            return Err(Error::invalid_operation(format!(
                "payload of {} requested at position {}",
                self.term, self.position
            )));
        }
        // The source may overwrite its buffer on the next call.
        let payload = self.postings.payload()?.map(<[u8]>::to_vec);
        self.payload_read = true;
        Ok(payload)
    }

    fn payload_available(&self) -> Result<bool> {
        if self.payload_read || self.position.position().is_none() {
            return Ok(false);
        }
        Ok(self.postings.payload()?.is_some())
    }
}

impl<P> fmt::Display for TermSpans<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spans({})@", self.term)?;
        match self.doc {
            DocCursor::At(doc) => write!(f, "{doc} - {}", self.position),
            other => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use amudai_common::error::ErrorKind;

    use super::*;
    use crate::{EmptyPostings, PostingList, Span};

    fn term() -> Term {
        Term::new("body", "fox")
    }

    fn spans_over(docs: &[(DocId, &[u32])]) -> TermSpans<PostingList> {
        let mut builder = PostingList::builder();
        for &(doc, positions) in docs {
            builder.push_doc(doc, positions);
        }
        TermSpans::new(builder.build().unwrap(), term())
    }

    #[test]
    fn test_positions_within_document() {
        let mut spans = spans_over(&[(5, &[2, 7, 9])]);
        assert_eq!(spans.doc_id(), DocCursor::Unstarted);
        assert_eq!(spans.next_doc().unwrap(), DocCursor::At(5));
        assert_eq!(spans.freq(), 3);
        assert_eq!(spans.start_position(), SpanPosition::Unpositioned);
        assert_eq!(spans.end_position(), SpanPosition::Unpositioned);

        let mut starts = Vec::new();
        let mut ends = Vec::new();
        loop {
            let start = spans.next_start_position().unwrap();
            starts.push(start);
            ends.push(spans.end_position());
            if start.is_exhausted() {
                break;
            }
        }
        assert_eq!(
            starts,
            [
                SpanPosition::At(2),
                SpanPosition::At(7),
                SpanPosition::At(9),
                SpanPosition::Exhausted
            ]
        );
        assert_eq!(
            ends,
            [
                SpanPosition::At(3),
                SpanPosition::At(8),
                SpanPosition::At(10),
                SpanPosition::Exhausted
            ]
        );

        // Exhausted positions stay exhausted until the next document.
        assert_eq!(spans.next_start_position().unwrap(), SpanPosition::Exhausted);
        assert_eq!(spans.start_position(), SpanPosition::Exhausted);
        assert_eq!(spans.next_doc().unwrap(), DocCursor::Exhausted);
    }

    #[test]
    fn test_document_advance_resets_positions() {
        let mut spans = spans_over(&[(1, &[4, 6]), (3, &[0])]);
        spans.next_doc().unwrap();
        assert_eq!(spans.next_start_position().unwrap(), SpanPosition::At(4));
        assert_eq!(spans.next_doc().unwrap(), DocCursor::At(3));
        assert_eq!(spans.start_position(), SpanPosition::Unpositioned);
        assert!(!spans.payload_available().unwrap());
        assert_eq!(spans.next_start_position().unwrap(), SpanPosition::At(0));
        assert_eq!(spans.next_start_position().unwrap(), SpanPosition::Exhausted);
    }

    #[test]
    fn test_advance_to() {
        let mut spans = spans_over(&[(1, &[1]), (4, &[1]), (9, &[2, 3])]);
        assert_eq!(spans.advance_to(2).unwrap(), DocCursor::At(4));
        assert_eq!(spans.advance_to(9).unwrap(), DocCursor::At(9));
        assert_eq!(spans.freq(), 2);
        assert_eq!(spans.advance_to(10).unwrap(), DocCursor::Exhausted);
        assert_eq!(spans.doc_id(), DocCursor::Exhausted);
        assert_eq!(spans.next_doc().unwrap(), DocCursor::Exhausted);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "advance target"))]
    fn test_advance_to_current_doc_is_rejected() {
        let mut spans = spans_over(&[(4, &[1]), (9, &[2])]);
        spans.next_doc().unwrap();
        let err = spans.advance_to(4).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
        assert_eq!(spans.doc_id(), DocCursor::At(4));
    }

    #[test]
    fn test_positions_before_first_document() {
        let mut spans = spans_over(&[(4, &[1])]);
        assert_eq!(spans.next_start_position().unwrap(), SpanPosition::Exhausted);
        assert_eq!(spans.next_doc().unwrap(), DocCursor::At(4));
        assert_eq!(spans.next_start_position().unwrap(), SpanPosition::At(1));
    }

    #[test]
    fn test_payload() {
        let postings = PostingList::builder()
            .push_doc_with_payloads(2, &[(0, Some(&b"xy"[..])), (3, None)])
            .build()
            .unwrap();
        let mut spans = TermSpans::new(postings, term());
        spans.next_doc().unwrap();
        assert!(!spans.payload_available().unwrap());

        spans.next_start_position().unwrap();
        assert!(spans.payload_available().unwrap());
        assert!(spans.payload_available().unwrap());
        let payload = spans.payload().unwrap();
        assert_eq!(payload.as_deref(), Some(&b"xy"[..]));
        assert!(!spans.payload_available().unwrap());

        spans.next_start_position().unwrap();
        assert!(!spans.payload_available().unwrap());
        assert_eq!(spans.payload().unwrap(), None);
        // The copy outlives the source's buffer reuse.
        assert_eq!(payload.as_deref(), Some(&b"xy"[..]));
    }

    #[test]
    fn test_payload_without_position() {
        let mut spans = spans_over(&[(2, &[1])]);
        spans.next_doc().unwrap();
        let err = spans.payload().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidOperation { .. }));
    }

    #[test]
    fn test_cost_and_width() {
        let postings = PostingList::builder()
            .push_doc(1, &[1])
            .set_cost(17)
            .build()
            .unwrap();
        let spans = TermSpans::new(postings, term());
        assert_eq!(spans.cost(), 17);
        assert_eq!(spans.width(), 0);
        assert_eq!(TermSpans::new(EmptyPostings::new(), term()).cost(), 0);
    }

    #[test]
    fn test_display() {
        let mut spans = spans_over(&[(5, &[2])]);
        assert_eq!(spans.to_string(), "spans(body:fox)@START");
        spans.next_doc().unwrap();
        assert_eq!(spans.to_string(), "spans(body:fox)@5 - -1");
        spans.next_start_position().unwrap();
        assert_eq!(spans.to_string(), "spans(body:fox)@5 - 2");
        spans.next_start_position().unwrap();
        assert_eq!(spans.to_string(), "spans(body:fox)@5 - ENDPOS");
        spans.next_doc().unwrap();
        assert_eq!(spans.to_string(), "spans(body:fox)@ENDDOC");
    }

    #[test]
    fn test_span_iter() {
        let spans = spans_over(&[(1, &[0, 3]), (7, &[5])]);
        let all = spans
            .into_span_iter()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            all,
            [
                Span { doc: 1, start: 0, end: 1 },
                Span { doc: 1, start: 3, end: 4 },
                Span { doc: 7, start: 5, end: 6 },
            ]
        );
    }

    #[test]
    fn test_borrowed_postings() {
        let mut postings = PostingList::builder().push_doc(3, &[8]).build().unwrap();
        {
            let mut spans = TermSpans::new(&mut postings, term());
            assert_eq!(spans.next_doc().unwrap(), DocCursor::At(3));
        }
        assert_eq!(postings.doc(), DocCursor::At(3));
    }
}
