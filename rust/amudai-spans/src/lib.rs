//! Positional span iteration over a single term's postings.
//!
//! This crate provides the leaf of a span-based query evaluator: an iterator
//! that walks the documents containing a term and, within each document, the
//! ordered positions of the term's occurrences. Span composition operators
//! (near, containment, ordered sequences, disjunctions) are built on top of the
//! [`Spans`] contract implemented here by [`TermSpans`].
//!
//! # Overview
//!
//! - [`PostingSource`]: the storage-facing boundary. Supplies documents,
//!   per-document frequencies, positions and payloads for one term.
//! - [`TermSpans`]: the two-level cursor (documents, then positions) exposed to
//!   span consumers.
//! - [`DocCursor`] and [`SpanPosition`]: tagged cursor states replacing raw
//!   integer sentinels, while keeping their ordering.
//!
//! # Quick Start
//!
//! ```rust
//! use amudai_spans::{PostingList, SpanPosition, Spans, Term, TermSpans};
//!
//! let postings = PostingList::builder()
//!     .push_doc(5, &[2, 7, 9])
//!     .build()
//!     .unwrap();
//! let mut spans = TermSpans::new(postings, Term::new("body", "fox"));
//!
//! assert_eq!(spans.next_doc().unwrap().doc(), Some(5));
//! assert_eq!(spans.next_start_position().unwrap(), SpanPosition::At(2));
//! assert_eq!(spans.end_position(), SpanPosition::At(3));
//! ```

mod cursor;
mod posting_list;
mod postings;
mod spans;
mod term;
mod term_spans;

pub use cursor::{DocCursor, DocId, NO_MORE_DOCS, NO_MORE_POSITIONS, Position, Span, SpanPosition};
pub use posting_list::{PostingList, PostingListBuilder};
pub use postings::{EmptyPostings, PostingSource};
pub use spans::{SpanIter, Spans};
pub use term::Term;
pub use term_spans::TermSpans;
