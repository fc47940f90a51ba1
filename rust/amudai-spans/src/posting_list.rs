//! In-memory postings of a single term.

use amudai_common::{Result, error::Error, verify_arg};

use crate::{
    NO_MORE_DOCS, NO_MORE_POSITIONS,
    cursor::{DocCursor, DocId, Position},
    postings::PostingSource,
};

/// Occurrences of the term within one document.
#[derive(Debug, Clone)]
struct DocPostings {
    doc: DocId,
    positions: Vec<Position>,
    /// Parallel to `positions`.
    payloads: Vec<Option<Box<[u8]>>>,
}

/// A [`PostingSource`] over postings held in memory.
///
/// Payload bytes are served from a single scratch buffer that is refilled on
/// every [`next_position`](PostingSource::next_position) call, the way a block
/// decoder reuses its output buffer. A slice obtained from
/// [`payload`](PostingSource::payload) is therefore only meaningful until the
/// next position advance.
#[derive(Debug, Clone)]
pub struct PostingList {
    docs: Vec<DocPostings>,
    cost: u64,
    doc: DocCursor,
    /// Index into `docs` of the current document.
    doc_idx: Option<usize>,
    /// Number of positions already returned for the current document.
    pos_idx: usize,
    payload_buf: Vec<u8>,
    has_payload: bool,
}

impl PostingList {
    pub fn builder() -> PostingListBuilder {
        PostingListBuilder::new()
    }

    /// Number of documents containing the term.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Total number of occurrences across all documents.
    pub fn total_freq(&self) -> u64 {
        self.docs.iter().map(|d| d.positions.len() as u64).sum()
    }

    fn current(&self) -> Result<&DocPostings> {
        self.doc_idx
            .and_then(|idx| self.docs.get(idx))
            .ok_or_else(|| Error::invalid_operation("posting list is not positioned on a document"))
    }

    fn move_to(&mut self, idx: usize) -> Option<DocId> {
        self.pos_idx = 0;
        self.payload_buf.clear();
        self.has_payload = false;
        match self.docs.get(idx) {
            Some(entry) => {
                self.doc_idx = Some(idx);
                self.doc = DocCursor::At(entry.doc);
                Some(entry.doc)
            }
            None => {
                self.doc_idx = None;
                self.doc = DocCursor::Exhausted;
                None
            }
        }
    }

    fn next_idx(&self) -> usize {
        match self.doc {
            DocCursor::Unstarted => 0,
            DocCursor::At(_) => self.doc_idx.map_or(0, |idx| idx + 1),
            DocCursor::Exhausted => self.docs.len(),
        }
    }
}

impl PostingSource for PostingList {
    fn doc(&self) -> DocCursor {
        self.doc
    }

    fn next_doc(&mut self) -> Result<Option<DocId>> {
        let idx = self.next_idx();
        Ok(self.move_to(idx))
    }

    fn advance_to(&mut self, target: DocId) -> Result<Option<DocId>> {
        let start = self.next_idx().min(self.docs.len());
        let offset = self.docs[start..].partition_point(|entry| entry.doc < target);
        Ok(self.move_to(start + offset))
    }

    fn frequency(&self) -> Result<u32> {
        Ok(self.current()?.positions.len() as u32)
    }

    fn next_position(&mut self) -> Result<Position> {
        let Self {
            docs,
            doc_idx,
            pos_idx,
            payload_buf,
            has_payload,
            ..
        } = self;
        let entry = doc_idx
            .and_then(|idx| docs.get(idx))
            .ok_or_else(|| Error::invalid_operation("posting list is not positioned on a document"))?;
        let Some(&position) = entry.positions.get(*pos_idx) else {
            return Err(Error::invalid_operation(format!(
                "next_position called more than frequency ({}) times",
                entry.positions.len()
            )));
        };

        payload_buf.clear();
        *has_payload = match &entry.payloads[*pos_idx] {
            Some(bytes) => {
                payload_buf.extend_from_slice(bytes);
                true
            }
            None => false,
        };
        *pos_idx += 1;
        Ok(position)
    }

    fn payload(&self) -> Result<Option<&[u8]>> {
        Ok(self.has_payload.then_some(self.payload_buf.as_slice()))
    }

    fn cost(&self) -> u64 {
        self.cost
    }
}

/// Accumulates per-document occurrences and validates them into a
/// [`PostingList`].
#[derive(Debug, Default)]
pub struct PostingListBuilder {
    docs: Vec<DocPostings>,
    cost: Option<u64>,
}

impl PostingListBuilder {
    pub fn new() -> PostingListBuilder {
        PostingListBuilder::default()
    }

    /// Adds a document with payload-less occurrences at `positions`.
    pub fn push_doc(&mut self, doc: DocId, positions: &[Position]) -> &mut Self {
        self.docs.push(DocPostings {
            doc,
            positions: positions.to_vec(),
            payloads: vec![None; positions.len()],
        });
        self
    }

    /// Adds a document whose occurrences may carry payloads.
    pub fn push_doc_with_payloads(
        &mut self,
        doc: DocId,
        occurrences: &[(Position, Option<&[u8]>)],
    ) -> &mut Self {
        self.docs.push(DocPostings {
            doc,
            positions: occurrences.iter().map(|&(pos, _)| pos).collect(),
            payloads: occurrences
                .iter()
                .map(|&(_, payload)| payload.map(Box::from))
                .collect(),
        });
        self
    }

    /// Overrides the cost estimate, which defaults to the document count.
    pub fn set_cost(&mut self, cost: u64) -> &mut Self {
        self.cost = Some(cost);
        self
    }

    pub fn build(&mut self) -> Result<PostingList> {
        let docs = std::mem::take(&mut self.docs);
        let mut prev_doc: Option<DocId> = None;
        for entry in &docs {
            let doc = entry.doc;
            verify_arg!(doc, doc != NO_MORE_DOCS);
            verify_arg!(doc, prev_doc.is_none_or(|prev| doc > prev));
            let positions = &entry.positions;
            verify_arg!(positions, !positions.is_empty());
            verify_arg!(positions, positions.windows(2).all(|w| w[0] <= w[1]));
            verify_arg!(positions, !positions.contains(&NO_MORE_POSITIONS));
            prev_doc = Some(doc);
        }

        let cost = self.cost.take().unwrap_or(docs.len() as u64);
        Ok(PostingList {
            docs,
            cost,
            doc: DocCursor::Unstarted,
            doc_idx: None,
            pos_idx: 0,
            payload_buf: Vec::new(),
            has_payload: false,
        })
    }
}
