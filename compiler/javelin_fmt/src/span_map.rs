//! Emitted text ranges by tag.

use std::ops::Range;

use javelin_ir::Tag;
use rustc_hash::FxHashMap;

/// Where each tagged node ended up in the output.
///
/// Offsets include the print call's initial offset. A tag printed twice (a
/// speculative render that was retried) keeps its last range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanMap {
    spans: FxHashMap<Tag, Range<usize>>,
}

impl SpanMap {
    pub fn new() -> Self {
        SpanMap::default()
    }

    pub fn insert(&mut self, tag: Tag, range: Range<usize>) {
        self.spans.insert(tag, range);
    }

    pub fn get(&self, tag: Tag) -> Option<Range<usize>> {
        self.spans.get(&tag).cloned()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, Range<usize>)> + '_ {
        self.spans.iter().map(|(tag, range)| (*tag, range.clone()))
    }
}
