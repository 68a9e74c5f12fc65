//! Reindent regions.
//!
//! Verbatim copies that span lines keep the original indentation of their
//! continuation lines. When the copy lands at a different left margin, a
//! follow-up pass re-indents those lines; this set tells it where they are.

use std::ops::Range;

use crate::buffer::TrimObserver;

/// Sorted, non-overlapping byte ranges of the output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReindentRegions {
    regions: Vec<Range<usize>>,
}

impl ReindentRegions {
    pub fn new() -> Self {
        ReindentRegions::default()
    }

    /// Record a region. Empty ranges are ignored; overlapping or touching
    /// regions are merged.
    pub fn add(&mut self, region: Range<usize>) {
        if region.start >= region.end {
            return;
        }
        let at = self.regions.partition_point(|r| r.end < region.start);
        let mut merged = region;
        while let Some(next) = self.regions.get(at) {
            if next.start > merged.end {
                break;
            }
            merged.start = merged.start.min(next.start);
            merged.end = merged.end.max(next.end);
            self.regions.remove(at);
        }
        self.regions.insert(at, merged);
    }

    pub fn as_slice(&self) -> &[Range<usize>] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Shift every region by `offset` (the output's position in the file).
    pub fn into_shifted(self, offset: usize) -> Vec<Range<usize>> {
        self.regions
            .into_iter()
            .map(|r| r.start + offset..r.end + offset)
            .collect()
    }
}

impl TrimObserver for ReindentRegions {
    fn trimmed(&mut self, limit: usize) {
        self.regions.retain(|r| r.start < limit);
        if let Some(last) = self.regions.last_mut() {
            last.end = last.end.min(limit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stay_sorted_and_merged() {
        let mut regions = ReindentRegions::new();
        regions.add(10..20);
        regions.add(0..5);
        regions.add(18..25);
        regions.add(30..30);
        assert_eq!(regions.as_slice(), &[0..5, 10..25]);
    }

    #[test]
    fn trim_drops_and_clips() {
        let mut regions = ReindentRegions::new();
        regions.add(0..5);
        regions.add(10..20);
        regions.add(30..40);
        regions.trimmed(15);
        assert_eq!(regions.as_slice(), &[0..5, 10..15]);
        regions.trimmed(10);
        assert_eq!(regions.as_slice(), &[0..5]);
    }

    #[test]
    fn shifted_by_initial_offset() {
        let mut regions = ReindentRegions::new();
        regions.add(2..4);
        assert_eq!(regions.into_shifted(100), vec![102..104]);
    }
}
