//! Verbatim copies from the original text.

use std::ops::Range;

use javelin_ir::NodeId;

use super::Printer;
use crate::buffer::Overflow;

impl Printer<'_> {
    /// Copy `run` from the original text if it is eligible.
    ///
    /// Returns `Ok(false)` when the run has to be generated instead, either
    /// because it changed or because its source range is inconsistent.
    /// Tags inside the run get spans at their position in the copy.
    pub(super) fn try_print_original(
        &mut self,
        run: &[NodeId],
        include_comments: bool,
    ) -> Result<bool, Overflow> {
        if !self.original.is_copy_eligible(run) {
            return Ok(false);
        }
        let range = match self.original.copy_range(run, include_comments) {
            Ok(range) => range,
            Err(err) => {
                tracing::warn!(
                    %err,
                    context = self.original.context(err.from),
                    "regenerating instead of copying"
                );
                return Ok(false);
            }
        };
        if self.out.is_whitespace_line() {
            self.to_left_margin()?;
        }

        let tree = self.tree;
        let new_start = self.out.len() + self.initial_offset;
        for &id in run {
            for node in tree.descendants(id) {
                if include_comments {
                    self.handled.mark_all(node);
                }
                if let (Some(&tag), Some(span)) = (self.tags.get(&node), tree.span(node)) {
                    let start = span.start_usize().saturating_sub(range.start) + new_start;
                    let end = span.end_usize().saturating_sub(range.start) + new_start;
                    self.spans.insert(tag, start..end);
                }
            }
        }
        tracing::trace!(nodes = run.len(), bytes = range.len(), "copying original text");
        self.copy_to_indented(range)?;
        Ok(true)
    }

    /// Append original text. Lines after the first keep their source
    /// indentation and are registered for reindenting; when the copy starts
    /// on a fresh line the first line is registered too.
    fn copy_to_indented(&mut self, range: Range<usize>) -> Result<(), Overflow> {
        let source = self.original.text;
        let text = &source[range];
        let first_line_end = text.find('\n').map_or(0, |i| i + 1);
        let fresh_line = self.out.is_whitespace_line();
        let start = self.out.len();
        let result = self.out.append(text);
        if first_line_end > 0 || fresh_line {
            let from = if fresh_line { start } else { start + first_line_end };
            let end = self.out.len();
            self.regions.borrow_mut().add(from..end);
        }
        result
    }
}
