//! Output Buffer
//!
//! Column- and margin-aware text sink used by the printer. Besides plain
//! appends it provides the primitives the layout rules are built from:
//! padding to a column, blank-line normalization at declaration
//! boundaries, and a speculative "hard" right margin whose violation is
//! reported as [`Overflow`] so a wrap decision can roll back and retry.
//!
//! # Trim observers
//!
//! Other components keep offsets into the buffer (reindent regions). They
//! register as [`TrimObserver`]s and are told whenever the buffer shrinks.
//! The buffer, and with it every registration, lives for one print call.


use std::cell::RefCell;
use std::rc::Rc;

use smallvec::{smallvec, SmallVec};

use crate::width::char_display_width;

/// Sentinel for "no hard right margin".
pub const UNLIMITED: usize = usize::MAX;

/// The hard right margin was crossed during a speculative render.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("output crossed the speculative right margin")]
pub struct Overflow;

/// Result of an append.
pub type Emit = Result<(), Overflow>;

/// Notified when the buffer is truncated.
pub trait TrimObserver {
    /// The buffer was cut to `limit` bytes.
    fn trimmed(&mut self, limit: usize);
}

/// Handle of a registered [`TrimObserver`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ObserverId(usize);

/// Saved buffer state for [`OutputBuffer::rollback`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Mark {
    len: usize,
    column: usize,
    max_column: usize,
    left_margin: usize,
    last_blank_lines: usize,
}

/// Growable text with cursor state.
pub struct OutputBuffer {
    text: String,
    column: usize,
    max_column: usize,
    left_margin: usize,
    right_margin: usize,
    hard_right_margin: usize,
    last_blank_lines: usize,
    tab_size: usize,
    expand_tabs: bool,
    observers: Vec<(ObserverId, Rc<RefCell<dyn TrimObserver>>)>,
    next_observer: usize,
}

impl OutputBuffer {
    /// Create an empty buffer.
    pub fn new(right_margin: usize, tab_size: usize, expand_tabs: bool) -> Self {
        OutputBuffer {
            text: String::new(),
            column: 0,
            max_column: 0,
            left_margin: 0,
            right_margin,
            hard_right_margin: UNLIMITED,
            last_blank_lines: 0,
            tab_size: tab_size.max(1),
            expand_tabs,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Widest line emitted so far.
    #[inline]
    pub fn max_column(&self) -> usize {
        self.max_column.max(self.column)
    }

    #[inline]
    pub fn left_margin(&self) -> usize {
        self.left_margin
    }

    #[inline]
    pub fn set_left_margin(&mut self, margin: usize) {
        self.left_margin = margin;
    }

    /// Move the left margin right by `size`, returning the previous margin.
    pub fn indent(&mut self, size: usize) -> usize {
        let old = self.left_margin;
        self.left_margin += size;
        old
    }

    #[inline]
    pub fn right_margin(&self) -> usize {
        self.right_margin
    }

    #[inline]
    pub fn hard_right_margin(&self) -> usize {
        self.hard_right_margin
    }

    #[inline]
    pub fn last_blank_lines(&self) -> usize {
        self.last_blank_lines
    }

    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    // Observers

    pub fn register_observer(&mut self, observer: Rc<RefCell<dyn TrimObserver>>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn unregister_observer(&mut self, id: ObserverId) {
        self.observers.retain(|(other, _)| *other != id);
    }

    fn notify_trimmed(&self, limit: usize) {
        for (_, observer) in &self.observers {
            observer.borrow_mut().trimmed(limit);
        }
    }

    // Appending

    fn check_margin(&self) -> Emit {
        if self.hard_right_margin != UNLIMITED && self.column > self.hard_right_margin {
            Err(Overflow)
        } else {
            Ok(())
        }
    }

    fn advance(&mut self, c: char) {
        match c {
            '\n' => {
                self.max_column = self.max_column.max(self.column);
                self.column = 0;
            }
            '\t' => self.column = (self.column / self.tab_size + 1) * self.tab_size,
            '\r' => {}
            ' ' => self.column += 1,
            _ => {
                self.column += char_display_width(c);
                if !c.is_whitespace() {
                    self.last_blank_lines = 0;
                }
            }
        }
    }

    pub fn append_char(&mut self, c: char) -> Emit {
        self.text.push(c);
        self.advance(c);
        self.check_margin()
    }

    /// Append text, which may span lines.
    pub fn append(&mut self, s: &str) -> Emit {
        self.text.push_str(s);
        let mut result = Ok(());
        for c in s.chars() {
            self.advance(c);
            if result.is_ok() {
                result = self.check_margin();
            }
        }
        result
    }

    /// Append a space unless the buffer ends in whitespace (or is empty).
    pub fn need_space(&mut self) -> Emit {
        match self.last_char() {
            Some(c) if !c.is_whitespace() => self.append_char(' '),
            _ => Ok(()),
        }
    }

    /// End the current line, stripping its trailing blanks when `trim` is set.
    pub fn newline(&mut self, trim: bool) {
        if trim {
            let kept = self.text.trim_end_matches(&[' ', '\t'][..]).len();
            if kept < self.text.len() {
                self.trim(kept);
            }
        }
        self.text.push('\n');
        self.advance('\n');
    }

    /// Pad to column `n`. When already past it, a line of blanks is cut
    /// back to its start; any other line is ended first.
    pub fn to_column(&mut self, n: usize) -> Emit {
        if self.column > n {
            if self.is_whitespace_line() {
                let start = self.line_start();
                self.trim(start);
            } else {
                self.newline(true);
            }
        }
        if !self.expand_tabs {
            loop {
                let next_stop = (self.column / self.tab_size + 1) * self.tab_size;
                if next_stop > n {
                    break;
                }
                self.text.push('\t');
                self.column = next_stop;
            }
        }
        while self.column < n {
            self.text.push(' ');
            self.column += 1;
        }
        self.check_margin()
    }

    pub fn to_left_margin(&mut self) -> Emit {
        self.to_column(self.left_margin)
    }

    /// Move to column 0 of a line: drop the current line's indentation if
    /// it holds nothing else, otherwise start a new line.
    pub fn to_line_start(&mut self) {
        if self.column == 0 {
            return;
        }
        if self.is_whitespace_line() {
            let start = self.line_start();
            self.trim(start);
        } else {
            self.newline(true);
        }
    }

    fn line_start(&self) -> usize {
        self.text.rfind('\n').map_or(0, |i| i + 1)
    }

    /// The current line holds only blanks.
    pub fn is_whitespace_line(&self) -> bool {
        self.text[self.line_start()..]
            .chars()
            .all(|c| c == ' ' || c == '\t')
    }

    // Speculative margin

    /// Set the hard margin to the right margin; returns the previous one.
    pub fn harden(&mut self) -> usize {
        let prev = self.hard_right_margin;
        self.hard_right_margin = self.right_margin;
        prev
    }

    pub fn restore(&mut self, prev: usize) {
        self.hard_right_margin = prev;
    }

    pub fn mark(&self) -> Mark {
        Mark {
            len: self.text.len(),
            column: self.column,
            max_column: self.max_column,
            left_margin: self.left_margin,
            last_blank_lines: self.last_blank_lines,
        }
    }

    /// Return to a previously taken [`Mark`].
    pub fn rollback(&mut self, mark: Mark) {
        if mark.len < self.text.len() {
            self.text.truncate(mark.len);
            self.notify_trimmed(mark.len);
        }
        self.column = mark.column;
        self.max_column = mark.max_column;
        self.left_margin = mark.left_margin;
        self.last_blank_lines = mark.last_blank_lines;
    }

    // Shrinking

    /// Cut the buffer to `len` bytes and notify observers.
    pub fn trim(&mut self, len: usize) {
        let mut len = len.min(self.text.len());
        while !self.text.is_char_boundary(len) {
            len -= 1;
        }
        if len == self.text.len() {
            return;
        }
        self.text.truncate(len);
        self.recompute_column();
        self.notify_trimmed(len);
    }

    /// Remove the last `count` characters.
    pub fn eat_trailing_chars(&mut self, count: usize) {
        let cut = self
            .text
            .char_indices()
            .rev()
            .nth(count.saturating_sub(1))
            .map_or(0, |(i, _)| i);
        if count > 0 {
            self.trim(cut);
        }
    }

    fn recompute_column(&mut self) {
        let start = self.line_start();
        let mut column = 0;
        for c in self.text[start..].chars() {
            column = match c {
                '\t' => (column / self.tab_size + 1) * self.tab_size,
                '\r' => column,
                _ => column + char_display_width(c),
            };
        }
        self.column = column;
    }

    /// Normalize the whitespace at the end of the buffer to exactly
    /// `max(n, last_blank_lines)` blank lines.
    ///
    /// Repeated calls at one boundary never lower the count: `blank_lines(2)`
    /// followed by `blank_lines(1)` leaves two blank lines.
    pub fn blank_lines(&mut self, n: usize) {
        let want = self.last_blank_lines.max(n);
        let slots = want + 1;

        // Newline offsets, last one first. Only the earliest `slots` are kept.
        let mut ring: SmallVec<[usize; 4]> = smallvec![0; slots];
        let bytes = self.text.as_bytes();
        let mut pos = bytes.len();
        let mut found = 0usize;
        while pos > 0 && matches!(bytes[pos - 1], b' ' | b'\t' | b'\n' | b'\r') {
            pos -= 1;
            if bytes[pos] == b'\n' {
                ring[found % slots] = pos;
                found += 1;
            }
        }

        // Before any content blank lines are bare newlines; after content
        // one more newline terminates the content line.
        let needed = if pos == 0 { want } else { slots };

        if needed == 0 {
            self.trim(pos);
        } else if found >= needed {
            let cut = ring[(found - needed) % slots];
            self.trim(cut);
            self.newline(false);
        } else {
            let keep = if found > 0 { ring[0] + 1 } else { pos };
            self.trim(keep);
            for _ in found..needed {
                self.newline(false);
            }
        }
        self.last_blank_lines = want;
    }
}
