//! Recall buffer for previously entered lines.
//!
//! This is unrelated to the tree's undo history: it only remembers what the
//! user typed so the arrow keys can bring it back.

use std::collections::VecDeque;

/// Result of stepping forward through the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall<'a> {
    Entry(&'a str),
    /// Stepped past the newest entry; the caller should restore the line being typed.
    Fresh,
}

/// A bounded list of past lines with a recall cursor.
///
/// The cursor starts past the newest entry. [`prev`](Self::prev) walks back
/// and stops at the oldest entry; [`next`](Self::next) walks forward and
/// reports [`Recall::Fresh`] once it passes the newest.
///
/// # Example
///
/// ```
/// use dtree::terminal::history::{InputHistory, Recall};
///
/// let mut history = InputHistory::new(10);
/// history.add("list");
/// history.add("preview");
///
/// assert_eq!(history.prev(), Some("preview"));
/// assert_eq!(history.prev(), Some("list"));
/// assert_eq!(history.next(), Some(Recall::Entry("preview")));
/// assert_eq!(history.next(), Some(Recall::Fresh));
/// ```
#[derive(Debug, Clone)]
pub struct InputHistory {
    entries: VecDeque<String>,
    capacity: usize,
    cursor: usize,
}

impl InputHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            cursor: 0,
        }
    }

    /// Records a line, skipping empty lines and repeats of the newest entry.
    ///
    /// Evicts the oldest entries beyond capacity and resets the cursor.
    pub fn add(&mut self, line: &str) {
        if line.is_empty() || self.entries.back().is_some_and(|last| last == line) {
            return;
        }
        self.entries.push_back(line.to_string());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.reset();
    }

    /// Steps back one entry, staying on the oldest once reached.
    pub fn prev(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Steps forward one entry.
    pub fn next(&mut self) -> Option<Recall<'_>> {
        if self.entries.is_empty() {
            return None;
        }
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
        Some(match self.entries.get(self.cursor) {
            Some(entry) => Recall::Entry(entry),
            None => Recall::Fresh,
        })
    }

    /// Moves the cursor past the newest entry.
    pub fn reset(&mut self) {
        self.cursor = self.entries.len();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
