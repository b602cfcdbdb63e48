use crate::types::IndentEntry;

/// Nesting context for list items, quotes and code blocks.
///
/// The base entry `(0, 0, None)` is never popped and `content_start` strictly increases from
/// the bottom of the stack to the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentStack {
    entries: Vec<IndentEntry>,
}

impl Default for IndentStack {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentStack {
    pub fn new() -> Self {
        Self {
            entries: vec![IndentEntry::BASE],
        }
    }

    pub fn entries(&self) -> &[IndentEntry] {
        &self.entries
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn top(&self) -> &IndentEntry {
        &self.entries[self.entries.len() - 1]
    }

    /// Content column of the deepest entry that `column` still reaches.
    pub(crate) fn content_start_for(&self, column: usize) -> usize {
        self.entries
            .iter()
            .rev()
            .find(|e| e.content_start <= column)
            .map_or(0, |e| e.content_start)
    }

    /// Level a line starting at `column` would get, without touching the stack.
    pub(crate) fn level_for(&self, column: usize) -> usize {
        self.entries
            .iter()
            .rposition(|e| e.content_start <= column)
            .unwrap_or(0)
    }

    /// Pops every entry whose content starts right of `column` and returns the resulting level.
    pub(crate) fn pop_to(&mut self, column: usize) -> usize {
        while self.entries.len() > 1 && self.top().content_start > column {
            let popped = self.entries.pop();
            log::debug!("indent stack pop {popped:?} for column {column}");
        }
        self.entries.len() - 1
    }

    /// Registers a list item whose marker sits at `indent` and returns its level and ordered
    /// index.
    pub(crate) fn open_list_item(
        &mut self,
        indent: usize,
        content_start: usize,
        ordered: Option<u64>,
    ) -> (usize, Option<u64>) {
        while self.entries.len() > 1 && self.top().indent > indent {
            self.entries.pop();
        }

        let len = self.entries.len();
        let top = *self.top();
        let nests = len == 1
            || indent
                .checked_sub(top.content_start)
                .is_some_and(|delta| delta <= 2);
        if nests {
            self.entries.push(IndentEntry {
                indent,
                content_start,
                ordered_index: ordered,
            });
            return (len - 1, ordered);
        }

        // Same level as the top entry: an exact sibling, or an item indented too loosely to
        // count as a child.
        let entry = &mut self.entries[len - 1];
        entry.ordered_index = match (entry.ordered_index, ordered) {
            (Some(n), Some(_)) => Some(n.saturating_add(1)),
            (_, seed) => seed,
        };
        if entry.indent == indent {
            entry.content_start = content_start;
        }
        (len - 2, entry.ordered_index)
    }
}
