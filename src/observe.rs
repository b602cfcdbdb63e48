use std::time::Duration;

use crate::types::Line;

/// Timing of one `input_char` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharTiming {
    pub ch: char,
    pub elapsed: Duration,
    /// Index of the active line after the character was processed.
    pub line_index: usize,
}

/// Optional per-character hook, used to catch accidental whole-document rescans.
pub trait InputObserver: Send {
    fn on_char(&mut self, timing: CharTiming);
}

pub struct FnObserver<F>(pub F);

impl<F> InputObserver for FnObserver<F>
where
    F: FnMut(CharTiming) + Send,
{
    fn on_char(&mut self, timing: CharTiming) {
        (self.0)(timing)
    }
}

/// Receives changed lines from `LineClassifier::show_content`.
pub trait LineSink {
    /// Show `line` at position `index`. Indices arrive in increasing order and never skip past
    /// the end of what the sink already holds.
    fn show_line(&mut self, index: usize, line: &Line);

    /// The line sequence shrank to `len` entries.
    fn truncate(&mut self, len: usize) {
        let _ = len;
    }
}

pub struct FnLineSink<F>(pub F);

impl<F> LineSink for FnLineSink<F>
where
    F: FnMut(usize, &Line),
{
    fn show_line(&mut self, index: usize, line: &Line) {
        (self.0)(index, line)
    }
}

/// A `Vec<Line>` sink mirrors the classifier's line sequence.
impl LineSink for Vec<Line> {
    fn show_line(&mut self, index: usize, line: &Line) {
        match self.get_mut(index) {
            Some(slot) => slot.clone_from(line),
            None => {
                debug_assert_eq!(index, self.len());
                self.push(line.clone());
            }
        }
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }
}
