use std::time::Instant;

use crate::indent::IndentStack;
use crate::invariants::{self, InvariantViolation};
use crate::normalize::{Normalizer, Shape};
use crate::observe::{CharTiming, InputObserver, LineSink};
use crate::options::{Options, OptionsError};
use crate::syntax::{BreakScan, FenceScan};
use crate::types::{Line, LineKind};

mod classify;
mod content;
mod decide;

use decide::Decision;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CodeState {
    fenced: bool,
    /// Fenced blocks open once their fence line is complete; indented blocks open immediately.
    opened: bool,
    /// Length of the opening backtick run; a closing fence needs at least as many.
    fence_len: usize,
    /// Content buffer length at which the closing fence starts.
    close_at: Option<usize>,
}

/// Cached scan state for the active line. Reset whenever a new line starts.
#[derive(Debug, Clone, Default)]
struct ActiveLine {
    content_has_text: bool,
    /// Offset, counted over content and trailing buffers together, of the lead line's start.
    lead_start: Option<usize>,
    /// Leading spaces of the lead line.
    indent_column: usize,
    /// Leading spaces of the trailing physical line, once it carries text.
    trailing_lead: Option<usize>,
    line_breaks: BreakScan,
    trailing_breaks: BreakScan,
    /// Fence state of the lead line.
    line_fence: FenceScan,
    trailing_fence: FenceScan,
    code: Option<CodeState>,
    /// Newline-terminated thematic break, or code block past its closing fence.
    closed: bool,
    normalizer: Normalizer,
    full_update: bool,
}

impl ActiveLine {
    fn in_code(&self) -> bool {
        !self.closed && self.code.is_some_and(|c| c.opened)
    }

    fn fenced(&self) -> bool {
        self.code.is_some_and(|c| c.fenced)
    }

    /// The trailing physical line after its leading spaces.
    fn rest<'a>(&self, trailing: &'a str) -> Option<&'a str> {
        self.trailing_lead.map(|n| &trailing[n..])
    }

    fn shape(&self, line: &Line) -> Shape {
        Shape {
            kind: line.kind,
            block_indent: line.block_indent,
            fenced: self.fenced(),
        }
    }
}

/// Incremental single-character Markdown line classifier.
///
/// Characters go in one at a time through [`LineClassifier::input_char`]; the classifier keeps
/// an ordered sequence of logical [`Line`]s whose last entry is the active line. Only the active
/// line is touched on the common path, so each character costs amortized O(1).
pub struct LineClassifier {
    opts: Options,
    lines: Vec<Line>,
    active: ActiveLine,
    indents: IndentStack,
    dirty_from: Option<usize>,
    shown_len: usize,
    observer: Option<Box<dyn InputObserver>>,
}

impl std::fmt::Debug for LineClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineClassifier")
            .field("opts", &self.opts)
            .field("lines_len", &self.lines.len())
            .field("active_kind", &self.active_line().kind)
            .field("indent_depth", &self.indents.depth())
            .field("in_code", &self.active.in_code())
            .field("closed", &self.active.closed)
            .field("dirty_from", &self.dirty_from)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::with_valid_options(Options::default())
    }
}

impl LineClassifier {
    pub fn new(opts: Options) -> Result<Self, OptionsError> {
        opts.validate()?;
        Ok(Self::with_valid_options(opts))
    }

    fn with_valid_options(opts: Options) -> Self {
        Self {
            opts,
            lines: vec![Line::new()],
            active: ActiveLine::default(),
            indents: IndentStack::new(),
            dirty_from: Some(0),
            shown_len: 0,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: impl InputObserver + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    pub fn set_observer(&mut self, observer: impl InputObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// All lines so far; the last one is the active line.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn active_line(&self) -> &Line {
        &self.lines[self.lines.len() - 1]
    }

    pub fn indent_stack(&self) -> &IndentStack {
        &self.indents
    }

    /// Drops every line and returns to the freshly constructed state.
    ///
    /// Options and the observer are kept. A sink fed through [`LineClassifier::show_content`]
    /// is truncated on the next call.
    pub fn reset(&mut self) {
        log::debug!("classifier reset after {} lines", self.lines.len());
        self.lines = vec![Line::new()];
        self.active = ActiveLine::default();
        self.indents = IndentStack::new();
        self.dirty_from = Some(0);
    }

    pub fn input_str(&mut self, s: &str) {
        for c in s.chars() {
            self.input_char(c);
        }
    }

    pub fn input_char(&mut self, c: char) {
        let started = self.observer.as_ref().map(|_| Instant::now());

        match c {
            '\r' => {}
            '\t' => {
                let trailing = &self.active_line().trailing_buffer;
                let run = trailing.len() - trailing.trim_end_matches(' ').len();
                let width = self.opts.tab_width;
                for _ in 0..width - run % width {
                    self.step(' ');
                }
            }
            _ => self.step(c),
        }

        if let (Some(started), Some(observer)) = (started, self.observer.as_mut()) {
            observer.on_char(CharTiming {
                ch: c,
                elapsed: started.elapsed(),
                line_index: self.lines.len() - 1,
            });
        }
    }

    /// Hands every line changed since the previous call to `sink`, in order.
    pub fn show_content<S: LineSink + ?Sized>(&mut self, sink: &mut S) {
        if self.lines.len() < self.shown_len {
            sink.truncate(self.lines.len());
        }
        if let Some(from) = self.dirty_from.take() {
            for (index, line) in self.lines.iter().enumerate().skip(from) {
                sink.show_line(index, line);
            }
        }
        self.shown_len = self.lines.len();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        invariants::check(&self.lines, &self.indents)
    }

    fn step(&mut self, c: char) {
        self.push_trailing(c);

        match self.decide() {
            Decision::NotNewLine => {}
            Decision::MergeToContent => {
                if self.closes_fence() {
                    self.close_code_block();
                }
                self.merge_trailing();
            }
            Decision::MoveToNewLine => self.start_new_line(),
            Decision::FinalizeAndReset => {
                self.start_new_line();
                if self.decide() == Decision::MergeToContent {
                    self.merge_trailing();
                }
            }
        }

        if self.active_line().trailing_buffer.ends_with('\n') {
            self.merge_trailing();
        }

        self.update_active_line_kind();
        self.update_active_line_content(c);
        self.mark_dirty(self.lines.len() - 1);
    }

    fn active_mut(&mut self) -> &mut Line {
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    fn mark_dirty(&mut self, index: usize) {
        self.dirty_from = Some(self.dirty_from.map_or(index, |from| from.min(index)));
    }

    fn push_trailing(&mut self, c: char) {
        let last = self.lines.len() - 1;
        let line = &mut self.lines[last];
        let active = &mut self.active;

        line.trailing_buffer.push(c);
        active.line_breaks.push(c);
        active.trailing_breaks.push(c);
        active.line_fence.push(c);
        active.trailing_fence.push(c);

        if c != ' ' && c != '\n' && active.trailing_lead.is_none() {
            // Everything before the first text character of a physical line is a space.
            let lead = line.trailing_buffer.len() - c.len_utf8();
            active.trailing_lead = Some(lead);
            if active.lead_start.is_none() {
                active.lead_start = Some(line.content_buffer.len());
                active.indent_column = lead;
            }
        }
    }

    fn merge_trailing(&mut self) {
        let last = self.lines.len() - 1;
        let line = &mut self.lines[last];
        let trailing = std::mem::take(&mut line.trailing_buffer);
        line.content_buffer.push_str(&trailing);

        let active = &mut self.active;
        if active.trailing_lead.take().is_some() {
            active.content_has_text = true;
        }
        active.trailing_breaks = BreakScan::default();
        active.trailing_fence = FenceScan::default();
    }

    fn close_code_block(&mut self) {
        let at = self.active_line().content_buffer.len();
        if let Some(code) = self.active.code.as_mut() {
            code.close_at = Some(at);
        }
        self.active.closed = true;
        self.active.full_update = true;
        log::trace!("code block closed on line {}", self.lines.len() - 1);
    }

    /// Finalizes the active line and carries its trailing buffer over to a fresh one.
    fn start_new_line(&mut self) {
        let old = self.lines.len() - 1;
        let trailing = std::mem::take(&mut self.lines[old].trailing_buffer);
        self.finalize_active_line();
        self.mark_dirty(old);

        self.lines.push(Line::new());
        self.active = ActiveLine {
            full_update: true,
            ..ActiveLine::default()
        };

        // Bounds runs of empty lines to one entry.
        let len = self.lines.len();
        if len >= 3 && self.lines[len - 2].is_empty() && self.lines[len - 3].is_empty() {
            let folded = self.lines.remove(len - 2);
            self.lines[len - 3]
                .content_buffer
                .push_str(&folded.content_buffer);
            self.mark_dirty(len - 3);
        }

        for c in trailing.chars() {
            self.push_trailing(c);
        }
        log::trace!(
            "line {} started with {:?}",
            self.lines.len() - 1,
            self.active_line().trailing_buffer
        );
    }

    fn finalize_active_line(&mut self) {
        let last = self.lines.len() - 1;
        let kind = self.lines[last].kind;
        self.active.rebuild(&mut self.lines[last]);
        if matches!(
            kind,
            LineKind::Paragraph | LineKind::Heading | LineKind::Table | LineKind::ThematicBreak
        ) {
            self.indents.pop_to(self.active.indent_column);
        }
        debug_assert!(self.lines[last].trailing_buffer.is_empty());
    }
}
