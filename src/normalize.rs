use crate::types::LineKind;

/// The parts of a line that decide how its characters normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shape {
    pub(crate) kind: LineKind,
    pub(crate) block_indent: usize,
    pub(crate) fenced: bool,
}

/// Whitespace owed to the output, emitted only once more text arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
enum Gap {
    #[default]
    None,
    Space,
    Break,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Phase {
    /// Leading whitespace of the (sub-)line.
    #[default]
    Lead,
    /// Inside a marker: heading hashes, list digits, quote `>`, or the opening fence line.
    Marker,
    Body,
}

/// Character-at-a-time normalizer for one line.
///
/// Feeding every character of a line's raw text from a fresh normalizer yields the same output
/// as feeding them one by one across many calls, which is what keeps the common-path update
/// O(1) per character.
#[derive(Debug, Clone, Default)]
pub(crate) struct Normalizer {
    gap: Gap,
    phase: Phase,
    column: usize,
    space_run: usize,
    code_body: bool,
    pending_newlines: usize,
}

impl Normalizer {
    pub(crate) fn feed(&mut self, shape: Shape, out: &mut String, c: char) {
        match shape.kind {
            LineKind::Empty | LineKind::ThematicBreak => {}
            LineKind::Paragraph => self.text(out, c),
            LineKind::Heading => self.heading(out, c),
            LineKind::ListItem => self.list_item(out, c),
            LineKind::Quote => self.quote(out, c),
            LineKind::Table => self.table_row(out, c),
            LineKind::CodeBlock => self.code(shape, out, c),
        }
    }

    fn text(&mut self, out: &mut String, c: char) {
        if c == ' ' || c == '\n' {
            if !out.is_empty() {
                self.gap = self.gap.max(Gap::Space);
            }
            return;
        }
        match std::mem::take(&mut self.gap) {
            Gap::None => {}
            Gap::Space => out.push(' '),
            Gap::Break => out.push('\n'),
        }
        out.push(c);
    }

    fn heading(&mut self, out: &mut String, c: char) {
        match self.phase {
            Phase::Lead => match c {
                ' ' | '\n' => {}
                '#' => self.phase = Phase::Marker,
                _ => {
                    self.phase = Phase::Body;
                    self.text(out, c);
                }
            },
            Phase::Marker => {
                if c != '#' {
                    self.phase = Phase::Body;
                    self.text(out, c);
                }
            }
            Phase::Body => self.text(out, c),
        }
    }

    fn list_item(&mut self, out: &mut String, c: char) {
        match self.phase {
            Phase::Lead => match c {
                ' ' | '\n' => {}
                '-' | '+' | '*' => self.phase = Phase::Body,
                '0'..='9' => self.phase = Phase::Marker,
                _ => {
                    self.phase = Phase::Body;
                    self.text(out, c);
                }
            },
            Phase::Marker => match c {
                '0'..='9' => {}
                '.' => self.phase = Phase::Body,
                _ => {
                    self.phase = Phase::Body;
                    self.text(out, c);
                }
            },
            Phase::Body => self.text(out, c),
        }
    }

    fn quote(&mut self, out: &mut String, c: char) {
        match (self.phase, c) {
            (_, '\n') => {
                if self.space_run >= 2 && !out.is_empty() {
                    self.gap = Gap::Break;
                } else {
                    self.text(out, '\n');
                }
                self.space_run = 0;
                self.phase = Phase::Lead;
            }
            (Phase::Lead, ' ') => {}
            (Phase::Lead, '>') => self.phase = Phase::Marker,
            (Phase::Marker, ' ') => self.phase = Phase::Body,
            (Phase::Body, ' ') => {
                self.space_run += 1;
                self.text(out, ' ');
            }
            _ => {
                self.phase = Phase::Body;
                self.space_run = 0;
                self.text(out, c);
            }
        }
    }

    fn table_row(&mut self, out: &mut String, c: char) {
        if c == '\n' {
            if !out.is_empty() {
                self.gap = Gap::Break;
            }
            return;
        }
        self.text(out, c);
    }

    fn code(&mut self, shape: Shape, out: &mut String, c: char) {
        if shape.fenced && !self.code_body {
            // Skip blank lines absorbed ahead of the fence, then the fence line itself.
            match (self.phase, c) {
                (Phase::Lead, ' ' | '\n') => {}
                (Phase::Lead, _) => self.phase = Phase::Marker,
                (_, '\n') => {
                    self.phase = Phase::Body;
                    self.code_body = true;
                    self.column = 0;
                }
                _ => {}
            }
            return;
        }

        if c == '\n' {
            if self.code_body {
                self.pending_newlines += 1;
            }
            self.column = 0;
            return;
        }
        if c == ' ' && self.column < shape.block_indent {
            self.column += 1;
            return;
        }
        self.column += 1;
        self.code_body = true;
        for _ in 0..std::mem::take(&mut self.pending_newlines) {
            out.push('\n');
        }
        out.push(c);
    }
}
