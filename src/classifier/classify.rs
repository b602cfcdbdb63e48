use crate::syntax::{ListMarker, fence_info, heading_level, parse_list_marker};
use crate::types::LineKind;

use super::{CodeState, LineClassifier};

/// Block marker found at the start of the lead line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lead {
    Fence,
    Heading(u8),
    List(ListMarker),
    Quote,
    Pipe,
    Text,
}

impl Lead {
    fn scan(text: &str, fence: bool, max_digits: usize) -> Self {
        if fence {
            return Lead::Fence;
        }
        if let Some(level) = heading_level(text) {
            return Lead::Heading(level);
        }
        if let Some(marker) = parse_list_marker(text, max_digits) {
            return Lead::List(marker);
        }
        match text.as_bytes().first() {
            Some(b'>') => Lead::Quote,
            Some(b'|') => Lead::Pipe,
            _ => Lead::Text,
        }
    }
}

impl LineClassifier {
    /// Text of the lead line from its first non-space character. Runs on to the end of the
    /// buffer it lives in; recognizers stop at the newline themselves.
    fn lead_text(&self) -> Option<&str> {
        let line = self.active_line();
        let start = self.active.lead_start? + self.active.indent_column;
        let content_len = line.content_buffer.len();
        if start < content_len {
            Some(&line.content_buffer[start..])
        } else {
            line.trailing_buffer.get(start - content_len..)
        }
    }

    /// Sets the active line's kind. On a change the kind-specific fields are cleared and the
    /// content is rebuilt; returns whether the kind changed.
    fn set_kind(&mut self, kind: LineKind) -> bool {
        let line = self.active_mut();
        if line.kind == kind {
            return false;
        }
        line.kind = kind;
        line.heading_level = 0;
        line.indent_level = 0;
        line.block_indent = 0;
        line.info_string = None;
        line.ordered_index = None;
        self.active.code = None;
        self.active.full_update = true;
        true
    }

    pub(super) fn update_active_line_kind(&mut self) {
        if self.active.closed || self.active.code.is_some_and(|c| c.opened) {
            return;
        }
        let Some(text) = self.lead_text() else {
            self.set_kind(LineKind::Empty);
            return;
        };
        let lead = Lead::scan(
            text,
            self.active.line_fence.is_open(),
            self.opts.max_ordered_marker_digits,
        );
        let column = self.active.indent_column;

        let kind = self.active_line().kind;
        if !kind.is_sticky() {
            if lead == Lead::Fence {
                self.fenced_code(column);
                return;
            }
            let code_start = self.indents.content_start_for(column) + 4;
            if column >= code_start {
                self.indented_code(column, code_start);
                return;
            }
        }

        if self.active.line_breaks.is_break() {
            self.set_kind(LineKind::ThematicBreak);
            let level = self.indents.level_for(column);
            let line = self.active_mut();
            line.indent_level = level;
            let done = line.trailing_buffer.is_empty();
            self.active.closed = done && self.active.content_has_text;
            return;
        }

        if kind.is_sticky() {
            return;
        }

        match lead {
            Lead::Heading(level) => {
                if self.set_kind(LineKind::Heading) {
                    let indent_level = self.indents.level_for(column);
                    let line = self.active_mut();
                    line.heading_level = level;
                    line.indent_level = indent_level;
                }
            }
            Lead::List(marker) => {
                if self.set_kind(LineKind::ListItem) {
                    let (level, ordered) =
                        self.indents
                            .open_list_item(column, column + marker.width + 1, marker.ordered);
                    let line = self.active_mut();
                    line.indent_level = level;
                    line.ordered_index = ordered;
                }
            }
            Lead::Quote => {
                if self.set_kind(LineKind::Quote) {
                    let level = self.indents.pop_to(column);
                    self.active_mut().indent_level = level;
                }
            }
            Lead::Pipe => {
                if self.set_kind(LineKind::Table) {
                    let level = self.indents.level_for(column);
                    self.active_mut().indent_level = level;
                }
            }
            Lead::Fence | Lead::Text => {
                if self.set_kind(LineKind::Paragraph) {
                    let level = self.indents.level_for(column);
                    self.active_mut().indent_level = level;
                }
            }
        }
    }

    fn fenced_code(&mut self, column: usize) {
        if self.set_kind(LineKind::CodeBlock) {
            self.active.code = Some(CodeState {
                fenced: true,
                ..CodeState::default()
            });
            let level = self.indents.level_for(column);
            let line = self.active_mut();
            line.block_indent = column;
            line.indent_level = level;
        }
        if !self.active.content_has_text {
            return;
        }

        // The fence line is complete: the block opens.
        let info = self.lead_text().and_then(fence_info);
        let fence_len = self.active.line_fence.ticks();
        if let Some(code) = self.active.code.as_mut() {
            code.opened = true;
            code.fence_len = fence_len;
        }
        let level = self.indents.pop_to(column);
        let line = self.active_mut();
        line.info_string = info;
        line.indent_level = level;
        log::trace!(
            "fenced code block opened at column {column} with info {:?}",
            self.active_line().info_string
        );
    }

    fn indented_code(&mut self, column: usize, block_indent: usize) {
        self.set_kind(LineKind::CodeBlock);
        self.active.code = Some(CodeState {
            opened: true,
            ..CodeState::default()
        });
        self.active.full_update = true;
        let level = self.indents.pop_to(column);
        let line = self.active_mut();
        line.block_indent = block_indent;
        line.indent_level = level;
        log::trace!("indented code block opened, content at column {block_indent}");
    }
}
