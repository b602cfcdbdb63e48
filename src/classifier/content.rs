use crate::normalize::Normalizer;
use crate::syntax::THEMATIC_BREAK;
use crate::types::{Line, LineKind};

use super::{ActiveLine, LineClassifier};

impl ActiveLine {
    /// Re-derives `line.content` from the raw buffers.
    pub(super) fn rebuild(&mut self, line: &mut Line) {
        self.normalizer = Normalizer::default();
        line.content.clear();
        match line.kind {
            LineKind::Empty => {}
            LineKind::ThematicBreak => line.content.push_str(THEMATIC_BREAK),
            _ => {
                let shape = self.shape(line);
                let end = self
                    .code
                    .and_then(|c| c.close_at)
                    .unwrap_or(line.content_buffer.len());
                let tail = if self.closed {
                    ""
                } else {
                    line.trailing_buffer.as_str()
                };
                for c in line.content_buffer[..end].chars().chain(tail.chars()) {
                    self.normalizer.feed(shape, &mut line.content, c);
                }
            }
        }
    }
}

impl LineClassifier {
    pub(super) fn update_active_line_content(&mut self, c: char) {
        let last = self.lines.len() - 1;
        let line = &mut self.lines[last];
        let active = &mut self.active;
        if active.full_update {
            active.full_update = false;
            active.rebuild(line);
        } else if !active.closed {
            let shape = active.shape(line);
            active.normalizer.feed(shape, &mut line.content, c);
        }
    }
}
