use crate::syntax::{heading_level, parse_list_marker};
use crate::types::LineKind;

use super::LineClassifier;

/// What the trailing buffer means for the active line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Decision {
    NotNewLine,
    /// Append the trailing buffer to the content buffer in place.
    MergeToContent,
    /// Finalize the active line and carry the trailing buffer to a new one.
    MoveToNewLine,
    /// `MoveToNewLine`, then decide once more on the new line.
    FinalizeAndReset,
}

impl LineClassifier {
    pub(super) fn decide(&self) -> Decision {
        let line = self.active_line();
        let active = &self.active;
        let trailing = line.trailing_buffer.as_str();
        if trailing.is_empty() {
            return Decision::NotNewLine;
        }

        let ends_nl = trailing.ends_with('\n');
        let rest = active.rest(trailing);
        let content_blank = !active.content_has_text;
        let merge_or_finalize = if content_blank {
            Decision::MergeToContent
        } else {
            Decision::FinalizeAndReset
        };

        if active.closed {
            return match rest {
                Some(_) => Decision::MoveToNewLine,
                None if ends_nl => Decision::FinalizeAndReset,
                None => Decision::NotNewLine,
            };
        }

        let in_code = active.in_code();
        let quote_start = rest == Some(">");
        if !ends_nl && !trailing.ends_with(' ') && !quote_start && !in_code {
            return Decision::NotNewLine;
        }

        if !in_code && active.trailing_fence.is_open() {
            return match (content_blank, ends_nl) {
                (true, true) => Decision::MergeToContent,
                (true, false) => Decision::NotNewLine,
                (false, _) => Decision::MoveToNewLine,
            };
        }

        if in_code {
            if self.closes_fence() {
                return Decision::MergeToContent;
            }
            if active.trailing_lead.is_some_and(|n| n < line.block_indent) {
                return Decision::MoveToNewLine;
            }
            return Decision::NotNewLine;
        }

        if ends_nl && rest.is_none() {
            return merge_or_finalize;
        }
        if trailing.ends_with("  \n") && line.kind != LineKind::Quote {
            return Decision::MergeToContent;
        }
        if ends_nl && active.trailing_breaks.is_break() {
            return merge_or_finalize;
        }
        if ends_nl && line.kind == LineKind::Heading {
            return Decision::MergeToContent;
        }

        let Some(rest) = rest else {
            return Decision::NotNewLine;
        };
        if content_blank {
            return Decision::NotNewLine;
        }
        let starts_block = parse_list_marker(rest, self.opts.max_ordered_marker_digits).is_some()
            || heading_level(rest).is_some()
            || (rest.starts_with('>') && line.kind != LineKind::Quote)
            || (line.kind == LineKind::Table && !rest.starts_with('|'));
        if starts_block {
            Decision::MoveToNewLine
        } else {
            Decision::NotNewLine
        }
    }

    /// The trailing buffer is a complete closing fence for the open fenced block.
    pub(super) fn closes_fence(&self) -> bool {
        let active = &self.active;
        let Some(code) = active.code.filter(|c| c.fenced && active.in_code()) else {
            return false;
        };
        self.active_line().trailing_buffer.ends_with('\n')
            && active.trailing_fence.closes(code.fence_len)
    }
}
