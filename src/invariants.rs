use thiserror::Error;

use crate::indent::IndentStack;
use crate::types::{IndentEntry, Line};

/// A structural invariant that no sequence of `input_char` calls should be able to break.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("line sequence has no active line")]
    NoActiveLine,
    #[error("finalized empty line {index} is followed by another empty line")]
    ConsecutiveEmpty { index: usize },
    #[error("finalized line {index} still holds trailing text")]
    TrailingInFinalized { index: usize },
    #[error("indent stack lost its base entry")]
    MissingBase,
    #[error("indent stack content start does not increase at depth {depth}")]
    NonMonotonic { depth: usize },
}

pub(crate) fn check(lines: &[Line], indents: &IndentStack) -> Result<(), InvariantViolation> {
    let Some((_, finalized)) = lines.split_last() else {
        return Err(InvariantViolation::NoActiveLine);
    };

    for (index, line) in finalized.iter().enumerate() {
        if !line.trailing_buffer.is_empty() {
            return Err(InvariantViolation::TrailingInFinalized { index });
        }
    }
    if let Some(index) = finalized
        .windows(2)
        .position(|pair| pair[0].is_empty() && pair[1].is_empty())
    {
        return Err(InvariantViolation::ConsecutiveEmpty { index });
    }

    let entries = indents.entries();
    if entries.first() != Some(&IndentEntry::BASE) {
        return Err(InvariantViolation::MissingBase);
    }
    if let Some(depth) = entries
        .windows(2)
        .position(|pair| pair[1].content_start <= pair[0].content_start)
    {
        return Err(InvariantViolation::NonMonotonic { depth: depth + 1 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineKind;

    fn line(kind: LineKind) -> Line {
        Line {
            kind,
            ..Line::default()
        }
    }

    #[test]
    fn empty_sequence_has_no_active_line() {
        assert_eq!(
            check(&[], &IndentStack::new()),
            Err(InvariantViolation::NoActiveLine)
        );
    }

    #[test]
    fn consecutive_empty_finalized_lines_are_reported() {
        let lines = [
            line(LineKind::Paragraph),
            line(LineKind::Empty),
            line(LineKind::Empty),
            line(LineKind::Empty),
        ];
        let err = check(&lines, &IndentStack::new()).unwrap_err();
        assert_eq!(err, InvariantViolation::ConsecutiveEmpty { index: 1 });
        assert_eq!(err.to_string(), "finalized empty line 1 is followed by another empty line");
    }

    #[test]
    fn active_line_may_follow_an_empty_line() {
        let lines = [line(LineKind::Empty), line(LineKind::Empty)];
        assert_eq!(check(&lines, &IndentStack::new()), Ok(()));
    }

    #[test]
    fn finalized_trailing_text_is_reported() {
        let mut first = line(LineKind::Paragraph);
        first.trailing_buffer.push('x');
        let lines = [first, line(LineKind::Empty)];
        assert_eq!(
            check(&lines, &IndentStack::new()),
            Err(InvariantViolation::TrailingInFinalized { index: 0 })
        );
    }
}
