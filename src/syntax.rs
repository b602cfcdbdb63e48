//! Bounded-prefix recognizers for line markers.
//!
//! Every function here receives text starting at the first non-space character of a physical
//! line. The text may run past the line's `'\n'` (the classifier hands out the tail of its
//! buffers without cutting it), so recognizers stop at the newline themselves and only look at
//! as many bytes as the marker can span.

/// Canonical normalized content of a thematic break line.
pub const THEMATIC_BREAK: &str = "---";

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    /// Bytes taken by the marker itself (`-` is 1, `12.` is 3).
    pub width: usize,
    /// Parsed number for ordered markers.
    pub ordered: Option<u64>,
}

/// `#`×1..=6 followed by a space.
pub fn heading_level(rest: &str) -> Option<u8> {
    let bytes = rest.as_bytes();
    let hashes = bytes.iter().take(7).take_while(|&&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    if bytes.get(hashes) == Some(&b' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

/// `-`, `+`, `*`, or up to `max_digits` ASCII digits plus `.`, then a space.
pub fn parse_list_marker(rest: &str, max_digits: usize) -> Option<ListMarker> {
    let bytes = rest.as_bytes();
    match bytes.first()? {
        b'-' | b'+' | b'*' => {
            if bytes.get(1) == Some(&b' ') {
                Some(ListMarker {
                    width: 1,
                    ordered: None,
                })
            } else {
                None
            }
        }
        b'0'..=b'9' => {
            let digits = bytes
                .iter()
                .take(max_digits + 1)
                .take_while(|b| b.is_ascii_digit())
                .count();
            if digits > max_digits {
                return None;
            }
            if bytes.get(digits) != Some(&b'.') || bytes.get(digits + 1) != Some(&b' ') {
                return None;
            }
            // Digit runs are bounded by `max_digits` (at most 18), so this cannot overflow.
            let n = rest[..digits].parse::<u64>().ok()?;
            Some(ListMarker {
                width: digits + 1,
                ordered: Some(n),
            })
        }
        _ => None,
    }
}

/// Info string of an opening fence line, `None` when it is blank.
pub fn fence_info(rest: &str) -> Option<String> {
    let after = rest.trim_start_matches('`');
    let info = after.split('\n').next().unwrap_or(after).trim();
    if info.is_empty() {
        None
    } else {
        Some(info.to_string())
    }
}

/// Incremental fence recognizer for one physical line.
///
/// Leading spaces and blank lines are skipped. The line is a fence when it opens with three or
/// more backticks and no backtick follows the opening run. Scanning stops at the line's `'\n'`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FenceScan {
    ticks: usize,
    run_done: bool,
    has_info: bool,
    ended: bool,
    broken: bool,
}

impl FenceScan {
    pub fn push(&mut self, c: char) {
        if self.broken || self.ended {
            return;
        }
        match c {
            ' ' | '\n' if self.ticks == 0 => {}
            '`' if !self.run_done => self.ticks += 1,
            _ if self.ticks == 0 => self.broken = true,
            '`' => self.broken = true,
            '\n' => self.ended = true,
            ' ' => self.run_done = true,
            _ => {
                self.run_done = true;
                self.has_info = true;
            }
        }
    }

    /// Opening fence: three or more backticks, with no backtick in the info string.
    pub fn is_open(&self) -> bool {
        !self.broken && self.ticks >= FENCE.len()
    }

    /// Length of the opening backtick run.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Closing fence for a block opened by `open_ticks` backticks: a run at least that long
    /// followed only by spaces.
    pub fn closes(&self, open_ticks: usize) -> bool {
        self.is_open() && !self.has_info && self.ticks >= open_ticks
    }
}

/// Incremental thematic-break recognizer.
///
/// Accepts one marker character (`-`, `*` or `_`) repeated on a single physical line with any
/// spaces in between. Once any other character shows up the scanner is permanently broken, which
/// lets callers skip the check for the rest of the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreakScan {
    marker: Option<char>,
    count: usize,
    ended: bool,
    broken: bool,
}

impl BreakScan {
    pub fn push(&mut self, c: char) {
        if self.broken {
            return;
        }
        match c {
            ' ' => {}
            '\n' => {
                if self.count > 0 {
                    self.ended = true;
                }
            }
            '-' | '*' | '_' => {
                if self.ended {
                    self.broken = true;
                    return;
                }
                match self.marker {
                    None => {
                        self.marker = Some(c);
                        self.count = 1;
                    }
                    Some(m) if m == c => self.count += 1,
                    Some(_) => self.broken = true,
                }
            }
            _ => self.broken = true,
        }
    }

    pub fn is_break(&self) -> bool {
        !self.broken && self.count >= 3
    }
}
