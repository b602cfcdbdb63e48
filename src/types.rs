#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineKind {
    Paragraph,
    Heading,
    ListItem,
    Quote,
    CodeBlock,
    Table,
    #[default]
    Empty,
    ThematicBreak,
}

impl LineKind {
    /// Kinds that keep their classification until the line is finalized.
    pub fn is_sticky(self) -> bool {
        matches!(
            self,
            LineKind::Heading | LineKind::ListItem | LineKind::Quote | LineKind::Table
        )
    }

    /// Kinds whose normalized content carries inline Markdown.
    pub fn has_inline_content(self) -> bool {
        matches!(
            self,
            LineKind::Paragraph
                | LineKind::Heading
                | LineKind::ListItem
                | LineKind::Quote
                | LineKind::Table
        )
    }
}

/// One logical Markdown line, either finalized or still being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    pub kind: LineKind,
    /// Committed raw text, whole physical lines including their `'\n'`.
    pub content_buffer: String,
    /// The physical line currently being typed. Always empty once the line is finalized.
    pub trailing_buffer: String,
    /// 1..=6 for headings, 0 otherwise.
    pub heading_level: u8,
    pub indent_level: usize,
    /// Column at which code content starts (code blocks only).
    pub block_indent: usize,
    /// Fenced code info string, trimmed. `None` when the fence carries none.
    pub info_string: Option<String>,
    /// Running counter for ordered list items; `None` for unordered items and other kinds.
    pub ordered_index: Option<u64>,
    /// Normalized, human-meaningful text.
    pub content: String,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.kind == LineKind::Empty
    }
}

/// One nesting level of the indent stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndentEntry {
    /// Column where this level's marker begins.
    pub indent: usize,
    /// Column where this level's content begins.
    pub content_start: usize,
    /// Running counter for ordered lists at this level.
    pub ordered_index: Option<u64>,
}

impl IndentEntry {
    pub const BASE: IndentEntry = IndentEntry {
        indent: 0,
        content_start: 0,
        ordered_index: None,
    };
}
