use crate::types::{Line, LineKind};

use pulldown_cmark::{CowStr, Event, Options as PulldownOptions, Parser, Tag, TagEnd};

#[derive(Debug, Clone)]
pub struct PulldownAdapterOptions {
    pub pulldown: PulldownOptions,
}

impl Default for PulldownAdapterOptions {
    fn default() -> Self {
        Self {
            pulldown: PulldownOptions::empty(),
        }
    }
}

/// Inline events for classified lines.
///
/// Finalized lines never change (apart from empty lines folding together, which carry no
/// events), so their events are parsed once and cached by position.
#[derive(Debug, Default)]
pub struct PulldownAdapter {
    opts: PulldownAdapterOptions,
    finalized_cache: Vec<Vec<Event<'static>>>,
}

impl PulldownAdapter {
    pub fn new(opts: PulldownAdapterOptions) -> Self {
        Self {
            opts,
            finalized_cache: Vec::new(),
        }
    }

    /// Call after the classifier has been reset.
    pub fn clear(&mut self) {
        self.finalized_cache.clear();
    }

    /// Parses every finalized line not seen yet. `lines` is the classifier's full sequence.
    pub fn sync(&mut self, lines: &[Line]) {
        let finalized = lines.len().saturating_sub(1);
        self.finalized_cache.truncate(finalized);
        for line in &lines[self.finalized_cache.len()..finalized] {
            let events = line_events(line, self.opts.pulldown);
            self.finalized_cache.push(events);
        }
    }

    pub fn finalized_events(&self, index: usize) -> Option<&[Event<'static>]> {
        self.finalized_cache.get(index).map(|v| v.as_slice())
    }

    /// Events for the active line, parsed on demand.
    pub fn parse_active(&self, line: &Line) -> Vec<Event<'static>> {
        line_events(line, self.opts.pulldown)
    }
}

fn line_events(line: &Line, options: PulldownOptions) -> Vec<Event<'static>> {
    if line.kind.has_inline_content() {
        return Parser::new_ext(&line.content, options)
            .filter(|e| {
                !matches!(
                    e,
                    Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph)
                )
            })
            .map(|e| e.into_static())
            .collect();
    }
    match line.kind {
        LineKind::ThematicBreak => vec![Event::Rule],
        LineKind::CodeBlock if !line.content.is_empty() => {
            vec![Event::Text(CowStr::from(line.content.clone()))]
        }
        _ => Vec::new(),
    }
}
