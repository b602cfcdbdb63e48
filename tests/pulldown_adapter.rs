#![cfg(feature = "pulldown")]

use mdline::LineClassifier;
use mdline::adapters::pulldown::{PulldownAdapter, PulldownAdapterOptions};
use pulldown_cmark::{CowStr, Event, Options as PulldownOptions, Tag, TagEnd};

#[test]
fn parses_finalized_lines_once_and_active_line_on_demand() {
    let mut c = LineClassifier::default();
    let mut adapter = PulldownAdapter::new(PulldownAdapterOptions {
        pulldown: PulldownOptions::ENABLE_STRIKETHROUGH,
    });

    c.input_str("# Hello *world*\n\n---\nsome ~~gone~~");
    adapter.sync(c.lines());
    assert_eq!(c.lines().len(), 3);

    let heading = adapter.finalized_events(0).unwrap();
    assert!(heading.iter().any(|e| matches!(e, Event::Start(Tag::Emphasis))));
    assert!(
        !heading
            .iter()
            .any(|e| matches!(e, Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph)))
    );
    assert_eq!(adapter.finalized_events(1).unwrap(), &[Event::Rule]);
    assert!(adapter.finalized_events(2).is_none());

    let active = adapter.parse_active(c.active_line());
    assert!(active.iter().any(|e| matches!(e, Event::Start(Tag::Strikethrough))));
}

#[test]
fn code_lines_are_a_single_text_event() {
    let mut c = LineClassifier::default();
    let adapter = PulldownAdapter::default();
    c.input_str("```\n*not emphasis*\n```\n");
    let events = adapter.parse_active(c.active_line());
    assert_eq!(
        events,
        vec![Event::Text(CowStr::from("*not emphasis*".to_string()))]
    );
}

#[test]
fn clear_drops_cached_events() {
    let mut c = LineClassifier::default();
    let mut adapter = PulldownAdapter::default();
    c.input_str("a\n\nb\n");
    adapter.sync(c.lines());
    assert!(adapter.finalized_events(0).is_some());

    c.reset();
    adapter.clear();
    adapter.sync(c.lines());
    assert!(adapter.finalized_events(0).is_none());
}
