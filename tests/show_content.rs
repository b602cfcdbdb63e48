mod support;

use std::sync::{Arc, Mutex};

use mdline::{CharTiming, FnLineSink, FnObserver, Line, LineClassifier, LineKind, LineSink};
use pretty_assertions::assert_eq;

const DOC: &str = "# Title\n\nIntro  \ntext\n- a\n  - b\n\n```rs\nlet x = 1;\n```\n> q\n---\nend";

#[test]
fn mirror_tracks_every_step() {
    let mut c = LineClassifier::default();
    let mut mirror: Vec<Line> = Vec::new();
    for ch in DOC.chars() {
        c.input_char(ch);
        c.show_content(&mut mirror);
        assert_eq!(mirror.as_slice(), c.lines());
    }
}

#[test]
fn mirror_catches_up_after_many_steps() {
    let mut c = LineClassifier::default();
    let mut mirror: Vec<Line> = Vec::new();
    c.show_content(&mut mirror);
    c.input_str(DOC);
    c.show_content(&mut mirror);
    assert_eq!(mirror.as_slice(), c.lines());
}

#[test]
fn only_changed_lines_are_shown() {
    let mut c = LineClassifier::default();
    c.input_str("# a\n- b");
    let mut shown = Vec::new();
    c.show_content(&mut FnLineSink(|i: usize, _: &Line| shown.push(i)));
    assert_eq!(shown, vec![0, 1]);

    shown.clear();
    c.input_char('c');
    c.show_content(&mut FnLineSink(|i: usize, _: &Line| shown.push(i)));
    assert_eq!(shown, vec![1]);

    shown.clear();
    c.show_content(&mut FnLineSink(|i: usize, _: &Line| shown.push(i)));
    assert!(shown.is_empty());
}

#[test]
fn new_line_reshows_the_finalized_one() {
    let mut c = LineClassifier::default();
    c.input_str("para\n");
    let mut mirror: Vec<Line> = Vec::new();
    c.show_content(&mut mirror);

    let mut shown = Vec::new();
    c.input_str("- ");
    c.show_content(&mut FnLineSink(|i: usize, l: &Line| shown.push((i, l.kind))));
    assert_eq!(
        shown,
        vec![(0, LineKind::Paragraph), (1, LineKind::ListItem)]
    );
}

struct Recorder {
    calls: Vec<(usize, usize)>,
}

impl LineSink for Recorder {
    fn show_line(&mut self, index: usize, _line: &Line) {
        self.calls.push((index, usize::MAX));
    }

    fn truncate(&mut self, len: usize) {
        self.calls.push((usize::MAX, len));
    }
}

#[test]
fn reset_truncates_the_sink() {
    let mut c = LineClassifier::default();
    c.input_str("a\n\n- b\n- c\n");
    let mut rec = Recorder { calls: Vec::new() };
    c.show_content(&mut rec);
    assert_eq!(rec.calls.len(), 3);

    rec.calls.clear();
    c.reset();
    c.show_content(&mut rec);
    assert_eq!(rec.calls, vec![(usize::MAX, 1), (0, usize::MAX)]);
}

#[test]
fn mirror_shrinks_after_reset() {
    let mut c = LineClassifier::default();
    let mut mirror: Vec<Line> = Vec::new();
    c.input_str("a\n\n- b\n- c\n");
    c.show_content(&mut mirror);
    assert_eq!(mirror.len(), 3);

    c.reset();
    c.show_content(&mut mirror);
    assert_eq!(mirror, vec![Line::new()]);
}

#[test]
fn observer_sees_each_input_call() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut c = LineClassifier::default().with_observer(FnObserver(move |t: CharTiming| {
        sink.lock().unwrap().push((t.ch, t.line_index));
    }));
    c.input_str("a\n\t- b");

    let seen = seen.lock().unwrap();
    let chars: Vec<char> = seen.iter().map(|(ch, _)| *ch).collect();
    assert_eq!(chars, vec!['a', '\n', '\t', '-', ' ', 'b']);
    assert_eq!(seen.last().map(|(_, line)| *line), Some(1));
}
