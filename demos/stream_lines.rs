//! Feeds Markdown from stdin (or a built-in sample) one character at a time and prints the
//! classified lines.
//!
//! ```text
//! RUST_LOG=mdline=trace cargo run --example stream_lines < README.md
//! ```

use std::io::{self, IsTerminal, Read};
use std::time::Duration;

use mdline::{CharTiming, FnObserver, LineClassifier, LineKind, Options};

const SAMPLE: &str = "# Streaming lines\n\nText arrives one character at a time  \nand is classified as it goes.\n\n- first\n  - nested\n3. third\n\n> quoted\n\n```rust\nfn main() {}\n```\n\n---\n";

fn main() -> io::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut input = String::new();
    if io::stdin().is_terminal() {
        input.push_str(SAMPLE);
    } else {
        io::stdin().read_to_string(&mut input)?;
    }

    let (tx, rx) = std::sync::mpsc::channel::<CharTiming>();
    let mut classifier = LineClassifier::new(Options::default())
        .map_err(io::Error::other)?
        .with_observer(FnObserver(move |t: CharTiming| {
            let _ = tx.send(t);
        }));
    classifier.input_str(&input);
    classifier.clear_observer();

    let slowest = rx.try_iter().max_by_key(|t| t.elapsed);
    if let Some(t) = slowest {
        log::info!(
            "slowest character {:?} on line {} took {:?}",
            t.ch,
            t.line_index,
            t.elapsed
        );
        if t.elapsed > Duration::from_millis(1) {
            log::warn!("a single character took over a millisecond");
        }
    }

    if let Err(err) = classifier.check_invariants() {
        log::error!("{err}");
    }

    for (i, line) in classifier.lines().iter().enumerate() {
        let label = match line.kind {
            LineKind::Heading => format!("Heading({})", line.heading_level),
            LineKind::ListItem => match line.ordered_index {
                Some(n) => format!("ListItem({n}.)"),
                None => "ListItem(-)".to_string(),
            },
            LineKind::CodeBlock => match &line.info_string {
                Some(info) => format!("CodeBlock({info})"),
                None => "CodeBlock".to_string(),
            },
            kind => format!("{kind:?}"),
        };
        println!(
            "{i:>3} {:indent$}{label:<16} {:?}",
            "",
            line.content,
            indent = line.indent_level * 2
        );
    }
    Ok(())
}
