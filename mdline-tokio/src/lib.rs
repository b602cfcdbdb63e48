//! Tokio glue for `mdline`.
//!
//! `LineClassifier` is synchronous and single-owner. This crate provides small helpers for async
//! producers:
//!
//! - An actor task that owns the classifier, is fed text deltas and emits owned `LinesUpdate`s.
//! - A producer-side `DeltaSender` with a backpressure policy.

use mdline::{FnLineSink, Line, LineClassifier, LineSink};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackpressurePolicy {
    /// Await capacity. Never drops.
    ///
    /// The producer task may stall when the consumer falls behind.
    Block,
    /// Drop the new delta when the channel is full.
    ///
    /// Dropped deltas never reach the classifier, so only use this for replaceable input.
    DropNew,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Dropped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("classifier input channel is closed")]
    Closed,
}

/// Producer-side helper for the bounded input channel of a classifier actor.
pub struct DeltaSender {
    tx: mpsc::Sender<String>,
    policy: BackpressurePolicy,
}

impl DeltaSender {
    pub fn new(tx: mpsc::Sender<String>, policy: BackpressurePolicy) -> Self {
        Self { tx, policy }
    }

    pub fn policy(&self) -> BackpressurePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: BackpressurePolicy) {
        self.policy = policy;
    }

    pub async fn send(&mut self, delta: &str) -> Result<SendOutcome, SendError> {
        match self.policy {
            BackpressurePolicy::Block => {
                self.tx
                    .send(delta.to_string())
                    .await
                    .map_err(|_| SendError::Closed)?;
                Ok(SendOutcome::Sent)
            }
            BackpressurePolicy::DropNew => match self.tx.try_send(delta.to_string()) {
                Ok(()) => Ok(SendOutcome::Sent),
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::debug!("input channel full, dropped {} bytes", delta.len());
                    Ok(SendOutcome::Dropped)
                }
                Err(mpsc::error::TrySendError::Closed(_)) => Err(SendError::Closed),
            },
        }
    }
}

/// Owned summary of one classifier step, as produced by `show_content`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinesUpdate {
    /// Changed lines with their positions, in increasing order.
    pub changed: Vec<(usize, Line)>,
    /// Length of the line sequence after this update.
    pub len: usize,
    /// Set on the last update, sent once the input channel closed.
    pub finished: bool,
}

impl LinesUpdate {
    /// Brings a consumer-side copy of the line sequence up to date.
    pub fn apply_to(&self, mirror: &mut Vec<Line>) {
        mirror.truncate(self.len);
        for (index, line) in &self.changed {
            mirror.show_line(*index, line);
        }
    }
}

fn take_update(classifier: &mut LineClassifier, finished: bool) -> LinesUpdate {
    let mut changed = Vec::new();
    classifier.show_content(&mut FnLineSink(|index: usize, line: &Line| {
        changed.push((index, line.clone()))
    }));
    LinesUpdate {
        changed,
        len: classifier.lines().len(),
        finished,
    }
}

/// Spawn a task that owns `classifier` and emits one `LinesUpdate` per received delta.
///
/// When the input channel closes a final update with `finished` set is sent. The task stops
/// early if the returned receiver is dropped.
pub fn spawn_classifier_actor(
    mut classifier: LineClassifier,
    mut rx: mpsc::Receiver<String>,
) -> mpsc::Receiver<LinesUpdate> {
    let (tx_out, rx_out) = mpsc::channel::<LinesUpdate>(64);

    tokio::spawn(async move {
        while let Some(delta) = rx.recv().await {
            classifier.input_str(&delta);
            let update = take_update(&mut classifier, false);
            if tx_out.send(update).await.is_err() {
                log::debug!("update receiver dropped, stopping classifier actor");
                return;
            }
        }
        if let Err(err) = classifier.check_invariants() {
            log::error!("classifier invariant violated: {err}");
        }
        let _ = tx_out.send(take_update(&mut classifier, true)).await;
    });

    rx_out
}
