//! Progress events emitted by the install sequencer
//!
//! A run produces a stream of `Progress` and `Log` events closed by exactly one
//! `Completed`. Sinks receive the events in order on the worker thread.

use std::sync::Mutex;
use std::sync::mpsc::SyncSender;

/// Message from the sequencer to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Checkpoint reached (0-100, non-decreasing within a run)
    Progress(u8),
    /// Human-readable status line
    Log(String),
    /// Terminal event; nothing follows it
    Completed { success: bool, message: String },
}

impl ProgressEvent {
    /// Returns true for the terminal `Completed` event
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Destination for progress events
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Bounded channel sender used by `InstallSequencer::spawn`.
///
/// A dropped receiver is not an error: the run continues and its events are
/// discarded.
impl ProgressSink for SyncSender<ProgressEvent> {
    fn emit(&self, event: ProgressEvent) {
        if self.send(event).is_err() {
            log::debug!("Progress receiver dropped, discarding event");
        }
    }
}

/// Sink that records every event, for synchronous runs
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl ProgressSink for CollectingSink {
    fn emit(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn completed_is_terminal() {
        assert!(
            ProgressEvent::Completed {
                success: true,
                message: String::new()
            }
            .is_terminal()
        );
        assert!(!ProgressEvent::Progress(10).is_terminal());
        assert!(!ProgressEvent::Log("x".into()).is_terminal());
    }

    #[test]
    fn sync_sender_ignores_dropped_receiver() {
        let (tx, rx) = mpsc::sync_channel(1);
        drop(rx);
        tx.emit(ProgressEvent::Progress(10));
    }

    #[test]
    fn collecting_sink_keeps_order() {
        let sink = CollectingSink::new();
        sink.emit(ProgressEvent::Log("a".into()));
        sink.emit(ProgressEvent::Progress(10));
        assert_eq!(
            sink.events(),
            vec![ProgressEvent::Log("a".into()), ProgressEvent::Progress(10)]
        );
    }
}
