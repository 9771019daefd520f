//! Core traits that decouple hyprpill from any specific window manager
//! or transport mechanism.
//!
//! Every concrete backend (the `hyprctl` query client, the socket2 event
//! listener, a test harness, …) implements one of these traits.  The
//! [`Tracker`](crate::workspaces::Tracker) and the overlay loop only
//! depend on these abstractions.

use std::sync::mpsc;

/// A window-manager event the overlay reacts to.
///
/// Both variants have the same effect — a debounced show of the
/// indicator — but are kept distinct so the listener can log what it
/// actually saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WmEvent {
    /// The active workspace changed.
    WorkspaceChanged,
    /// Focus moved to another monitor (its workspace becomes active).
    MonitorFocusChanged,
}

/// Abstraction over the read-only workspace queries the tracker needs.
///
/// An implementation might spawn `hyprctl`, talk to a compositor socket
/// directly, or be a canned test double.
pub trait WorkspaceQuery {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// Return the id of the currently active workspace.
    ///
    /// The id is returned exactly as reported: Hyprland uses negative
    /// ids for special workspaces, and callers decide how to treat
    /// out-of-range values.
    fn active_workspace(&self) -> Result<i32, Self::Error>;

    /// Return the ids of all existing (occupied) workspaces.
    fn workspace_ids(&self) -> Result<Vec<i32>, Self::Error>;
}

/// A source of [`WmEvent`]s.
///
/// Implementations listen on some transport — Hyprland's event socket,
/// an in-memory channel, … — and forward classified events into the
/// provided [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](EventSource::run) **blocks** until the source is exhausted,
///   the sink is closed, or an unrecoverable error occurs.  Transient
///   failures (connect, read) must be absorbed and retried internally.
/// * Implementations must be [`Send`] so they can run on a dedicated
///   thread.
pub trait EventSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`WmEvent`] into
    /// `sink`.  Blocks the calling thread.
    fn run(&mut self, sink: mpsc::Sender<WmEvent>) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A test double that emits a fixed sequence of events.
    struct MockSource {
        events: Vec<WmEvent>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    impl EventSource for MockSource {
        type Error = MockError;

        fn run(&mut self, sink: mpsc::Sender<WmEvent>) -> Result<(), MockError> {
            for ev in self.events.drain(..) {
                let _ = sink.send(ev);
            }
            Ok(())
        }
    }

    #[test]
    fn mock_source_emits_events() {
        let mut src = MockSource {
            events: vec![WmEvent::WorkspaceChanged, WmEvent::MonitorFocusChanged],
        };
        let (tx, rx) = mpsc::channel();
        src.run(tx).unwrap();
        let events: Vec<WmEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![WmEvent::WorkspaceChanged, WmEvent::MonitorFocusChanged]
        );
    }
}
