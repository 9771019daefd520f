//! [`EventSource`] implementation over Hyprland's event socket.
//!
//! Hyprland broadcasts compositor events on `.socket2.sock` as
//! newline-terminated UTF-8 lines of the form `<event>>><payload>`.
//! Only two event names matter to the indicator:
//!
//! ```text
//! workspace>>3
//! focusedmon>>DP-1,2
//! ```
//!
//! Everything else is ignored.  The listener keeps a persistent
//! connection for the process lifetime: on connect failure, EOF or read
//! error it backs off for a fixed interval and reconnects, indefinitely.

use crate::traits::{EventSource, WmEvent};
use log::{debug, info, warn};
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

/// Delay before retrying a failed or dropped connection.
const RECONNECT_BACKOFF: Duration = Duration::from_secs(1);

/// An [`EventSource`] reading Hyprland's `.socket2.sock` event stream.
pub struct SocketEventSource {
    path: PathBuf,
    backoff: Duration,
}

/// Errors produced while locating the event socket.
///
/// Transient connect/read failures are not represented here — they are
/// absorbed by the reconnect loop and never surface.
#[derive(Debug, thiserror::Error)]
pub enum EventSourceError {
    #[error("HYPRLAND_INSTANCE_SIGNATURE is not set")]
    NoInstanceSignature,
    #[error("no event socket found for instance {0}")]
    SocketNotFound(String),
}

/// Resolve the event socket for the current Hyprland instance.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket2.sock`;
/// older builds used `/tmp/hypr/<instance>/.socket2.sock`.
fn socket2_path() -> Result<PathBuf, EventSourceError> {
    let sig = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| EventSourceError::NoInstanceSignature)?;

    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        let p = PathBuf::from(format!("{}/hypr/{}/.socket2.sock", runtime_dir, sig));
        if p.exists() {
            return Ok(p);
        }
    }
    let p = PathBuf::from(format!("/tmp/hypr/{}/.socket2.sock", sig));
    if p.exists() {
        return Ok(p);
    }
    Err(EventSourceError::SocketNotFound(sig))
}

/// Classify one event line; `None` for events the indicator ignores.
fn classify(line: &str) -> Option<WmEvent> {
    let (name, _payload) = line.split_once(">>")?;
    match name {
        "workspace" => Some(WmEvent::WorkspaceChanged),
        "focusedmon" => Some(WmEvent::MonitorFocusChanged),
        _ => None,
    }
}

impl SocketEventSource {
    /// Create a source for the socket of the current Hyprland instance.
    ///
    /// Fails when no instance signature is available or no socket
    /// exists — in that case the daemon runs on signals alone.
    pub fn from_env() -> Result<Self, EventSourceError> {
        Ok(Self::new(socket2_path()?))
    }

    /// Create a source reading from an explicit socket path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            backoff: RECONNECT_BACKOFF,
        }
    }

    #[cfg(test)]
    fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// One connection's worth of reading.  Returns `false` when the
    /// sink has closed and the source should shut down.
    fn pump(&self, stream: UnixStream, sink: &mpsc::Sender<WmEvent>) -> bool {
        let reader = BufReader::new(stream);
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if let Some(event) = classify(&line) {
                        debug!("event: {:?}", event);
                        if sink.send(event).is_err() {
                            info!("sink closed, shutting down");
                            return false;
                        }
                    }
                }
                Err(e) => {
                    warn!("event socket read error: {}", e);
                    break;
                }
            }
        }
        true
    }
}

impl EventSource for SocketEventSource {
    type Error = EventSourceError;

    /// Connect and forward events until the sink closes.
    ///
    /// This method **blocks** indefinitely and never returns an error:
    /// every connect/read failure is retried after a fixed backoff.
    /// Run it on a dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<WmEvent>) -> Result<(), Self::Error> {
        info!("listening for events on {}", self.path.display());
        loop {
            match UnixStream::connect(&self.path) {
                Ok(stream) => {
                    debug!("event socket connected");
                    if !self.pump(stream, &sink) {
                        return Ok(());
                    }
                    debug!("event socket closed, reconnecting");
                }
                Err(e) => {
                    debug!("event socket connect failed: {}", e);
                }
            }
            std::thread::sleep(self.backoff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::net::UnixListener;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Monotonic counter to generate unique socket paths per test.
    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    fn tmp_socket_path() -> PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!("hyprpill-test-{}-{}.sock", std::process::id(), id))
    }

    #[test]
    fn classify_matches_the_two_event_names() {
        assert_eq!(classify("workspace>>3"), Some(WmEvent::WorkspaceChanged));
        assert_eq!(
            classify("focusedmon>>DP-1,2"),
            Some(WmEvent::MonitorFocusChanged)
        );
    }

    #[test]
    fn classify_ignores_everything_else() {
        assert_eq!(classify("workspacev2>>3,3"), None);
        assert_eq!(classify("openwindow>>deadbeef"), None);
        assert_eq!(classify("workspace"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("garbage with no separator"), None);
    }

    #[test]
    fn events_arrive_over_the_socket() {
        let path = tmp_socket_path();
        let server = UnixListener::bind(&path).expect("bind");

        let (tx, rx) = mpsc::channel();
        let path_clone = path.clone();
        let _handle = std::thread::spawn(move || {
            let mut source =
                SocketEventSource::new(&path_clone).with_backoff(Duration::from_millis(10));
            let _ = source.run(tx);
        });

        {
            let (mut stream, _) = server.accept().expect("accept");
            // Fragmented write: the line is reassembled across reads.
            write!(stream, "works").unwrap();
            stream.flush().unwrap();
            std::thread::sleep(Duration::from_millis(50));
            write!(stream, "pace>>3\nopenwindow>>abc\nfocusedmon>>DP-1,2\n").unwrap();
        }

        std::thread::sleep(Duration::from_millis(150));
        let events: Vec<WmEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![WmEvent::WorkspaceChanged, WmEvent::MonitorFocusChanged]
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn listener_reconnects_after_disconnect() {
        let path = tmp_socket_path();
        let server = UnixListener::bind(&path).expect("bind");

        let (tx, rx) = mpsc::channel();
        let path_clone = path.clone();
        let _handle = std::thread::spawn(move || {
            let mut source =
                SocketEventSource::new(&path_clone).with_backoff(Duration::from_millis(10));
            let _ = source.run(tx);
        });

        {
            let (mut stream, _) = server.accept().expect("accept");
            writeln!(stream, "workspace>>1").unwrap();
        } // connection dropped here

        // The listener must come back for a second connection.
        let (mut stream, _) = server.accept().expect("re-accept");
        writeln!(stream, "workspace>>2").unwrap();
        drop(stream);

        std::thread::sleep(Duration::from_millis(150));
        let events: Vec<WmEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![WmEvent::WorkspaceChanged, WmEvent::WorkspaceChanged]
        );

        let _ = std::fs::remove_file(&path);
    }
}
