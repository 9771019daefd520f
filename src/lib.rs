//! **hyprpill** — a transient workspace-indicator overlay for Hyprland.
//!
//! Whenever the active workspace changes, a small pill of dots appears
//! briefly at the bottom of the screen — one dot per workspace slot,
//! with the active workspace enlarged and occupied workspaces
//! highlighted — then fades away.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::WorkspaceQuery`] — abstracts the read-only workspace
//!   queries so the tracker is not coupled to any specific compositor.
//! * [`traits::EventSource`] — abstracts the transport that delivers
//!   workspace-change notifications so the main loop is not coupled to
//!   any specific IPC mechanism.
//!
//! Concrete implementations live in [`hyprland`] (the `hyprctl` query
//! backend and the socket2 event listener).  The GTK4 layer-shell
//! overlay itself lives in [`overlay`].
//!
//! Two threads run for the process lifetime: the event listener, which
//! owns nothing but its socket and forwards [`traits::WmEvent`]s over a
//! channel, and the GTK main thread, which owns every piece of mutable
//! state and drives debouncing, fading and drawing from a single
//! cooperative tick.

pub mod config;
pub mod hyprland;
pub mod lock;
pub mod overlay;
pub mod palette;
pub mod traits;
pub mod workspaces;
