//! The indicator overlay.
//!
//! [`state`] holds the debounce / fade / auto-hide state machine as
//! plain data advanced by a fixed-interval tick, [`draw`] the pill and
//! dot geometry plus the cairo draw function, and [`gtk`] the
//! layer-shell window and the GLib main loop that drives everything on
//! the main thread.

pub mod draw;
pub mod gtk;
pub mod state;
