//! Hyprland-specific implementations.
//!
//! This module provides concrete backends for the
//! [`WorkspaceQuery`](crate::traits::WorkspaceQuery) and
//! [`EventSource`](crate::traits::EventSource) traits, powered by
//! `hyprctl` and Hyprland's event socket.
//!
//! Nothing outside this module should reference Hyprland directly.

pub mod events;
pub mod wm;
