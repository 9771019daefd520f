//! [`WorkspaceQuery`] implementation backed by `hyprctl`.
//!
//! Workspace state is read through two short-lived child processes,
//! `hyprctl activeworkspace -j` and `hyprctl workspaces -j`, whose JSON
//! output is reduced to the `id` fields.  The parse is deliberately
//! minimal: every field except `id` is ignored, and nothing about the
//! payload shape beyond "an object/array carrying `id` numbers" is
//! assumed.  Malformed output surfaces as an error the tracker absorbs
//! by keeping its previous state — it never panics.

use crate::traits::WorkspaceQuery;
use serde::Deserialize;
use std::process::Command;

/// `hyprctl`-backed workspace queries.
///
/// No state is held; each call spawns a fresh query process.
pub struct HyprctlQuery {
    command: String,
}

/// Errors that can occur when querying through `hyprctl`.
#[derive(Debug, thiserror::Error)]
pub enum HyprctlError {
    #[error("failed to run {0}: {1}")]
    Spawn(String, std::io::Error),
    #[error("unparsable {0} output: {1}")]
    Parse(&'static str, serde_json::Error),
}

impl Default for HyprctlQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl HyprctlQuery {
    /// Create a handle that invokes `hyprctl` from `$PATH`.
    pub fn new() -> Self {
        Self {
            command: "hyprctl".into(),
        }
    }

    /// Run one query subcommand and capture its stdout.
    fn run(&self, subcommand: &str) -> Result<String, HyprctlError> {
        let output = Command::new(&self.command)
            .args([subcommand, "-j"])
            .output()
            .map_err(|e| HyprctlError::Spawn(format!("{} {}", self.command, subcommand), e))?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

//  Minimal serde structs for the JSON we care about

/// The only field read from a workspace object; everything else in the
/// payload is ignored.
#[derive(Deserialize)]
struct IdOnly {
    id: i32,
}

/// Extract the id from an `activeworkspace -j` object.
fn parse_active(json: &str) -> Result<i32, serde_json::Error> {
    serde_json::from_str::<IdOnly>(json).map(|w| w.id)
}

/// Extract every id from a `workspaces -j` array.
fn parse_ids(json: &str) -> Result<Vec<i32>, serde_json::Error> {
    serde_json::from_str::<Vec<IdOnly>>(json).map(|v| v.into_iter().map(|w| w.id).collect())
}

impl WorkspaceQuery for HyprctlQuery {
    type Error = HyprctlError;

    fn active_workspace(&self) -> Result<i32, HyprctlError> {
        let json = self.run("activeworkspace")?;
        parse_active(&json).map_err(|e| HyprctlError::Parse("activeworkspace", e))
    }

    fn workspace_ids(&self) -> Result<Vec<i32>, HyprctlError> {
        let json = self.run("workspaces")?;
        parse_ids(&json).map_err(|e| HyprctlError::Parse("workspaces", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_parse_ignores_extra_fields() {
        let json = r#"{"id": 3, "name": "3", "monitor": "DP-1", "windows": 2}"#;
        assert_eq!(parse_active(json).unwrap(), 3);
    }

    #[test]
    fn active_parse_accepts_negative_special_ids() {
        let json = r#"{"id": -98, "name": "special:scratchpad"}"#;
        assert_eq!(parse_active(json).unwrap(), -98);
    }

    #[test]
    fn active_parse_fails_without_id() {
        assert!(parse_active(r#"{"name": "3"}"#).is_err());
        assert!(parse_active("not json").is_err());
        assert!(parse_active("").is_err());
    }

    #[test]
    fn ids_parse_collects_every_entry() {
        let json = r#"[
            {"id": 1, "monitor": "DP-1", "windows": 1},
            {"id": 4, "monitor": "DP-1", "windows": 3},
            {"id": -98, "name": "special:scratchpad"}
        ]"#;
        assert_eq!(parse_ids(json).unwrap(), vec![1, 4, -98]);
    }

    #[test]
    fn ids_parse_handles_empty_array() {
        assert_eq!(parse_ids("[]").unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn ids_parse_fails_on_malformed_payload() {
        assert!(parse_ids(r#"{"id": 1}"#).is_err());
        assert!(parse_ids("garbage").is_err());
    }

    #[test]
    fn spawn_failure_is_reported_not_panicked() {
        let query = HyprctlQuery {
            command: "/nonexistent/hyprpill-test-hyprctl".into(),
        };
        assert!(matches!(
            query.active_workspace(),
            Err(HyprctlError::Spawn(_, _))
        ));
    }
}
