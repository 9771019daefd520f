//! Entry point for the **hyprpill** daemon.
//!
//! Acquires the single-instance lock, loads configuration and the theme
//! palette, spawns the Hyprland event listener on a background thread,
//! and hands the main thread to the GTK overlay loop.
//!
//! The daemon takes no command-line arguments; `RUST_LOG` controls
//! verbosity, SIGUSR1 peeks the indicator, SIGUSR2 reloads the palette,
//! and SIGTERM/SIGINT shut it down.

use hyprpill::config::Config;
use hyprpill::hyprland::events::SocketEventSource;
use hyprpill::hyprland::wm::HyprctlQuery;
use hyprpill::lock::{InstanceLock, LockError};
use hyprpill::palette::Palette;
use hyprpill::traits::{EventSource, WmEvent};
use hyprpill::workspaces::Tracker;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::mpsc;

/// Resolve the user config base directory (`$XDG_CONFIG_HOME`).
fn config_base() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base)
}

/// Try to load the config from `$XDG_CONFIG_HOME/hyprpill/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_base().join("hyprpill").join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

/// The active theme's palette file, as published by the theme manager.
fn palette_path() -> PathBuf {
    config_base()
        .join("current")
        .join("theme")
        .join("hyprland-palette.conf")
}

fn spawn_event_source(tx: mpsc::Sender<WmEvent>) {
    std::thread::spawn(move || match SocketEventSource::from_env() {
        Ok(mut source) => {
            if let Err(e) = source.run(tx) {
                error!("event source: {}", e);
            }
        }
        Err(e) => {
            // The daemon stays useful without events: SIGUSR1 still
            // shows the indicator on demand.
            warn!("{}; workspace events disabled for this run", e);
        }
    });
}

fn main() {
    env_logger::init();

    let _lock = match InstanceLock::acquire() {
        Ok(lock) => lock,
        Err(LockError::Contended) => {
            info!("another instance is already running");
            return;
        }
        Err(e) => {
            warn!("could not acquire instance lock: {}", e);
            return;
        }
    };

    let config = load_config();

    let palette_path = palette_path();
    let mut palette = Palette::default();
    palette.load(&palette_path);

    let (tx, rx) = mpsc::channel::<WmEvent>();
    spawn_event_source(tx);

    let tracker = Tracker::new(
        HyprctlQuery::new(),
        config.overlay.persistent_slots,
        config.overlay.max_slots,
    );

    hyprpill::overlay::gtk::run_main_loop(tracker, palette, palette_path, rx, config.overlay);
}
