//! Indicator colors and the theme-palette loader.
//!
//! The active theme publishes its colors as a Hyprland variable file
//! (`$XDG_CONFIG_HOME/current/theme/hyprland-palette.conf`) containing
//! lines of the form
//!
//! ```text
//! $accent = rgba(89b4fac8)
//! ```
//!
//! [`Palette::load`] scans that file and maps the well-known variable
//! names onto the four indicator roles.  A missing file is not an error:
//! the compiled-in defaults (Catppuccin Mocha) stay in effect.  Reloading
//! at runtime only overwrites the roles actually present in the file.

use log::{debug, info};
use std::path::Path;

/// An RGBA color, all channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// This color with its alpha replaced.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Parse `RRGGBBAA` (exactly eight hex digits).
    pub fn from_hex8(hex: &str) -> Option<Self> {
        if hex.len() != 8 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f64 / 255.0)
                .ok()
        };
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: channel(6)?,
        })
    }
}

// Per-role alpha overrides applied when a palette color is adopted.
// The theme file carries UI-wide colors; the indicator wants its own
// translucency for everything except the accent.
const BG_ALPHA: f64 = 0.75;
const FG_ALPHA: f64 = 0.55;
const DIM_ALPHA: f64 = 0.25;

/// The four semantic color roles of the indicator.
///
/// Every role always holds a valid color: either a value parsed from the
/// palette file or the compiled-in default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// The pill background.
    pub background: Rgba,
    /// The active-workspace dot.
    pub active: Rgba,
    /// Dots for occupied workspaces.
    pub occupied: Rgba,
    /// Dots for empty workspace slots.
    pub dim: Rgba,
}

impl Default for Palette {
    /// Catppuccin Mocha fallbacks.
    fn default() -> Self {
        Self {
            background: Rgba::new(0.118, 0.118, 0.180, BG_ALPHA),
            active: Rgba::new(0.537, 0.705, 0.980, 1.0),
            occupied: Rgba::new(0.804, 0.839, 0.957, FG_ALPHA),
            dim: Rgba::new(0.576, 0.600, 0.698, DIM_ALPHA),
        }
    }
}

impl Palette {
    /// Load role colors from the palette file at `path`, keeping the
    /// current value of every role the file does not mention.
    ///
    /// Safe to call again at any time (e.g. on a reload signal).
    pub fn load(&mut self, path: &Path) {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => {
                info!("no palette at {}, using fallback colors", path.display());
                return;
            }
        };

        let mut applied = 0;
        for line in contents.lines() {
            let Some((name, color)) = parse_line(line) else {
                continue;
            };
            if self.apply(name, color) {
                applied += 1;
            }
        }
        debug!("palette {}: {} role(s) updated", path.display(), applied);
    }

    /// Map a palette variable name onto a role.  Returns whether the
    /// name was recognised.
    fn apply(&mut self, name: &str, color: Rgba) -> bool {
        match name {
            "background" => self.background = color.with_alpha(BG_ALPHA),
            // "blue" doubles as the accent in themes without one.
            "accent" | "blue" => self.active = color,
            "foreground" => self.occupied = color.with_alpha(FG_ALPHA),
            "comment" => self.dim = color.with_alpha(DIM_ALPHA),
            _ => return false,
        }
        true
    }
}

/// Parse one palette line of the exact shape `$<name> = rgba(<8 hex>)`.
///
/// Anything else — comments, other directives, malformed values — yields
/// `None` and is skipped by the loader without complaint.
fn parse_line(line: &str) -> Option<(&str, Rgba)> {
    let rest = line.trim_start().strip_prefix('$')?;
    let (name, value) = rest.split_once('=')?;
    let name = name.trim();
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return None;
    }
    let hex = value
        .trim()
        .strip_prefix("rgba(")?
        .strip_suffix(')')?;
    Some((name, Rgba::from_hex8(hex)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Monotonic counter to generate unique file paths per test.
    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    fn tmp_palette(contents: &str) -> PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "hyprpill-palette-{}-{}.conf",
            std::process::id(),
            id
        ));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn hex8_parses_channels() {
        let c = Rgba::from_hex8("89b4fac8").unwrap();
        assert!(close(c.r, 0.537));
        assert!(close(c.g, 0.705));
        assert!(close(c.b, 0.980));
        assert!(close(c.a, 0.784));
    }

    #[test]
    fn hex8_rejects_bad_input() {
        assert!(Rgba::from_hex8("89b4fa").is_none());
        assert!(Rgba::from_hex8("89b4fac8ff").is_none());
        assert!(Rgba::from_hex8("89b4fagg").is_none());
    }

    #[test]
    fn parse_line_accepts_exact_shape() {
        let (name, c) = parse_line("$accent = rgba(ff000080)").unwrap();
        assert_eq!(name, "accent");
        assert!(close(c.r, 1.0));
        assert!(close(c.a, 0.502));
    }

    #[test]
    fn parse_line_skips_everything_else() {
        assert!(parse_line("# a comment").is_none());
        assert!(parse_line("accent = rgba(ff000080)").is_none());
        assert!(parse_line("$accent = rgb(ff0000)").is_none());
        assert!(parse_line("$accent = rgba(xyz)").is_none());
        assert!(parse_line("$ = rgba(ff000080)").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn accent_sets_active_with_file_alpha() {
        let path = tmp_palette("$accent = rgba(89b4fac8)\n");
        let mut p = Palette::default();
        p.load(&path);
        assert!(close(p.active.r, 0.537));
        assert!(close(p.active.g, 0.705));
        assert!(close(p.active.b, 0.980));
        assert!(close(p.active.a, 0.784));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn fixed_alpha_roles_ignore_file_alpha() {
        let path = tmp_palette(
            "$background = rgba(1e1e2eff)\n$foreground = rgba(cdd6f4ff)\n$comment = rgba(9399b2ff)\n",
        );
        let mut p = Palette::default();
        p.load(&path);
        assert!(close(p.background.a, 0.75));
        assert!(close(p.occupied.a, 0.55));
        assert!(close(p.dim.a, 0.25));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let mut p = Palette::default();
        p.load(Path::new("/nonexistent/hyprpill-test/palette.conf"));
        assert_eq!(p, Palette::default());
    }

    #[test]
    fn partial_reload_keeps_other_roles() {
        let full = tmp_palette("$accent = rgba(ff0000ff)\n$comment = rgba(00ff00ff)\n");
        let mut p = Palette::default();
        p.load(&full);
        let active_before = p.active;
        let dim_before = p.dim;

        // Second pass only mentions the background: the other three
        // roles must keep whatever they held before the reload.
        let partial = tmp_palette("$background = rgba(0000ffff)\n");
        p.load(&partial);
        assert!(close(p.background.b, 1.0));
        assert_eq!(p.active, active_before);
        assert_eq!(p.dim, dim_before);
        assert_eq!(p.occupied, Palette::default().occupied);

        std::fs::remove_file(&full).unwrap();
        std::fs::remove_file(&partial).unwrap();
    }

    #[test]
    fn blue_is_an_accent_fallback() {
        let path = tmp_palette("$blue = rgba(0000ffff)\n");
        let mut p = Palette::default();
        p.load(&path);
        assert!(close(p.active.b, 1.0));
        std::fs::remove_file(&path).unwrap();
    }
}
