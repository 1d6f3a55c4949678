use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

use crate::data::profile::BadgeTone;

// ---------------------------------------------------------------------------
// Hex colours → Color32
// ---------------------------------------------------------------------------

/// Parse `#rrggbb`. Malformed input falls back to grey so a typo in the
/// table below shows up on screen instead of aborting the frame.
pub fn hex(code: &str) -> Color32 {
    match Srgb::<u8>::from_str(code) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("bad colour {code:?}: {e}");
            Color32::GRAY
        }
    }
}

/// Same as [`hex`] with an alpha channel (0.0–1.0).
pub fn hex_alpha(code: &str, alpha: f32) -> Color32 {
    let c = hex(code);
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

pub const ACCENT: &str = "#3b82f6";
pub const GPA_LINE: &str = "#8b5cf6";
pub const GRID: &str = "#e5e7eb";
pub const MUTED_TEXT: &str = "#6b7280";

/// `(foreground, background)` of a badge.
pub fn badge_colors(tone: BadgeTone) -> (Color32, Color32) {
    let (fg, bg) = match tone {
        BadgeTone::Help | BadgeTone::Psych1 => ("#dc2626", "#fee2e2"),
        BadgeTone::NoHelp | BadgeTone::Psych3 => ("#16a34a", "#dcfce7"),
        BadgeTone::Scholarship | BadgeTone::Psych2 => ("#d97706", "#fef3c7"),
        BadgeTone::None => ("#6b7280", "#f3f4f6"),
    };
    (hex(fg), hex(bg))
}
