//! Hard default values for profile settings.
//!
//! These are the last step of resolution: a setting that is unset on a profile
//! and on every one of its ancestors resolves to the value here.

mod appearance;
mod session;

/// Name given to a profile that never sets one.
pub const NAME: &str = "Default";

// ── Appearance ─────────────────────────────────────────────────────────────
pub use appearance::{
    acrylic_opacity, background_image_opacity, color_scheme, cursor_height, font_face, font_size,
    font_weight, icon, padding,
};

// ── Session & behaviour ────────────────────────────────────────────────────
pub use session::{commandline, history_size};
