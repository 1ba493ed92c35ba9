//! Default values for appearance settings.

pub fn icon() -> String {
    String::new() // No icon; the UI falls back to its own glyph
}

pub fn font_face() -> String {
    "Cascadia Mono".to_string()
}

pub fn font_size() -> i32 {
    12
}

pub fn font_weight() -> u16 {
    400 // Normal
}

pub fn padding() -> String {
    "8, 8, 8, 8".to_string()
}

pub fn acrylic_opacity() -> f64 {
    0.5
}

pub fn background_image_opacity() -> f64 {
    1.0
}

pub fn color_scheme() -> String {
    "Campbell".to_string()
}

pub fn cursor_height() -> u32 {
    25 // Percent of the cell, only used by the vintage cursor
}
