use ratatui::style::Color;

// Centralized theme colors. Keep these as small helpers so swapping the
// palette stays a one-file change.

pub fn frame_fg() -> Color {
    Color::White
}

/// Top row of the background ramp shown while the pointer is inside.
pub fn ramp_top() -> Color {
    Color::Indexed(17)
}

// Shadow tones under the content row.
pub fn shadow_heavy() -> Color {
    Color::Indexed(232)
}
pub fn shadow_light() -> Color {
    Color::Indexed(236)
}
