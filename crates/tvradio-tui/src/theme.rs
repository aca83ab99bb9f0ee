//! Color palette and style constants for the TV remote UI.

use ratatui::style::{Color, Modifier, Style};

use tvradio_core::focus::FocusVisual;

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_ACCENT: Color = Color::Rgb(255, 95, 95);
pub const C_PLAYING: Color = Color::Rgb(80, 200, 120);
pub const C_LOADING: Color = Color::Rgb(255, 184, 80);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 28, 40);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_SUSPENDED: Color = Color::Rgb(70, 62, 110); // dimmed purple under an open modal
pub const C_LOCATION: Color = Color::Rgb(100, 160, 130);
pub const C_KEY_HINT: Color = Color::Rgb(90, 90, 115);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_playing() -> Style {
    Style::default().fg(C_PLAYING)
}

pub fn style_selected_focused() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

/// Border style for a focusable tile in the given focus state.
pub fn tile_border(visual: FocusVisual) -> Style {
    match visual {
        FocusVisual::Focused => style_focused_border().add_modifier(Modifier::BOLD),
        FocusVisual::Suspended => Style::default().fg(C_SUSPENDED),
        FocusVisual::Idle => style_unfocused_border(),
    }
}

/// Label style for a focusable tile in the given focus state.
pub fn tile_label(visual: FocusVisual) -> Style {
    match visual {
        FocusVisual::Focused => style_selected_focused(),
        FocusVisual::Suspended => style_secondary().add_modifier(Modifier::BOLD),
        FocusVisual::Idle => style_default(),
    }
}
