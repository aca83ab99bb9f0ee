//! Status bar — now playing, last message, remote platform and key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use tvradio_core::catalog::Station;
use tvradio_core::focus::RemotePlatform;

use crate::theme::{C_ACCENT, C_KEY_HINT, C_MUTED, C_PLAYING, C_SECONDARY, C_SEPARATOR};

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Playback state and the most recent status message.
pub fn draw_now_playing(
    frame: &mut Frame,
    area: Rect,
    playing: Option<&Station>,
    message: Option<&str>,
) {
    let mut spans = match playing {
        Some(station) => vec![
            Span::styled("● ", Style::default().fg(C_PLAYING)),
            Span::styled(
                station.name.clone(),
                Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD),
            ),
        ],
        None => vec![
            Span::styled("○ ", Style::default().fg(C_ACCENT)),
            Span::styled("stopped", Style::default().fg(C_MUTED)),
        ],
    };
    if let Some(msg) = message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(msg.to_string(), Style::default().fg(C_SECONDARY)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Keybindings footer (one row). The remote's BACK label follows the
/// configured platform.
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, platform: RemotePlatform, modal_open: bool) {
    let label = if modal_open { "MODAL" } else { "BROWSE" };
    let keys = if modal_open {
        " ↑↓ choose  Enter apply  Esc/Backspace close  q quit"
    } else {
        " ←↑↓→ move  Enter select  Esc/Backspace back  s stop  q quit"
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(C_KEY_HINT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("[{}]", platform.label()), Style::default().fg(C_SECONDARY)),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
