//! Tile — one focusable box: a sidebar entry, a genre card or a station card.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use tvradio_core::focus::FocusVisual;

use crate::theme::{style_playing, style_secondary, tile_border, tile_label};

/// Cut `text` to at most `max` display columns, ending in `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

pub struct Tile<'a> {
    pub label: &'a str,
    pub detail: Option<&'a str>,
    pub visual: FocusVisual,
    pub playing: bool,
}

impl<'a> Tile<'a> {
    pub fn new(label: &'a str, visual: FocusVisual) -> Self {
        Self {
            label,
            detail: None,
            visual,
            playing: false,
        }
    }

    pub fn detail(mut self, detail: &'a str) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn playing(mut self, playing: bool) -> Self {
        self.playing = playing;
        self
    }

    /// Bordered card, three rows tall.
    pub fn draw_boxed(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(tile_border(self.visual));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(self.line(inner.width as usize)), inner);
    }

    /// Single row with a focus marker, for lists.
    pub fn draw_row(&self, frame: &mut Frame, area: Rect) {
        let marker = match self.visual {
            FocusVisual::Focused => "▶ ",
            FocusVisual::Suspended => "▷ ",
            FocusVisual::Idle => "  ",
        };
        let mut spans = vec![Span::styled(marker, tile_border(self.visual))];
        spans.extend(self.line((area.width as usize).saturating_sub(2)).spans);
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn line(&self, width: usize) -> Line<'static> {
        let label_style: Style = if self.playing {
            style_playing()
        } else {
            tile_label(self.visual)
        };
        let label = truncate(self.label, width);
        let mut spans = vec![Span::styled(label.clone(), label_style)];
        if let Some(detail) = self.detail {
            let room = width.saturating_sub(label.width() + 3);
            if room > 2 {
                spans.push(Span::styled(
                    format!(" · {}", truncate(detail, room)),
                    style_secondary(),
                ));
            }
        }
        Line::from(spans)
    }
}
