//! Where each focusable tile landed in the last frame.
//!
//! Terminal cells are converted to pixel equivalents (8×16 per cell) so the
//! engine's dead zone, padding and scoring read the same as on a TV screen.
//! Pages record their tiles while drawing; the engine measures from here.

use std::collections::HashMap;

use ratatui::layout::Rect;

use tvradio_core::focus::{Bounds, Measure, ScrollCommand, ScrollContainer};

pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

pub fn rect_bounds(rect: Rect) -> Bounds {
    Bounds::new(
        rect.x as f32 * CELL_WIDTH_PX,
        rect.y as f32 * CELL_HEIGHT_PX,
        rect.width as f32 * CELL_WIDTH_PX,
        rect.height as f32 * CELL_HEIGHT_PX,
    )
}

pub fn rows_px(rows: usize) -> f32 {
    rows as f32 * CELL_HEIGHT_PX
}

#[derive(Debug, Default)]
pub struct LayoutCache {
    scopes: HashMap<String, HashMap<String, Bounds>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame. Tiles that are not drawn again stay unmeasured.
    pub fn begin_frame(&mut self) {
        self.scopes.clear();
    }

    pub fn record(&mut self, scope: &str, id: String, bounds: Bounds) {
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .insert(id, bounds);
    }

    pub fn record_rect(&mut self, scope: &str, id: String, rect: Rect) {
        self.record(scope, id, rect_bounds(rect));
    }

    pub fn get(&self, scope: &str, id: &str) -> Option<Bounds> {
        self.scopes.get(scope)?.get(id).copied()
    }
}

impl Measure for LayoutCache {
    fn measure(&self, scope: &str, id: &str) -> Option<Bounds> {
        self.get(scope, id)
    }
}

/// Scroll state of a pane whose content is taller than its window.
/// All values are pixel equivalents.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaneScroll {
    top: f32,
    client: f32,
    content: f32,
}

impl PaneScroll {
    /// Update the window and content heights after a layout pass, keeping
    /// `top` inside the scrollable range.
    pub fn set_extent(&mut self, client_rows: u16, content_rows: usize) {
        self.client = rows_px(client_rows as usize);
        self.content = rows_px(content_rows);
        self.top = self.top.clamp(0.0, self.max_top());
    }

    pub fn apply(&mut self, command: ScrollCommand) {
        self.top = command.top.clamp(0.0, self.max_top());
    }

    pub fn reset(&mut self) {
        self.top = 0.0;
    }

    /// Whole rows scrolled past the top edge.
    pub fn top_rows(&self) -> i32 {
        (self.top / CELL_HEIGHT_PX).round() as i32
    }

    fn max_top(&self) -> f32 {
        (self.content - self.client).max(0.0)
    }
}

impl ScrollContainer for PaneScroll {
    fn scroll_top(&self) -> f32 {
        self.top
    }

    fn client_height(&self) -> f32 {
        self.client
    }

    fn scroll_height(&self) -> f32 {
        self.content.max(self.client)
    }
}
