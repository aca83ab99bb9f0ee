//! Pages and modals. Each one owns its content, declares a `ScopeLayout`
//! for the focus engine and records tile geometry while drawing.

pub mod country_picker;
pub mod home;
pub mod search;
pub mod sidebar;

use tvradio_core::catalog::Station;
use tvradio_core::focus::{FocusEngine, FocusVisual};

use crate::action::Action;
use crate::layout::LayoutCache;

/// Read-only app state plus the layout cache, handed to page draws.
pub struct DrawContext<'a> {
    pub engine: &'a FocusEngine<Action>,
    pub cache: &'a mut LayoutCache,
    pub playing: Option<&'a Station>,
}

impl DrawContext<'_> {
    pub fn visual(&self, scope: &str, index: usize) -> FocusVisual {
        self.engine.visual_state(scope, index)
    }

    pub fn is_playing(&self, station: &Station) -> bool {
        self.playing.map_or(false, |p| p.url == station.url)
    }
}

/// Rows needed for `len` items laid out `columns` wide.
pub fn grid_rows(len: usize, columns: usize) -> usize {
    len.div_ceil(columns.max(1))
}
