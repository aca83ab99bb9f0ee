//! Sidebar — the page menu shared by every page, always section 0.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
    Frame,
};

use tvradio_core::focus::binding::item_id;
use tvradio_core::focus::Zone;

use super::DrawContext;
use crate::action::{Action, Route};
use crate::theme::style_unfocused_border;
use crate::widgets::tile::Tile;

pub const WIDTH: u16 = 22;

/// Rows between sidebar entries.
const PITCH: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    Home,
    Genres,
    Search,
    Countries,
    Recent,
    Exit,
}

impl SidebarEntry {
    pub const ALL: [SidebarEntry; 6] = [
        SidebarEntry::Home,
        SidebarEntry::Genres,
        SidebarEntry::Search,
        SidebarEntry::Countries,
        SidebarEntry::Recent,
        SidebarEntry::Exit,
    ];
    pub const LEN: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            SidebarEntry::Home => "Home",
            SidebarEntry::Genres => "Genres",
            SidebarEntry::Search => "Search",
            SidebarEntry::Countries => "Countries",
            SidebarEntry::Recent => "Recently played",
            SidebarEntry::Exit => "Exit",
        }
    }

    pub fn action(self) -> Action {
        match self {
            SidebarEntry::Home => Action::Navigate(Route::Home),
            SidebarEntry::Genres => Action::ShowGenres,
            SidebarEntry::Search => Action::Navigate(Route::Search),
            SidebarEntry::Countries => Action::OpenCountryPicker,
            SidebarEntry::Recent => Action::ShowRecent,
            SidebarEntry::Exit => Action::Quit,
        }
    }
}

/// Draw the menu into `area` and record each entry under `scope`.
/// Sidebar entries are always the first items of a page scope.
pub fn draw(frame: &mut Frame, area: Rect, scope: &str, ctx: &mut DrawContext) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(style_unfocused_border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    for entry in SidebarEntry::ALL {
        let i = entry.index();
        let y = inner.y + 1 + i as u16 * PITCH;
        let rect = Rect::new(inner.x, y, inner.width, 1);
        if rect.bottom() > inner.bottom() {
            break;
        }
        ctx.cache.record_rect(scope, item_id(&Zone::Sidebar, i), rect);
        Tile::new(entry.label(), ctx.visual(scope, i)).draw_row(frame, rect);
    }
}
