//! Search page: a scrolling result list beside a column of recently played
//! stations. No grids here; movement between the columns is geometric.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use tvradio_core::catalog::Station;
use tvradio_core::focus::binding::item_id;
use tvradio_core::focus::{Bounds, ItemExtent, ScopeBinding, ScopeLayout, Zone};

use super::sidebar::{self, SidebarEntry};
use super::DrawContext;
use crate::action::{Action, Route};
use crate::layout::{rows_px, PaneScroll, CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::theme::style_muted;
use crate::widgets::pane_chrome::pane_chrome;
use crate::widgets::tile::Tile;

pub const SCOPE: &str = "search";

const RECENT_WIDTH: u16 = 34;
const RECENT_ROWS: u16 = 3;

const SIDEBAR: usize = 0;
const RESULTS: usize = 1;
const RECENT: usize = 2;

#[derive(Debug, PartialEq)]
pub enum SearchTarget<'a> {
    Sidebar(SidebarEntry),
    Result(&'a Station),
    Recent(&'a Station),
}

impl SearchTarget<'_> {
    pub fn action(&self) -> Action {
        match self {
            SearchTarget::Sidebar(entry) => entry.action(),
            SearchTarget::Result(station) | SearchTarget::Recent(station) => {
                Action::Play((*station).clone())
            }
        }
    }
}

#[derive(Default)]
pub struct SearchPage {
    genre: Option<String>,
    results: Vec<Station>,
    recent: Vec<Station>,
    scroll: PaneScroll,
}

impl SearchPage {
    pub fn new(results: Vec<Station>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    pub fn set_query(&mut self, genre: Option<String>, results: Vec<Station>) {
        self.genre = genre;
        self.results = results;
        self.scroll.reset();
    }

    pub fn set_recent(&mut self, recent: Vec<Station>) {
        self.recent = recent;
    }

    fn sections(&self) -> ScopeLayout {
        ScopeLayout::new()
            .section(Zone::Sidebar, SidebarEntry::LEN, 1)
            .section(Zone::named("results"), self.results.len(), 1)
            .section(Zone::named("recent"), self.recent.len(), 1)
    }

    pub fn layout(&self) -> ScopeLayout {
        let layout = self.sections();
        match self.first_content() {
            Some(first) => layout.link_right(SIDEBAR, first),
            None => layout,
        }
    }

    pub fn binding(&self) -> ScopeBinding<Action> {
        ScopeBinding::page(SCOPE, self.layout())
            .initial_index(self.first_content().unwrap_or(0))
            .on_select(|index| vec![Action::SearchSelect(index)])
            .on_back(|| vec![Action::Navigate(Route::Home)])
    }

    fn first_content(&self) -> Option<usize> {
        let layout = self.sections();
        if !self.results.is_empty() {
            Some(layout.section_start(RESULTS))
        } else if !self.recent.is_empty() {
            Some(layout.section_start(RECENT))
        } else {
            None
        }
    }

    /// Flat index of the first recently played station.
    pub fn recent_start(&self) -> Option<usize> {
        (!self.recent.is_empty()).then(|| self.sections().section_start(RECENT))
    }

    pub fn target(&self, index: usize) -> Option<SearchTarget<'_>> {
        let (section, rel) = self.sections().locate(index)?;
        match section {
            SIDEBAR => SidebarEntry::from_index(rel).map(SearchTarget::Sidebar),
            RESULTS => self.results.get(rel).map(SearchTarget::Result),
            RECENT => self.recent.get(rel).map(SearchTarget::Recent),
            _ => None,
        }
    }

    pub fn focused_extent(&self, index: usize) -> Option<ItemExtent> {
        match self.sections().locate(index)? {
            (RESULTS, rel) => Some(ItemExtent::from_offsets([rows_px(rel)], rows_px(1))),
            _ => None,
        }
    }

    pub fn scroll(&self) -> &PaneScroll {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut PaneScroll {
        &mut self.scroll
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &mut DrawContext) {
        let [side, main] =
            Layout::horizontal([Constraint::Length(sidebar::WIDTH), Constraint::Min(0)]).areas(area);
        sidebar::draw(frame, side, SCOPE, ctx);

        let [results_area, recent_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(RECENT_WIDTH),
        ])
        .spacing(2)
        .areas(main);

        let active = ctx
            .engine
            .current_in(SCOPE)
            .and_then(|i| self.sections().locate(i))
            .map(|(section, _)| section);
        let sections = self.sections();

        // Results
        let title = match &self.genre {
            Some(genre) => format!("{} · {} stations", genre, self.results.len()),
            None => format!("All stations · {}", self.results.len()),
        };
        let block = pane_chrome(&title, active == Some(RESULTS), None);
        let inner = block.inner(results_area);
        frame.render_widget(block, results_area);
        self.scroll.set_extent(inner.height, self.results.len());
        let top_rows = self.scroll.top_rows();
        let start = sections.section_start(RESULTS);
        for (rel, station) in self.results.iter().enumerate() {
            let y = inner.y as i32 + rel as i32 - top_rows;
            ctx.cache.record(
                SCOPE,
                item_id(&Zone::named("results"), rel),
                Bounds::new(
                    inner.x as f32 * CELL_WIDTH_PX,
                    y as f32 * CELL_HEIGHT_PX,
                    inner.width as f32 * CELL_WIDTH_PX,
                    CELL_HEIGHT_PX,
                ),
            );
            if y < inner.y as i32 || y >= inner.bottom() as i32 {
                continue;
            }
            let rect = Rect::new(inner.x, y as u16, inner.width, 1);
            Tile::new(&station.name, ctx.visual(SCOPE, start + rel))
                .detail(&station.city)
                .playing(ctx.is_playing(station))
                .draw_row(frame, rect);
        }

        // Recently played
        let block = pane_chrome("Recently played", active == Some(RECENT), None);
        let inner = block.inner(recent_area);
        frame.render_widget(block, recent_area);
        if self.recent.is_empty() {
            frame.render_widget(Paragraph::new(Line::styled("Nothing yet", style_muted())), inner);
            return;
        }
        let start = sections.section_start(RECENT);
        for (rel, station) in self.recent.iter().enumerate() {
            let rect = Rect::new(
                inner.x,
                inner.y + rel as u16 * RECENT_ROWS,
                inner.width,
                RECENT_ROWS,
            );
            if rect.bottom() > inner.bottom() {
                break;
            }
            ctx.cache
                .record_rect(SCOPE, item_id(&Zone::named("recent"), rel), rect);
            Tile::new(&station.name, ctx.visual(SCOPE, start + rel))
                .detail(&station.genre)
                .playing(ctx.is_playing(station))
                .draw_boxed(frame, rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations(prefix: &str, n: usize) -> Vec<Station> {
        (0..n)
            .map(|i| Station {
                name: format!("{}{}", prefix, i),
                url: format!("http://{}{}", prefix, i),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_sidebar_right_enters_results_then_recent() {
        use tvradio_core::focus::{Direction, Target};

        let mut page = SearchPage::new(stations("r", 3));
        let items = page.layout().items();
        assert_eq!(items[0].overrides.get(Direction::Right), Some(&Target::Index(6)));

        page.set_query(None, Vec::new());
        page.set_recent(stations("p", 2));
        let items = page.layout().items();
        assert_eq!(items[4].overrides.get(Direction::Right), Some(&Target::Index(6)));
        assert_eq!(page.recent_start(), Some(6));
    }

    #[test]
    fn test_empty_page_has_no_links() {
        let page = SearchPage::default();
        assert!(page.layout().items().iter().all(|i| i.overrides.is_empty()));
        assert_eq!(page.recent_start(), None);
    }

    #[test]
    fn test_recent_cards_outside_the_pane_are_not_measured() {
        let mut page = SearchPage::new(stations("r", 20));
        page.set_recent(stations("p", 6));
        let cache = crate::pages::testing::draw_once(100, 11, |frame, area, ctx| {
            page.draw(frame, area, ctx)
        });
        let recent = |i| item_id(&Zone::named("recent"), i);
        // Ten rows under the pane title hold three cards.
        for i in 0..3 {
            assert!(cache.get(SCOPE, &recent(i)).is_some(), "card {}", i);
        }
        assert!(cache.get(SCOPE, &recent(3)).is_none());
        // The scrolling result list keeps positions for rows below the window.
        assert!(cache.get(SCOPE, &item_id(&Zone::named("results"), 19)).is_some());
    }

    #[test]
    fn test_targets() {
        let mut page = SearchPage::new(stations("r", 2));
        page.set_recent(stations("p", 1));
        assert!(matches!(page.target(7), Some(SearchTarget::Result(s)) if s.name == "r1"));
        assert!(matches!(page.target(8), Some(SearchTarget::Recent(s)) if s.name == "p0"));
        assert!(matches!(page.target(8).map(|t| t.action()), Some(Action::Play(_))));
        assert_eq!(page.focused_extent(7).map(|e| e.top), Some(CELL_HEIGHT_PX));
        assert_eq!(page.focused_extent(8), None);
    }
}
