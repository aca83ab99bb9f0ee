//! Home page: sidebar, the country selector, a genre grid and a lazily
//! loaded grid of stations.
//!
//! ```text
//!   sidebar │ [Country: All ▾]
//!           │ ── Genres ─────────────────────
//!           │ [ambient] [lounge] [indie] [rock]
//!           │ ...
//!           │ ── Stations ───────────────────
//!           │ [  ]      [  ]     [  ]    [  ]   ← scrolls, pages in on demand
//! ```

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};
use tracing::debug;

use tvradio_core::catalog::{Station, StationFilter, StationPage};
use tvradio_core::focus::binding::item_id;
use tvradio_core::focus::{
    Axis, Bounds, ItemExtent, ScopeBinding, ScopeLayout, Zone, ZoneIsolation, ZoneKind, ZoneMatch,
};

use super::sidebar::{self, SidebarEntry};
use super::{grid_rows, DrawContext};
use crate::action::Action;
use crate::fetch::PageRequest;
use crate::layout::{rows_px, PaneScroll, CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::theme::{style_muted, C_LOADING, C_LOCATION};
use crate::widgets::pane_chrome::{pane_chrome, Badge};
use crate::widgets::tile::Tile;

pub const SCOPE: &str = "home";

const COLUMNS: usize = 4;
const TILE_ROWS: u16 = 3;
const HEADER_WIDTH: u16 = 34;

const SIDEBAR: usize = 0;
const HEADER: usize = 1;
const GENRES: usize = 2;
const STATIONS: usize = 3;

/// What a flat focus index on this page refers to.
#[derive(Debug, PartialEq)]
pub enum HomeTarget<'a> {
    Sidebar(SidebarEntry),
    CountryButton,
    Genre(&'a str),
    Station(&'a Station),
}

impl HomeTarget<'_> {
    pub fn action(&self) -> Action {
        match self {
            HomeTarget::Sidebar(entry) => entry.action(),
            HomeTarget::CountryButton => Action::OpenCountryPicker,
            HomeTarget::Genre(genre) => Action::ShowGenre(genre.to_string()),
            HomeTarget::Station(station) => Action::Play((*station).clone()),
        }
    }
}

pub struct HomePage {
    genres: Vec<String>,
    stations: Vec<Station>,
    filter: StationFilter,
    country_label: String,
    next_page: usize,
    has_more: bool,
    loading: bool,
    /// Bumped whenever the filter changes; pages from older fetches are dropped.
    generation: u64,
    scroll: PaneScroll,
}

impl HomePage {
    pub fn new(genres: Vec<String>) -> Self {
        Self {
            genres,
            stations: Vec::new(),
            filter: StationFilter::default(),
            country_label: "All countries".to_string(),
            next_page: 0,
            has_more: true,
            loading: false,
            generation: 0,
            scroll: PaneScroll::default(),
        }
    }

    fn sections(&self) -> ScopeLayout {
        ScopeLayout::new()
            .section(Zone::Sidebar, SidebarEntry::LEN, 1)
            .section(Zone::HeaderControl, 1, 1)
            .section(Zone::grid("genres"), self.genres.len(), COLUMNS)
            .section(Zone::grid("stations"), self.stations.len(), COLUMNS)
    }

    /// Sections plus the authored links between them:
    /// sidebar RIGHT enters the genre grid, grid left edges return to their
    /// sidebar entry, the genre top row goes UP to the country selector and
    /// the two grids are joined column to column. The country selector
    /// never moves sideways into a grid.
    pub fn layout(&self) -> ScopeLayout {
        let layout = self.sections().isolation(ZoneIsolation::default().forbid(
            Axis::Horizontal,
            ZoneMatch::Kind(ZoneKind::HeaderControl),
            ZoneMatch::Kind(ZoneKind::ContentGrid),
        ));
        let header = layout.section_start(HEADER);
        let genres = layout.section_start(GENRES);
        let layout = layout
            .link_left_edge(GENRES, SidebarEntry::Genres.index())
            .link_left_edge(STATIONS, SidebarEntry::Home.index());
        if self.genres.is_empty() {
            layout
                .link_right(SIDEBAR, header)
                .link_top_edge(STATIONS, header)
        } else {
            layout
                .link_right(SIDEBAR, genres)
                .link_top_edge(GENRES, header)
                .link_below(GENRES, STATIONS)
        }
    }

    pub fn binding(&self) -> ScopeBinding<Action> {
        ScopeBinding::page(SCOPE, self.layout())
            .initial_index(self.genre_start())
            .on_select(|index| vec![Action::HomeSelect(index)])
            .on_back(|| vec![Action::Status("Press q to leave".to_string())])
    }

    pub fn genre_start(&self) -> usize {
        self.sections().section_start(GENRES)
    }

    pub fn target(&self, index: usize) -> Option<HomeTarget<'_>> {
        let (section, rel) = self.sections().locate(index)?;
        match section {
            SIDEBAR => SidebarEntry::from_index(rel).map(HomeTarget::Sidebar),
            HEADER => Some(HomeTarget::CountryButton),
            GENRES => self.genres.get(rel).map(|g| HomeTarget::Genre(g.as_str())),
            STATIONS => self.stations.get(rel).map(HomeTarget::Station),
            _ => None,
        }
    }

    pub fn filter(&self) -> &StationFilter {
        &self.filter
    }

    /// Switch the country filter. Loaded stations are discarded and paging
    /// starts over.
    pub fn set_country(&mut self, code: Option<String>, label: String) {
        self.filter.country = code;
        self.country_label = label;
        self.stations.clear();
        self.next_page = 0;
        self.has_more = true;
        self.loading = false;
        self.generation += 1;
        self.scroll.reset();
    }

    /// Claim the next page fetch, or `None` when one is in flight or the
    /// catalogue is exhausted.
    pub fn begin_fetch(&mut self, page_size: usize) -> Option<PageRequest> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some(PageRequest {
            generation: self.generation,
            filter: self.filter.clone(),
            page: self.next_page,
            page_size,
        })
    }

    /// Append a fetched page. Returns false when it belongs to an older
    /// filter or arrives out of order.
    pub fn apply_page(&mut self, generation: u64, page: StationPage) -> bool {
        if generation != self.generation || page.page != self.next_page {
            debug!(
                "home: dropping page {} (generation {}, want page {} of generation {})",
                page.page, generation, self.next_page, self.generation
            );
            return false;
        }
        self.stations.extend(page.stations);
        self.next_page += 1;
        self.has_more = page.has_more;
        self.loading = false;
        true
    }

    /// Position of a focused station inside the scrolling station pane.
    pub fn focused_extent(&self, index: usize) -> Option<ItemExtent> {
        match self.sections().locate(index)? {
            (STATIONS, rel) => {
                let row = rel / COLUMNS;
                Some(ItemExtent::from_offsets(
                    [rows_px(row * TILE_ROWS as usize)],
                    rows_px(TILE_ROWS as usize),
                ))
            }
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

        let main = Rect {
            x: main.x + 1,
            width: main.width.saturating_sub(2),
            ..main
        };
        let genre_rows = grid_rows(self.genres.len(), COLUMNS) as u16;
        let [header_area, genres_area, stations_area] = Layout::vertical([
            Constraint::Length(TILE_ROWS),
            Constraint::Length(1 + genre_rows * TILE_ROWS),
            Constraint::Min(0),
        ])
        .areas(main);

        let active_section = ctx
            .engine
            .current_in(SCOPE)
            .and_then(|i| self.sections().locate(i))
            .map(|(section, _)| section);
        let sections = self.sections();

        // Country selector
        let header = sections.section_start(HEADER);
        let rect = Rect {
            width: header_area.width.min(HEADER_WIDTH),
            ..header_area
        };
        if rect.height == TILE_ROWS {
            ctx.cache
                .record_rect(SCOPE, item_id(&Zone::HeaderControl, 0), rect);
            let label = format!("Country: {} ▾", self.country_label);
            Tile::new(&label, ctx.visual(SCOPE, header)).draw_boxed(frame, rect);
        }

        // Genres
        let block = pane_chrome("Genres", active_section == Some(GENRES), None);
        let inner = block.inner(genres_area);
        frame.render_widget(block, genres_area);
        let start = sections.section_start(GENRES);
        let tile_width = inner.width / COLUMNS as u16;
        for (rel, genre) in self.genres.iter().enumerate() {
            let (row, col) = ((rel / COLUMNS) as u16, (rel % COLUMNS) as u16);
            let rect = Rect::new(
                inner.x + col * tile_width,
                inner.y + row * TILE_ROWS,
                tile_width,
                TILE_ROWS,
            );
            if rect.bottom() > inner.bottom() {
                break;
            }
            ctx.cache
                .record_rect(SCOPE, item_id(&Zone::grid("genres"), rel), rect);
            Tile::new(genre, ctx.visual(SCOPE, start + rel)).draw_boxed(frame, rect);
        }

        self.draw_stations(frame, stations_area, active_section == Some(STATIONS), ctx);
    }

    fn draw_stations(&mut self, frame: &mut Frame, area: Rect, active: bool, ctx: &mut DrawContext) {
        let title = format!("Stations · {}", self.country_label);
        let badge = self.loading.then_some(Badge {
            text: "LOADING",
            color: C_LOADING,
        });
        let block = pane_chrome(&title, active, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.stations.is_empty() {
            let msg = if self.loading || self.has_more {
                "Loading stations…"
            } else {
                "No stations for this country"
            };
            frame.render_widget(Paragraph::new(Line::styled(msg, style_muted())), inner);
            return;
        }

        let content_rows = grid_rows(self.stations.len(), COLUMNS) * TILE_ROWS as usize;
        self.scroll.set_extent(inner.height, content_rows);
        let top_rows = self.scroll.top_rows();

        let start = self.sections().section_start(STATIONS);
        let tile_width = inner.width / COLUMNS as u16;
        for (rel, station) in self.stations.iter().enumerate() {
            let (row, col) = ((rel / COLUMNS) as i32, (rel % COLUMNS) as u16);
            let x = inner.x + col * tile_width;
            let y = inner.y as i32 + row * TILE_ROWS as i32 - top_rows;
            // Off-screen tiles keep a position so the engine can move onto them.
            ctx.cache.record(
                SCOPE,
                item_id(&Zone::grid("stations"), rel),
                Bounds::new(
                    x as f32 * CELL_WIDTH_PX,
                    y as f32 * CELL_HEIGHT_PX,
                    tile_width as f32 * CELL_WIDTH_PX,
                    TILE_ROWS as f32 * CELL_HEIGHT_PX,
                ),
            );
            if y < inner.y as i32 || y + TILE_ROWS as i32 > inner.bottom() as i32 {
                continue;
            }
            let rect = Rect::new(x, y as u16, tile_width, TILE_ROWS);
            let place = if station.city.is_empty() {
                station.genre.as_str()
            } else {
                station.city.as_str()
            };
            Tile::new(&station.name, ctx.visual(SCOPE, start + rel))
                .detail(place)
                .playing(ctx.is_playing(station))
                .draw_boxed(frame, rect);
        }
        if self.loading {
            let tail = Rect {
                y: inner.bottom().saturating_sub(1),
                height: 1,
                ..inner
            };
            frame.render_widget(
                Paragraph::new(Line::styled("loading more…", Style::default().fg(C_LOCATION)))
                    .right_aligned(),
                tail,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvradio_core::focus::{Direction, Target};

    fn station(name: &str) -> Station {
        Station {
            name: name.to_string(),
            url: format!("http://{}", name),
            ..Default::default()
        }
    }

    fn page(n: usize, count: usize, has_more: bool) -> StationPage {
        StationPage {
            page: n,
            stations: (0..count).map(|i| station(&format!("s{}-{}", n, i))).collect(),
            has_more,
        }
    }

    fn home() -> HomePage {
        let genres = ["ambient", "jazz", "rock", "pop", "world", "indie"];
        HomePage::new(genres.iter().map(|g| g.to_string()).collect())
    }

    #[test]
    fn test_targets_follow_section_order() {
        let mut home = home();
        home.begin_fetch(4);
        assert!(home.apply_page(0, page(0, 4, true)));
        assert_eq!(home.target(0), Some(HomeTarget::Sidebar(SidebarEntry::Home)));
        assert_eq!(home.target(6), Some(HomeTarget::CountryButton));
        assert_eq!(home.target(7), Some(HomeTarget::Genre("ambient")));
        assert!(matches!(home.target(13), Some(HomeTarget::Station(s)) if s.name == "s0-0"));
        assert_eq!(home.target(17), None);
    }

    #[test]
    fn test_one_fetch_in_flight() {
        let mut home = home();
        let first = home.begin_fetch(12).unwrap();
        assert_eq!(first.page, 0);
        assert!(home.begin_fetch(12).is_none());
        assert!(home.apply_page(first.generation, page(0, 12, false)));
        assert!(home.begin_fetch(12).is_none());
    }

    #[test]
    fn test_country_change_drops_stale_pages() {
        let mut home = home();
        let request = home.begin_fetch(12).unwrap();
        home.set_country(Some("CL".into()), "Chile".into());
        assert!(!home.apply_page(request.generation, page(0, 12, true)));
        assert_eq!(home.target(home.genre_start() + 6), None);
        let request = home.begin_fetch(12).unwrap();
        assert_eq!(request.filter.country.as_deref(), Some("CL"));
        assert!(home.apply_page(request.generation, page(0, 3, false)));
        let stations = home.genre_start() + 6;
        assert!(home.target(stations + 2).is_some());
        assert_eq!(home.target(stations + 3), None);
    }

    #[test]
    fn test_layout_links_sidebar_and_grids() {
        let mut home = home();
        home.begin_fetch(12);
        home.apply_page(0, page(0, 6, false));
        let items = home.layout().items();
        let genres = home.genre_start();
        assert_eq!(genres, 7);
        assert_eq!(items[2].overrides.get(Direction::Right), Some(&Target::Index(genres)));
        // genre 4 (row 1, col 0) goes LEFT to the Genres entry
        assert_eq!(items[genres + 4].overrides.get(Direction::Left), Some(&Target::Index(1)));
        // top genre row goes UP to the country selector
        assert_eq!(items[genres + 2].overrides.get(Direction::Up), Some(&Target::Index(6)));
        // genre 3 has nothing below in its column, so DOWN joins station column 3
        let stations = genres + 6;
        assert_eq!(
            items[genres + 3].overrides.get(Direction::Down),
            Some(&Target::Index(stations + 3))
        );
    }

    #[test]
    fn test_country_selector_never_moves_sideways_into_grids() {
        let layout = home().layout();
        let isolation = layout.zone_isolation();
        let genres = Zone::grid("genres");
        assert!(!isolation.allows(&Zone::HeaderControl, &genres, Direction::Right));
        assert!(!isolation.allows(&Zone::HeaderControl, &Zone::grid("stations"), Direction::Left));
        assert!(isolation.allows(&Zone::HeaderControl, &genres, Direction::Down));
        assert!(isolation.allows(&Zone::HeaderControl, &Zone::Sidebar, Direction::Left));
        assert!(layout.items()[6].overrides.is_empty());
    }

    #[test]
    fn test_clipped_genres_are_not_measured() {
        let genres: Vec<String> = (0..40).map(|i| format!("genre{}", i)).collect();
        let mut home = HomePage::new(genres);
        let height = 20;
        let cache = crate::pages::testing::draw_once(100, height, |frame, area, ctx| {
            home.draw(frame, area, ctx)
        });
        let limit = height as f32 * CELL_HEIGHT_PX;
        for rel in 0..40 {
            if let Some(bounds) = cache.get(SCOPE, &item_id(&Zone::grid("genres"), rel)) {
                assert!(bounds.bottom() <= limit, "genre {} at {:?}", rel, bounds);
            }
        }
        assert!(cache.get(SCOPE, &item_id(&Zone::grid("genres"), 39)).is_none());
    }

    #[test]
    fn test_focused_extent_only_for_stations() {
        let mut home = home();
        home.begin_fetch(12);
        home.apply_page(0, page(0, 12, false));
        assert_eq!(home.focused_extent(7), None);
        let stations = home.genre_start() + 6;
        let extent = home.focused_extent(stations + 9).unwrap();
        assert_eq!(extent.top, 2.0 * 3.0 * CELL_HEIGHT_PX);
        assert_eq!(extent.height, 3.0 * CELL_HEIGHT_PX);
    }
}
