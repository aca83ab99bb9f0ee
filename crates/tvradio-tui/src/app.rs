//! App — the terminal host around the focus engine.
//!
//! Architecture:
//! - `App` owns the pages, the [`FocusEngine`] and the [`LayoutCache`].
//! - A `tokio::mpsc` channel carries `AppMessage`s in from the keyboard
//!   thread and the catalogue loader.
//! - The event loop draws each frame, then awaits the next message or tick.
//! - Keys become remote codes and go through `engine.handle_key`; focus
//!   callbacks return `Vec<Action>` which the App dispatches.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use ratatui::crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use tvradio_core::catalog::{Catalog, Station, StationFilter};
use tvradio_core::config::Config;
use tvradio_core::focus::{Dispatch, FocusEngine};

use crate::action::{Action, Route};
use crate::fetch::spawn_page_fetch;
use crate::layout::{LayoutCache, CELL_HEIGHT_PX};
use crate::pages::country_picker::CountryPicker;
use crate::pages::home::{self, HomePage};
use crate::pages::search::{self, SearchPage};
use crate::pages::DrawContext;
use crate::remote::{self, HostKey, KeyInput};
use crate::widgets::status_bar::{draw_keys_bar, draw_now_playing, draw_separator};

const RECENT_LIMIT: usize = 8;

pub enum AppMessage {
    Event(Event),
    Action(Action),
}

pub struct App {
    config: Config,
    catalog: Arc<Catalog>,
    engine: FocusEngine<Action>,
    layout: LayoutCache,
    route: Route,
    home: HomePage,
    search: SearchPage,
    picker: Option<CountryPicker>,
    playing: Option<Station>,
    recent: Vec<Station>,
    status: Option<String>,
    should_quit: bool,
    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,
}

impl App {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let (tx, rx) = mpsc::channel::<AppMessage>(256);
        let engine = FocusEngine::from_config(&config, CELL_HEIGHT_PX);
        let home = HomePage::new(catalog.genres());
        let search = SearchPage::new(catalog.stations.clone());
        Self {
            config,
            catalog: Arc::new(catalog),
            engine,
            layout: LayoutCache::new(),
            route: Route::Home,
            home,
            search,
            picker: None,
            playing: None,
            recent: Vec::new(),
            status: None,
            should_quit: false,
            tx,
            rx: Some(rx),
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow!("event loop already started"))?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            while !event_tx.is_closed() {
                match event::poll(Duration::from_millis(200)) {
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    },
                    Ok(false) => {}
                    Err(_) => break,
                }
            }
        });

        // Drives the engine's debounce and scroll-settle timers.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(50));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        self.engine.mount_page(self.home.binding());
        self.request_page();

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                    needs_redraw = true;
                }

                _ = ui_tick.tick() => {
                    needs_redraw = !self.engine.tick(&self.layout).is_empty();
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.engine.shutdown();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("tvradio exiting");

        Ok(())
    }

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind != KeyEventKind::Release {
                    self.handle_key(key);
                }
            }
            AppMessage::Event(Event::Resize(w, h)) => {
                debug!("resize to {}x{}", w, h);
                self.relayout_route();
            }
            AppMessage::Event(_) => {}
            AppMessage::Action(action) => self.dispatch(action),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match remote::translate(key, self.engine.platform()) {
            Some(KeyInput::Host(HostKey::Quit)) => self.should_quit = true,
            Some(KeyInput::Host(HostKey::Stop)) => self.dispatch(Action::Stop),
            Some(KeyInput::Remote(code)) => {
                let outcome = self.engine.handle_key(code, &self.layout);
                self.after_dispatch(outcome);
            }
            None => {}
        }
    }

    fn after_dispatch(&mut self, outcome: Dispatch<Action>) {
        match &outcome {
            Dispatch::Moved { scope, to, .. } => {
                self.keep_focus_visible(scope, *to);
                self.maybe_load_more();
            }
            Dispatch::Back {
                closed_modal: true, ..
            } => {
                self.picker = None;
            }
            _ => {}
        }
        for action in outcome.into_actions() {
            self.dispatch(action);
        }
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        debug!("dispatch: {:?}", action);
        match action {
            Action::HomeSelect(index) => {
                if let Some(next) = self.home.target(index).map(|t| t.action()) {
                    self.dispatch(next);
                }
            }
            Action::SearchSelect(index) => {
                if let Some(next) = self.search.target(index).map(|t| t.action()) {
                    self.dispatch(next);
                }
            }
            Action::PickCountry(index) => self.pick_country(index),
            Action::Navigate(route) => self.navigate(route, None),
            Action::ShowGenres => {
                let genres = self.home.genre_start();
                self.navigate(Route::Home, Some(genres));
            }
            Action::ShowGenre(genre) => {
                let filter = StationFilter {
                    country: self.home.filter().country.clone(),
                    genre: Some(genre.clone()),
                };
                let results: Vec<Station> = self.catalog.query(&filter).cloned().collect();
                self.search.set_query(Some(genre), results);
                self.navigate(Route::Search, None);
            }
            Action::ShowRecent => {
                self.search.set_recent(self.recent.clone());
                match self.search.recent_start() {
                    Some(start) => self.navigate(Route::Search, Some(start)),
                    None => self.status = Some("Nothing played yet".to_string()),
                }
            }
            Action::OpenCountryPicker => {
                if self.picker.is_some() {
                    return;
                }
                let picker = CountryPicker::new(&self.catalog.countries);
                let selected = picker.position(self.home.filter().country.as_deref());
                self.engine.open_modal(picker.binding(selected));
                self.picker = Some(picker);
            }
            Action::Play(station) => self.play(station),
            Action::Stop => {
                if let Some(station) = self.playing.take() {
                    self.status = Some(format!("Stopped {}", station.name));
                }
            }
            Action::PageLoaded { generation, page } => {
                if self.home.apply_page(generation, page) {
                    if self.engine.scope(home::SCOPE).is_some() {
                        self.engine.relayout(home::SCOPE, self.home.layout());
                    }
                    self.maybe_load_more();
                }
            }
            Action::Status(msg) => self.status = Some(msg),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Switch the base page. Home's focus is stashed on the way out so it
    /// comes back where it was; `focus` overrides where `route` lands.
    fn navigate(&mut self, route: Route, focus: Option<usize>) {
        if self.route == Route::Home {
            if let Some(index) = self.engine.current_in(home::SCOPE) {
                self.engine.stash_return_focus(home::SCOPE, index);
            }
        }
        let scope = match route {
            Route::Home => home::SCOPE,
            Route::Search => search::SCOPE,
        };
        if let Some(index) = focus {
            self.engine.stash_return_focus(scope, index);
        }

        self.picker = None;
        self.route = route;
        match route {
            Route::Home => self.engine.mount_page(self.home.binding()),
            Route::Search => {
                self.search.set_recent(self.recent.clone());
                self.engine.mount_page(self.search.binding());
            }
        }
    }

    fn pick_country(&mut self, index: usize) {
        let Some(option) = self.picker.as_ref().and_then(|p| p.option(index)).cloned() else {
            return;
        };
        self.engine.close_modal();
        self.picker = None;
        info!("country filter → {}", option.label);
        self.status = Some(format!("Showing {}", option.label));
        self.home.set_country(option.code, option.label);
        if self.engine.scope(home::SCOPE).is_some() {
            self.engine.relayout(home::SCOPE, self.home.layout());
        }
        self.request_page();
    }

    fn play(&mut self, station: Station) {
        info!("play: {} ({})", station.name, station.url);
        self.status = Some(format!("Playing {}", station.name));
        self.recent.retain(|s| s.url != station.url);
        self.recent.insert(0, station.clone());
        self.recent.truncate(RECENT_LIMIT);
        self.playing = Some(station);
        if self.route == Route::Search {
            self.search.set_recent(self.recent.clone());
            self.engine.relayout(search::SCOPE, self.search.layout());
        }
    }

    // ── Scrolling and paging ──────────────────────────────────────────────────

    fn keep_focus_visible(&mut self, scope: &str, index: usize) {
        let (extent, pane) = match scope {
            home::SCOPE => (self.home.focused_extent(index), *self.home.scroll()),
            search::SCOPE => (self.search.focused_extent(index), *self.search.scroll()),
            _ => return,
        };
        let Some(extent) = extent else {
            return;
        };
        if let Some(command) = self.engine.keep_visible(extent, &pane) {
            match scope {
                home::SCOPE => self.home.scroll_mut().apply(command),
                _ => self.search.scroll_mut().apply(command),
            }
        }
    }

    fn maybe_load_more(&mut self) {
        if self.route != Route::Home {
            return;
        }
        let Some(remaining) = self.engine.distance_to_end(home::SCOPE) else {
            return;
        };
        if remaining < self.config.viewport.load_more_threshold {
            self.request_page();
        }
    }

    fn request_page(&mut self) {
        let Some(request) = self.home.begin_fetch(self.config.catalog.page_size) else {
            return;
        };
        debug!("request_page: page {} of generation {}", request.page, request.generation);
        spawn_page_fetch(
            self.catalog.clone(),
            request,
            Duration::from_millis(self.config.catalog.fetch_delay_ms),
            self.tx.clone(),
        );
    }

    fn relayout_route(&mut self) {
        match self.route {
            Route::Home => self.engine.relayout(home::SCOPE, self.home.layout()),
            Route::Search => self.engine.relayout(search::SCOPE, self.search.layout()),
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        self.layout.begin_frame();
        let [body, separator, now_playing, keys] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let mut ctx = DrawContext {
            engine: &self.engine,
            cache: &mut self.layout,
            playing: self.playing.as_ref(),
        };
        match self.route {
            Route::Home => self.home.draw(frame, body, &mut ctx),
            Route::Search => self.search.draw(frame, body, &mut ctx),
        }
        if let Some(picker) = &self.picker {
            picker.draw(frame, body, &mut ctx);
        }

        draw_separator(frame, separator);
        draw_now_playing(frame, now_playing, self.playing.as_ref(), self.status.as_deref());
        draw_keys_bar(frame, keys, self.engine.platform(), self.picker.is_some());
    }
}
