//! Action enum — what focus callbacks and background tasks ask the app to do.

use tvradio_core::catalog::{Station, StationPage};

/// Top-level pages. Each one is a focus scope at the base of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Search,
}

/// Produced by SELECT/BACK callbacks and by the catalogue loader;
/// the App dispatches each one.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Focus callbacks ──────────────────────────────────────────────────────
    HomeSelect(usize),    // flat index in the home scope
    SearchSelect(usize),  // flat index in the search scope
    PickCountry(usize),   // row in the country picker, 0 = all countries

    // ── Navigation ───────────────────────────────────────────────────────────
    Navigate(Route),
    ShowGenres,
    ShowGenre(String),
    ShowRecent,
    OpenCountryPicker,

    // ── Playback ─────────────────────────────────────────────────────────────
    Play(Station),
    Stop,

    // ── Catalogue ────────────────────────────────────────────────────────────
    PageLoaded { generation: u64, page: StationPage },

    // ── App ──────────────────────────────────────────────────────────────────
    Status(String),
    Quit,
}
