//! End-to-end navigation through the public engine API: bindings in, raw
//! remote codes through `handle_key`, focus out.
//!
//! Layout used by most tests (pixel equivalents):
//!
//! ```text
//!   sidebar x=0..120          content grid x=200.., 4 columns, 130 px pitch
//!   [0] y=0                   [6]  [7]  [8]  [9]      row 0, y=0
//!   [1] y=60                  [10] [11] [12] [13]     row 1, y=100
//!   ...                       [14] [15]               row 2, y=200
//!   [5] y=300
//! ```

use std::cell::Cell;
use std::rc::Rc;

use tvradio_core::config::Config;
use tvradio_core::focus::binding::item_id;
use tvradio_core::focus::keys::{KEY_DOWN, KEY_ENTER, KEY_LEFT, KEY_RIGHT, KEY_UP, TIZEN_BACK};
use tvradio_core::focus::{
    Bounds, Direction, Dispatch, FocusEngine, ItemExtent, Padding, ScopeBinding, ScopeLayout,
    ScrollContainer, Target, ViewportKeeper, Zone,
};

const SIDEBAR: usize = 6;
const GRID: usize = 10;
const COLUMNS: usize = 4;

fn measure(_scope: &str, id: &str) -> Option<Bounds> {
    let (zone, rel) = id.rsplit_once('/')?;
    let rel: usize = rel.parse().ok()?;
    match zone {
        "sidebar" => Some(Bounds::new(0.0, rel as f32 * 60.0, 120.0, 40.0)),
        "content-grid:stations" => {
            let (row, col) = (rel / COLUMNS, rel % COLUMNS);
            Some(Bounds::new(
                200.0 + col as f32 * 130.0,
                row as f32 * 100.0,
                110.0,
                80.0,
            ))
        }
        "picker" => Some(Bounds::new(300.0, rel as f32 * 40.0, 200.0, 30.0)),
        _ => None,
    }
}

fn layout(grid_len: usize) -> ScopeLayout {
    ScopeLayout::new()
        .section(Zone::Sidebar, SIDEBAR, 1)
        .section(Zone::grid("stations"), grid_len, COLUMNS)
        .link_right(0, SIDEBAR)
}

fn engine_with(initial: usize) -> FocusEngine<String> {
    let mut engine = FocusEngine::from_config(&Config::default(), 16.0);
    engine.mount_page(
        ScopeBinding::page("home", layout(GRID))
            .initial_index(initial)
            .on_select(|i| vec![format!("select {}", i)]),
    );
    engine
}

fn press(engine: &mut FocusEngine<String>, code: u32) -> Option<usize> {
    engine.handle_key(code, &measure);
    engine.current()
}

#[test]
fn grid_scenario_from_index_seven() {
    // Flat index of grid item 7 is SIDEBAR + 7.
    let at = SIDEBAR + 7;
    let mut engine = engine_with(at);
    assert_eq!(press(&mut engine, KEY_DOWN), Some(at));
    assert_eq!(press(&mut engine, KEY_LEFT), Some(at - 1));

    let mut engine = engine_with(at);
    assert_eq!(press(&mut engine, KEY_UP), Some(at - 4));
}

#[test]
fn sidebar_right_follows_override_to_first_content_item() {
    let mut engine = engine_with(2);
    assert_eq!(press(&mut engine, KEY_RIGHT), Some(SIDEBAR));
}

#[test]
fn grid_left_edge_reaches_sidebar_geometrically() {
    // Row 1, column 0 sits at y=100..180; nearest sidebar row is item 2 (y=120).
    let mut engine = engine_with(SIDEBAR + 4);
    assert_eq!(press(&mut engine, KEY_LEFT), Some(2));
}

/// Ten genres above eight stations, both four columns wide.
fn stacked_measure(_scope: &str, id: &str) -> Option<Bounds> {
    let (zone, rel) = id.rsplit_once('/')?;
    let rel: usize = rel.parse().ok()?;
    let top = match zone {
        "content-grid:genres" => 0.0,
        "content-grid:stations" => 340.0,
        _ => return None,
    };
    let (row, col) = (rel / COLUMNS, rel % COLUMNS);
    Some(Bounds::new(
        200.0 + col as f32 * 130.0,
        top + row as f32 * 100.0,
        110.0,
        80.0,
    ))
}

#[test]
fn partial_row_right_does_not_drop_into_the_grid_below() {
    let layout = ScopeLayout::new()
        .section(Zone::grid("genres"), 10, COLUMNS)
        .section(Zone::grid("stations"), 8, COLUMNS);
    let mut engine: FocusEngine<String> = FocusEngine::from_config(&Config::default(), 16.0);
    engine.mount_page(ScopeBinding::page("home", layout).initial_index(9));

    engine.handle_key(KEY_RIGHT, &stacked_measure);
    assert_eq!(engine.current(), Some(9));
    engine.handle_key(KEY_LEFT, &stacked_measure);
    assert_eq!(engine.current(), Some(8));
    engine.handle_key(KEY_RIGHT, &stacked_measure);
    engine.handle_key(KEY_DOWN, &stacked_measure);
    assert_eq!(engine.current(), Some(10 + 1));
}

#[test]
fn right_walks_rows_and_stops_at_last_column() {
    for rel in 0..GRID {
        let mut engine = engine_with(SIDEBAR + rel);
        let got = press(&mut engine, KEY_RIGHT);
        if rel % COLUMNS == COLUMNS - 1 || rel + 1 == GRID {
            assert_eq!(got, Some(SIDEBAR + rel), "rel {}", rel);
        } else {
            assert_eq!(got, Some(SIDEBAR + rel + 1), "rel {}", rel);
        }
    }
}

#[test]
fn vertical_moves_never_cross_sidebar_boundary() {
    for start in 0..SIDEBAR + GRID {
        for code in [KEY_UP, KEY_DOWN] {
            let mut engine = engine_with(start);
            let got = press(&mut engine, code).unwrap();
            let was_sidebar = start < SIDEBAR;
            let is_sidebar = got < SIDEBAR;
            assert_eq!(was_sidebar, is_sidebar, "start {} code {}", start, code);
        }
    }
}

#[test]
fn overrides_win_for_every_direction() {
    let target = SIDEBAR + 9;
    let mut layout = layout(GRID);
    for direction in Direction::ALL {
        layout = layout.override_at(SIDEBAR + 5, direction, Target::Index(target));
    }
    for code in [KEY_UP, KEY_DOWN, KEY_LEFT, KEY_RIGHT] {
        let mut engine: FocusEngine<String> = FocusEngine::from_config(&Config::default(), 16.0);
        engine.mount_page(ScopeBinding::page("home", layout.clone()).initial_index(SIDEBAR + 5));
        assert_eq!(press(&mut engine, code), Some(target));
    }
}

#[test]
fn remeasure_twice_gives_identical_resolution() {
    let mut a = engine_with(SIDEBAR + 5);
    let mut b = engine_with(SIDEBAR + 5);
    a.remeasure(&measure);
    a.remeasure(&measure);
    b.remeasure(&measure);
    for code in [KEY_UP, KEY_LEFT, KEY_DOWN, KEY_RIGHT, KEY_RIGHT, KEY_UP] {
        assert_eq!(press(&mut a, code), press(&mut b, code));
    }
}

#[test]
fn modal_push_pop_restores_index_without_selecting() {
    let selects = Rc::new(Cell::new(0));
    let counter = selects.clone();
    let mut engine: FocusEngine<String> = FocusEngine::from_config(&Config::default(), 16.0);
    engine.mount_page(
        ScopeBinding::page("home", layout(GRID))
            .initial_index(SIDEBAR + 6)
            .on_select(move |_| {
                counter.set(counter.get() + 1);
                Vec::new()
            }),
    );
    engine.open_modal(
        ScopeBinding::modal("picker", ScopeLayout::new().section(Zone::named("picker"), 5, 1))
            .on_select(|i| vec![format!("country {}", i)]),
    );
    assert_eq!(press(&mut engine, KEY_DOWN), Some(1));
    assert_eq!(press(&mut engine, KEY_DOWN), Some(2));

    let back = engine.handle_key(TIZEN_BACK, &measure);
    assert!(matches!(back, Dispatch::Back { closed_modal: true, .. }));
    assert_eq!(engine.active_scope_id(), Some("home"));
    assert_eq!(engine.current(), Some(SIDEBAR + 6));
    assert_eq!(selects.get(), 0);

    engine.handle_key(KEY_ENTER, &measure);
    assert_eq!(selects.get(), 1);
}

#[test]
fn modal_captures_all_input() {
    let mut engine = engine_with(SIDEBAR + 1);
    engine.open_modal(ScopeBinding::modal(
        "picker",
        ScopeLayout::new().section(Zone::named("picker"), 3, 1),
    ));
    // LEFT would reach the page's grid and sidebar; the modal has nothing there.
    assert_eq!(press(&mut engine, KEY_LEFT), Some(0));
    assert_eq!(engine.active_scope_id(), Some("picker"));
    assert_eq!(engine.current_in("home"), Some(SIDEBAR + 1));
}

#[test]
fn content_shrink_clamps_and_growth_extends() {
    let mut engine = engine_with(SIDEBAR + 9);
    engine.relayout("home", layout(3));
    assert_eq!(engine.current(), Some(SIDEBAR + 2));
    assert_eq!(press(&mut engine, KEY_RIGHT), Some(SIDEBAR + 2));

    engine.relayout("home", layout(24));
    assert_eq!(engine.distance_to_end("home"), Some(SIDEBAR + 24 - (SIDEBAR + 2)));
    assert_eq!(press(&mut engine, KEY_DOWN), Some(SIDEBAR + 6));
}

#[test]
fn empty_scope_retains_focus() {
    let mut engine: FocusEngine<String> = FocusEngine::from_config(&Config::default(), 16.0);
    engine.mount_page(ScopeBinding::page("empty", ScopeLayout::new()));
    assert_eq!(engine.remeasure(&measure), 0);
    assert_eq!(press(&mut engine, KEY_DOWN), Some(0));
    assert!(matches!(
        engine.handle_key(KEY_ENTER, &measure),
        Dispatch::Selected { ref actions, .. } if actions.is_empty()
    ));
}

#[test]
fn unmeasured_items_are_skipped_until_layout() {
    let mut engine = engine_with(SIDEBAR);
    let nothing = |_: &str, _: &str| None;
    engine.handle_key(KEY_RIGHT, &nothing);
    assert_eq!(engine.current(), Some(SIDEBAR));
    assert_eq!(press(&mut engine, KEY_RIGHT), Some(SIDEBAR + 1));
}

#[test]
fn item_ids_match_layout_ids() {
    let items = layout(GRID).items();
    assert_eq!(items[SIDEBAR].id, item_id(&Zone::grid("stations"), 0));
    assert_eq!(items[0].id, item_id(&Zone::Sidebar, 0));
}

struct Pane {
    top: f32,
}

impl ScrollContainer for Pane {
    fn scroll_top(&self) -> f32 {
        self.top
    }
    fn client_height(&self) -> f32 {
        400.0
    }
    fn scroll_height(&self) -> f32 {
        3000.0
    }
}

#[test]
fn keep_visible_is_noop_inside_window_and_minimal_outside() {
    let mut engine = engine_with(0);
    let pane = Pane { top: 200.0 };
    assert_eq!(
        engine.keep_visible(ItemExtent { top: 300.0, height: 80.0 }, &pane),
        None
    );
    assert!(!engine.has_pending_work());

    let cmd = engine
        .keep_visible(ItemExtent { top: 700.0, height: 80.0 }, &pane)
        .unwrap();
    // bottom 780 lands at top + 400 - 16 (one padding row of 16 px)
    assert_eq!(cmd.top, 396.0);
    assert!(engine.has_pending_work());

    // A key press supersedes the pending scroll settle.
    engine.handle_key(KEY_DOWN, &measure);
    assert!(!engine.has_pending_work());

    let keeper = ViewportKeeper::new(Padding::new(0.0, 0.0));
    assert_eq!(
        keeper.ensure_visible(ItemExtent { top: 200.0, height: 400.0 }, &pane, Padding::default()),
        None
    );
}
