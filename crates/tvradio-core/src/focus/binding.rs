//! Scope bindings — what a page or modal declares to the engine.
//!
//! A page describes its layout as an ordered list of sections (sidebar,
//! header control, one or more grids). Items are numbered across sections in
//! declaration order, so the first item of the first section is index 0.
//! Cross-section jumps are authored with the `link_*` helpers, which turn the
//! usual index arithmetic ("last row DOWN goes to the column-aligned item of
//! the next section") into explicit overrides.

use super::event::Direction;
use super::registry::{FocusableItem, Target};
use super::scope::ScopeKind;
use super::zone::{Zone, ZoneIsolation};

pub type SelectFn<A> = Box<dyn FnMut(usize) -> Vec<A>>;
pub type BackFn<A> = Box<dyn FnMut() -> Vec<A>>;

/// Stable item id for the `rel`-th item of a zone.
pub fn item_id(zone: &Zone, rel: usize) -> String {
    format!("{}/{}", zone, rel)
}

/// Id for the `rel`-th item of the `occurrence`-th section tagged `zone`.
/// The first section keeps the plain `item_id` form.
pub fn repeated_item_id(zone: &Zone, occurrence: usize, rel: usize) -> String {
    if occurrence == 0 {
        item_id(zone, rel)
    } else {
        format!("{}#{}/{}", zone, occurrence, rel)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub zone: Zone,
    pub len: usize,
    pub columns: usize,
}

/// The part of a binding that changes with content: sections, isolation and
/// authored overrides. Pages re-declare it whenever their content changes.
#[derive(Debug, Clone, Default)]
pub struct ScopeLayout {
    sections: Vec<Section>,
    isolation: ZoneIsolation,
    overrides: Vec<(usize, Direction, Target)>,
}

impl ScopeLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, zone: Zone, len: usize, columns: usize) -> Self {
        self.sections.push(Section {
            zone,
            len,
            columns: columns.max(1),
        });
        self
    }

    pub fn isolation(mut self, isolation: ZoneIsolation) -> Self {
        self.isolation = isolation;
        self
    }

    pub fn override_at(mut self, index: usize, direction: Direction, target: Target) -> Self {
        self.overrides.push((index, direction, target));
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn zone_isolation(&self) -> &ZoneIsolation {
        &self.isolation
    }

    pub fn total_items(&self) -> usize {
        self.sections.iter().map(|s| s.len).sum()
    }

    /// Flat index of the first item of section `section`.
    pub fn section_start(&self, section: usize) -> usize {
        self.sections.iter().take(section).map(|s| s.len).sum()
    }

    /// Registry id of the `rel`-th item of section `section`. Sections that
    /// repeat an earlier zone tag get an occurrence suffix so ids stay unique.
    pub fn item_id(&self, section: usize, rel: usize) -> Option<String> {
        let zone = &self.sections.get(section)?.zone;
        Some(repeated_item_id(zone, self.occurrence(section), rel))
    }

    /// How many earlier sections carry the same zone tag as `section`.
    fn occurrence(&self, section: usize) -> usize {
        let zone = &self.sections[section].zone;
        self.sections[..section].iter().filter(|s| &s.zone == zone).count()
    }

    /// Which section holds flat index `index`, and the index relative to it.
    pub fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (i, s) in self.sections.iter().enumerate() {
            if index < start + s.len {
                return Some((i, index - start));
            }
            start += s.len;
        }
        None
    }

    /// Every item of `from` RIGHT → `target`.
    pub fn link_right(self, from: usize, target: usize) -> Self {
        self.link_all(from, Direction::Right, target)
    }

    /// Every item of `from` in a given direction → `target`.
    pub fn link_all(mut self, from: usize, direction: Direction, target: usize) -> Self {
        let Some(section) = self.sections.get(from) else {
            return self;
        };
        let start = self.section_start(from);
        for rel in 0..section.len {
            self.overrides
                .push((start + rel, direction, Target::Index(target)));
        }
        self
    }

    /// Column-0 items of grid `from` LEFT → `target` (usually a sidebar item).
    pub fn link_left_edge(mut self, from: usize, target: usize) -> Self {
        let Some(section) = self.sections.get(from) else {
            return self;
        };
        let start = self.section_start(from);
        let columns = section.columns;
        for rel in (0..section.len).step_by(columns) {
            self.overrides
                .push((start + rel, Direction::Left, Target::Index(target)));
        }
        self
    }

    /// Top-row items of `from` UP → `target` (usually a header control).
    pub fn link_top_edge(mut self, from: usize, target: usize) -> Self {
        let Some(section) = self.sections.get(from) else {
            return self;
        };
        let start = self.section_start(from);
        for rel in 0..section.len.min(section.columns) {
            self.overrides
                .push((start + rel, Direction::Up, Target::Index(target)));
        }
        self
    }

    /// Join two stacked sections: items of `upper` with nothing below them in
    /// their column go DOWN to the column-aligned item of `lower`, and the top
    /// row of `lower` goes UP to the bottom-most item of the aligned column in
    /// `upper`. Columns past the end clamp to the last item.
    pub fn link_below(mut self, upper: usize, lower: usize) -> Self {
        let (Some(up), Some(down)) = (self.sections.get(upper).cloned(), self.sections.get(lower).cloned())
        else {
            return self;
        };
        if up.len == 0 || down.len == 0 {
            return self;
        }
        let up_start = self.section_start(upper);
        let down_start = self.section_start(lower);

        for rel in 0..up.len {
            if rel + up.columns < up.len {
                continue;
            }
            let col = rel % up.columns;
            let target = down_start + col.min(down.columns - 1).min(down.len - 1);
            self.overrides
                .push((up_start + rel, Direction::Down, Target::Index(target)));
        }

        for rel in 0..down.len.min(down.columns) {
            let col = rel.min(up.columns - 1);
            let target = last_in_column(up.len, up.columns, col);
            self.overrides
                .push((down_start + rel, Direction::Up, Target::Index(up_start + target)));
        }
        self
    }

    /// Materialise the registry items for this layout.
    pub fn items(&self) -> Vec<FocusableItem> {
        let mut items: Vec<FocusableItem> = Vec::with_capacity(self.total_items());
        for (i, section) in self.sections.iter().enumerate() {
            let occurrence = self.occurrence(i);
            for rel in 0..section.len {
                let id = repeated_item_id(&section.zone, occurrence, rel);
                let mut item = FocusableItem::new(id, section.zone.clone()).with_columns(section.columns);
                item.index = items.len();
                items.push(item);
            }
        }
        for (index, direction, target) in &self.overrides {
            if let Some(item) = items.get_mut(*index) {
                item.overrides.set(*direction, target.clone());
            }
        }
        items
    }
}

/// Relative index of the lowest item in `col` of a grid with `len` items,
/// or the last item when the column is empty.
fn last_in_column(len: usize, columns: usize, col: usize) -> usize {
    if col >= len {
        return len - 1;
    }
    let rows_below = (len - 1 - col) / columns;
    col + rows_below * columns
}

/// Everything a page or modal hands the engine when it mounts.
pub struct ScopeBinding<A> {
    pub scope_id: String,
    pub kind: ScopeKind,
    pub layout: ScopeLayout,
    pub initial_index: usize,
    pub on_select: Option<SelectFn<A>>,
    pub on_back: Option<BackFn<A>>,
}

impl<A> ScopeBinding<A> {
    pub fn page(scope_id: impl Into<String>, layout: ScopeLayout) -> Self {
        Self::new(scope_id, ScopeKind::Page, layout)
    }

    pub fn modal(scope_id: impl Into<String>, layout: ScopeLayout) -> Self {
        Self::new(scope_id, ScopeKind::Modal, layout)
    }

    fn new(scope_id: impl Into<String>, kind: ScopeKind, layout: ScopeLayout) -> Self {
        Self {
            scope_id: scope_id.into(),
            kind,
            layout,
            initial_index: 0,
            on_select: None,
            on_back: None,
        }
    }

    pub fn initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    pub fn on_select(mut self, f: impl FnMut(usize) -> Vec<A> + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    pub fn on_back(mut self, f: impl FnMut() -> Vec<A> + 'static) -> Self {
        self.on_back = Some(Box::new(f));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_layout() -> ScopeLayout {
        ScopeLayout::new()
            .section(Zone::Sidebar, 6, 1)
            .section(Zone::grid("genres"), 6, 4)
            .section(Zone::grid("stations"), 10, 4)
    }

    #[test]
    fn test_items_are_numbered_across_sections() {
        let layout = home_layout();
        let items = layout.items();
        assert_eq!(items.len(), 22);
        assert_eq!(layout.total_items(), 22);
        assert_eq!(items[6].id, "content-grid:genres/0");
        assert_eq!(items[6].columns, 4);
        assert_eq!(items[12].zone, Zone::grid("stations"));
        assert_eq!(layout.section_start(2), 12);
        assert_eq!(layout.locate(13), Some((2, 1)));
        assert_eq!(layout.locate(22), None);
    }

    #[test]
    fn test_repeated_zone_gets_unique_ids() {
        let layout = ScopeLayout::new()
            .section(Zone::named("list"), 3, 1)
            .section(Zone::Sidebar, 1, 1)
            .section(Zone::named("list"), 2, 1);
        let items = layout.items();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["list/0", "list/1", "list/2", "sidebar/0", "list#1/0", "list#1/1"]);
        assert_eq!(layout.item_id(2, 1).as_deref(), Some("list#1/1"));
        assert_eq!(layout.item_id(0, 2), Some(item_id(&Zone::named("list"), 2)));
        assert_eq!(layout.item_id(3, 0), None);
    }

    #[test]
    fn test_link_right_and_left_edge() {
        let layout = home_layout().link_right(0, 6).link_left_edge(2, 1);
        let items = layout.items();
        for i in 0..6 {
            assert_eq!(items[i].overrides.get(Direction::Right), Some(&Target::Index(6)));
        }
        assert_eq!(items[12].overrides.get(Direction::Left), Some(&Target::Index(1)));
        assert_eq!(items[16].overrides.get(Direction::Left), Some(&Target::Index(1)));
        assert_eq!(items[13].overrides.get(Direction::Left), None);
    }

    #[test]
    fn test_link_below_aligns_columns() {
        // genres: rows [0 1 2 3] [4 5]; stations start at 12.
        let items = home_layout().link_below(1, 2).items();
        let down = |rel: usize| items[6 + rel].overrides.get(Direction::Down).cloned();
        assert_eq!(down(0), None); // genre 4 sits below
        assert_eq!(down(2), Some(Target::Index(14)));
        assert_eq!(down(3), Some(Target::Index(15)));
        assert_eq!(down(4), Some(Target::Index(12)));
        assert_eq!(down(5), Some(Target::Index(13)));

        let up = |rel: usize| items[12 + rel].overrides.get(Direction::Up).cloned();
        assert_eq!(up(0), Some(Target::Index(10)));
        assert_eq!(up(1), Some(Target::Index(11)));
        assert_eq!(up(2), Some(Target::Index(8)));
        assert_eq!(up(3), Some(Target::Index(9)));
        assert_eq!(up(4), None);
    }

    #[test]
    fn test_overrides_past_the_end_are_dropped() {
        let items = ScopeLayout::new()
            .section(Zone::named("list"), 2, 1)
            .override_at(5, Direction::Down, Target::Index(0))
            .items();
        assert!(items.iter().all(|i| i.overrides.is_empty()));
    }

    #[test]
    fn test_link_helpers_ignore_missing_sections() {
        let layout = ScopeLayout::new()
            .section(Zone::Sidebar, 3, 1)
            .link_below(0, 4)
            .link_left_edge(7, 0)
            .link_top_edge(9, 0);
        assert!(layout.items().iter().all(|i| i.overrides.is_empty()));
    }

    #[test]
    fn test_last_in_column() {
        assert_eq!(last_in_column(6, 4, 0), 4);
        assert_eq!(last_in_column(6, 4, 1), 5);
        assert_eq!(last_in_column(6, 4, 2), 2);
        assert_eq!(last_in_column(2, 4, 3), 1);
    }
}
