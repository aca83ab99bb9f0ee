//! FocusRegistry — the interactive regions of every open scope.
//!
//! Items are kept in index order per scope. Indices are dense at every
//! instant: registration appends, removal shifts later items down, and a
//! content change rebuilds the whole scope.

use std::collections::HashMap;

use tracing::debug;

use super::error::FocusError;
use super::event::Direction;
use super::geometry::Bounds;
use super::zone::Zone;

/// Where an authored override sends focus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Index(usize),
    Id(String),
}

/// Explicit per-direction targets, taking precedence over geometric search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    slots: [Option<Target>; 4],
}

impl Overrides {
    fn slot(direction: Direction) -> usize {
        match direction {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub fn get(&self, direction: Direction) -> Option<&Target> {
        self.slots[Self::slot(direction)].as_ref()
    }

    pub fn set(&mut self, direction: Direction, target: Target) {
        self.slots[Self::slot(direction)] = Some(target);
    }

    pub fn clear(&mut self, direction: Direction) {
        self.slots[Self::slot(direction)] = None;
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    fn targets_mut(&mut self) -> impl Iterator<Item = &mut Option<Target>> {
        self.slots.iter_mut()
    }
}

/// One interactive region.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusableItem {
    pub id: String,
    pub index: usize,
    pub zone: Zone,
    /// Last measured box; `None` until the first layout.
    pub geometry: Option<Bounds>,
    /// Column count for grid zones, 1 for linear zones.
    pub columns: usize,
    pub overrides: Overrides,
}

impl FocusableItem {
    pub fn new(id: impl Into<String>, zone: Zone) -> Self {
        Self {
            id: id.into(),
            index: 0,
            zone,
            geometry: None,
            columns: 1,
            overrides: Overrides::default(),
        }
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    pub fn with_geometry(mut self, bounds: Bounds) -> Self {
        self.geometry = Some(bounds);
        self
    }

    pub fn with_override(mut self, direction: Direction, target: Target) -> Self {
        self.overrides.set(direction, target);
        self
    }

    /// Geometry usable for search, if any.
    pub fn visible_bounds(&self) -> Option<Bounds> {
        self.geometry.filter(Bounds::is_renderable)
    }
}

/// Source of fresh geometry, implemented by whatever renders the screen.
pub trait Measure {
    fn measure(&self, scope: &str, id: &str) -> Option<Bounds>;
}

impl<F> Measure for F
where
    F: Fn(&str, &str) -> Option<Bounds>,
{
    fn measure(&self, scope: &str, id: &str) -> Option<Bounds> {
        self(scope, id)
    }
}

#[derive(Debug, Default)]
pub struct FocusRegistry {
    scopes: HashMap<String, Vec<FocusableItem>>,
}

impl FocusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a scope. Re-opening an existing scope empties it.
    pub fn open_scope(&mut self, scope: &str) {
        self.scopes.insert(scope.to_string(), Vec::new());
    }

    pub fn close_scope(&mut self, scope: &str) {
        if self.scopes.remove(scope).is_some() {
            debug!("registry: closed scope '{}'", scope);
        }
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains_key(scope)
    }

    /// Append an item; its index is assigned from its position.
    pub fn register(&mut self, scope: &str, mut item: FocusableItem) -> Result<usize, FocusError> {
        let items = self
            .scopes
            .get_mut(scope)
            .ok_or_else(|| FocusError::UnknownScope(scope.to_string()))?;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(FocusError::DuplicateItem {
                scope: scope.to_string(),
                id: item.id,
            });
        }
        item.index = items.len();
        items.push(item);
        Ok(items.len() - 1)
    }

    /// Remove an item and close the gap. Index overrides pointing past the
    /// removed item shift down with it; overrides pointing at it are dropped.
    pub fn unregister(&mut self, scope: &str, id: &str) -> Result<usize, FocusError> {
        let items = self
            .scopes
            .get_mut(scope)
            .ok_or_else(|| FocusError::UnknownScope(scope.to_string()))?;
        let removed = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| FocusError::UnknownItem {
                scope: scope.to_string(),
                id: id.to_string(),
            })?;
        items.remove(removed);
        for (index, item) in items.iter_mut().enumerate() {
            item.index = index;
            for slot in item.overrides.targets_mut() {
                let dangling = match slot {
                    Some(Target::Index(i)) => {
                        let hit = *i == removed;
                        if *i > removed {
                            *i -= 1;
                        }
                        hit
                    }
                    Some(Target::Id(target)) => target.as_str() == id,
                    None => false,
                };
                if dangling {
                    *slot = None;
                }
            }
        }
        Ok(removed)
    }

    /// Replace every item of a scope, reassigning dense indices.
    pub fn rebuild(&mut self, scope: &str, items: Vec<FocusableItem>) -> Result<usize, FocusError> {
        let slot = self
            .scopes
            .get_mut(scope)
            .ok_or_else(|| FocusError::UnknownScope(scope.to_string()))?;
        let mut rebuilt: Vec<FocusableItem> = Vec::with_capacity(items.len());
        for mut item in items {
            if rebuilt.iter().any(|existing| existing.id == item.id) {
                return Err(FocusError::DuplicateItem {
                    scope: scope.to_string(),
                    id: item.id,
                });
            }
            item.index = rebuilt.len();
            rebuilt.push(item);
        }
        *slot = rebuilt;
        Ok(slot.len())
    }

    /// Re-read geometry for every item in the scope. Returns how many items
    /// came back renderable; zero is a valid answer, not an error.
    pub fn remeasure(&mut self, scope: &str, source: &dyn Measure) -> Result<usize, FocusError> {
        let items = self
            .scopes
            .get_mut(scope)
            .ok_or_else(|| FocusError::UnknownScope(scope.to_string()))?;
        let mut visible = 0;
        for item in items.iter_mut() {
            item.geometry = source.measure(scope, &item.id);
            if item.visible_bounds().is_some() {
                visible += 1;
            }
        }
        Ok(visible)
    }

    /// Items of a scope in index order; empty for an unknown scope.
    pub fn items_in_scope(&self, scope: &str) -> &[FocusableItem] {
        self.scopes.get(scope).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn item(&self, scope: &str, index: usize) -> Option<&FocusableItem> {
        self.items_in_scope(scope).get(index)
    }

    pub fn index_of(&self, scope: &str, id: &str) -> Option<usize> {
        self.items_in_scope(scope).iter().position(|item| item.id == id)
    }

    pub fn len(&self, scope: &str) -> usize {
        self.items_in_scope(scope).len()
    }

    pub fn clear(&mut self) {
        self.scopes.clear();
    }
}
