//! Directional resolution: which item receives focus after a key press.
//!
//! Order of precedence:
//! 1. an authored override on the current item, returned verbatim;
//! 2. zone isolation, which removes forbidden zones from the candidate set;
//! 3. grid arithmetic, which keeps LEFT/RIGHT on the current row and
//!    UP/DOWN on the current column inside a grid zone, and lets a grid item
//!    leave only for boxes overlapping its row (or column) band;
//! 4. geometric nearest-neighbour scoring over what is left.
//!
//! No candidate means `None`: focus stays where it is. There is no
//! wraparound.

use std::cmp::Ordering;

use tracing::debug;

use super::event::Direction;
use super::geometry::Bounds;
use super::registry::{FocusableItem, Target};
use super::zone::{Zone, ZoneIsolation};

/// Geometric search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Minimum displacement along the queried direction before a candidate
    /// counts as lying in that direction.
    pub dead_zone: f32,
    /// Multiplier on cross-axis misalignment in the score.
    pub cross_axis_weight: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dead_zone: 10.0,
            cross_axis_weight: 2.0,
        }
    }
}

pub fn resolve(
    items: &[FocusableItem],
    isolation: &ZoneIsolation,
    tuning: &Tuning,
    current: usize,
    direction: Direction,
) -> Option<usize> {
    let origin = items.get(current)?;

    if let Some(target) = origin.overrides.get(direction) {
        match override_index(items, target) {
            Some(index) => return Some(index),
            None => debug!(
                "resolve: stale override {:?} on '{}' for {:?}, falling back",
                target, origin.id, direction
            ),
        }
    }

    let origin_box = origin.visible_bounds()?;
    let grid = GridCell::locate(items, origin);

    items
        .iter()
        .filter(|candidate| candidate.index != origin.index)
        .filter(|candidate| isolation.allows(&origin.zone, &candidate.zone, direction))
        .filter(|candidate| grid.map_or(true, |cell| cell.admits(items, candidate, direction)))
        .filter_map(|candidate| {
            let bounds = candidate.visible_bounds()?;
            if let Some(cell) = grid {
                if !cell.contains(items, candidate) && !shares_band(&origin_box, &bounds, direction) {
                    return None;
                }
            }
            score(&origin_box, &bounds, direction, tuning).map(|s| (s, candidate.index))
        })
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal).then(a.1.cmp(&b.1)))
        .map(|(_, index)| index)
}

fn override_index(items: &[FocusableItem], target: &Target) -> Option<usize> {
    match target {
        Target::Index(index) if *index < items.len() => Some(*index),
        Target::Index(_) => None,
        Target::Id(id) => items.iter().position(|item| &item.id == id),
    }
}

/// `primary + weight × cross`, or `None` when the candidate does not lie
/// beyond the dead zone in `direction`. Measured between box centres.
fn score(origin: &Bounds, candidate: &Bounds, direction: Direction, tuning: &Tuning) -> Option<f32> {
    let (ox, oy) = origin.center();
    let (cx, cy) = candidate.center();
    let (dx, dy) = (cx - ox, cy - oy);
    let (primary, cross) = match direction {
        Direction::Right => (dx, dy.abs()),
        Direction::Left => (-dx, dy.abs()),
        Direction::Down => (dy, dx.abs()),
        Direction::Up => (-dy, dx.abs()),
    };
    if primary <= tuning.dead_zone {
        return None;
    }
    Some(primary + tuning.cross_axis_weight * cross)
}

/// Row/column position of the origin inside its grid zone.
#[derive(Debug, Clone, Copy)]
struct GridCell<'a> {
    zone: &'a Zone,
    start: usize,
    columns: usize,
    row: usize,
    col: usize,
}

impl<'a> GridCell<'a> {
    fn locate(items: &'a [FocusableItem], origin: &'a FocusableItem) -> Option<Self> {
        if origin.columns <= 1 {
            return None;
        }
        let start = zone_start(items, &origin.zone, origin.index);
        let rel = origin.index - start;
        Some(Self {
            zone: &origin.zone,
            start,
            columns: origin.columns,
            row: rel / origin.columns,
            col: rel % origin.columns,
        })
    }

    /// Whether `candidate` belongs to this grid. The same tag in a separate
    /// run of items is a different grid.
    fn contains(&self, items: &[FocusableItem], candidate: &FocusableItem) -> bool {
        &candidate.zone == self.zone
            && candidate.index >= self.start
            && zone_start(items, self.zone, candidate.index) == self.start
    }

    /// Candidates in this grid must share the row (LEFT/RIGHT) or column
    /// (UP/DOWN); other zones pass through to isolation and geometry.
    fn admits(&self, items: &[FocusableItem], candidate: &FocusableItem, direction: Direction) -> bool {
        if !self.contains(items, candidate) {
            return true;
        }
        let rel = candidate.index - self.start;
        match direction {
            Direction::Left | Direction::Right => rel / self.columns == self.row,
            Direction::Up | Direction::Down => rel % self.columns == self.col,
        }
    }
}

/// Leaving a grid sideways only reaches boxes overlapping the origin's row
/// band; leaving it vertically only reaches boxes overlapping its column band.
fn shares_band(origin: &Bounds, candidate: &Bounds, direction: Direction) -> bool {
    match direction {
        Direction::Left | Direction::Right => {
            candidate.y < origin.bottom() && origin.y < candidate.bottom()
        }
        Direction::Up | Direction::Down => {
            candidate.x < origin.right() && origin.x < candidate.right()
        }
    }
}

/// First index of the contiguous run of `zone` items containing `index`.
fn zone_start(items: &[FocusableItem], zone: &Zone, index: usize) -> usize {
    let mut start = index;
    while start > 0 && items.get(start - 1).map_or(false, |item| &item.zone == zone) {
        start -= 1;
    }
    start
}
