//! Zones (named navigation sub-regions) and the isolation table that
//! decides which direction axes may cross between them.

use std::fmt;
use std::str::FromStr;

use super::event::{Axis, Direction};

/// Navigation domain an item belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Zone {
    Sidebar,
    HeaderControl,
    /// A grid of content tiles; the name tells sections apart
    /// (`content-grid:genres`, `content-grid:stations`).
    ContentGrid(String),
    /// Anything else a page wants to tell apart (modal lists, split columns).
    Named(String),
}

/// The coarse class of a zone, used by isolation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    Sidebar,
    HeaderControl,
    ContentGrid,
    Named,
}

impl Zone {
    pub fn grid(name: impl Into<String>) -> Self {
        Zone::ContentGrid(name.into())
    }

    pub fn named(name: impl Into<String>) -> Self {
        Zone::Named(name.into())
    }

    pub fn kind(&self) -> ZoneKind {
        match self {
            Zone::Sidebar => ZoneKind::Sidebar,
            Zone::HeaderControl => ZoneKind::HeaderControl,
            Zone::ContentGrid(_) => ZoneKind::ContentGrid,
            Zone::Named(_) => ZoneKind::Named,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Sidebar => write!(f, "sidebar"),
            Zone::HeaderControl => write!(f, "header-control"),
            Zone::ContentGrid(name) => write!(f, "content-grid:{}", name),
            Zone::Named(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Zone {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "sidebar" => Zone::Sidebar,
            "header-control" => Zone::HeaderControl,
            other => match other.strip_prefix("content-grid:") {
                Some(name) => Zone::ContentGrid(name.to_string()),
                None => Zone::Named(other.to_string()),
            },
        })
    }
}

/// One side of an isolation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneMatch {
    Any,
    Kind(ZoneKind),
    Exact(Zone),
}

impl ZoneMatch {
    pub fn matches(&self, zone: &Zone) -> bool {
        match self {
            ZoneMatch::Any => true,
            ZoneMatch::Kind(kind) => zone.kind() == *kind,
            ZoneMatch::Exact(z) => z == zone,
        }
    }
}

/// Movement along `axis` may not cross between a zone matching `a` and a
/// different zone matching `b` (in either order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolationRule {
    pub axis: Axis,
    pub a: ZoneMatch,
    pub b: ZoneMatch,
}

impl IsolationRule {
    fn blocks(&self, from: &Zone, to: &Zone) -> bool {
        (self.a.matches(from) && self.b.matches(to)) || (self.a.matches(to) && self.b.matches(from))
    }
}

/// Which direction axes may cross which zone pairs.
///
/// Moving inside one zone is always allowed. The default forbids UP/DOWN
/// between the sidebar and every other zone, while LEFT/RIGHT may cross.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneIsolation {
    rules: Vec<IsolationRule>,
}

impl ZoneIsolation {
    /// No rules: every zone pair may be crossed on both axes.
    pub fn open() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn forbid(mut self, axis: Axis, a: ZoneMatch, b: ZoneMatch) -> Self {
        self.rules.push(IsolationRule { axis, a, b });
        self
    }

    pub fn rules(&self) -> &[IsolationRule] {
        &self.rules
    }

    pub fn allows(&self, from: &Zone, to: &Zone, direction: Direction) -> bool {
        if from == to {
            return true;
        }
        let axis = direction.axis();
        !self
            .rules
            .iter()
            .any(|rule| rule.axis == axis && rule.blocks(from, to))
    }
}

impl Default for ZoneIsolation {
    fn default() -> Self {
        Self::open().forbid(
            Axis::Vertical,
            ZoneMatch::Kind(ZoneKind::Sidebar),
            ZoneMatch::Any,
        )
    }
}
