//! Deferred engine work: debounced re-measurement and smooth-scroll
//! completion.
//!
//! Each kind of work has a single slot. A new request replaces whatever was
//! waiting (last request wins) and a navigation event clears both slots;
//! nothing is ever queued behind anything else. Callers pass `now` so the
//! host's tick drives the clock.

use std::time::{Duration, Instant};

use super::viewport::ScrollCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum Work {
    /// Geometry of this scope should be re-read.
    Remeasure { scope: String },
    /// A smooth scroll in `scope` has finished; the container now sits at
    /// `command.top`.
    ScrollSettled { scope: String, command: ScrollCommand },
}

#[derive(Debug, Clone)]
struct Pending<T> {
    payload: T,
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    debounce: Duration,
    settle: Duration,
    remeasure: Option<Pending<String>>,
    scroll: Option<Pending<(String, ScrollCommand)>>,
}

impl Scheduler {
    pub fn new(debounce: Duration, settle: Duration) -> Self {
        Self {
            debounce,
            settle,
            remeasure: None,
            scroll: None,
        }
    }

    /// Ask for a re-measure after the debounce window. Each call pushes the
    /// deadline back, so a burst of changes yields one measurement.
    pub fn request_remeasure(&mut self, scope: &str, now: Instant) {
        self.remeasure = Some(Pending {
            payload: scope.to_string(),
            due: now + self.debounce,
        });
    }

    /// Track a smooth scroll until it settles. Replaces any scroll in flight.
    pub fn begin_scroll(&mut self, scope: &str, command: ScrollCommand, now: Instant) {
        self.scroll = Some(Pending {
            payload: (scope.to_string(), command),
            due: now + self.settle,
        });
    }

    /// Drop everything pending. Returns true if anything was dropped.
    pub fn supersede(&mut self) -> bool {
        let had = self.is_pending();
        self.remeasure = None;
        self.scroll = None;
        had
    }

    pub fn is_pending(&self) -> bool {
        self.remeasure.is_some() || self.scroll.is_some()
    }

    /// Take the work that is due at `now`. A settled scroll comes first
    /// because it changes the geometry the re-measure would read.
    pub fn poll(&mut self, now: Instant) -> Vec<Work> {
        let mut due = Vec::new();
        if self.scroll.as_ref().map_or(false, |p| p.due <= now) {
            if let Some(Pending {
                payload: (scope, command),
                ..
            }) = self.scroll.take()
            {
                due.push(Work::ScrollSettled { scope, command });
            }
        }
        if self.remeasure.as_ref().map_or(false, |p| p.due <= now) {
            if let Some(p) = self.remeasure.take() {
                due.push(Work::Remeasure { scope: p.payload });
            }
        }
        due
    }
}
