//! Key dispatch — the single input route into the engine.
//!
//! Raw codes are normalised for the configured remote platform and routed to
//! the active scope. Directions go through the resolver after a mandatory
//! re-measure; this is the only place `current_index` moves. SELECT and BACK
//! call the active scope's callbacks and hand their actions back to the host.

use tracing::debug;

use super::engine::FocusEngine;
use super::event::{Direction, NavigationEvent};
use super::registry::Measure;
use super::resolver::resolve;
use super::scope::ScopeKind;

/// What a key press did.
#[derive(Debug, PartialEq)]
pub enum Dispatch<A> {
    /// Unknown key code, or nothing mounted.
    Ignored,
    /// No candidate in that direction; focus stayed put.
    Retained { scope: String, index: usize },
    Moved { scope: String, from: usize, to: usize },
    Selected { scope: String, index: usize, actions: Vec<A> },
    /// `closed_modal` is true when BACK popped a modal.
    Back { scope: String, closed_modal: bool, actions: Vec<A> },
}

impl<A> Dispatch<A> {
    pub fn into_actions(self) -> Vec<A> {
        match self {
            Dispatch::Selected { actions, .. } | Dispatch::Back { actions, .. } => actions,
            _ => Vec::new(),
        }
    }

    pub fn moved_to(&self) -> Option<usize> {
        match self {
            Dispatch::Moved { to, .. } => Some(*to),
            _ => None,
        }
    }
}

impl<A> FocusEngine<A> {
    /// Entry point for every raw remote key code.
    pub fn handle_key(&mut self, code: u32, source: &dyn Measure) -> Dispatch<A> {
        match self.platform.normalize(code) {
            Some(event) => self.dispatch(event, source),
            None => {
                debug!("dispatch: unhandled key code {}", code);
                Dispatch::Ignored
            }
        }
    }

    pub fn dispatch(&mut self, event: NavigationEvent, source: &dyn Measure) -> Dispatch<A> {
        if self.scheduler.supersede() {
            debug!("dispatch: {:?} superseded pending work", event);
        }
        let Some(scope_id) = self.active_scope_id().map(str::to_string) else {
            return Dispatch::Ignored;
        };
        match event {
            NavigationEvent::Select => self.select(scope_id),
            NavigationEvent::Back => self.back(scope_id),
            _ => match event.direction() {
                Some(direction) => self.navigate(scope_id, direction, source),
                None => Dispatch::Ignored,
            },
        }
    }

    fn navigate(&mut self, scope_id: String, direction: Direction, source: &dyn Measure) -> Dispatch<A> {
        self.remeasure_scope(&scope_id, source);

        let Some(scope) = self.stack.active_mut() else {
            return Dispatch::Ignored;
        };
        let from = scope.current_index();
        let items = self.registry.items_in_scope(&scope_id);
        match resolve(items, scope.isolation(), &self.tuning, from, direction) {
            Some(to) if to != from => {
                scope.focus(to);
                debug!("dispatch: '{}' {:?} {} -> {}", scope_id, direction, from, to);
                Dispatch::Moved {
                    scope: scope_id,
                    from,
                    to,
                }
            }
            _ => Dispatch::Retained {
                scope: scope_id,
                index: from,
            },
        }
    }

    fn select(&mut self, scope_id: String) -> Dispatch<A> {
        let Some(scope) = self.stack.active_mut() else {
            return Dispatch::Ignored;
        };
        let index = scope.current_index();
        let actions = scope.select();
        debug!("dispatch: '{}' select {}", scope_id, index);
        Dispatch::Selected {
            scope: scope_id,
            index,
            actions,
        }
    }

    fn back(&mut self, scope_id: String) -> Dispatch<A> {
        let Some(scope) = self.stack.active_mut() else {
            return Dispatch::Ignored;
        };
        let is_modal = scope.kind() == ScopeKind::Modal;
        let actions = scope.back();
        let closed_modal = is_modal && self.close_modal();
        Dispatch::Back {
            scope: scope_id,
            closed_modal,
            actions,
        }
    }
}
