//! Focus scopes and the stack that decides which one receives input.
//!
//! The bottom of the stack is the mounted page. Modals push on top of it and
//! suspend it; popping a modal resumes the page exactly where it was. The
//! page itself is never popped by input, only replaced when the host
//! navigates to another page.

use std::fmt;

use tracing::debug;

use super::binding::{BackFn, ScopeBinding, SelectFn};
use super::zone::ZoneIsolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Page,
    Modal,
}

/// One navigation context: a page or a modal.
pub struct FocusScope<A> {
    id: String,
    kind: ScopeKind,
    total_items: usize,
    current_index: usize,
    isolation: ZoneIsolation,
    suspended: bool,
    on_select: Option<SelectFn<A>>,
    on_back: Option<BackFn<A>>,
}

impl<A> FocusScope<A> {
    pub fn new(id: impl Into<String>, kind: ScopeKind, total_items: usize) -> Self {
        Self {
            id: id.into(),
            kind,
            total_items,
            current_index: 0,
            isolation: ZoneIsolation::default(),
            suspended: false,
            on_select: None,
            on_back: None,
        }
    }

    /// Build a scope from a binding; the initial index is clamped.
    pub fn from_binding(binding: ScopeBinding<A>) -> Self {
        let mut scope = Self::new(binding.scope_id, binding.kind, binding.layout.total_items());
        scope.isolation = binding.layout.zone_isolation().clone();
        scope.on_select = binding.on_select;
        scope.on_back = binding.on_back;
        scope.current_index = binding.initial_index;
        scope.clamp();
        scope
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn isolation(&self) -> &ZoneIsolation {
        &self.isolation
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Content grew or shrank. Focus is clamped right now, not at the next
    /// key press.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.clamp();
    }

    pub fn set_isolation(&mut self, isolation: ZoneIsolation) {
        self.isolation = isolation;
    }

    pub(crate) fn focus(&mut self, index: usize) {
        self.current_index = index;
        self.clamp();
    }

    pub(crate) fn select(&mut self) -> Vec<A> {
        let index = self.current_index;
        match self.on_select.as_mut() {
            Some(f) if self.total_items > 0 => f(index),
            _ => Vec::new(),
        }
    }

    pub(crate) fn back(&mut self) -> Vec<A> {
        match self.on_back.as_mut() {
            Some(f) => f(),
            None => Vec::new(),
        }
    }

    fn clamp(&mut self) {
        self.current_index = self.current_index.min(self.total_items.saturating_sub(1));
    }
}

impl<A> fmt::Debug for FocusScope<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusScope")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("total_items", &self.total_items)
            .field("current_index", &self.current_index)
            .field("suspended", &self.suspended)
            .finish()
    }
}

/// Ordered scopes; the last one is active.
pub struct ScopeStack<A> {
    scopes: Vec<FocusScope<A>>,
}

impl<A> ScopeStack<A> {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Suspend the current top and make `scope` active.
    pub fn push(&mut self, mut scope: FocusScope<A>) {
        if let Some(top) = self.scopes.last_mut() {
            top.suspended = true;
        }
        scope.suspended = false;
        debug!("scope stack: push '{}' (depth {})", scope.id, self.scopes.len() + 1);
        self.scopes.push(scope);
    }

    /// Remove the top scope and resume the one below, untouched. With only
    /// the base scope left this is a no-op.
    pub fn pop(&mut self) -> Option<FocusScope<A>> {
        if self.scopes.len() <= 1 {
            debug!("scope stack: pop ignored at depth {}", self.scopes.len());
            return None;
        }
        let popped = self.scopes.pop();
        if let Some(top) = self.scopes.last_mut() {
            top.suspended = false;
        }
        popped
    }

    /// Page navigation: drop every scope (the old page and any modals over
    /// it) and install `scope` as the new base. Returns the dropped scopes,
    /// bottom first.
    pub fn replace_base(&mut self, scope: FocusScope<A>) -> Vec<FocusScope<A>> {
        let dropped = std::mem::take(&mut self.scopes);
        self.push(scope);
        dropped
    }

    /// Remove everything, base included.
    pub fn clear(&mut self) -> Vec<FocusScope<A>> {
        std::mem::take(&mut self.scopes)
    }

    pub fn active(&self) -> Option<&FocusScope<A>> {
        self.scopes.last()
    }

    pub fn active_mut(&mut self) -> Option<&mut FocusScope<A>> {
        self.scopes.last_mut()
    }

    /// Focus index of the active scope.
    pub fn current(&self) -> Option<usize> {
        self.active().map(FocusScope::current_index)
    }

    pub fn get(&self, id: &str) -> Option<&FocusScope<A>> {
        self.scopes.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut FocusScope<A>> {
        self.scopes.iter_mut().find(|s| s.id == id)
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl<A> Default for ScopeStack<A> {
    fn default() -> Self {
        Self::new()
    }
}
