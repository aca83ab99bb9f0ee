//! FocusEngine — the registry, the scope stack and the viewport keeper
//! behind one owner.
//!
//! The host creates exactly one engine at start-up and calls
//! [`shutdown`](FocusEngine::shutdown) at exit. Pages and modals never touch
//! the registry or the stack directly: they hand over a [`ScopeBinding`] and
//! re-declare their [`ScopeLayout`] when content changes. Raw input enters
//! through [`handle_key`](FocusEngine::handle_key) (see `dispatcher.rs`),
//! which is the only path that moves focus.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::binding::{ScopeBinding, ScopeLayout};
use super::keys::RemotePlatform;
use super::registry::{FocusRegistry, FocusableItem, Measure};
use super::resolver::Tuning;
use super::schedule::{Scheduler, Work};
use super::scope::{FocusScope, ScopeKind, ScopeStack};
use super::viewport::{self, ItemExtent, ScrollCommand, ScrollContainer, ViewportKeeper};
use crate::config::Config;

/// How a page should paint one of its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusVisual {
    /// Focused item of the active scope.
    Focused,
    /// Remembered focus of a scope sitting under a modal.
    Suspended,
    Idle,
}

pub struct FocusEngine<A> {
    pub(super) registry: FocusRegistry,
    pub(super) stack: ScopeStack<A>,
    pub(super) tuning: Tuning,
    pub(super) keeper: ViewportKeeper,
    pub(super) scheduler: Scheduler,
    pub(super) platform: RemotePlatform,
    return_focus: HashMap<String, usize>,
}

impl<A> FocusEngine<A> {
    pub fn new(
        tuning: Tuning,
        keeper: ViewportKeeper,
        scheduler: Scheduler,
        platform: RemotePlatform,
    ) -> Self {
        Self {
            registry: FocusRegistry::new(),
            stack: ScopeStack::new(),
            tuning,
            keeper,
            scheduler,
            platform,
            return_focus: HashMap::new(),
        }
    }

    /// `row_height` converts the configured padding rows to pixel equivalents.
    pub fn from_config(config: &Config, row_height: f32) -> Self {
        let nav = &config.navigation;
        Self::new(
            nav.tuning(),
            ViewportKeeper::new(config.viewport.padding(row_height)),
            Scheduler::new(nav.remeasure_debounce(), nav.smooth_scroll()),
            config.remote.platform,
        )
    }

    pub fn platform(&self) -> RemotePlatform {
        self.platform
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn registry(&self) -> &FocusRegistry {
        &self.registry
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Install a page as the base scope, dropping the previous page and any
    /// modals over it. A stashed return-focus index for this scope id is
    /// applied here, once.
    pub fn mount_page(&mut self, mut binding: ScopeBinding<A>) {
        if binding.kind != ScopeKind::Page {
            warn!("mount_page: '{}' is not a page binding", binding.scope_id);
        }
        if let Some(index) = self.return_focus.remove(&binding.scope_id) {
            debug!("mount_page: restoring '{}' to {}", binding.scope_id, index);
            binding.initial_index = index;
        }
        let id = binding.scope_id.clone();
        let items = binding.layout.items();
        let scope = FocusScope::from_binding(binding);

        self.scheduler.supersede();
        for dropped in self.stack.replace_base(scope) {
            if dropped.id() != id {
                self.registry.close_scope(dropped.id());
            }
        }
        self.registry.open_scope(&id);
        self.rebuild_scope(&id, items);
        info!(
            "focus: mounted page '{}' ({} items) at {:?}",
            id,
            self.registry.len(&id),
            self.stack.current()
        );
    }

    pub fn unmount_page(&mut self) {
        self.scheduler.supersede();
        for dropped in self.stack.clear() {
            self.registry.close_scope(dropped.id());
        }
    }

    /// Push a modal over the current page. Ignored without a page under it
    /// or when a scope with the same id is already open.
    pub fn open_modal(&mut self, binding: ScopeBinding<A>) {
        if self.stack.is_empty() {
            warn!("open_modal: no page mounted for '{}'", binding.scope_id);
            return;
        }
        if self.stack.get(&binding.scope_id).is_some() {
            warn!("open_modal: '{}' is already open", binding.scope_id);
            return;
        }
        if binding.kind != ScopeKind::Modal {
            warn!("open_modal: '{}' is not a modal binding", binding.scope_id);
            return;
        }
        let id = binding.scope_id.clone();
        let items = binding.layout.items();
        let scope = FocusScope::from_binding(binding);

        self.scheduler.supersede();
        self.registry.open_scope(&id);
        self.stack.push(scope);
        self.rebuild_scope(&id, items);
        info!("focus: opened modal '{}' (depth {})", id, self.stack.depth());
    }

    /// Pop the active modal and resume the scope under it. Returns false when
    /// the active scope is a page.
    pub fn close_modal(&mut self) -> bool {
        let is_modal = self
            .stack
            .active()
            .map_or(false, |s| s.kind() == ScopeKind::Modal);
        if !is_modal {
            return false;
        }
        self.scheduler.supersede();
        match self.stack.pop() {
            Some(modal) => {
                self.registry.close_scope(modal.id());
                info!(
                    "focus: closed modal '{}', resumed {:?} at {:?}",
                    modal.id(),
                    self.active_scope_id(),
                    self.stack.current()
                );
                true
            }
            None => false,
        }
    }

    /// Re-declare a scope's layout after its content changed. Focus is
    /// clamped immediately; geometry is re-read after the debounce window.
    pub fn relayout(&mut self, scope_id: &str, layout: ScopeLayout) {
        self.relayout_at(scope_id, layout, Instant::now());
    }

    pub fn relayout_at(&mut self, scope_id: &str, layout: ScopeLayout, now: Instant) {
        let Some(scope) = self.stack.get_mut(scope_id) else {
            warn!("relayout: scope '{}' is not open", scope_id);
            return;
        };
        let before = scope.current_index();
        scope.set_total_items(layout.total_items());
        scope.set_isolation(layout.zone_isolation().clone());
        if scope.current_index() != before {
            debug!(
                "relayout: '{}' clamped focus {} -> {}",
                scope_id,
                before,
                scope.current_index()
            );
        }
        self.rebuild_scope(scope_id, layout.items());
        self.scheduler.request_remeasure(scope_id, now);
    }

    /// Replace a scope's registry items. When the registry refuses them it
    /// keeps the previous items, and the scope's item count follows the
    /// registry so focus never points past what it holds.
    pub(super) fn rebuild_scope(&mut self, scope_id: &str, items: Vec<FocusableItem>) {
        if let Err(e) = self.registry.rebuild(scope_id, items) {
            let held = self.registry.len(scope_id);
            warn!("rebuild: {} (keeping {} items)", e, held);
            if let Some(scope) = self.stack.get_mut(scope_id) {
                scope.set_total_items(held);
            }
        }
    }

    /// Remember where a page's focus should land the next time it mounts.
    pub fn stash_return_focus(&mut self, scope_id: &str, index: usize) {
        self.return_focus.insert(scope_id.to_string(), index);
    }

    /// Application exit.
    pub fn shutdown(&mut self) {
        self.scheduler.supersede();
        self.stack.clear();
        self.registry.clear();
        self.return_focus.clear();
        info!("focus: engine shut down");
    }

    // ── Geometry, scrolling and timers ───────────────────────────────────────

    /// Re-read geometry for the active scope now.
    pub fn remeasure(&mut self, source: &dyn Measure) -> usize {
        let Some(id) = self.active_scope_id().map(str::to_string) else {
            return 0;
        };
        self.remeasure_scope(&id, source)
    }

    pub(super) fn remeasure_scope(&mut self, scope_id: &str, source: &dyn Measure) -> usize {
        match self.registry.remeasure(scope_id, source) {
            Ok(visible) => visible,
            Err(e) => {
                warn!("remeasure: {}", e);
                0
            }
        }
    }

    /// Bring the focused item into view. The returned command is for the
    /// host to apply; the engine re-measures once the scroll settles.
    pub fn keep_visible(
        &mut self,
        item: ItemExtent,
        container: &dyn ScrollContainer,
    ) -> Option<ScrollCommand> {
        self.keep_visible_at(item, container, Instant::now())
    }

    pub fn keep_visible_at(
        &mut self,
        item: ItemExtent,
        container: &dyn ScrollContainer,
        now: Instant,
    ) -> Option<ScrollCommand> {
        let command = self.keeper.keep(item, container)?;
        match self.active_scope_id().map(str::to_string) {
            Some(scope) => self.scheduler.begin_scroll(&scope, command, now),
            None => warn!("keep_visible: no active scope to re-measure after scrolling"),
        }
        Some(command)
    }

    pub fn has_pending_work(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Run deferred work that is due. Call from the host's UI tick.
    pub fn tick(&mut self, source: &dyn Measure) -> Vec<Work> {
        self.tick_at(Instant::now(), source)
    }

    pub fn tick_at(&mut self, now: Instant, source: &dyn Measure) -> Vec<Work> {
        let work = self.scheduler.poll(now);
        for item in &work {
            match item {
                Work::Remeasure { scope } | Work::ScrollSettled { scope, .. } => {
                    if self.stack.get(scope).is_some() {
                        self.remeasure_scope(scope, source);
                    }
                }
            }
        }
        work
    }

    // ── Queries and render hooks ─────────────────────────────────────────────

    pub fn active_scope(&self) -> Option<&FocusScope<A>> {
        self.stack.active()
    }

    pub fn active_scope_id(&self) -> Option<&str> {
        self.stack.active().map(FocusScope::id)
    }

    pub fn scope(&self, scope_id: &str) -> Option<&FocusScope<A>> {
        self.stack.get(scope_id)
    }

    /// Focus index of the active scope.
    pub fn current(&self) -> Option<usize> {
        self.stack.current()
    }

    pub fn current_in(&self, scope_id: &str) -> Option<usize> {
        self.stack.get(scope_id).map(FocusScope::current_index)
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn is_focused(&self, scope_id: &str, index: usize) -> bool {
        self.visual_state(scope_id, index) == FocusVisual::Focused
    }

    pub fn visual_state(&self, scope_id: &str, index: usize) -> FocusVisual {
        match self.stack.get(scope_id) {
            Some(scope) if scope.total_items() > 0 && scope.current_index() == index => {
                if scope.is_suspended() {
                    FocusVisual::Suspended
                } else {
                    FocusVisual::Focused
                }
            }
            _ => FocusVisual::Idle,
        }
    }

    /// Items between focus and the end of `scope_id`.
    pub fn distance_to_end(&self, scope_id: &str) -> Option<usize> {
        self.stack.get(scope_id).map(viewport::distance_to_end)
    }
}
