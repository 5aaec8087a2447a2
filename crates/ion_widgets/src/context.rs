//! Widget Context - registration, focus, dirty tracking, and timers
//!
//! The WidgetContext is what a widget sees of the host while it runs a
//! lifecycle hook or handles an event:
//! - Widget registration and the parent chain used for event bubbling
//! - Which widget has keyboard focus
//! - Dirty tracking so the host only re-renders widgets that changed
//! - Zero-delay timers for deferred work (debounced notifications)
//!
//! Widgets themselves are owned by the [`Runtime`](crate::runtime::Runtime);
//! the context only holds per-widget bookkeeping.

use ion_core::timer::{TimerId, TimerQueue};
use rustc_hash::FxHashSet;
use slotmap::SlotMap;

use crate::widget::WidgetId;

/// Per-widget bookkeeping
#[derive(Default)]
struct WidgetData {
    parent: Option<WidgetId>,
}

/// Shared state handed to widgets by the runtime
pub struct WidgetContext {
    widgets: SlotMap<WidgetId, WidgetData>,
    dirty: FxHashSet<WidgetId>,
    focused: Option<WidgetId>,
    timers: TimerQueue<WidgetId>,
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetContext {
    /// Create a new widget context
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
            dirty: FxHashSet::default(),
            focused: None,
            timers: TimerQueue::new(),
        }
    }

    // =========================================================================
    // Widget Registration
    // =========================================================================

    /// Register a new widget and get its ID. New widgets start dirty.
    pub fn register_widget(&mut self) -> WidgetId {
        let id = self.widgets.insert(WidgetData::default());
        self.dirty.insert(id);
        id
    }

    /// Unregister a widget, dropping its timers, dirty flag and focus
    pub fn unregister_widget(&mut self, id: WidgetId) -> bool {
        if self.widgets.remove(id).is_none() {
            return false;
        }
        let dropped = self.timers.clear_owner(id);
        if dropped > 0 {
            tracing::trace!(?id, dropped, "dropped timers of unregistered widget");
        }
        self.dirty.remove(&id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        true
    }

    /// Check if a widget is registered
    pub fn is_registered(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    /// Attach `child` under `parent` for event bubbling
    pub fn set_parent(&mut self, child: WidgetId, parent: WidgetId) -> bool {
        if child == parent || !self.widgets.contains_key(parent) {
            return false;
        }
        match self.widgets.get_mut(child) {
            Some(data) => {
                data.parent = Some(parent);
                true
            }
            None => false,
        }
    }

    /// Parent of a widget, if it has one
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widgets.get(id).and_then(|d| d.parent)
    }

    /// Direct children of a widget
    pub fn children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .filter(|(_, d)| d.parent == Some(id))
            .map(|(child, _)| child)
            .collect()
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Give keyboard focus to a widget. Returns the previously focused one.
    pub fn focus(&mut self, id: WidgetId) -> Option<WidgetId> {
        if !self.is_registered(id) {
            return self.focused;
        }
        self.focused.replace(id)
    }

    /// Clear keyboard focus, returning the widget that had it
    pub fn blur(&mut self) -> Option<WidgetId> {
        self.focused.take()
    }

    /// Widget that currently has keyboard focus
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focused == Some(id)
    }

    // =========================================================================
    // Dirty Tracking
    // =========================================================================

    /// Mark a widget as needing re-render
    pub fn mark_dirty(&mut self, id: WidgetId) {
        if self.is_registered(id) {
            self.dirty.insert(id);
        }
    }

    /// Check if a specific widget needs re-rendering
    pub fn is_dirty(&self, id: WidgetId) -> bool {
        self.dirty.contains(&id)
    }

    /// Check if any widgets need re-rendering
    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Clear one widget's dirty flag (after rendering it)
    pub fn clear_dirty(&mut self, id: WidgetId) {
        self.dirty.remove(&id);
    }

    /// Clear all dirty flags
    pub fn clear_all_dirty(&mut self) {
        self.dirty.clear();
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Schedule a zero-delay timer for `owner`; it fires on the next tick
    pub fn set_timeout(&mut self, owner: WidgetId) -> TimerId {
        self.timers.set_timeout(owner)
    }

    /// Cancel a pending timer
    pub fn clear_timeout(&mut self, timer: TimerId) -> bool {
        self.timers.clear_timeout(timer)
    }

    pub fn is_timer_pending(&self, timer: TimerId) -> bool {
        self.timers.is_pending(timer)
    }

    /// Number of timers waiting for the next tick
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Current scheduling tick
    pub fn current_tick(&self) -> u64 {
        self.timers.current_tick()
    }

    pub(crate) fn advance_timers(&mut self) -> Vec<(TimerId, WidgetId)> {
        self.timers.advance()
    }
}
