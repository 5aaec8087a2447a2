//! Host runtime
//!
//! The runtime owns mounted widgets and drives them sequentially on one
//! thread: it calls lifecycle hooks, routes input events (bubbling through
//! parents until a handler stops propagation), advances the timer queue one
//! tick at a time, and renders widgets on request.
//!
//! ```rust
//! use ion_core::events::Event;
//! use ion_widgets::prelude::*;
//!
//! let mut rt = Runtime::new();
//! let id = rt.mount(|ctx| checkbox().build(ctx));
//!
//! rt.dispatch(id, Event::click()).unwrap();
//! rt.run_until_idle();
//!
//! assert!(rt.widget::<Checkbox>(id).unwrap().is_checked());
//! ```

use ion_core::events::Event;
use ion_core::view::{HostData, Node};
use rustc_hash::FxHashMap;

use crate::context::WidgetContext;
use crate::error::{Result, WidgetError};
use crate::widget::{downcast_mut, downcast_ref, Widget, WidgetId};

/// Ticks `run_until_idle` will process before giving up on a widget that
/// keeps rescheduling itself
const MAX_IDLE_TICKS: usize = 64;

/// Output of rendering one widget
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub host: HostData,
    pub children: Vec<Node>,
}

impl Rendered {
    /// Markup of the children, concatenated
    pub fn markup(&self) -> String {
        self.children.iter().map(Node::to_string).collect()
    }
}

/// The host runtime
pub struct Runtime {
    ctx: WidgetContext,
    widgets: FxHashMap<WidgetId, Box<dyn Widget>>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            ctx: WidgetContext::new(),
            widgets: FxHashMap::default(),
        }
    }

    // =========================================================================
    // Mounting
    // =========================================================================

    /// Build a widget against the context, mount it, and run `will_load`
    pub fn mount<W, F>(&mut self, build: F) -> WidgetId
    where
        W: Widget,
        F: FnOnce(&mut WidgetContext) -> W,
    {
        let widget = build(&mut self.ctx);
        let id = widget.id();
        self.widgets.insert(id, Box::new(widget));
        tracing::debug!(?id, "mounted widget");

        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.will_load(&mut self.ctx);
        }
        id
    }

    /// Mount a widget as a child of `parent`; events it does not stop
    /// bubble up to the parent
    pub fn mount_child<W, F>(&mut self, parent: WidgetId, build: F) -> Result<WidgetId>
    where
        W: Widget,
        F: FnOnce(&mut WidgetContext) -> W,
    {
        if !self.widgets.contains_key(&parent) {
            return Err(WidgetError::NotFound(parent));
        }
        let widget = build(&mut self.ctx);
        let id = widget.id();
        self.ctx.set_parent(id, parent);
        self.widgets.insert(id, Box::new(widget));
        tracing::debug!(?id, ?parent, "mounted child widget");

        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.will_load(&mut self.ctx);
        }
        Ok(id)
    }

    /// Run `will_unload` and remove a widget and its descendants
    pub fn unmount(&mut self, id: WidgetId) -> Result<()> {
        if !self.widgets.contains_key(&id) {
            return Err(WidgetError::NotFound(id));
        }
        for child in self.ctx.children(id) {
            self.unmount(child)?;
        }
        if let Some(mut widget) = self.widgets.remove(&id) {
            widget.will_unload(&mut self.ctx);
        }
        self.ctx.unregister_widget(id);
        tracing::debug!(?id, "unmounted widget");
        Ok(())
    }

    pub fn is_mounted(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Deliver an event to `target`, then to each ancestor until a handler
    /// stops propagation. Returns the event as the last handler left it.
    pub fn dispatch(&mut self, target: WidgetId, mut event: Event) -> Result<Event> {
        if !self.widgets.contains_key(&target) {
            return Err(WidgetError::NotFound(target));
        }

        let mut current = Some(target);
        while let Some(id) = current {
            if let Some(widget) = self.widgets.get_mut(&id) {
                widget.handle_event(&mut self.ctx, &mut event);
            }
            if event.propagation_stopped {
                break;
            }
            current = self.ctx.parent(id);
        }
        Ok(event)
    }

    /// Deliver a keyboard event to the focused widget
    pub fn dispatch_key(&mut self, event: Event) -> Result<Event> {
        let target = self.ctx.focused().ok_or(WidgetError::NoFocus)?;
        self.dispatch(target, event)
    }

    /// Move keyboard focus to `id`, sending blur/focus events
    pub fn focus(&mut self, id: WidgetId) -> Result<()> {
        if !self.widgets.contains_key(&id) {
            return Err(WidgetError::NotFound(id));
        }
        if self.ctx.is_focused(id) {
            return Ok(());
        }
        if let Some(previous) = self.ctx.blur() {
            if self.widgets.contains_key(&previous) {
                self.dispatch(previous, Event::blur())?;
            }
        }
        self.ctx.focus(id);
        self.dispatch(id, Event::focus())?;
        Ok(())
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Advance one tick and deliver every timer that became due.
    /// Returns how many timers fired.
    pub fn tick(&mut self) -> usize {
        let fired = self.ctx.advance_timers();
        for (timer, owner) in &fired {
            match self.widgets.get_mut(owner) {
                Some(widget) => widget.on_timer(&mut self.ctx, *timer),
                None => tracing::warn!(?owner, ?timer, "timer fired for unmounted widget"),
            }
        }
        fired.len()
    }

    /// Tick until no timers are pending. Returns the number of ticks run.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ticks = 0;
        while self.ctx.pending_timers() > 0 && ticks < MAX_IDLE_TICKS {
            self.tick();
            ticks += 1;
        }
        if self.ctx.pending_timers() > 0 {
            tracing::warn!(
                pending = self.ctx.pending_timers(),
                "timers still pending after {} ticks",
                MAX_IDLE_TICKS
            );
        }
        ticks
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render a widget and clear its dirty flag
    pub fn render(&mut self, id: WidgetId) -> Result<Rendered> {
        let widget = self.widgets.get(&id).ok_or(WidgetError::NotFound(id))?;
        let rendered = Rendered {
            host: widget.host_data(),
            children: widget.render(),
        };
        self.ctx.clear_dirty(id);
        Ok(rendered)
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Typed access to a mounted widget
    pub fn widget<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        self.widgets.get(&id).and_then(|w| downcast_ref(&**w))
    }

    /// Typed mutable access to a mounted widget, together with the context
    /// its setters need
    pub fn widget_mut<W: Widget>(&mut self, id: WidgetId) -> Option<(&mut W, &mut WidgetContext)> {
        let widget = self.widgets.get_mut(&id)?;
        downcast_mut(&mut **widget).map(|w| (w, &mut self.ctx))
    }

    pub fn context(&self) -> &WidgetContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut WidgetContext {
        &mut self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ion_core::events::{event_types, KeyCode};
    use ion_core::timer::TimerId;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records what reaches it and optionally stops propagation
    struct Probe {
        id: WidgetId,
        stop: bool,
        seen: Rc<RefCell<Vec<(WidgetId, u32)>>>,
        reschedule: bool,
        fired: u32,
    }

    impl Probe {
        fn new(ctx: &mut WidgetContext, seen: Rc<RefCell<Vec<(WidgetId, u32)>>>) -> Self {
            Self {
                id: ctx.register_widget(),
                stop: false,
                seen,
                reschedule: false,
                fired: 0,
            }
        }
    }

    impl Widget for Probe {
        fn id(&self) -> WidgetId {
            self.id
        }

        fn handle_event(&mut self, _ctx: &mut WidgetContext, event: &mut Event) {
            self.seen.borrow_mut().push((self.id, event.event_type));
            if self.stop {
                event.stop_propagation();
            }
        }

        fn on_timer(&mut self, ctx: &mut WidgetContext, _timer: TimerId) {
            self.fired += 1;
            if self.reschedule {
                ctx.set_timeout(self.id);
            }
        }

        fn render(&self) -> Vec<Node> {
            vec![Node::new("span")]
        }
    }

    #[test]
    fn test_events_bubble_to_parent() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut rt = Runtime::new();
        let parent = rt.mount(|ctx| Probe::new(ctx, seen.clone()));
        let child = rt
            .mount_child(parent, |ctx| Probe::new(ctx, seen.clone()))
            .unwrap();

        rt.dispatch(child, Event::click()).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![(child, event_types::CLICK), (parent, event_types::CLICK)]
        );
    }

    #[test]
    fn test_stop_propagation_keeps_event_from_parent() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut rt = Runtime::new();
        let parent = rt.mount(|ctx| Probe::new(ctx, seen.clone()));
        let child = rt
            .mount_child(parent, |ctx| {
                let mut p = Probe::new(ctx, seen.clone());
                p.stop = true;
                p
            })
            .unwrap();

        let ev = rt.dispatch(child, Event::click()).unwrap();
        assert!(ev.propagation_stopped);
        assert_eq!(*seen.borrow(), vec![(child, event_types::CLICK)]);
    }

    #[test]
    fn test_dispatch_key_requires_focus() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut rt = Runtime::new();
        let id = rt.mount(|ctx| Probe::new(ctx, seen.clone()));

        assert!(matches!(
            rt.dispatch_key(Event::key_down(KeyCode::Space)),
            Err(WidgetError::NoFocus)
        ));

        rt.focus(id).unwrap();
        rt.dispatch_key(Event::key_down(KeyCode::Space)).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![(id, event_types::FOCUS), (id, event_types::KEY_DOWN)]
        );
    }

    #[test]
    fn test_focus_change_sends_blur() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut rt = Runtime::new();
        let a = rt.mount(|ctx| Probe::new(ctx, seen.clone()));
        let b = rt.mount(|ctx| Probe::new(ctx, seen.clone()));

        rt.focus(a).unwrap();
        rt.focus(b).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                (a, event_types::FOCUS),
                (a, event_types::BLUR),
                (b, event_types::FOCUS)
            ]
        );
    }

    #[test]
    fn test_unknown_widget_errors() {
        let mut rt = Runtime::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = rt.mount(|ctx| Probe::new(ctx, seen));
        rt.unmount(id).unwrap();

        assert!(matches!(
            rt.dispatch(id, Event::click()),
            Err(WidgetError::NotFound(_))
        ));
        assert!(matches!(rt.render(id), Err(WidgetError::NotFound(_))));
        assert!(matches!(rt.unmount(id), Err(WidgetError::NotFound(_))));
    }

    #[test]
    fn test_unmount_removes_children() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut rt = Runtime::new();
        let parent = rt.mount(|ctx| Probe::new(ctx, seen.clone()));
        let child = rt
            .mount_child(parent, |ctx| Probe::new(ctx, seen.clone()))
            .unwrap();

        rt.unmount(parent).unwrap();
        assert!(!rt.is_mounted(child));
        assert!(!rt.context().is_registered(child));
    }

    #[test]
    fn test_run_until_idle_is_bounded() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut rt = Runtime::new();
        let id = rt.mount(|ctx| {
            let mut p = Probe::new(ctx, seen.clone());
            p.reschedule = true;
            p
        });
        rt.context_mut().set_timeout(id);

        assert_eq!(rt.run_until_idle(), MAX_IDLE_TICKS);
        assert_eq!(rt.widget::<Probe>(id).unwrap().fired, MAX_IDLE_TICKS as u32);
    }

    #[test]
    fn test_typed_widget_access() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut rt = Runtime::new();
        let probe = rt.mount(|ctx| Probe::new(ctx, seen.clone()));
        let cb = rt.mount(|ctx| crate::checkbox::checkbox().build(ctx));

        assert_eq!(rt.widget::<Probe>(probe).map(|p| p.id), Some(probe));
        assert!(rt.widget::<crate::checkbox::Checkbox>(probe).is_none());
        assert!(rt.widget_mut::<Probe>(cb).is_none());

        {
            let (checkbox, ctx) = rt.widget_mut::<crate::checkbox::Checkbox>(cb).unwrap();
            checkbox.set_checked(ctx, true);
        }
        assert!(rt
            .widget::<crate::checkbox::Checkbox>(cb)
            .unwrap()
            .is_checked());
        assert!(rt.context().is_dirty(cb));
    }

    #[test]
    fn test_render_clears_dirty() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut rt = Runtime::new();
        let id = rt.mount(|ctx| Probe::new(ctx, seen));
        assert!(rt.context().is_dirty(id));

        let rendered = rt.render(id).unwrap();
        assert_eq!(rendered.markup(), "<span></span>");
        assert!(!rt.context().is_dirty(id));
    }
}
