//! Widget trait and identifiers

use std::any::Any;

use ion_core::events::Event;
use ion_core::timer::TimerId;
use ion_core::view::{HostData, Node};
use slotmap::new_key_type;

use crate::context::WidgetContext;

new_key_type! {
    /// Unique identifier for a widget
    pub struct WidgetId;
}

/// Downcasting support for widget trait objects
pub trait AsAny: 'static {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A widget driven by the host [`Runtime`](crate::runtime::Runtime)
///
/// The runtime calls the lifecycle hooks in order: `will_load` once after
/// mounting, then any number of `handle_event` / `on_timer` calls, then
/// `will_unload` before the widget is dropped. `host_data` and `render`
/// must be pure functions of the widget's current state.
pub trait Widget: AsAny {
    /// Widget ID assigned by the context
    fn id(&self) -> WidgetId;

    /// Called once, right after the widget is mounted
    fn will_load(&mut self, _ctx: &mut WidgetContext) {}

    /// Called once, right before the widget is removed
    fn will_unload(&mut self, _ctx: &mut WidgetContext) {}

    /// Handle an input event targeted at (or bubbling through) this widget
    fn handle_event(&mut self, ctx: &mut WidgetContext, event: &mut Event);

    /// A timer this widget scheduled has fired
    fn on_timer(&mut self, _ctx: &mut WidgetContext, _timer: TimerId) {}

    /// Classes and attributes for the host element
    fn host_data(&self) -> HostData {
        HostData::default()
    }

    /// Build the widget's children
    fn render(&self) -> Vec<Node>;
}

pub(crate) fn downcast_ref<'a, W: Widget>(widget: &'a (dyn Widget + 'static)) -> Option<&'a W> {
    <dyn Widget as AsAny>::as_any(widget).downcast_ref::<W>()
}

pub(crate) fn downcast_mut<'a, W: Widget>(
    widget: &'a mut (dyn Widget + 'static),
) -> Option<&'a mut W> {
    <dyn Widget as AsAny>::as_any_mut(widget).downcast_mut::<W>()
}
