//! Checkbox widget
//!
//! The Checkbox widget provides:
//! - Toggle state: checked/unchecked, plus a disabled flag
//! - `ionChange` when `checked` changes, carrying the new value
//! - `ionStyle` describing the current flags for a parent container,
//!   debounced so a burst of changes within one tick is reported once
//! - Space-key and click activation
//! - Accessible markup: an indicator and a `role="checkbox"` cover button
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use ion_core::events::Event;
//! use ion_widgets::prelude::*;
//!
//! let changes = Rc::new(RefCell::new(Vec::new()));
//! let sink = changes.clone();
//!
//! let mut rt = Runtime::new();
//! let id = rt.mount(|ctx| {
//!     checkbox()
//!         .value("pepperoni")
//!         .label_id("lbl-pepperoni")
//!         .on_change(move |c| sink.borrow_mut().push(c.checked))
//!         .build(ctx)
//! });
//!
//! rt.dispatch(id, Event::click()).unwrap();
//! assert_eq!(*changes.borrow(), vec![true]);
//! ```

use std::fmt;

use ion_core::emitter::{EventEmitter, ListenerId};
use ion_core::events::{event_types, Event, KeyCode};
use ion_core::timer::TimerId;
use ion_core::view::{ClassMap, HostData, Node};
use serde::{Deserialize, Serialize};

use crate::context::WidgetContext;
use crate::error::Result;
use crate::widget::{Widget, WidgetId};

/// Name of the change notification
pub const CHANGE_EVENT: &str = "ionChange";
/// Name of the style notification
pub const STYLE_EVENT: &str = "ionStyle";

/// Theme variant; selects the host's per-mode class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Ios,
    #[default]
    Md,
    Wp,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Ios => "ios",
            Mode::Md => "md",
            Mode::Wp => "wp",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of `ionChange`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CheckboxChange {
    pub checked: bool,
}

/// Payload of `ionStyle`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CheckboxStyle {
    #[serde(rename = "checkbox-disabled")]
    pub disabled: bool,
    #[serde(rename = "checkbox-checked")]
    pub checked: bool,
}

impl CheckboxStyle {
    /// The same flags as a class map, for a container to merge into its own
    pub fn to_class_map(&self) -> ClassMap {
        ClassMap::new()
            .with("checkbox-disabled", self.disabled)
            .with("checkbox-checked", self.checked)
    }
}

/// Checkbox configuration
///
/// Every field has a default, so a host document only needs the keys it
/// sets:
///
/// ```rust
/// use ion_widgets::checkbox::{CheckboxConfig, Mode};
///
/// let config = CheckboxConfig::from_json(r#"{ "checked": true, "mode": "ios" }"#).unwrap();
/// assert!(config.checked);
/// assert!(!config.disabled);
/// assert_eq!(config.mode, Mode::Ios);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckboxConfig {
    /// Whether initially checked
    pub checked: bool,
    /// Whether the user cannot interact with the checkbox
    pub disabled: bool,
    /// Value submitted with the checkbox
    pub value: Option<String>,
    /// Element id for the cover button
    pub id: Option<String>,
    /// Id of the label element describing this checkbox
    pub label_id: Option<String>,
    /// Theme variant
    pub mode: Mode,
}

impl CheckboxConfig {
    /// Create a new checkbox config
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set whether initially checked
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn label_id(mut self, label_id: impl Into<String>) -> Self {
        self.label_id = Some(label_id.into());
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

/// Checkbox widget
pub struct Checkbox {
    id: WidgetId,
    checked: bool,
    disabled: bool,
    value: Option<String>,
    dom_id: Option<String>,
    label_id: Option<String>,
    mode: Mode,
    /// Pending `ionStyle` timer
    style_timer: Option<TimerId>,
    ion_change: EventEmitter<CheckboxChange>,
    ion_style: EventEmitter<CheckboxStyle>,
}

impl Checkbox {
    /// Create a new checkbox
    pub fn new(ctx: &mut WidgetContext) -> Self {
        Self::with_config(ctx, CheckboxConfig::default())
    }

    /// Create a checkbox with custom config
    pub fn with_config(ctx: &mut WidgetContext, config: CheckboxConfig) -> Self {
        Self {
            id: ctx.register_widget(),
            checked: config.checked,
            disabled: config.disabled,
            value: config.value,
            dom_id: config.id,
            label_id: config.label_id,
            mode: config.mode,
            style_timer: None,
            ion_change: EventEmitter::new(CHANGE_EVENT),
            ion_style: EventEmitter::new(STYLE_EVENT),
        }
    }

    /// Get the widget ID
    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Element id of the cover button
    pub fn dom_id(&self) -> Option<&str> {
        self.dom_id.as_deref()
    }

    pub fn label_id(&self) -> Option<&str> {
        self.label_id.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current flags, as `ionStyle` would report them
    pub fn style(&self) -> CheckboxStyle {
        CheckboxStyle {
            disabled: self.disabled,
            checked: self.checked,
        }
    }

    /// Whether an `ionStyle` notification is waiting for the next tick
    pub fn has_pending_style(&self) -> bool {
        self.style_timer.is_some()
    }

    /// Listen for `ionChange`
    pub fn on_change<F: FnMut(&CheckboxChange) + 'static>(&mut self, listener: F) -> ListenerId {
        self.ion_change.subscribe(listener)
    }

    /// Listen for `ionStyle`
    pub fn on_style<F: FnMut(&CheckboxStyle) + 'static>(&mut self, listener: F) -> ListenerId {
        self.ion_style.subscribe(listener)
    }

    /// `ionChange` listeners in subscription order
    pub fn change_listeners(&self) -> Vec<ListenerId> {
        self.ion_change.listener_ids().collect()
    }

    /// `ionStyle` listeners in subscription order
    pub fn style_listeners(&self) -> Vec<ListenerId> {
        self.ion_style.listener_ids().collect()
    }

    /// Remove a listener registered with `on_change`
    pub fn remove_change_listener(&mut self, listener: ListenerId) -> bool {
        self.ion_change.unsubscribe(listener)
    }

    /// Remove a listener registered with `on_style`
    pub fn remove_style_listener(&mut self, listener: ListenerId) -> bool {
        self.ion_style.unsubscribe(listener)
    }

    /// Flip `checked`
    pub fn toggle(&mut self, ctx: &mut WidgetContext) {
        tracing::trace!(id = ?self.id, from = self.checked, "toggle");
        self.set_checked(ctx, !self.checked);
    }

    /// Assign `checked`. Emits `ionChange` only if the value changes.
    pub fn set_checked(&mut self, ctx: &mut WidgetContext, checked: bool) {
        if self.checked == checked {
            return;
        }
        self.checked = checked;
        self.checked_changed(ctx);
    }

    /// Assign `disabled`. Never emits `ionChange`.
    pub fn set_disabled(&mut self, ctx: &mut WidgetContext, disabled: bool) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        ctx.mark_dirty(self.id);
        self.emit_style(ctx);
    }

    pub fn set_value(&mut self, ctx: &mut WidgetContext, value: Option<String>) {
        if self.value != value {
            self.value = value;
            ctx.mark_dirty(self.id);
        }
    }

    fn checked_changed(&mut self, ctx: &mut WidgetContext) {
        ctx.mark_dirty(self.id);
        self.ion_change.emit(&CheckboxChange {
            checked: self.checked,
        });
        self.emit_style(ctx);
    }

    /// Replace any pending style timer with a fresh one
    fn emit_style(&mut self, ctx: &mut WidgetContext) {
        if let Some(timer) = self.style_timer.take() {
            ctx.clear_timeout(timer);
        }
        self.style_timer = Some(ctx.set_timeout(self.id));
    }
}

impl Widget for Checkbox {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn will_load(&mut self, ctx: &mut WidgetContext) {
        self.emit_style(ctx);
    }

    fn will_unload(&mut self, ctx: &mut WidgetContext) {
        if let Some(timer) = self.style_timer.take() {
            ctx.clear_timeout(timer);
        }
    }

    fn handle_event(&mut self, ctx: &mut WidgetContext, event: &mut Event) {
        if event.event_type == event_types::CLICK {
            // Disabled blocks pointer input only; keyboard activation still works
            if self.disabled {
                tracing::trace!(id = ?self.id, "ignoring click while disabled");
                return;
            }
            self.toggle(ctx);
        } else if event.is_key_down(KeyCode::Space) {
            if !ctx.is_focused(self.id) {
                return;
            }
            self.toggle(ctx);
            event.stop_propagation();
            event.prevent_default();
        }
    }

    fn on_timer(&mut self, _ctx: &mut WidgetContext, timer: TimerId) {
        if self.style_timer != Some(timer) {
            return;
        }
        self.style_timer = None;
        let style = self.style();
        self.ion_style.emit(&style);
    }

    fn host_data(&self) -> HostData {
        HostData {
            classes: ClassMap::new()
                .with("checkbox", true)
                .with(format!("checkbox-{}", self.mode), true)
                .with("checkbox-checked", self.checked)
                .with("checkbox-disabled", self.disabled),
        }
    }

    fn render(&self) -> Vec<Node> {
        let icon = Node::new("div")
            .class("checkbox-icon", true)
            .class("checkbox-checked", self.checked)
            .child(Node::new("div").class("checkbox-inner", true));

        let cover = Node::new("button")
            .class("checkbox-cover", true)
            .attr_opt("id", self.dom_id.as_deref())
            .attr_opt("aria-checked", self.checked.then_some("true"))
            .attr_opt("aria-disabled", self.disabled.then_some("true"))
            .attr_opt("aria-labelledby", self.label_id.as_deref())
            .attr("role", "checkbox")
            .attr("tabindex", "0")
            .listen(event_types::CLICK);

        vec![icon, cover]
    }
}

/// Create a checkbox
pub fn checkbox() -> CheckboxBuilder {
    CheckboxBuilder {
        config: CheckboxConfig::default(),
        on_change: Vec::new(),
        on_style: Vec::new(),
    }
}

/// Builder for creating checkboxes
pub struct CheckboxBuilder {
    config: CheckboxConfig,
    on_change: Vec<Box<dyn FnMut(&CheckboxChange)>>,
    on_style: Vec<Box<dyn FnMut(&CheckboxStyle)>>,
}

impl CheckboxBuilder {
    /// Start from an existing config
    pub fn config(mut self, config: CheckboxConfig) -> Self {
        self.config = config;
        self
    }

    /// Set whether initially checked
    pub fn checked(mut self, checked: bool) -> Self {
        self.config.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.config.value = Some(value.into());
        self
    }

    /// Element id of the cover button
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.config.id = Some(id.into());
        self
    }

    pub fn label_id(mut self, label_id: impl Into<String>) -> Self {
        self.config.label_id = Some(label_id.into());
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Add an `ionChange` listener
    pub fn on_change<F: FnMut(&CheckboxChange) + 'static>(mut self, listener: F) -> Self {
        self.on_change.push(Box::new(listener));
        self
    }

    /// Add an `ionStyle` listener
    pub fn on_style<F: FnMut(&CheckboxStyle) + 'static>(mut self, listener: F) -> Self {
        self.on_style.push(Box::new(listener));
        self
    }

    /// Build the checkbox widget
    ///
    /// Listeners added here can be looked up later with
    /// [`Checkbox::change_listeners`] / [`Checkbox::style_listeners`] and
    /// removed with [`Checkbox::remove_change_listener`] /
    /// [`Checkbox::remove_style_listener`].
    pub fn build(self, ctx: &mut WidgetContext) -> Checkbox {
        let mut checkbox = Checkbox::with_config(ctx, self.config);
        for listener in self.on_change {
            checkbox.ion_change.subscribe(listener);
        }
        for listener in self.on_style {
            checkbox.ion_style.subscribe(listener);
        }
        checkbox
    }
}
