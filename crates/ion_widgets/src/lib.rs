//! Ion Widget Library
//!
//! Lifecycle-driven widgets hosted by a small single-threaded runtime.
//!
//! # Architecture
//!
//! 1. **Widgets** own their state and implement [`Widget`]: lifecycle hooks
//!    (`will_load`, `will_unload`), event handling, timer callbacks, and a
//!    pure `render`.
//!
//! 2. **WidgetContext** holds what widgets share with the host: focus,
//!    dirty flags, and the tick-based timer queue used for debouncing.
//!
//! 3. **Runtime** owns mounted widgets, bubbles events through parents,
//!    advances timers one tick at a time, and renders on request.
//!
//! # Example
//!
//! ```rust
//! use ion_core::events::{Event, KeyCode};
//! use ion_widgets::prelude::*;
//!
//! let mut rt = Runtime::new();
//! let id = rt.mount(|ctx| checkbox().label_id("lbl-terms").build(ctx));
//!
//! rt.focus(id).unwrap();
//! let ev = rt.dispatch_key(Event::key_down(KeyCode::Space)).unwrap();
//! assert!(ev.propagation_stopped);
//!
//! let rendered = rt.render(id).unwrap();
//! assert!(rendered.host.classes.get("checkbox-checked"));
//! ```

pub mod checkbox;
pub mod context;
pub mod error;
pub mod runtime;
pub mod widget;

pub use checkbox::{
    checkbox, Checkbox, CheckboxBuilder, CheckboxChange, CheckboxConfig, CheckboxStyle, Mode,
};
pub use context::WidgetContext;
pub use error::{Result, WidgetError};
pub use runtime::{Rendered, Runtime};
pub use widget::{Widget, WidgetId};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::checkbox::{checkbox, Checkbox, CheckboxBuilder, CheckboxConfig, Mode};
    pub use crate::context::WidgetContext;
    pub use crate::runtime::Runtime;
    pub use crate::widget::{Widget, WidgetId};
}
