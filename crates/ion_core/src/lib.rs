//! Ion Core
//!
//! Foundational primitives for the Ion widget library:
//!
//! - **Events**: input events delivered to widgets, with propagation and
//!   default-action flags
//! - **Emitters**: typed, named notification channels widgets publish on
//! - **Timers**: tick-based zero-delay timers used for debouncing
//! - **View**: the node tree widgets render into
//!
//! # Example
//!
//! ```rust
//! use ion_core::timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let first = timers.set_timeout("checkbox");
//! timers.clear_timeout(first);
//! let second = timers.set_timeout("checkbox");
//!
//! // Only the last scheduled timer survives the tick
//! assert_eq!(timers.advance(), vec![(second, "checkbox")]);
//! ```

pub mod emitter;
pub mod events;
pub mod timer;
pub mod view;

pub use emitter::{EventEmitter, Listener, ListenerId};
pub use events::{event_types, Event, EventData, EventType, KeyCode, Modifiers};
pub use timer::{TimerId, TimerQueue};
pub use view::{ClassMap, HostData, Node};
