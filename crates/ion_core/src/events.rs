//! Input events delivered to widgets by the host runtime
//!
//! Events are plain data: the runtime builds an [`Event`], hands it to a
//! widget, and inspects the propagation/default flags afterwards to decide
//! whether to bubble it further or let the platform act on it.
//!
//! # Example
//!
//! ```rust
//! use ion_core::events::{event_types, Event, KeyCode};
//!
//! let mut ev = Event::key_down(KeyCode::Space);
//! assert_eq!(ev.event_type, event_types::KEY_DOWN);
//! assert_eq!(ev.key(), Some(KeyCode::Space));
//!
//! ev.stop_propagation();
//! ev.prevent_default();
//! assert!(ev.propagation_stopped && ev.default_prevented);
//! ```

/// Event type identifier
pub type EventType = u32;

/// Well-known event types
pub mod event_types {
    use super::EventType;

    /// Pointer pressed on an element
    pub const POINTER_DOWN: EventType = 1;
    /// Pointer released on an element
    pub const POINTER_UP: EventType = 2;
    /// Completed press + release on the same element
    pub const CLICK: EventType = 3;
    /// Key pressed while an element has focus
    pub const KEY_DOWN: EventType = 10;
    /// Key released while an element has focus
    pub const KEY_UP: EventType = 11;
    /// Element gained focus
    pub const FOCUS: EventType = 20;
    /// Element lost focus
    pub const BLUR: EventType = 21;

    /// Name used when logging or rendering listeners
    pub fn name(event_type: EventType) -> &'static str {
        match event_type {
            POINTER_DOWN => "pointerdown",
            POINTER_UP => "pointerup",
            CLICK => "click",
            KEY_DOWN => "keydown",
            KEY_UP => "keyup",
            FOCUS => "focus",
            BLUR => "blur",
            _ => "unknown",
        }
    }
}

/// Logical key codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    Enter,
    Tab,
    Escape,
    /// A printable character
    Char(char),
    /// Platform scan code with no logical mapping
    Other(u32),
}

/// Modifier key state at the time of the event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Cmd on macOS, Win on Windows
    pub meta: bool,
}

impl Modifiers {
    /// True when no modifier is held
    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }
}

/// Event payload
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        button: u8,
    },
    Key {
        key: KeyCode,
        modifiers: Modifiers,
        repeat: bool,
    },
    Focus,
    None,
}

/// An input event
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// One of [`event_types`]
    pub event_type: EventType,
    /// Payload
    pub data: EventData,
    /// Host timestamp in milliseconds
    pub timestamp: u64,
    /// Set by a handler to keep the event from reaching ancestors
    pub propagation_stopped: bool,
    /// Set by a handler to suppress the platform's default action
    pub default_prevented: bool,
}

impl Event {
    /// Create an event with the given type and payload
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            data,
            timestamp: 0,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Primary-button click at the origin
    pub fn click() -> Self {
        Self::new(
            event_types::CLICK,
            EventData::Pointer {
                x: 0.0,
                y: 0.0,
                button: 0,
            },
        )
    }

    /// Key press without modifiers
    pub fn key_down(key: KeyCode) -> Self {
        Self::new(
            event_types::KEY_DOWN,
            EventData::Key {
                key,
                modifiers: Modifiers::default(),
                repeat: false,
            },
        )
    }

    /// Key release without modifiers
    pub fn key_up(key: KeyCode) -> Self {
        Self::new(
            event_types::KEY_UP,
            EventData::Key {
                key,
                modifiers: Modifiers::default(),
                repeat: false,
            },
        )
    }

    pub fn focus() -> Self {
        Self::new(event_types::FOCUS, EventData::Focus)
    }

    pub fn blur() -> Self {
        Self::new(event_types::BLUR, EventData::Focus)
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Key code for keyboard events
    pub fn key(&self) -> Option<KeyCode> {
        match self.data {
            EventData::Key { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether this is a key-down of `key`
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.event_type == event_types::KEY_DOWN && self.key() == Some(key)
    }

    /// Stop the event from bubbling to ancestors
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Suppress the platform's default action (scrolling on space, etc.)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}
