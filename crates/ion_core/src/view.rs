//! View nodes produced by widget render functions
//!
//! A widget renders into a small tree of [`Node`]s: a tag, a class map,
//! string attributes, the event types the node listens for, and children.
//! The host decides what to do with it; the [`Display`](std::fmt::Display)
//! impl prints markup, which is what tests and debugging tools look at.
//!
//! ```rust
//! use ion_core::view::Node;
//!
//! let node = Node::new("div")
//!     .class("checkbox-icon", true)
//!     .class("checkbox-checked", false)
//!     .child(Node::new("div").class("checkbox-inner", true));
//!
//! assert_eq!(
//!     node.to_string(),
//!     r#"<div class="checkbox-icon"><div class="checkbox-inner"></div></div>"#
//! );
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;

use crate::events::{event_types, EventType};

/// Ordered map of CSS class name to enabled flag
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassMap(IndexMap<String, bool>);

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a class flag, keeping the original position if it already exists
    pub fn set(&mut self, class: impl Into<String>, enabled: bool) {
        self.0.insert(class.into(), enabled);
    }

    /// Builder form of [`ClassMap::set`]
    pub fn with(mut self, class: impl Into<String>, enabled: bool) -> Self {
        self.set(class, enabled);
        self
    }

    /// Flag for `class`; absent classes read as disabled
    pub fn get(&self, class: &str) -> bool {
        self.0.get(class).copied().unwrap_or(false)
    }

    /// Enabled classes in insertion order
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    /// Space-separated enabled classes, as used in a `class` attribute
    pub fn class_string(&self) -> String {
        self.enabled().collect::<Vec<_>>().join(" ")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for ClassMap {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Attributes a widget sets on its host element
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HostData {
    pub classes: ClassMap,
}

/// A rendered element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub classes: ClassMap,
    pub attrs: IndexMap<String, String>,
    pub listeners: SmallVec<[EventType; 2]>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn class(mut self, class: impl Into<String>, enabled: bool) -> Self {
        self.classes.set(class, enabled);
        self
    }

    /// Merge a whole class map
    pub fn classes(mut self, classes: ClassMap) -> Self {
        for (name, on) in classes.0 {
            self.classes.set(name, on);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the attribute only when `value` is present
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Declare that this node handles `event_type`
    pub fn listen(mut self, event_type: EventType) -> Self {
        if !self.listeners.contains(&event_type) {
            self.listeners.push(event_type);
        }
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.get(class)
    }

    pub fn listens_to(&self, event_type: EventType) -> bool {
        self.listeners.contains(&event_type)
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        let class = self.classes.class_string();
        if !class.is_empty() {
            write!(f, " class=\"{}\"", escape_attr(&class))?;
        }
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, escape_attr(value))?;
        }
        for listener in &self.listeners {
            write!(f, " on{}", event_types::name(*listener))?;
        }
        write!(f, ">")?;
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}
