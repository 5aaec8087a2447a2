//! Error types for ion_widgets

use thiserror::Error;

use crate::widget::WidgetId;

/// Errors returned by the runtime and configuration layer
#[derive(Error, Debug)]
pub enum WidgetError {
    /// The widget was never mounted or has been unmounted
    #[error("widget {0:?} is not mounted")]
    NotFound(WidgetId),

    /// A keyboard event arrived while no widget had focus
    #[error("no widget has focus")]
    NoFocus,

    /// A widget configuration document could not be parsed
    #[error("invalid widget config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for ion_widgets operations
pub type Result<T> = std::result::Result<T, WidgetError>;
