//! fOS Media
//!
//! Video element model for fOS media components.
//!
//! Features:
//! - Static capability table of the native video element
//! - `HTMLVideoElement` state model
//! - Custom element wrapper that delegates to an inner `<video>`

pub mod capabilities;
pub mod element;
pub mod events;
mod custom_video;

pub use capabilities::{PropertyDescriptor, ValueKind, VIDEO_METHODS, VIDEO_PROPERTIES};
pub use custom_video::{define, Autoplay, CustomVideoElement, ListenerId};
pub use element::{
    CanPlayType, HTMLVideoElement, NetworkState, PreloadHint, PropertyValue, ReadyState,
};
pub use events::{is_media_event, MediaEvent, VIDEO_EVENTS};

use fos_dom::DomError;

/// Media error
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Property is read-only: {0}")]
    ReadOnly(String),

    #[error("Type mismatch for {property}: expected {expected}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
    },

    #[error("Value out of range for {property}: {value}")]
    OutOfRange { property: String, value: f64 },

    #[error(transparent)]
    Dom(#[from] DomError),
}
