//! Media Events
//!
//! The event vocabulary of a native media element.

use fos_dom::NodeId;

/// Events a native video element fires
pub const VIDEO_EVENTS: &[&str] = &[
    "abort",
    "canplay",
    "canplaythrough",
    "durationchange",
    "emptied",
    "encrypted",
    "ended",
    "error",
    "loadeddata",
    "loadedmetadata",
    "loadstart",
    "pause",
    "play",
    "playing",
    "progress",
    "ratechange",
    "seeked",
    "seeking",
    "stalled",
    "suspend",
    "timeupdate",
    "volumechange",
    "waiting",
    "waitingforkey",
    "resize",
    "enterpictureinpicture",
    "leavepictureinpicture",
];

/// Check if an event name belongs to the media vocabulary
pub fn is_media_event(name: &str) -> bool {
    VIDEO_EVENTS.contains(&name)
}

/// Event delivered to wrapper listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEvent {
    pub event_type: String,
    /// Always the wrapper host, never the inner element
    pub target: NodeId,
}
