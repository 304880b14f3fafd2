//! Video Element Capability Table
//!
//! The property surface of a native video element, written down once.
//! Wrappers consult this table instead of reflecting over an instance.

use std::sync::LazyLock;

/// Value type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Number,
    Text,
    /// Text that may be absent (`null`)
    NullableText,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::Text => "string",
            Self::NullableText => "string or null",
        }
    }
}

/// One property of the native element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// IDL property name
    pub name: &'static str,
    /// Content attribute the property reflects, if any
    pub attribute: Option<&'static str>,
    pub kind: ValueKind,
    pub readonly: bool,
}

const fn reflected(name: &'static str, attribute: &'static str, kind: ValueKind) -> PropertyDescriptor {
    PropertyDescriptor { name, attribute: Some(attribute), kind, readonly: false }
}

const fn state(name: &'static str, kind: ValueKind) -> PropertyDescriptor {
    PropertyDescriptor { name, attribute: None, kind, readonly: false }
}

const fn readonly(name: &'static str, kind: ValueKind) -> PropertyDescriptor {
    PropertyDescriptor { name, attribute: None, kind, readonly: true }
}

/// Every property a video wrapper must expose
pub static VIDEO_PROPERTIES: &[PropertyDescriptor] = &[
    // Reflected content attributes
    reflected("src", "src", ValueKind::Text),
    reflected("crossOrigin", "crossorigin", ValueKind::NullableText),
    reflected("preload", "preload", ValueKind::Text),
    reflected("autoplay", "autoplay", ValueKind::Bool),
    reflected("loop", "loop", ValueKind::Bool),
    reflected("controls", "controls", ValueKind::Bool),
    reflected("controlsList", "controlslist", ValueKind::Text),
    reflected("defaultMuted", "muted", ValueKind::Bool),
    reflected("poster", "poster", ValueKind::Text),
    reflected("width", "width", ValueKind::Number),
    reflected("height", "height", ValueKind::Number),
    reflected("playsInline", "playsinline", ValueKind::Bool),
    reflected("disablePictureInPicture", "disablepictureinpicture", ValueKind::Bool),
    reflected("disableRemotePlayback", "disableremoteplayback", ValueKind::Bool),
    // Playback state
    state("currentTime", ValueKind::Number),
    state("volume", ValueKind::Number),
    state("muted", ValueKind::Bool),
    state("playbackRate", ValueKind::Number),
    state("defaultPlaybackRate", ValueKind::Number),
    state("preservesPitch", ValueKind::Bool),
    // Read-only
    readonly("currentSrc", ValueKind::Text),
    readonly("duration", ValueKind::Number),
    readonly("paused", ValueKind::Bool),
    readonly("ended", ValueKind::Bool),
    readonly("seeking", ValueKind::Bool),
    readonly("readyState", ValueKind::Number),
    readonly("networkState", ValueKind::Number),
    readonly("videoWidth", ValueKind::Number),
    readonly("videoHeight", ValueKind::Number),
];

/// Methods forwarded to the native element
pub const VIDEO_METHODS: &[&str] = &["play", "pause", "load", "canPlayType", "fastSeek"];

static OBSERVED: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    VIDEO_PROPERTIES
        .iter()
        .filter_map(|p| p.attribute)
        .collect()
});

/// Content attributes a wrapper observes, in table order
pub fn observed_attributes() -> &'static [&'static str] {
    &OBSERVED
}

/// Look up a property by IDL name
pub fn property(name: &str) -> Option<&'static PropertyDescriptor> {
    VIDEO_PROPERTIES.iter().find(|p| p.name == name)
}

/// Look up a property by the attribute it reflects
pub fn by_attribute(attribute: &str) -> Option<&'static PropertyDescriptor> {
    VIDEO_PROPERTIES
        .iter()
        .find(|p| p.attribute == Some(attribute))
}
