//! Custom Video Element
//!
//! A custom element that looks like a native `<video>` from the outside.
//! It owns a real `<video>` inside its shadow root and forwards attribute
//! changes, property access, methods and media events to and from it.

use std::fmt;

use fos_dom::{CustomElementDefinition, CustomElementRegistry, Document, NodeId, ShadowRootMode};

use crate::capabilities::{self, VIDEO_METHODS};
use crate::element::{CanPlayType, HTMLVideoElement, PropertyValue};
use crate::events::{is_media_event, MediaEvent};
use crate::MediaError;

/// Listener handle returned by [`CustomVideoElement::add_event_listener`]
pub type ListenerId = usize;

type Listener = Box<dyn FnMut(&MediaEvent)>;

/// Autoplay policy.
///
/// Unlike the other mirrored properties, `autoplay` accepts `"muted"` and
/// `"any"` besides the boolean form. The policy lives on the wrapper and is
/// reflected on the wrapper's own `autoplay` attribute; the inner element
/// only ever sees plain boolean `autoplay` (plus `muted` for the muted
/// policy).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Autoplay {
    #[default]
    Off,
    On,
    /// Start muted so autoplay restrictions do not apply
    Muted,
    /// Try unmuted; falling back to muted is left to the playback engine
    Any,
}

impl Autoplay {
    /// Policy for an `autoplay` attribute value
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            None => Self::Off,
            Some(v) if v == "muted" => Self::Muted,
            Some(v) if v == "any" => Self::Any,
            Some(_) => Self::On,
        }
    }

    /// Policy for a property write
    pub fn from_value(value: &PropertyValue) -> Result<Self, MediaError> {
        match value {
            PropertyValue::Null | PropertyValue::Bool(false) => Ok(Self::Off),
            PropertyValue::Bool(true) => Ok(Self::On),
            PropertyValue::Text(text) => Ok(Self::from_attribute(Some(text.as_str()))),
            PropertyValue::Number(_) => Err(MediaError::TypeMismatch {
                property: "autoplay".into(),
                expected: "boolean or string",
            }),
        }
    }

    /// Attribute value reflecting this policy (`None` removes it)
    pub fn attribute_value(self) -> Option<&'static str> {
        match self {
            Self::Off => None,
            Self::On => Some(""),
            Self::Muted => Some("muted"),
            Self::Any => Some("any"),
        }
    }

    /// Property value reported by the getter
    pub fn to_value(self) -> PropertyValue {
        match self {
            Self::Off => PropertyValue::Bool(false),
            Self::On => PropertyValue::Bool(true),
            Self::Muted => PropertyValue::Text("muted".into()),
            Self::Any => PropertyValue::Text("any".into()),
        }
    }
}

/// Register a video wrapper under `tag`. Repeat calls are no-ops.
pub fn define(registry: &mut CustomElementRegistry, tag: &str) -> bool {
    registry.define_once(
        CustomElementDefinition::new(tag).observe(capabilities::observed_attributes()),
    )
}

/// Video wrapper instance
pub struct CustomVideoElement {
    host: NodeId,
    native_node: NodeId,
    native: HTMLVideoElement,
    autoplay: Autoplay,
    /// `muted` on the inner element was added by the muted autoplay policy
    policy_muted: bool,
    listeners: Vec<(ListenerId, String, Listener)>,
    next_listener: ListenerId,
}

impl fmt::Debug for CustomVideoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomVideoElement")
            .field("host", &self.host)
            .field("native_node", &self.native_node)
            .field("autoplay", &self.autoplay)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl CustomVideoElement {
    /// Attributes routed to [`Self::attribute_changed_callback`]
    pub fn observed_attributes() -> &'static [&'static str] {
        capabilities::observed_attributes()
    }

    /// Wrap `host`: put a `<video part="video">` and a `<slot>` in its
    /// shadow root, then replay the observed attributes already present.
    pub fn upgrade(doc: &mut Document, host: NodeId) -> Result<Self, MediaError> {
        let shadow = match doc.tree.shadow_root(host) {
            Some(shadow) => shadow,
            None => doc.tree.attach_shadow(host, ShadowRootMode::Open)?,
        };
        let native_node = doc.tree.create_element("video");
        doc.tree.set_attribute(native_node, "part", "video")?;
        doc.tree.append_child(shadow, native_node)?;
        let slot = doc.tree.create_element("slot");
        doc.tree.append_child(shadow, slot)?;

        let mut element = Self {
            host,
            native_node,
            native: HTMLVideoElement::new(),
            autoplay: Autoplay::Off,
            policy_muted: false,
            listeners: Vec::new(),
            next_listener: 0,
        };

        let present: Vec<(&'static str, String)> = Self::observed_attributes()
            .iter()
            .filter_map(|&name| {
                doc.tree
                    .get_attribute(host, name)
                    .map(|value| (name, value.to_string()))
            })
            .collect();
        for (name, value) in present {
            element.attribute_changed_callback(doc, name, None, Some(&value));
        }
        tracing::debug!(?host, "upgraded video element");
        Ok(element)
    }

    /// The wrapper element
    pub fn host(&self) -> NodeId {
        self.host
    }

    /// The inner `<video>` element
    pub fn native_node(&self) -> NodeId {
        self.native_node
    }

    /// State of the inner element
    pub fn native(&self) -> &HTMLVideoElement {
        &self.native
    }

    /// Current autoplay policy
    pub fn autoplay(&self) -> Autoplay {
        self.autoplay
    }

    /// Forward a wrapper attribute change to the inner element
    pub fn attribute_changed_callback(
        &mut self,
        doc: &mut Document,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        if old == new && old.is_some() {
            return;
        }
        if name == "autoplay" {
            self.autoplay = Autoplay::from_attribute(new);
            self.apply_autoplay(doc);
        } else if let Some(descriptor) = capabilities::by_attribute(name) {
            tracing::trace!(attribute = name, ?new, "forwarding attribute");
            match new {
                Some(value) => {
                    let _ = doc.tree.set_attribute(self.native_node, name, value);
                }
                None => {
                    doc.tree.remove_attribute(self.native_node, name);
                }
            }
            self.native.apply_attribute(descriptor, new);
        }
        self.flush_events();
    }

    /// Read a property
    pub fn get(&self, property: &str) -> Option<PropertyValue> {
        if property == "autoplay" {
            return Some(self.autoplay.to_value());
        }
        self.native.get(property)
    }

    /// Write a property on the inner element
    pub fn set(
        &mut self,
        doc: &mut Document,
        property: &str,
        value: PropertyValue,
    ) -> Result<(), MediaError> {
        if property == "autoplay" {
            self.autoplay = Autoplay::from_value(&value)?;
            match self.autoplay.attribute_value() {
                Some(attr) => {
                    doc.tree.set_attribute(self.host, "autoplay", attr)?;
                }
                None => {
                    doc.tree.remove_attribute(self.host, "autoplay");
                }
            }
            self.apply_autoplay(doc);
            self.flush_events();
            return Ok(());
        }

        let descriptor = capabilities::property(property)
            .ok_or_else(|| MediaError::UnknownProperty(property.to_string()))?;
        self.native.set(property, value)?;
        if let Some(attribute) = descriptor.attribute {
            self.reflect_native_attribute(doc, property, attribute)?;
        }
        self.flush_events();
        Ok(())
    }

    /// Start playback
    pub fn play(&mut self) -> Result<(), MediaError> {
        let result = self.native.play();
        self.flush_events();
        result
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.native.pause();
        self.flush_events();
    }

    /// Reload the current source
    pub fn load(&mut self) {
        self.native.load();
        self.flush_events();
    }

    /// Seek without precision guarantees
    pub fn fast_seek(&mut self, time: f64) {
        self.native.fast_seek(time);
        self.flush_events();
    }

    /// Ask the inner element about a MIME type
    pub fn can_play_type(&self, mime_type: &str) -> CanPlayType {
        self.native.can_play_type(mime_type)
    }

    /// Call a native method by name, with arguments and result in their
    /// dynamic form. Only methods listed in [`VIDEO_METHODS`] are accepted.
    pub fn call_method(
        &mut self,
        method: &str,
        args: &[PropertyValue],
    ) -> Result<Option<PropertyValue>, MediaError> {
        if !VIDEO_METHODS.contains(&method) {
            return Err(MediaError::UnknownMethod(method.to_string()));
        }
        let mismatch = |expected| MediaError::TypeMismatch {
            property: method.to_string(),
            expected,
        };
        match method {
            "play" => self.play().map(|()| None),
            "pause" => {
                self.pause();
                Ok(None)
            }
            "load" => {
                self.load();
                Ok(None)
            }
            "canPlayType" => {
                let mime_type = args
                    .first()
                    .and_then(PropertyValue::as_str)
                    .ok_or_else(|| mismatch("string"))?;
                Ok(Some(self.can_play_type(mime_type).as_str().into()))
            }
            "fastSeek" => {
                let time = args
                    .first()
                    .and_then(PropertyValue::as_f64)
                    .ok_or_else(|| mismatch("number"))?;
                self.fast_seek(time);
                Ok(None)
            }
            _ => Err(MediaError::UnknownMethod(method.to_string())),
        }
    }

    /// Listen for an event on the wrapper
    pub fn add_event_listener(
        &mut self,
        event_type: &str,
        listener: impl FnMut(&MediaEvent) + 'static,
    ) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners
            .push((id, event_type.to_string(), Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Entry point for events the inner element fires on its own (from the
    /// playback engine). Media events are re-dispatched on the wrapper;
    /// anything else is ignored. Returns whether the event was forwarded.
    pub fn dispatch_native_event(&mut self, event_type: &str) -> bool {
        if !is_media_event(event_type) {
            return false;
        }
        self.dispatch(event_type);
        true
    }

    fn dispatch(&mut self, event_type: &str) {
        let event = MediaEvent {
            event_type: event_type.to_string(),
            target: self.host,
        };
        for (_, kind, listener) in &mut self.listeners {
            if kind == event_type {
                listener(&event);
            }
        }
    }

    fn flush_events(&mut self) {
        for event in self.native.take_events() {
            self.dispatch(event);
        }
    }

    fn reflect_native_attribute(
        &mut self,
        doc: &mut Document,
        property: &str,
        attribute: &str,
    ) -> Result<(), MediaError> {
        let value = match self.native.get(property) {
            Some(PropertyValue::Bool(true)) => Some(String::new()),
            Some(PropertyValue::Bool(false)) | Some(PropertyValue::Null) | None => None,
            Some(PropertyValue::Number(n)) => Some(n.to_string()),
            Some(PropertyValue::Text(s)) => Some(s),
        };
        match value {
            Some(value) => {
                doc.tree.set_attribute(self.native_node, attribute, &value)?;
            }
            None => {
                doc.tree.remove_attribute(self.native_node, attribute);
            }
        }
        Ok(())
    }

    fn apply_autoplay(&mut self, doc: &mut Document) {
        let enabled = self.autoplay != Autoplay::Off;
        self.native.autoplay = enabled;
        let _ = doc.tree.toggle_attribute(self.native_node, "autoplay", enabled);

        // The wrapper's own `muted` attribute wins over the policy either way.
        let host_muted = doc.tree.has_attribute(self.host, "muted");
        if self.autoplay == Autoplay::Muted {
            if !self.policy_muted && !host_muted {
                self.set_policy_muted(doc, true);
                self.policy_muted = true;
            }
        } else if self.policy_muted {
            self.policy_muted = false;
            if !host_muted {
                self.set_policy_muted(doc, false);
            }
        }
    }

    fn set_policy_muted(&mut self, doc: &mut Document, muted: bool) {
        self.native.default_muted = muted;
        let _ = self.native.set("muted", PropertyValue::Bool(muted));
        let _ = doc.tree.toggle_attribute(self.native_node, "muted", muted);
    }
}
