//! Media Elements
//!
//! State model of the native `<video>` element a wrapper delegates to.
//! Decoding and networking belong to the rendering collaborator; this
//! only tracks the values scripts can observe and the events they imply.

use crate::capabilities::{self, PropertyDescriptor, ValueKind};
use crate::MediaError;

/// Network state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NetworkState {
    #[default]
    Empty = 0,
    Idle = 1,
    Loading = 2,
    NoSource = 3,
}

/// Ready state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    #[default]
    HaveNothing = 0,
    HaveMetadata = 1,
    HaveCurrentData = 2,
    HaveFutureData = 3,
    HaveEnoughData = 4,
}

/// Preload hint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreloadHint {
    None,
    #[default]
    Metadata,
    Auto,
}

impl PreloadHint {
    /// Parse the attribute, falling back to the default for unknown values
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "metadata" => Self::Metadata,
            "" | "auto" => Self::Auto,
            _ => Self::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Metadata => "metadata",
            Self::Auto => "auto",
        }
    }
}

/// Can play type result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanPlayType {
    Empty,
    Maybe,
    Probably,
}

impl CanPlayType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Maybe => "maybe",
            Self::Probably => "probably",
        }
    }
}

/// Dynamically typed property value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// HTML Video Element
#[derive(Debug)]
pub struct HTMLVideoElement {
    // Reflected attributes
    pub src: String,
    pub cross_origin: Option<String>,
    pub preload: PreloadHint,
    pub autoplay: bool,
    pub loop_: bool,
    pub controls: bool,
    pub controls_list: String,
    pub default_muted: bool,
    pub poster: String,
    pub width: u32,
    pub height: u32,
    pub plays_inline: bool,
    pub disable_picture_in_picture: bool,
    pub disable_remote_playback: bool,

    // State
    pub current_src: String,
    pub network_state: NetworkState,
    pub ready_state: ReadyState,
    pub current_time: f64,
    pub duration: f64,
    pub paused: bool,
    pub ended: bool,
    pub seeking: bool,
    pub volume: f64,
    pub muted: bool,
    pub playback_rate: f64,
    pub default_playback_rate: f64,
    pub preserves_pitch: bool,
    pub video_width: u32,
    pub video_height: u32,

    /// Events fired but not yet delivered
    pending: Vec<&'static str>,
}

impl HTMLVideoElement {
    pub fn new() -> Self {
        Self {
            src: String::new(),
            cross_origin: None,
            preload: PreloadHint::Metadata,
            autoplay: false,
            loop_: false,
            controls: false,
            controls_list: String::new(),
            default_muted: false,
            poster: String::new(),
            width: 0,
            height: 0,
            plays_inline: false,
            disable_picture_in_picture: false,
            disable_remote_playback: false,
            current_src: String::new(),
            network_state: NetworkState::Empty,
            ready_state: ReadyState::HaveNothing,
            current_time: 0.0,
            duration: f64::NAN,
            paused: true,
            ended: false,
            seeking: false,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
            default_playback_rate: 1.0,
            preserves_pitch: true,
            video_width: 0,
            video_height: 0,
            pending: Vec::new(),
        }
    }

    /// Read a property by IDL name
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        let value: PropertyValue = match name {
            "src" => self.src.as_str().into(),
            "crossOrigin" => self.cross_origin.as_deref().into(),
            "preload" => self.preload.as_str().into(),
            "autoplay" => self.autoplay.into(),
            "loop" => self.loop_.into(),
            "controls" => self.controls.into(),
            "controlsList" => self.controls_list.as_str().into(),
            "defaultMuted" => self.default_muted.into(),
            "poster" => self.poster.as_str().into(),
            "width" => f64::from(self.width).into(),
            "height" => f64::from(self.height).into(),
            "playsInline" => self.plays_inline.into(),
            "disablePictureInPicture" => self.disable_picture_in_picture.into(),
            "disableRemotePlayback" => self.disable_remote_playback.into(),
            "currentTime" => self.current_time.into(),
            "volume" => self.volume.into(),
            "muted" => self.muted.into(),
            "playbackRate" => self.playback_rate.into(),
            "defaultPlaybackRate" => self.default_playback_rate.into(),
            "preservesPitch" => self.preserves_pitch.into(),
            "currentSrc" => self.current_src.as_str().into(),
            "duration" => self.duration.into(),
            "paused" => self.paused.into(),
            "ended" => self.ended.into(),
            "seeking" => self.seeking.into(),
            "readyState" => f64::from(self.ready_state as u8).into(),
            "networkState" => f64::from(self.network_state as u8).into(),
            "videoWidth" => f64::from(self.video_width).into(),
            "videoHeight" => f64::from(self.video_height).into(),
            _ => return None,
        };
        Some(value)
    }

    /// Write a property by IDL name
    pub fn set(&mut self, name: &str, value: PropertyValue) -> Result<(), MediaError> {
        let descriptor =
            capabilities::property(name).ok_or_else(|| MediaError::UnknownProperty(name.to_string()))?;
        if descriptor.readonly {
            return Err(MediaError::ReadOnly(name.to_string()));
        }
        let mismatch = || MediaError::TypeMismatch {
            property: name.to_string(),
            expected: descriptor.kind.name(),
        };
        match descriptor.kind {
            ValueKind::Bool => {
                let b = value.as_bool().ok_or_else(mismatch)?;
                self.set_bool(name, b);
            }
            ValueKind::Number => {
                let n = value.as_f64().ok_or_else(mismatch)?;
                self.set_number(name, n)?;
            }
            ValueKind::Text => {
                let s = value.as_str().ok_or_else(mismatch)?.to_string();
                self.set_text(name, s);
            }
            ValueKind::NullableText => match value {
                PropertyValue::Null => self.cross_origin = None,
                PropertyValue::Text(s) => self.cross_origin = Some(s),
                _ => return Err(mismatch()),
            },
        }
        Ok(())
    }

    /// Apply a content attribute change to the property it reflects
    pub fn apply_attribute(&mut self, descriptor: &PropertyDescriptor, value: Option<&str>) {
        match descriptor.kind {
            ValueKind::Bool => {
                self.set_bool(descriptor.name, value.is_some());
                // The attribute seeds the initial muted state as well.
                if descriptor.name == "defaultMuted" {
                    self.set_bool("muted", value.is_some());
                }
            }
            ValueKind::Number => {
                let n = value.and_then(|v| v.trim().parse().ok()).unwrap_or(0.0);
                let _ = self.set_number(descriptor.name, n);
            }
            ValueKind::Text => self.set_text(descriptor.name, value.unwrap_or_default().to_string()),
            ValueKind::NullableText => self.cross_origin = value.map(str::to_string),
        }
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        match name {
            "autoplay" => self.autoplay = value,
            "loop" => self.loop_ = value,
            "controls" => self.controls = value,
            "defaultMuted" => self.default_muted = value,
            "playsInline" => self.plays_inline = value,
            "disablePictureInPicture" => self.disable_picture_in_picture = value,
            "disableRemotePlayback" => self.disable_remote_playback = value,
            "preservesPitch" => self.preserves_pitch = value,
            "muted" => {
                if self.muted != value {
                    self.muted = value;
                    self.pending.push("volumechange");
                }
            }
            _ => {}
        }
    }

    fn set_number(&mut self, name: &str, value: f64) -> Result<(), MediaError> {
        let out_of_range = || MediaError::OutOfRange {
            property: name.to_string(),
            value,
        };
        match name {
            "width" => self.width = value.max(0.0) as u32,
            "height" => self.height = value.max(0.0) as u32,
            "currentTime" => {
                if !value.is_finite() {
                    return Err(out_of_range());
                }
                self.seek(value);
            }
            "volume" => {
                if !(0.0..=1.0).contains(&value) {
                    return Err(out_of_range());
                }
                if self.volume != value {
                    self.volume = value;
                    self.pending.push("volumechange");
                }
            }
            "playbackRate" => {
                if !value.is_finite() {
                    return Err(out_of_range());
                }
                if self.playback_rate != value {
                    self.playback_rate = value;
                    self.pending.push("ratechange");
                }
            }
            "defaultPlaybackRate" => {
                if !value.is_finite() {
                    return Err(out_of_range());
                }
                self.default_playback_rate = value;
            }
            _ => {}
        }
        Ok(())
    }

    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "src" => {
                self.src = value;
                self.load();
            }
            "preload" => self.preload = PreloadHint::parse(&value),
            "controlsList" => self.controls_list = value,
            "poster" => self.poster = value,
            _ => {}
        }
    }

    /// Play media
    pub fn play(&mut self) -> Result<(), MediaError> {
        if self.network_state == NetworkState::NoSource
            || (self.src.is_empty() && self.network_state == NetworkState::Empty)
        {
            return Err(MediaError::NotSupported("no source to play".into()));
        }
        if self.paused {
            self.paused = false;
            self.ended = false;
            self.pending.push("play");
            if self.ready_state >= ReadyState::HaveFutureData {
                self.pending.push("playing");
            } else {
                self.pending.push("waiting");
            }
        }
        Ok(())
    }

    /// Pause media
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.pending.push("timeupdate");
            self.pending.push("pause");
        }
    }

    /// Restart the resource selection for the current `src`
    pub fn load(&mut self) {
        if self.network_state != NetworkState::Empty {
            self.pending.push("emptied");
        }
        self.ready_state = ReadyState::HaveNothing;
        self.current_time = 0.0;
        self.duration = f64::NAN;
        self.paused = true;
        self.ended = false;
        self.seeking = false;
        self.current_src = self.src.clone();
        if self.src.is_empty() {
            self.network_state = NetworkState::NoSource;
        } else {
            self.network_state = NetworkState::Loading;
            self.pending.push("loadstart");
        }
    }

    /// Seek to time
    pub fn seek(&mut self, time: f64) {
        let clamped = if self.duration.is_nan() {
            time.max(0.0)
        } else {
            time.clamp(0.0, self.duration)
        };
        self.seeking = true;
        self.pending.push("seeking");
        self.current_time = clamped;
        self.seeking = false;
        self.pending.push("timeupdate");
        self.pending.push("seeked");
    }

    /// Fast seek
    pub fn fast_seek(&mut self, time: f64) {
        self.seek(time);
    }

    /// Check if can play type
    pub fn can_play_type(&self, mime_type: &str) -> CanPlayType {
        let essence = mime_type.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "video/mp4" | "video/webm" => CanPlayType::Probably,
            "video/ogg" | "application/vnd.apple.mpegurl" | "application/x-mpegurl" => CanPlayType::Maybe,
            _ => CanPlayType::Empty,
        }
    }

    /// Take the events fired since the last call
    pub fn take_events(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.pending)
    }
}

impl Default for HTMLVideoElement {
    fn default() -> Self {
        Self::new()
    }
}
