//! Player props snapshot
//!
//! Everything the player markup is derived from. Unset fields fall back to
//! the player's defaults when the template is built.

use serde::Deserialize;

/// Stream type of the current source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreamType {
    #[default]
    OnDemand,
    Live,
    LlLive,
    Unknown,
}

impl StreamType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnDemand => "on-demand",
            Self::Live => "live",
            Self::LlLive => "ll-live",
            Self::Unknown => "unknown",
        }
    }

    /// `live` or `ll-live`
    pub fn is_live_family(self) -> bool {
        matches!(self, Self::Live | Self::LlLive)
    }
}

/// Content of the error dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DialogProps {
    pub title: Option<String>,
    pub message: Option<String>,
}

/// `autoplay` accepts a flag or a policy string (`"muted"`, `"any"`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AutoplayProp {
    Flag(bool),
    Policy(String),
}

impl AutoplayProp {
    /// Attribute value to emit, `None` to omit the attribute
    pub fn attribute_value(&self) -> Option<&str> {
        match self {
            Self::Flag(true) => Some(""),
            Self::Flag(false) => None,
            Self::Policy(policy) => Some(policy),
        }
    }
}

/// Immutable input of the player template
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerProps {
    pub stream_type: Option<StreamType>,
    pub in_live_window: Option<bool>,
    pub is_dialog_open: Option<bool>,
    pub dialog: Option<DialogProps>,
    pub has_captions: Option<bool>,
    pub has_src: Option<bool>,
    pub no_hot_keys: Option<bool>,
    /// Extra hotkeys to suppress, space separated
    pub hot_keys: Option<String>,
    pub default_hidden_captions: Option<bool>,

    // Forwarded to the video element
    pub cross_origin: Option<String>,
    pub plays_inline: Option<bool>,
    pub muted: Option<bool>,
    #[serde(rename = "loop")]
    pub loop_: Option<bool>,
    pub preload: Option<String>,
    pub src: Option<String>,
    pub poster: Option<String>,
    pub autoplay: Option<AutoplayProp>,
}

impl PlayerProps {
    /// Parse a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self, PropsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn dialog_title(&self) -> Option<&str> {
        self.dialog.as_ref().and_then(|d| d.title.as_deref())
    }

    pub fn dialog_message(&self) -> Option<&str> {
        self.dialog.as_ref().and_then(|d| d.message.as_deref())
    }
}

/// Props parse error
#[derive(Debug, thiserror::Error)]
pub enum PropsError {
    #[error("Invalid props: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let props = PlayerProps::from_json(
            r#"{"streamType":"ll-live","inLiveWindow":false,"isDialogOpen":true,
                "dialog":{"title":"Errr"},"loop":true,"autoplay":"muted"}"#,
        )
        .unwrap();
        assert_eq!(props.stream_type, Some(StreamType::LlLive));
        assert!(props.stream_type.unwrap().is_live_family());
        assert_eq!(props.dialog_title(), Some("Errr"));
        assert_eq!(props.dialog_message(), None);
        assert_eq!(props.loop_, Some(true));
        assert_eq!(props.autoplay, Some(AutoplayProp::Policy("muted".into())));
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(PlayerProps::from_json("{}").unwrap(), PlayerProps::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            PlayerProps::from_json(r#"{"streamType":"sometimes"}"#),
            Err(PropsError::Json(_))
        ));
    }

    #[test]
    fn test_autoplay_flag() {
        let props = PlayerProps::from_json(r#"{"autoplay":true}"#).unwrap();
        assert_eq!(props.autoplay.unwrap().attribute_value(), Some(""));
        assert_eq!(AutoplayProp::Flag(false).attribute_value(), None);
    }
}
