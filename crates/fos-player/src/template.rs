//! Player template
//!
//! Pure mapping from [`PlayerProps`] to the markup of the player's shadow
//! root: a `media-theme` holding the video element and the error dialog.

use crate::player::{DIALOG_TAG, THEME_TAG, VIDEO_TAG};
use crate::props::{PlayerProps, StreamType};
use crate::vdom::{h, text, VNode};

/// Parts the theme re-exports for styling from outside the player
pub const EXPORT_PARTS: &[&str] = &[
    "top",
    "center",
    "bottom",
    "layer",
    "media-layer",
    "poster-layer",
    "vertical-layer",
    "centered-layer",
    "gesture-layer",
    "poster",
    "seek-live",
    "play",
    "button",
    "seek-backward",
    "seek-forward",
    "mute",
    "captions",
    "airplay",
    "pip",
    "fullscreen",
    "cast",
    "playback-rate",
    "volume",
    "range",
    "time",
    "display",
];

/// Hotkeys suppressed outside the live window.
///
/// The joined `hotkeys` value carries no leading space, unlike markup that
/// concatenates it onto an empty prefix (`" noarrowleft noarrowright"`).
const LIVE_EDGE_HOTKEYS: &str = "noarrowleft noarrowright";

/// Value of the theme's `exportparts` attribute
pub fn export_parts() -> String {
    EXPORT_PARTS.join(", ")
}

/// Suppressed hotkeys, space separated. `None` when there are none.
pub fn hot_keys(props: &PlayerProps) -> Option<String> {
    let mut keys: Vec<&str> = props
        .hot_keys
        .as_deref()
        .map(|keys| keys.split_whitespace().collect())
        .unwrap_or_default();

    let live = props.stream_type.is_some_and(StreamType::is_live_family);
    if live && !props.in_live_window.unwrap_or(false) {
        keys.extend(LIVE_EDGE_HOTKEYS.split(' '));
    }
    (!keys.is_empty()).then(|| keys.join(" "))
}

/// Build the player markup for `props`
pub fn content(props: &PlayerProps) -> VNode {
    let has_src = props.has_src.unwrap_or(false);
    let dialog_open = props.is_dialog_open.unwrap_or(false);
    let stream_type = props.stream_type.unwrap_or_default();

    h(THEME_TAG)
        .attr_opt("hotkeys", hot_keys(props))
        .attr("stream-type", stream_type.as_str())
        .bool_attr(
            "nohotkeys",
            props.no_hot_keys.unwrap_or(false) || !has_src || dialog_open,
        )
        .bool_attr("disabled", !has_src || dialog_open)
        .bool_attr(
            "default-showing-captions",
            !props.default_hidden_captions.unwrap_or(false),
        )
        .attr("exportparts", export_parts())
        .child(video(props))
        .child(dialog(props))
}

fn video(props: &PlayerProps) -> VNode {
    let stream_type = props.stream_type;

    h(VIDEO_TAG)
        .attr("slot", "media")
        .attr("crossorigin", props.cross_origin.as_deref().unwrap_or_default())
        .bool_attr("playsinline", props.plays_inline != Some(false))
        .attr_opt("src", props.src.as_deref())
        .attr_opt("poster", props.poster.as_deref())
        .attr_opt("preload", props.preload.as_deref())
        .bool_attr("muted", props.muted.unwrap_or(false))
        .bool_attr("loop", props.loop_.unwrap_or(false))
        .attr_opt(
            "autoplay",
            props.autoplay.as_ref().and_then(|a| a.attribute_value()),
        )
        .attr_opt("stream-type", stream_type.map(StreamType::as_str))
        .attr_opt(
            "cast-stream-type",
            stream_type
                .is_some_and(StreamType::is_live_family)
                .then_some("live"),
        )
        .attr("exportparts", "video")
}

fn dialog(props: &PlayerProps) -> VNode {
    let heading = props
        .dialog_title()
        .map(|title| h("h3").child(text(title)));
    let message = h("p").children(props.dialog_message().map(text));

    h(DIALOG_TAG)
        .bool_attr("no-auto-hide", true)
        .bool_attr("open", props.is_dialog_open.unwrap_or(false))
        .children(heading)
        .child(message)
}
