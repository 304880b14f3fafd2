//! fOS Player
//!
//! The `<mux-player>` shell. A [`PlayerProps`] snapshot is mapped to
//! markup by [`template::content`] and reconciled into the player's shadow
//! root by a [`RenderRoot`]; the dialog and video elements the markup
//! contains are upgraded and kept in sync as props change.
//!
//! ```
//! use fos_dom::{Document, inner_html};
//! use fos_player::PlayerElement;
//!
//! let mut doc = Document::new();
//! let mut player = PlayerElement::create(&mut doc).unwrap();
//! let body = doc.body();
//! doc.tree.append_child(body, player.host()).unwrap();
//! player.connected(&mut doc);
//!
//! player.show_error(&mut doc, "Oops", "The stream went away").unwrap();
//! assert!(inner_html(&doc.tree, player.shadow_root()).contains("<h3>Oops</h3>"));
//! ```

mod player;
pub mod props;
pub mod render;
pub mod template;
pub mod vdom;

pub use player::{
    define_elements, PlayerElement, PlayerError, DIALOG_TAG, PLAYER_TAG, THEME_TAG, VIDEO_TAG,
};
pub use props::{AutoplayProp, DialogProps, PlayerProps, PropsError, StreamType};
pub use render::{AttributeChange, Patch, RenderRoot};
pub use vdom::{h, text, VNode};
