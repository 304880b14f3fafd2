//! `<mux-player>` element
//!
//! Owns the props snapshot, renders the template into its shadow root on
//! every change and drives the dialog and video elements the template
//! creates.

use fos_dialog::MediaDialog;
use fos_dom::{
    CustomElementDefinition, CustomElementRegistry, Document, DomError, NodeId, ShadowRootMode,
};
use fos_media::{CustomVideoElement, MediaError};

use crate::props::{DialogProps, PlayerProps, PropsError};
use crate::render::{Patch, RenderRoot};
use crate::template;

pub const PLAYER_TAG: &str = "mux-player";
pub const DIALOG_TAG: &str = "mxp-dialog";
pub const VIDEO_TAG: &str = "mux-video";
/// Theme element; provided by the host page
pub const THEME_TAG: &str = "media-theme";

/// Player error
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Props(#[from] PropsError),
}

/// Register the player and the elements its template uses.
/// Safe to call any number of times.
pub fn define_elements(registry: &mut CustomElementRegistry) {
    registry.define_once(CustomElementDefinition::new(PLAYER_TAG));
    fos_dialog::define_as(registry, DIALOG_TAG);
    fos_media::define(registry, VIDEO_TAG);
}

/// Player element instance
#[derive(Debug)]
pub struct PlayerElement {
    host: NodeId,
    root: RenderRoot,
    props: PlayerProps,
    dialog: Option<MediaDialog>,
    video: Option<CustomVideoElement>,
}

impl PlayerElement {
    /// Create a detached `<mux-player>` rendered with default props
    pub fn create(doc: &mut Document) -> Result<Self, PlayerError> {
        define_elements(doc.custom_elements_mut());
        let host = doc.tree.create_element(PLAYER_TAG);
        Self::upgrade(doc, host)
    }

    /// Attach a shadow root to `host` and render the default props into it
    pub fn upgrade(doc: &mut Document, host: NodeId) -> Result<Self, PlayerError> {
        let shadow = doc.tree.attach_shadow(host, ShadowRootMode::Open)?;
        let mut player = Self {
            host,
            root: RenderRoot::new(shadow),
            props: PlayerProps::default(),
            dialog: None,
            video: None,
        };
        player.render(doc)?;
        Ok(player)
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn shadow_root(&self) -> NodeId {
        self.root.container()
    }

    /// The rendered `media-theme`
    pub fn theme(&self) -> Option<NodeId> {
        self.root.root_nodes().first().copied()
    }

    pub fn props(&self) -> &PlayerProps {
        &self.props
    }

    pub fn dialog(&self) -> Option<&MediaDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut MediaDialog> {
        self.dialog.as_mut()
    }

    pub fn video(&self) -> Option<&CustomVideoElement> {
        self.video.as_ref()
    }

    pub fn video_mut(&mut self) -> Option<&mut CustomVideoElement> {
        self.video.as_mut()
    }

    /// Replace the props and re-render
    pub fn set_props(&mut self, doc: &mut Document, props: PlayerProps) -> Result<Patch, PlayerError> {
        self.props = props;
        self.render(doc)
    }

    /// Edit the props in place and re-render
    pub fn update(
        &mut self,
        doc: &mut Document,
        edit: impl FnOnce(&mut PlayerProps),
    ) -> Result<Patch, PlayerError> {
        edit(&mut self.props);
        self.render(doc)
    }

    /// Lifecycle hook for insertion into a document
    pub fn connected(&mut self, doc: &mut Document) {
        if !doc.tree.is_connected(self.host) {
            return;
        }
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.connected_callback(doc);
        }
    }

    /// Open the error dialog
    pub fn show_error(
        &mut self,
        doc: &mut Document,
        title: &str,
        message: &str,
    ) -> Result<Patch, PlayerError> {
        tracing::debug!(host = ?self.host, title, "showing player error");
        self.update(doc, |props| {
            props.is_dialog_open = Some(true);
            props.dialog = Some(DialogProps {
                title: Some(title.to_string()),
                message: Some(message.to_string()),
            });
        })
    }

    /// Close the error dialog
    pub fn close_dialog(&mut self, doc: &mut Document) -> Result<Patch, PlayerError> {
        self.update(doc, |props| props.is_dialog_open = Some(false))
    }

    fn render(&mut self, doc: &mut Document) -> Result<Patch, PlayerError> {
        let content = template::content(&self.props);
        let patch = self.root.render(&mut doc.tree, &content)?;
        self.apply_patch(doc, &patch)?;
        Ok(patch)
    }

    fn apply_patch(&mut self, doc: &mut Document, patch: &Patch) -> Result<(), PlayerError> {
        for &removed in &patch.removed {
            if self
                .dialog
                .as_ref()
                .is_some_and(|d| doc.tree.contains(removed, d.node()))
            {
                self.dialog = None;
            }
            if self
                .video
                .as_ref()
                .is_some_and(|v| doc.tree.contains(removed, v.host()))
            {
                self.video = None;
            }
        }

        for &node in &patch.inserted {
            let tag = doc.tree.tag_name(node).map(str::to_string);
            match tag.as_deref() {
                Some(DIALOG_TAG) => {
                    let mut dialog = MediaDialog::upgrade(doc, node)?;
                    if doc.tree.is_connected(node) {
                        dialog.connected_callback(doc);
                    }
                    self.dialog = Some(dialog);
                }
                Some(VIDEO_TAG) => {
                    self.video = Some(CustomVideoElement::upgrade(doc, node)?);
                }
                _ => {}
            }
        }

        for change in &patch.attributes {
            if let Some(video) = self.video.as_mut().filter(|v| v.host() == change.node) {
                video.attribute_changed_callback(
                    doc,
                    &change.name,
                    change.old.as_deref(),
                    change.new.as_deref(),
                );
            }
            // A detached dialog picks up `open` in its connected callback
            if !doc.tree.is_connected(change.node) {
                continue;
            }
            if let Some(dialog) = self.dialog.as_mut().filter(|d| d.node() == change.node) {
                dialog.attribute_changed_callback(
                    doc,
                    &change.name,
                    change.old.as_deref(),
                    change.new.as_deref(),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_elements_idempotent() {
        let mut registry = CustomElementRegistry::new();
        define_elements(&mut registry);
        define_elements(&mut registry);
        assert_eq!(registry.len(), 3);
        assert!(registry.get(DIALOG_TAG).unwrap().observes("open"));
        assert!(registry.get(VIDEO_TAG).unwrap().observes("playsinline"));
        assert!(!registry.is_defined(THEME_TAG));
    }

    #[test]
    fn test_create_upgrades_children() {
        let mut doc = Document::new();
        let player = PlayerElement::create(&mut doc).unwrap();
        let theme = player.theme().unwrap();
        assert_eq!(doc.tree.tag_name(theme), Some(THEME_TAG));
        let dialog = player.dialog().unwrap();
        let video = player.video().unwrap();
        assert_eq!(doc.tree.parent(dialog.node()), theme);
        assert_eq!(doc.tree.parent(video.host()), theme);
        assert!(doc.tree.shadow_root(dialog.node()).is_some());
        assert!(video.native().plays_inline);
    }

    #[test]
    fn test_props_reach_video() {
        let mut doc = Document::new();
        let mut player = PlayerElement::create(&mut doc).unwrap();
        player
            .update(&mut doc, |props| props.poster = Some("thumb.jpg".into()))
            .unwrap();
        let video = player.video().unwrap();
        assert_eq!(video.native().poster, "thumb.jpg");
        assert_eq!(
            doc.tree.get_attribute(video.native_node(), "poster"),
            Some("thumb.jpg")
        );
    }
}
