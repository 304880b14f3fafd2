//! Show/close focus cycle through the public API.

use fos_dialog::MediaDialog;
use fos_dom::{Document, NodeId, ShadowRootMode};

fn append(doc: &mut Document, parent: NodeId, tag: &str) -> NodeId {
    let id = doc.tree.create_element(tag);
    doc.tree.append_child(parent, id).unwrap();
    id
}

fn setup() -> (Document, MediaDialog, NodeId) {
    let mut doc = Document::new();
    let body = doc.body();
    let trigger = append(&mut doc, body, "button");
    let dialog = MediaDialog::create(&mut doc).unwrap();
    doc.tree.append_child(body, dialog.node()).unwrap();
    (doc, dialog, trigger)
}

#[test]
fn test_show_then_close_restores_focus() {
    let (mut doc, mut dialog, trigger) = setup();
    let confirm = append(&mut doc, dialog.node(), "button");
    doc.focus(trigger);

    dialog.show(&mut doc);
    assert!(dialog.is_open(&doc));
    assert_eq!(doc.active_element(), Some(confirm));

    dialog.close(&mut doc);
    assert!(!dialog.is_open(&doc));
    assert_eq!(doc.active_element(), Some(trigger));
}

#[test]
fn test_close_without_show_keeps_focus() {
    let (mut doc, mut dialog, trigger) = setup();
    doc.focus(trigger);
    doc.take_events();

    dialog.close(&mut doc);
    assert_eq!(doc.active_element(), Some(trigger));
    assert!(doc.take_events().is_empty());
}

#[test]
fn test_close_after_trigger_detached_leaves_focus_alone() {
    let (mut doc, mut dialog, trigger) = setup();
    let confirm = append(&mut doc, dialog.node(), "button");
    doc.focus(trigger);
    dialog.show(&mut doc);

    let body = doc.body();
    doc.tree.remove_child(body, trigger).unwrap();
    dialog.close(&mut doc);
    assert_eq!(doc.active_element(), Some(confirm));
}

#[test]
fn test_focus_found_inside_slotted_shadow_host() {
    let (mut doc, mut dialog, trigger) = setup();
    let widget = append(&mut doc, dialog.node(), "media-retry");
    let shadow = doc.tree.attach_shadow(widget, ShadowRootMode::Open).unwrap();
    let retry = append(&mut doc, shadow, "button");
    doc.focus(trigger);

    dialog.show(&mut doc);
    assert_eq!(doc.active_element(), Some(retry));
}

#[test]
fn test_connected_while_open_grabs_focus() {
    let mut doc = Document::new();
    let body = doc.body();
    let trigger = append(&mut doc, body, "button");
    doc.focus(trigger);

    let mut dialog = MediaDialog::create(&mut doc).unwrap();
    let ok = append(&mut doc, dialog.node(), "button");
    doc.tree.set_attribute(dialog.node(), "open", "").unwrap();
    doc.tree.append_child(body, dialog.node()).unwrap();
    dialog.connected_callback(&mut doc);

    assert_eq!(doc.tree.get_attribute(dialog.node(), "role"), Some("dialog"));
    assert_eq!(doc.active_element(), Some(ok));
    assert_eq!(dialog.previously_focused(), Some(trigger));
}
