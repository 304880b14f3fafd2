//! `<mux-player>` driving its dialog and video elements.

use std::cell::RefCell;
use std::rc::Rc;

use fos_dom::{Document, NodeId};
use fos_player::{PlayerElement, PlayerProps, StreamType};

fn mounted() -> (Document, PlayerElement, NodeId) {
    let mut doc = Document::new();
    let body = doc.body();
    let trigger = doc.tree.create_element("button");
    doc.tree.append_child(body, trigger).unwrap();

    let mut player = PlayerElement::create(&mut doc).unwrap();
    doc.tree.append_child(body, player.host()).unwrap();
    player.connected(&mut doc);
    (doc, player, trigger)
}

#[test]
fn test_connected_dialog_gets_role() {
    let (doc, player, _) = mounted();
    let dialog = player.dialog().unwrap().node();
    assert!(doc.tree.is_connected(dialog));
    assert_eq!(doc.tree.get_attribute(dialog, "role"), Some("dialog"));
}

#[test]
fn test_role_survives_rerender() {
    let (mut doc, mut player, _) = mounted();
    let dialog = player.dialog().unwrap().node();
    player
        .update(&mut doc, |props| props.stream_type = Some(StreamType::Live))
        .unwrap();
    assert_eq!(player.dialog().unwrap().node(), dialog);
    assert_eq!(doc.tree.get_attribute(dialog, "role"), Some("dialog"));
}

#[test]
fn test_error_dialog_takes_and_returns_focus() {
    let (mut doc, mut player, trigger) = mounted();
    doc.focus(trigger);

    player
        .show_error(&mut doc, "Errr", "Media could not be loaded")
        .unwrap();
    let dialog = player.dialog().unwrap();
    assert!(dialog.is_open(&doc));
    assert_eq!(dialog.previously_focused(), Some(trigger));
    assert_eq!(doc.active_element(), None);
    assert_eq!(
        doc.tree.text_content(dialog.node()),
        "ErrrMedia could not be loaded"
    );

    player.close_dialog(&mut doc).unwrap();
    assert!(!player.dialog().unwrap().is_open(&doc));
    assert_eq!(doc.active_element(), Some(trigger));
}

#[test]
fn test_dialog_open_before_connect_grabs_focus_on_connect() {
    let mut doc = Document::new();
    let body = doc.body();
    let trigger = doc.tree.create_element("button");
    doc.tree.append_child(body, trigger).unwrap();
    doc.focus(trigger);

    let mut player = PlayerElement::create(&mut doc).unwrap();
    player.show_error(&mut doc, "Errr", "").unwrap();
    assert_eq!(doc.active_element(), Some(trigger));

    doc.tree.append_child(body, player.host()).unwrap();
    player.connected(&mut doc);
    assert_eq!(doc.active_element(), None);
    assert_eq!(player.dialog().unwrap().previously_focused(), Some(trigger));
}

#[test]
fn test_video_follows_props() {
    let (mut doc, mut player, _) = mounted();
    let props = PlayerProps::from_json(
        r#"{"src":"https://stream.example/v.m3u8","hasSrc":true,"loop":true,"autoplay":"muted"}"#,
    )
    .unwrap();

    let loads = Rc::new(RefCell::new(0));
    {
        let loads = Rc::clone(&loads);
        player
            .video_mut()
            .unwrap()
            .add_event_listener("loadstart", move |_| *loads.borrow_mut() += 1);
    }
    player.set_props(&mut doc, props).unwrap();

    let video = player.video().unwrap();
    assert_eq!(video.native().src, "https://stream.example/v.m3u8");
    assert!(video.native().loop_);
    assert!(video.native().muted);
    assert!(video.native().autoplay);
    assert_eq!(*loads.borrow(), 1);

    player.update(&mut doc, |props| props.loop_ = None).unwrap();
    assert!(!player.video().unwrap().native().loop_);
}

#[test]
fn test_theme_reflects_source_state() {
    let (mut doc, mut player, _) = mounted();
    let theme = player.theme().unwrap();
    assert!(doc.tree.has_attribute(theme, "disabled"));

    player.update(&mut doc, |props| props.has_src = Some(true)).unwrap();
    assert!(!doc.tree.has_attribute(theme, "disabled"));
    assert!(!doc.tree.has_attribute(theme, "nohotkeys"));

    player.show_error(&mut doc, "Errr", "").unwrap();
    assert!(doc.tree.has_attribute(theme, "disabled"));
    assert!(doc.tree.has_attribute(theme, "nohotkeys"));
}
