//! Example: render a player for a props snapshot
//!
//! ```text
//! cargo run -p fos-player --example render_player -- '{"streamType":"live"}'
//! ```

use anyhow::Context;
use fos_dom::{Document, inner_html};
use fos_player::{PlayerElement, PlayerProps};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let json = std::env::args().nth(1).unwrap_or_else(|| "{}".to_string());
    let props = PlayerProps::from_json(&json).context("parsing props")?;

    let mut doc = Document::new();
    let mut player = PlayerElement::create(&mut doc)?;
    let body = doc.body();
    doc.tree.append_child(body, player.host())?;
    player.connected(&mut doc);

    let patch = player.set_props(&mut doc, props)?;
    tracing::info!(
        inserted = patch.inserted.len(),
        attributes = patch.attributes.len(),
        "rendered player"
    );

    println!("{}", inner_html(&doc.tree, player.shadow_root()));
    Ok(())
}
