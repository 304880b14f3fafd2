//! Dialog shadow template and styling hooks.

use fos_dom::{DomResult, DomTree, NodeId};

/// Padding around the backdrop
pub const BACKDROP_PADDING: &str = "--media-dialog-backdrop-padding";
/// Backdrop background
pub const BACKDROP_BACKGROUND: &str = "--media-dialog-backdrop-background";
/// Background of the dialog box
pub const DIALOG_BACKGROUND: &str = "--media-dialog-background";
/// Padding of the dialog box
pub const DIALOG_PADDING: &str = "--media-dialog-padding";

/// Every custom property the dialog reads
pub const CUSTOM_PROPERTIES: &[&str] = &[
    BACKDROP_PADDING,
    BACKDROP_BACKGROUND,
    DIALOG_BACKGROUND,
    DIALOG_PADDING,
];

/// Stylesheet placed in the dialog's shadow root. The host is hidden
/// unless it carries `open`.
pub fn stylesheet() -> String {
    format!(
        r#"
:host {{
  z-index: 100;
  display: flex;
  justify-content: center;
  align-items: center;
  width: 100%;
  height: 100%;
  position: absolute;
  top: 0;
  left: 0;
  box-sizing: border-box;
  padding: var({BACKDROP_PADDING}, 0);
  background: var({BACKDROP_BACKGROUND},
    linear-gradient(to bottom, rgba(20, 20, 30, 0.7) 50%, rgba(20, 20, 30, 0.9))
  );
  color: #fff;
  line-height: 18px;
  font-family: Arial, sans-serif;
}}

:host(:not([open])) {{
  display: none;
}}

::slotted(:focus) {{
  outline: none;
}}

:host-context([media-keyboard-control]) ::slotted(:focus) {{
  box-shadow: 0 0 0 2px rgba(27, 127, 204, 0.9);
}}

.dialog {{
  position: relative;
  box-sizing: border-box;
  background: var({DIALOG_BACKGROUND}, none);
  padding: var({DIALOG_PADDING}, 10px);
  max-width: min(320px, 100%);
  max-height: 100%;
  overflow: auto;
}}
"#
    )
}

/// Stamp `<style>` + `<div class="dialog"><slot></slot></div>` into a
/// shadow root.
pub(crate) fn stamp_template(tree: &mut DomTree, shadow: NodeId) -> DomResult<()> {
    let style = tree.create_element("style");
    let css = tree.create_text(&stylesheet());
    tree.append_child(style, css)?;
    tree.append_child(shadow, style)?;

    let container = tree.create_element("div");
    tree.set_attribute(container, "class", "dialog")?;
    let slot = tree.create_element("slot");
    tree.append_child(container, slot)?;
    tree.append_child(shadow, container)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_uses_every_hook() {
        let css = stylesheet();
        for property in CUSTOM_PROPERTIES {
            assert!(css.contains(&format!("var({property}")), "missing {property}");
        }
        assert!(css.contains(":host(:not([open]))"));
    }
}
