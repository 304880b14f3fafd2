//! fOS Accessibility
//!
//! Focus helpers shared by the media components.
//!
//! Features:
//! - Focusable element discovery across shadow roots
//! - Focus capture and restoration through non-owning handles

pub mod focus;
pub mod focusable;

pub use focus::{FocusHandle, FocusMemory};
pub use focusable::{find_focusable_within, focusable_selector, FOCUSABLE_TAGS};
