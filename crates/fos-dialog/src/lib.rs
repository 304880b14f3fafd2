//! fOS Dialog
//!
//! The `<media-dialog>` overlay used by the player shell.
//!
//! ```rust,ignore
//! use fos_dialog::MediaDialog;
//!
//! let mut dialog = MediaDialog::create(&mut doc)?;
//! dialog.show(&mut doc);   // focus moves inside
//! dialog.close(&mut doc);  // focus returns
//! ```

mod dialog;
pub mod style;

pub use dialog::{define, define_as, MediaDialog, DEFAULT_ROLE, DIALOG_TAG, OBSERVED_ATTRIBUTES};
