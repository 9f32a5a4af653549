//! Native file-picker and message dialogs. These calls block the frame
//! loop synchronously; a cancelled dialog yields `None` and the caller
//! aborts with no state change.

use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::io::codec::{DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS};

pub fn pick_open_path() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Layered document", DOCUMENT_EXTENSIONS)
        .add_filter("Image", IMAGE_EXTENSIONS)
        .pick_file()
}

pub fn pick_save_document_path(default_stem: &str) -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Layered document", DOCUMENT_EXTENSIONS)
        .set_file_name(format!("{default_stem}.tiff"))
        .save_file()
}

pub fn pick_export_path(default_stem: &str) -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Image", IMAGE_EXTENSIONS)
        .set_file_name(format!("{default_stem}.png"))
        .save_file()
}

/// OK/Cancel prompt shown before discarding unsaved work. Returns `true`
/// when the user confirms the discard.
pub fn confirm_discard_unsaved() -> bool {
    let result = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Unsaved changes")
        .set_description("The current document has unsaved changes. Discard them?")
        .set_buttons(MessageButtons::OkCancel)
        .show();
    result == MessageDialogResult::Ok
}

pub fn show_error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
