pub mod codec;
pub mod dialogs;
