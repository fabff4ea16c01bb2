//! LSP request/notification handlers.

mod active;
mod documents;
mod initialize;

pub use active::handle_did_change_active_editor;
pub use documents::{handle_did_change, handle_did_close, handle_did_open};
pub use initialize::{handle_initialize, handle_initialized, handle_shutdown};
