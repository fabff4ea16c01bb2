//! Document lifecycle handlers (open, change, close).

use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::events::{EventBus, HostEvent};
use crate::state::BackendState;

/// Handles the `textDocument/didOpen` notification.
///
/// A freshly opened document takes focus.
pub async fn handle_did_open(
    state: &BackendState,
    events: &EventBus,
    params: DidOpenTextDocumentParams,
) {
    debug!("Document opened: {}", params.text_document.uri);

    let uri = params.text_document.uri;
    state.set_document(uri.clone(), params.text_document.text);
    state.set_active_editor(Some(uri.clone()));
    events.dispatch(&HostEvent::ActiveEditorChanged(Some(uri)));
}

/// Handles the `textDocument/didChange` notification.
///
/// The server asks for full sync, so the last change carries the whole text.
pub async fn handle_did_change(
    state: &BackendState,
    events: &EventBus,
    params: DidChangeTextDocumentParams,
) {
    debug!("Document changed: {}", params.text_document.uri);

    let Some(change) = params.content_changes.into_iter().last() else {
        return;
    };
    let uri = params.text_document.uri;
    state.set_document(uri.clone(), change.text);
    events.dispatch(&HostEvent::DocumentChanged(uri));
}

/// Handles the `textDocument/didClose` notification.
///
/// Returns the closed document's URI so its decorations can be cleared.
pub async fn handle_did_close(
    state: &BackendState,
    events: &EventBus,
    params: DidCloseTextDocumentParams,
) -> Url {
    debug!("Document closed: {}", params.text_document.uri);

    let uri = params.text_document.uri;
    state.remove_document(&uri);

    if state.active_editor().as_ref() == Some(&uri) {
        state.set_active_editor(None);
        events.dispatch(&HostEvent::ActiveEditorChanged(None));
    }

    uri
}
