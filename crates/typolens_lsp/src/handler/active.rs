//! Focus change handler.

use tracing::debug;

use crate::events::{EventBus, HostEvent};
use crate::host::DidChangeActiveEditorParams;
use crate::state::BackendState;

/// Handles the `typolens/didChangeActiveEditor` notification.
pub async fn handle_did_change_active_editor(
    state: &BackendState,
    events: &EventBus,
    params: DidChangeActiveEditorParams,
) {
    debug!("Active editor changed: {:?}", params.uri);

    state.set_active_editor(params.uri.clone());
    events.dispatch(&HostEvent::ActiveEditorChanged(params.uri));
}
