//! The decorating extension: wires host events to debounced scans.

use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::Url;
use tracing::{debug, error, warn};

use typolens_core::{DecorationStyle, PatternRule, scan};

use crate::debounce::Debouncer;
use crate::events::{EventBus, HostEvent, Subscription};
use crate::host::{DecorationTypeId, Host};
use crate::state::SharedState;

/// Scans the active document and keeps its decorations current.
pub struct Extension<H: Host> {
    host: H,
    state: SharedState,
    rule: PatternRule,
    /// The document this extension decorates, as last reported by the host.
    active_editor: RwLock<Option<Url>>,
    decoration_type: OnceLock<DecorationTypeId>,
    debouncer: Debouncer,
    /// Held for a whole scan-and-publish so detached updates never interleave.
    update_lock: Mutex<()>,
}

impl<H: Host> std::fmt::Debug for Extension<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extension")
            .field("rule", &self.rule.id())
            .field("active_editor", &self.active_editor)
            .field("decoration_type", &self.decoration_type.get())
            .field("debouncer", &self.debouncer)
            .finish()
    }
}

impl<H: Host> Extension<H> {
    /// Creates an extension that debounces updates by `delay`.
    pub fn new(host: H, state: SharedState, rule: PatternRule, delay: Duration) -> Self {
        Self {
            host,
            state,
            rule,
            active_editor: RwLock::new(None),
            decoration_type: OnceLock::new(),
            debouncer: Debouncer::new(delay),
            update_lock: Mutex::new(()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Registers the decoration style and subscribes to host events.
    ///
    /// If the host already has a focused document, an update is scheduled
    /// right away. The returned subscriptions stay registered until the
    /// caller unregisters them.
    pub async fn activate(
        self: &Arc<Self>,
        events: &EventBus,
        style: &DecorationStyle,
    ) -> Vec<Subscription> {
        let id = self.host.register_decoration_type(style).await;
        if self.decoration_type.set(id).is_err() {
            warn!("Extension activated more than once, keeping first decoration type");
        }

        let initial = self.state.active_editor();
        self.set_active_editor(initial.clone());
        if initial.is_some() {
            self.trigger_update();
        }

        let this = Arc::clone(self);
        let on_active_editor = events.register(move |event| {
            if let HostEvent::ActiveEditorChanged(editor) = event {
                this.set_active_editor(editor.clone());
                if editor.is_some() {
                    this.trigger_update();
                }
            }
        });

        let this = Arc::clone(self);
        let on_document_change = events.register(move |event| {
            if let HostEvent::DocumentChanged(uri) = event
                && this.is_active(uri)
            {
                this.trigger_update();
            }
        });

        vec![on_active_editor, on_document_change]
    }

    /// Cancels any pending update.
    pub fn deactivate(&self) {
        self.debouncer.cancel();
    }

    pub fn active_editor(&self) -> Option<Url> {
        match self.active_editor.read() {
            Ok(active) => active.clone(),
            Err(e) => {
                error!("Active editor lock poisoned: {}", e);
                None
            }
        }
    }

    fn set_active_editor(&self, uri: Option<Url>) {
        match self.active_editor.write() {
            Ok(mut active) => *active = uri,
            Err(e) => error!("Active editor lock poisoned: {}", e),
        }
    }

    fn is_active(&self, uri: &Url) -> bool {
        self.active_editor().as_ref() == Some(uri)
    }

    /// Schedules a debounced update, replacing any pending one.
    pub fn trigger_update(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.debouncer.schedule(async move {
            this.update_decorations().await;
        });
    }

    /// Scans the active document and repaints its decorations.
    ///
    /// Does nothing when no document is active. Updates run one at a time
    /// and each reads the latest text once it holds the lock, so an update
    /// queued behind a slower one never publishes older results.
    pub async fn update_decorations(&self) {
        let _guard = self.update_lock.lock().await;
        let Some(uri) = self.active_editor() else {
            debug!("No active editor, skipping update");
            return;
        };
        let Some(decoration_type) = self.decoration_type.get().copied() else {
            debug!("Extension not activated, skipping update");
            return;
        };
        let Some(text) = self.state.document_text(&uri) else {
            debug!("No text for active editor {}", uri);
            return;
        };

        debug!("Scanning document: {}", uri);
        let result = scan(&self.rule, &text);

        self.host
            .set_decorations(
                &uri,
                decoration_type,
                self.rule.id(),
                &result.decorations,
            )
            .await;

        if let Some(message) = result.summary(&self.rule) {
            self.host.show_information_message(message).await;
        }
    }

    /// Removes every decoration from a document.
    pub async fn clear_decorations(&self, uri: &Url) {
        if let Some(decoration_type) = self.decoration_type.get().copied() {
            self.host
                .set_decorations(uri, decoration_type, self.rule.id(), &[])
                .await;
        }
    }
}
