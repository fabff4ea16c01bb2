//! typolens LSP Server
//!
//! Language Server Protocol front end for typolens.
//! Decorates misspellings in the focused document as the user types.

mod config;
mod conversion;
pub mod debounce;
pub mod events;
pub mod extension;
mod handler;
pub mod host;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, ClientSocket, LanguageServer, LspService, Server};
use tracing::{error, info};

use typolens_core::PatternRule;

pub use config::ServerOptions;
pub use conversion::DIAGNOSTIC_SOURCE;
use debounce::DEFAULT_DEBOUNCE_MS;
use events::{EventBus, Subscription};
use extension::Extension;
use host::{DidChangeActiveEditor, DidChangeActiveEditorParams, LspHost};
use state::{BackendState, SharedState};

/// The LSP backend for typolens.
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state
    state: SharedState,
    events: Arc<EventBus>,
    /// Extension instance (None if the built-in rule failed to compile).
    extension: Option<Arc<Extension<LspHost>>>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("state", &self.state)
            .field("events", &self.events)
            .field("extension", &self.extension)
            .finish()
    }
}

impl Backend {
    /// Creates a new backend with the given client.
    pub fn new(client: Client) -> Self {
        Self::with_debounce(client, Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }

    /// Creates a backend whose updates are debounced by `delay`.
    pub fn with_debounce(client: Client, delay: Duration) -> Self {
        let state: SharedState = Arc::new(BackendState::new());

        let extension = match PatternRule::builtin() {
            Ok(rule) => Some(Arc::new(Extension::new(
                LspHost::new(client.clone()),
                state.clone(),
                rule,
                delay,
            ))),
            Err(e) => {
                // The server keeps running, it just never decorates.
                error!("Failed to build rule: {}. LSP will run without scanning.", e);
                None
            }
        };

        Self {
            client,
            state,
            events: Arc::new(EventBus::new()),
            extension,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Handles the `typolens/didChangeActiveEditor` notification.
    pub async fn did_change_active_editor(&self, params: DidChangeActiveEditorParams) {
        handler::handle_did_change_active_editor(&self.state, &self.events, params).await;
    }

    async fn activate(&self) {
        let Some(extension) = &self.extension else {
            return;
        };
        let style = self.state.decoration_style();
        let subscriptions = extension.activate(&self.events, &style).await;
        self.subscriptions.lock().extend(subscriptions);
        info!("Extension activated");
    }

    fn deactivate(&self) {
        for subscription in self.subscriptions.lock().drain(..) {
            self.events.unregister(subscription);
        }
        if let Some(extension) = &self.extension {
            extension.deactivate();
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.client).await;
        self.activate().await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.deactivate();
        handler::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handler::handle_did_open(&self.state, &self.events, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handler::handle_did_change(&self.state, &self.events, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = handler::handle_did_close(&self.state, &self.events, params).await;

        match &self.extension {
            Some(extension) => extension.clear_decorations(&uri).await,
            None => self.client.publish_diagnostics(uri, vec![], None).await,
        }
    }
}

/// Builds the LSP service, including the typolens custom notifications.
pub fn build_service<F>(init: F) -> (LspService<Backend>, ClientSocket)
where
    F: FnOnce(Client) -> Backend,
{
    LspService::build(init)
        .custom_method(
            DidChangeActiveEditor::METHOD,
            Backend::did_change_active_editor,
        )
        .finish()
}

/// Starts the LSP server.
///
/// This function does not return unless an error occurs or the server shuts down.
pub async fn run() {
    info!("typolens LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = build_service(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
