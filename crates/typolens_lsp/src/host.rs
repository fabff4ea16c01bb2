//! The editor surface the extension paints on.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};
use tower_lsp::Client;
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::{MessageType, Range, Url};
use tracing::debug;

use typolens_core::{DecorationSpan, DecorationStyle};

use crate::conversion::{to_decoration_options, to_lsp_diagnostic};

/// Identifies a registered decoration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecorationTypeId(pub u32);

/// Outbound calls the extension makes into the editor.
#[tower_lsp::async_trait]
pub trait Host: Send + Sync + 'static {
    /// Registers a decoration style and returns its handle.
    async fn register_decoration_type(&self, style: &DecorationStyle) -> DecorationTypeId;

    /// Replaces every decoration of `decoration_type` on the document.
    ///
    /// `rule_id` names the rule that produced the decorations.
    async fn set_decorations(
        &self,
        uri: &Url,
        decoration_type: DecorationTypeId,
        rule_id: &str,
        decorations: &[DecorationSpan],
    );

    /// Shows an informational message.
    async fn show_information_message(&self, message: String);
}

/// A single decorated range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationOptions {
    pub range: Range,
    pub hover_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterDecorationTypeParams {
    pub id: DecorationTypeId,
    pub style: DecorationStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDecorationsParams {
    pub uri: Url,
    pub decoration_type: DecorationTypeId,
    pub decorations: Vec<DecorationOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DidChangeActiveEditorParams {
    pub uri: Option<Url>,
}

/// `typolens/registerDecorationType` (server to client).
#[derive(Debug)]
pub enum RegisterDecorationType {}

impl Notification for RegisterDecorationType {
    type Params = RegisterDecorationTypeParams;
    const METHOD: &'static str = "typolens/registerDecorationType";
}

/// `typolens/setDecorations` (server to client).
#[derive(Debug)]
pub enum SetDecorations {}

impl Notification for SetDecorations {
    type Params = SetDecorationsParams;
    const METHOD: &'static str = "typolens/setDecorations";
}

/// `typolens/didChangeActiveEditor` (client to server).
#[derive(Debug)]
pub enum DidChangeActiveEditor {}

impl Notification for DidChangeActiveEditor {
    type Params = DidChangeActiveEditorParams;
    const METHOD: &'static str = "typolens/didChangeActiveEditor";
}

/// [`Host`] backed by an LSP client connection.
///
/// Decorations are published twice: as diagnostics, which every client
/// renders, and as `typolens/setDecorations` for clients that apply the
/// registered style themselves.
pub struct LspHost {
    client: Client,
    next_type_id: AtomicU32,
}

impl std::fmt::Debug for LspHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LspHost")
            .field("next_type_id", &self.next_type_id)
            .finish_non_exhaustive()
    }
}

impl LspHost {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            next_type_id: AtomicU32::new(1),
        }
    }
}

#[tower_lsp::async_trait]
impl Host for LspHost {
    async fn register_decoration_type(&self, style: &DecorationStyle) -> DecorationTypeId {
        let id = DecorationTypeId(self.next_type_id.fetch_add(1, Ordering::Relaxed));
        debug!("Registering decoration type {:?}", id);
        self.client
            .send_notification::<RegisterDecorationType>(RegisterDecorationTypeParams {
                id,
                style: style.clone(),
            })
            .await;
        id
    }

    async fn set_decorations(
        &self,
        uri: &Url,
        decoration_type: DecorationTypeId,
        rule_id: &str,
        decorations: &[DecorationSpan],
    ) {
        let diagnostics = decorations
            .iter()
            .map(|span| to_lsp_diagnostic(span, rule_id))
            .collect();
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, None)
            .await;

        self.client
            .send_notification::<SetDecorations>(SetDecorationsParams {
                uri: uri.clone(),
                decoration_type,
                decorations: decorations.iter().map(to_decoration_options).collect(),
            })
            .await;
    }

    async fn show_information_message(&self, message: String) {
        self.client.show_message(MessageType::INFO, message).await;
    }
}
