//! LSP Backend state management.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use tower_lsp::lsp_types::Url;
use tracing::error;

use typolens_core::DecorationStyle;

/// Shared backend state.
///
/// Mirrors what the editor knows: the text of every open document and which
/// one currently has focus.
pub struct BackendState {
    /// Document contents cache.
    documents: RwLock<HashMap<Url, String>>,
    /// The focused document, if any.
    active_editor: RwLock<Option<Url>>,
    /// Style handed to the client when the decoration type is registered.
    decoration_style: RwLock<DecorationStyle>,
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("documents", &"<HashMap<Url, String>>")
            .field("active_editor", &self.active_editor)
            .field("decoration_style", &self.decoration_style)
            .finish()
    }
}

impl BackendState {
    /// Creates a new empty state.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            active_editor: RwLock::new(None),
            decoration_style: RwLock::new(DecorationStyle::default()),
        }
    }

    /// Stores the full text of a document.
    pub fn set_document(&self, uri: Url, text: String) {
        match self.documents.write() {
            Ok(mut docs) => {
                docs.insert(uri, text);
            }
            Err(e) => error!("Documents lock poisoned: {}", e),
        }
    }

    /// Forgets a document.
    pub fn remove_document(&self, uri: &Url) {
        match self.documents.write() {
            Ok(mut docs) => {
                docs.remove(uri);
            }
            Err(e) => error!("Documents lock poisoned: {}", e),
        }
    }

    /// Returns a copy of the document's current text.
    pub fn document_text(&self, uri: &Url) -> Option<String> {
        match self.documents.read() {
            Ok(docs) => docs.get(uri).cloned(),
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                None
            }
        }
    }

    /// Returns the focused document.
    pub fn active_editor(&self) -> Option<Url> {
        match self.active_editor.read() {
            Ok(active) => active.clone(),
            Err(e) => {
                error!("Active editor lock poisoned: {}", e);
                None
            }
        }
    }

    /// Replaces the focused document.
    pub fn set_active_editor(&self, uri: Option<Url>) {
        match self.active_editor.write() {
            Ok(mut active) => *active = uri,
            Err(e) => error!("Active editor lock poisoned: {}", e),
        }
    }

    pub fn decoration_style(&self) -> DecorationStyle {
        match self.decoration_style.read() {
            Ok(style) => style.clone(),
            Err(e) => {
                error!("Decoration style lock poisoned: {}", e);
                DecorationStyle::default()
            }
        }
    }

    pub fn set_decoration_style(&self, style: DecorationStyle) {
        match self.decoration_style.write() {
            Ok(mut current) => *current = style,
            Err(e) => error!("Decoration style lock poisoned: {}", e),
        }
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<BackendState>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lifecycle() {
        let state = BackendState::new();
        let uri = Url::parse("file:///tmp/a.css").unwrap();

        assert_eq!(state.document_text(&uri), None);
        state.set_document(uri.clone(), "hieght".to_string());
        assert_eq!(state.document_text(&uri).as_deref(), Some("hieght"));
        state.remove_document(&uri);
        assert_eq!(state.document_text(&uri), None);
    }

    #[test]
    fn test_active_editor() {
        let state = BackendState::new();
        let uri = Url::parse("file:///tmp/a.css").unwrap();

        assert_eq!(state.active_editor(), None);
        state.set_active_editor(Some(uri.clone()));
        assert_eq!(state.active_editor(), Some(uri));
        state.set_active_editor(None);
        assert_eq!(state.active_editor(), None);
    }
}
