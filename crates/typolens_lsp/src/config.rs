//! Server options passed by the client at initialization.

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use typolens_core::DecorationStyle;

/// Options read from `initializationOptions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerOptions {
    /// Overrides for the cosmetic decoration style.
    pub decoration_style: DecorationStyle,
}

impl ServerOptions {
    /// Parses the client's options, falling back to defaults if they are
    /// missing or malformed.
    pub fn from_initialization_options(options: Option<Value>) -> Self {
        let Some(value) = options else {
            return Self::default();
        };
        if value.is_null() {
            return Self::default();
        }

        match serde_json::from_value(value) {
            Ok(options) => {
                info!("Loaded initialization options");
                options
            }
            Err(e) => {
                warn!("Ignoring malformed initialization options: {}", e);
                Self::default()
            }
        }
    }
}
