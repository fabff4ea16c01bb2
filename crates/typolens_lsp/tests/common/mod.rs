#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower_lsp::lsp_types::Url;
use typolens_core::{DecorationSpan, DecorationStyle};
use typolens_lsp::host::{DecorationTypeId, Host};

/// A call the extension made into the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    RegisterDecorationType(DecorationStyle),
    SetDecorations {
        uri: Url,
        decoration_type: DecorationTypeId,
        rule_id: String,
        decorations: Vec<DecorationSpan>,
    },
    ShowInformationMessage(String),
}

/// Host that records every call instead of painting.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
    /// Time each `set_decorations` takes to complete.
    latency: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl RecordingHost {
    /// A host whose decoration updates take `latency` to complete.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Largest number of decoration updates seen running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Decoration updates, in order, as (uri, decorations).
    pub fn decoration_updates(&self) -> Vec<(Url, Vec<DecorationSpan>)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                HostCall::SetDecorations {
                    uri, decorations, ..
                } => Some((uri.clone(), decorations.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                HostCall::ShowInformationMessage(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

#[tower_lsp::async_trait]
impl Host for RecordingHost {
    async fn register_decoration_type(&self, style: &DecorationStyle) -> DecorationTypeId {
        self.calls
            .lock()
            .push(HostCall::RegisterDecorationType(style.clone()));
        DecorationTypeId(7)
    }

    async fn set_decorations(
        &self,
        uri: &Url,
        decoration_type: DecorationTypeId,
        rule_id: &str,
        decorations: &[DecorationSpan],
    ) {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.calls.lock().push(HostCall::SetDecorations {
            uri: uri.clone(),
            decoration_type,
            rule_id: rule_id.to_string(),
            decorations: decorations.to_vec(),
        });
    }

    async fn show_information_message(&self, message: String) {
        self.calls
            .lock()
            .push(HostCall::ShowInformationMessage(message));
    }
}

pub fn uri(name: &str) -> Url {
    Url::parse(&format!("file:///tmp/{name}")).unwrap()
}

pub async fn send_msg<W: AsyncWriteExt + Unpin>(writer: &mut W, msg: &str) {
    let content = format!("Content-Length: {}\r\n\r\n{}", msg.len(), msg);
    writer.write_all(content.as_bytes()).await.unwrap();
    writer.flush().await.unwrap();
}

pub async fn recv_msg<R: AsyncReadExt + Unpin>(reader: &mut R) -> Option<String> {
    let mut buffer = Vec::new();
    let mut content_length = 0;

    loop {
        let byte = reader.read_u8().await.ok()?;
        buffer.push(byte);
        if buffer.ends_with(b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buffer);
            for line in headers.lines() {
                if line.to_lowercase().starts_with("content-length:") {
                    let parts: Vec<&str> = line.split(':').collect();
                    if parts.len() == 2 {
                        content_length = parts[1].trim().parse().unwrap_or_else(|e| {
                            panic!("Failed to parse Content-Length: {e}, header: {line}")
                        });
                    }
                }
            }
            break;
        }
    }

    if content_length == 0 {
        return None;
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await.ok()?;

    Some(String::from_utf8(body).unwrap())
}
