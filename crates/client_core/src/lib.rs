use std::{future::Future, sync::Arc};

use anyhow::Result;
use shared::{
    error::TransportFailure,
    protocol::{AdminCommand, ResponseEnvelope},
};
use tracing::{info, warn};

pub mod transport;

pub use transport::{CommandTransport, HttpCommandTransport, REQUEST_TIMEOUT};

pub const FALLBACK_ERROR_TEXT: &str = "Something went wrong!";
pub const FALLBACK_SUCCESS_TEXT: &str = "Operation completed successfully!";
pub const FALLBACK_INFO_TEXT: &str = "Something something info...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
    Info,
}

impl NotificationKind {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Error => "Ooops!",
            Self::Success => "Success!",
            Self::Info => "Heads up!",
        }
    }
}

/// One transient banner communicating one outcome to the user. No identity
/// beyond sink insertion order; gone once dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Where rendered notifications go.
///
/// Implementations stack newest-on-top and keep each entry independently
/// dismissible where the medium supports dismissal. `append` must not fail;
/// the dispatcher relies on every call producing a visible banner.
pub trait NotificationSink: Send + Sync {
    fn append(&self, notification: Notification);
}

/// Page-level actions the dispatcher can request.
pub trait PageHandle: Send + Sync {
    /// Full reload of the current page from the server, bypassing caches.
    fn reload(&self);
}

/// Interprets backend response envelopes and transport failures, producing
/// exactly one user-visible outcome per call. Stateless; each invocation is
/// independent of every other.
pub struct ResponseDispatcher {
    sink: Arc<dyn NotificationSink>,
    page: Arc<dyn PageHandle>,
}

impl ResponseDispatcher {
    pub fn new(sink: Arc<dyn NotificationSink>, page: Arc<dyn PageHandle>) -> Self {
        Self { sink, page }
    }

    pub fn handle_response(&self, envelope: ResponseEnvelope) {
        match envelope {
            ResponseEnvelope::Reload => {
                info!("server requested a page reload");
                self.page.reload();
            }
            ResponseEnvelope::Error { result } => self.show_notification(
                NotificationKind::Error,
                result.unwrap_or_else(|| FALLBACK_ERROR_TEXT.to_string()),
            ),
            ResponseEnvelope::Success { result } => self.show_notification(
                NotificationKind::Success,
                result.unwrap_or_else(|| FALLBACK_SUCCESS_TEXT.to_string()),
            ),
            ResponseEnvelope::Info { result } => self.show_notification(
                NotificationKind::Info,
                result.unwrap_or_else(|| FALLBACK_INFO_TEXT.to_string()),
            ),
            ResponseEnvelope::Unrecognized { raw } => {
                warn!(%raw, "unrecognized response status");
                self.show_notification(NotificationKind::Error, raw.to_string());
            }
        }
    }

    pub fn handle_transport_failure(&self, failure: &TransportFailure) {
        warn!(%failure, "request failed without a response envelope");
        self.show_notification(NotificationKind::Error, failure.to_string());
    }

    pub fn show_notification(&self, kind: NotificationKind, message: impl Into<String>) {
        self.sink.append(Notification {
            kind,
            message: message.into(),
        });
    }
}

/// High-level client: submits admin commands and routes every outcome
/// through the dispatcher. Submissions are independent; nothing is retried
/// and no ordering is imposed between concurrent calls.
pub struct AdminConsoleClient {
    transport: Arc<dyn CommandTransport>,
    dispatcher: ResponseDispatcher,
}

impl AdminConsoleClient {
    pub fn new(
        server_url: &str,
        sink: Arc<dyn NotificationSink>,
        page: Arc<dyn PageHandle>,
    ) -> Result<Self> {
        Ok(Self::new_with_transport(
            Arc::new(HttpCommandTransport::new(server_url)?),
            sink,
            page,
        ))
    }

    pub fn new_with_transport(
        transport: Arc<dyn CommandTransport>,
        sink: Arc<dyn NotificationSink>,
        page: Arc<dyn PageHandle>,
    ) -> Self {
        Self {
            transport,
            dispatcher: ResponseDispatcher::new(sink, page),
        }
    }

    /// Fire and forget: every completed call ends in exactly one
    /// notification or one page reload, never an error to the caller.
    pub async fn submit(&self, command: &AdminCommand) {
        info!(
            command = command.wire_name(),
            endpoint = command.endpoint(),
            "submitting admin command"
        );
        match self.transport.submit(command).await {
            Ok(envelope) => self.dispatcher.handle_response(envelope),
            Err(failure) => self.dispatcher.handle_transport_failure(&failure),
        }
    }

    /// Races the request against `abort`. A won race is reported like any
    /// other transport failure; the in-flight request is dropped.
    pub async fn submit_until(&self, command: &AdminCommand, abort: impl Future<Output = ()>) {
        info!(
            command = command.wire_name(),
            endpoint = command.endpoint(),
            "submitting abortable admin command"
        );
        tokio::select! {
            outcome = self.transport.submit(command) => match outcome {
                Ok(envelope) => self.dispatcher.handle_response(envelope),
                Err(failure) => self.dispatcher.handle_transport_failure(&failure),
            },
            _ = abort => {
                self.dispatcher.handle_transport_failure(&TransportFailure::Aborted);
            }
        }
    }

    pub fn dispatcher(&self) -> &ResponseDispatcher {
        &self.dispatcher
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
