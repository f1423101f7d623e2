//! Outbound boundary for socket input messages.
//!
//! The dispatcher hands `(tag, payload)` envelopes to an [`InputSender`].
//! Serialization onto the wire frame, queuing, backpressure and the
//! connection lifecycle all belong to the connection manager behind the
//! trait. A disconnected or unauthenticated socket is expected to fail
//! fast; the dispatcher imposes no timeout of its own.

use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{WsInputError, WsInputResult};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// An outbound input message: message-type tag plus payload mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEnvelope {
    /// Venue message-type tag ("on", "ou", "oc", ...).
    pub tag: &'static str,
    /// Payload mapping, ready for wire framing.
    pub payload: Value,
}

/// Trait for handing input envelopes to the transport.
///
/// Abstracting the send primitive allows unit testing with a recording
/// mock and keeps enforcement independent of the socket implementation.
pub trait InputSender: Send + Sync {
    /// Hand an envelope to the transport.
    fn send(&self, envelope: InputEnvelope) -> BoxFuture<'_, WsInputResult<()>>;
}

/// Arc wrapper for `InputSender` trait objects.
pub type DynInputSender = Arc<dyn InputSender>;

/// Channel-backed sender draining into the connection manager.
///
/// Queuing an envelope only confirms hand-off; delivery is the
/// connection manager's responsibility.
#[derive(Clone)]
pub struct InputHandle {
    tx: mpsc::Sender<InputEnvelope>,
}

impl InputHandle {
    /// Creates a handle over the connection manager's inbound queue.
    pub fn new(tx: mpsc::Sender<InputEnvelope>) -> Self {
        Self { tx }
    }

    /// Whether the underlying channel is still open.
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

impl InputSender for InputHandle {
    fn send(&self, envelope: InputEnvelope) -> BoxFuture<'_, WsInputResult<()>> {
        Box::pin(async move {
            let tag = envelope.tag;
            self.tx
                .send(envelope)
                .await
                .map_err(|_| WsInputError::ChannelClosed)?;
            debug!(tag, "input queued for sending");
            Ok(())
        })
    }
}

/// Mock sender for tests: records every envelope.
#[derive(Default)]
pub struct MockInputSender {
    sends: parking_lot::Mutex<Vec<InputEnvelope>>,
    next_error: parking_lot::Mutex<Option<WsInputError>>,
}

impl MockInputSender {
    /// Creates a new mock sender.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next send fail with `error`.
    pub fn fail_next(&self, error: WsInputError) {
        *self.next_error.lock() = Some(error);
    }

    /// Recorded envelopes, in send order.
    pub fn sends(&self) -> Vec<InputEnvelope> {
        self.sends.lock().clone()
    }
}

impl InputSender for MockInputSender {
    fn send(&self, envelope: InputEnvelope) -> BoxFuture<'_, WsInputResult<()>> {
        Box::pin(async move {
            self.sends.lock().push(envelope);
            match self.next_error.lock().take() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_handle_delivers_envelope() {
        let (tx, mut rx) = mpsc::channel(16);
        let handle = InputHandle::new(tx);

        handle
            .send(InputEnvelope {
                tag: "oc",
                payload: json!({"id": 1}),
            })
            .await
            .unwrap();

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.tag, "oc");
        assert_eq!(envelope.payload, json!({"id": 1}));
    }

    #[tokio::test]
    async fn test_handle_reports_closed_channel() {
        let (tx, rx) = mpsc::channel(16);
        drop(rx);
        let handle = InputHandle::new(tx);
        assert!(!handle.is_open());

        let result = handle
            .send(InputEnvelope {
                tag: "oc",
                payload: json!({}),
            })
            .await;
        assert!(matches!(result, Err(WsInputError::ChannelClosed)));
    }

    #[tokio::test]
    async fn test_mock_records_sends() {
        let sender = MockInputSender::new();
        sender
            .send(InputEnvelope {
                tag: "calc",
                payload: json!([["balance"]]),
            })
            .await
            .unwrap();

        let sends = sender.sends();
        assert_eq!(sends.len(), 1);
        assert_eq!(sends[0].tag, "calc");
    }

    #[tokio::test]
    async fn test_mock_returns_configured_error() {
        let sender = MockInputSender::new();
        sender.fail_next(WsInputError::SendFailed("socket gone".to_owned()));

        let result = sender
            .send(InputEnvelope {
                tag: "oc",
                payload: json!({}),
            })
            .await;
        assert!(matches!(result, Err(WsInputError::SendFailed(_))));

        // Error is consumed; the next send succeeds.
        let result = sender
            .send(InputEnvelope {
                tag: "oc",
                payload: json!({}),
            })
            .await;
        assert!(result.is_ok());
    }
}
