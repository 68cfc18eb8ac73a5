// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Observability hooks for the transport path.
//!
//! A [`TransportHook`] is injected when the client is built and sees every
//! request before it is sent and every outcome after the response has been
//! decoded (or the call has failed). Hooks observe only; they cannot change
//! what the caller receives. Without a hook the client uses
//! [`NoOpTransportHook`].
//!
//! # Example
//!
//! ```ignore
//! use bkt_client::{Client, CompletionRecord, TransportHook};
//! use async_trait::async_trait;
//!
//! struct MetricsHook { /* queue of pending events */ }
//!
//! #[async_trait]
//! impl TransportHook for MetricsHook {
//!     async fn on_complete(&self, record: &CompletionRecord) {
//!         for event in record.metrics_events("server") {
//!             // queue for the next register_events batch
//!         }
//!     }
//! }
//!
//! let client = Client::builder()
//!     .host("api.example.com")
//!     .api_key("key")
//!     .hook(MetricsHook { /* ... */ })
//!     .build()?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bkt_core::{ApiId, Event, MetricsErrorKind};

use crate::ClientError;

/// A request about to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
	pub api_id: ApiId,
	pub url: String,
	/// Size of the serialized request body.
	pub body_bytes: usize,
}

/// The end of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
	pub api_id: ApiId,
	pub url: String,
	/// HTTP status received, if the service answered at all.
	pub status: Option<u16>,
	pub latency: Duration,
	pub outcome: Outcome,
}

/// How an operation ended, one variant per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// Response decoded. `size` is the reported content length.
	Success { size: u64 },
	/// The service answered with a non-2xx status.
	InvalidStatus { code: Option<u16> },
	/// A 2xx body did not decode into the expected response.
	Decode,
	/// The request could not be completed.
	Transport { timeout: bool },
	/// The request body could not be encoded.
	Encode,
}

impl Outcome {
	pub(crate) fn from_result<T>(result: &Result<(T, u64), ClientError>) -> Self {
		match result {
			Ok((_, size)) => Outcome::Success { size: *size },
			Err(ClientError::InvalidStatus(e)) => Outcome::InvalidStatus { code: e.code },
			Err(ClientError::Decode(_)) => Outcome::Decode,
			Err(ClientError::Transport(e)) => Outcome::Transport {
				timeout: e.is_timeout(),
			},
			Err(ClientError::Serialize(_) | ClientError::Configuration(_)) => Outcome::Encode,
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Outcome::Success { .. })
	}

	/// Error metrics classification, `None` on success.
	pub fn metrics_error_kind(&self) -> Option<MetricsErrorKind> {
		match self {
			Outcome::Success { .. } => None,
			Outcome::InvalidStatus { code: Some(code) } => Some(MetricsErrorKind::from_status(*code)),
			Outcome::InvalidStatus { code: None } => {
				Some(MetricsErrorKind::Unknown { status_code: None })
			}
			Outcome::Transport { timeout: true } => Some(MetricsErrorKind::Timeout),
			Outcome::Transport { timeout: false } => Some(MetricsErrorKind::Network),
			Outcome::Decode | Outcome::Encode => Some(MetricsErrorKind::InternalSdk),
		}
	}
}

impl CompletionRecord {
	/// Metrics events describing this operation, labelled with `tag`.
	///
	/// A success yields a latency and a size event; a failure yields one
	/// error event.
	pub fn metrics_events(&self, tag: &str) -> Vec<Event> {
		match (self.outcome, self.outcome.metrics_error_kind()) {
			(Outcome::Success { size }, _) => vec![
				Event::latency_metrics(tag, self.api_id, self.latency),
				Event::size_metrics(tag, self.api_id, size),
			],
			(_, Some(kind)) => vec![Event::error_metrics(tag, self.api_id, kind)],
			(_, None) => Vec::new(),
		}
	}
}

/// Receives transport events from a [`Client`](crate::Client).
///
/// Hooks run inline on the request path; keep them fast and queue any
/// expensive work.
#[async_trait]
pub trait TransportHook: Send + Sync + 'static {
	/// Called before the request is sent.
	async fn on_request(&self, _record: &RequestRecord) {}

	/// Called once the operation has succeeded or failed.
	async fn on_complete(&self, record: &CompletionRecord);
}

/// Type alias for a shared transport hook.
pub type SharedTransportHook = Arc<dyn TransportHook>;

/// A hook that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpTransportHook;

#[async_trait]
impl TransportHook for NoOpTransportHook {
	async fn on_complete(&self, _record: &CompletionRecord) {}
}
