// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the client.

use bkt_core::MetricsErrorKind;
use thiserror::Error;

/// Errors returned by [`Client`](crate::Client) operations.
///
/// No variant is recovered inside the client; every failure reaches the
/// caller, who decides whether to fall back to a default flag value.
#[derive(Debug, Error)]
pub enum ClientError {
	/// The service answered with a success status but the body did not
	/// decode into the expected response.
	#[error("failed to decode response: {0}")]
	Decode(#[source] serde_json::Error),

	/// The service answered with a non-success status.
	#[error(transparent)]
	InvalidStatus(#[from] InvalidStatusError),

	/// The request could not be completed (DNS, TLS, connection, timeout).
	#[error("HTTP request failed: {0}")]
	Transport(#[from] reqwest::Error),

	/// The request body could not be encoded.
	#[error("failed to encode request: {0}")]
	Serialize(#[source] serde_json::Error),

	/// The client was built with invalid settings.
	#[error("configuration error: {0}")]
	Configuration(String),
}

/// Non-success HTTP status returned by the service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct InvalidStatusError {
	pub message: String,
	pub code: Option<u16>,
}

impl InvalidStatusError {
	pub fn new(message: impl Into<String>, code: Option<u16>) -> Self {
		Self {
			message: message.into(),
			code,
		}
	}
}

impl ClientError {
	/// HTTP status of an [`ClientError::InvalidStatus`] failure.
	pub fn status_code(&self) -> Option<u16> {
		match self {
			ClientError::InvalidStatus(e) => e.code,
			_ => None,
		}
	}

	pub fn is_timeout(&self) -> bool {
		matches!(self, ClientError::Transport(e) if e.is_timeout())
	}

	/// Classifies this failure for an error metrics event.
	pub fn to_metrics_error_kind(&self) -> MetricsErrorKind {
		match self {
			ClientError::InvalidStatus(e) => match e.code {
				Some(code) => MetricsErrorKind::from_status(code),
				None => MetricsErrorKind::Unknown { status_code: None },
			},
			ClientError::Transport(e) if e.is_timeout() => MetricsErrorKind::Timeout,
			ClientError::Transport(e) => match e.status() {
				Some(status) => MetricsErrorKind::from_status(status.as_u16()),
				None => MetricsErrorKind::Network,
			},
			ClientError::Decode(_) | ClientError::Serialize(_) | ClientError::Configuration(_) => {
				MetricsErrorKind::InternalSdk
			}
		}
	}
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
