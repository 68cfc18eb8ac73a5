// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SDK health metrics reported to the service as events.
//!
//! Callers record latency and response size for each API call (the size is
//! the value returned alongside every decoded response) and classify failed
//! calls with [`MetricsErrorKind`].
//!
//! Each payload is tagged on the wire with its protobuf type URL under the
//! `@type` key.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{ApiId, SourceId, SDK_SOURCE_ID, SDK_VERSION};

/// Envelope for a single metrics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsEvent {
	pub timestamp: i64,
	pub event: MetricsPayload,
	pub sdk_version: String,
	pub source_id: SourceId,
	#[serde(default)]
	pub metadata: HashMap<String, String>,
}

impl MetricsEvent {
	pub fn new(event: MetricsPayload) -> Self {
		Self {
			timestamp: Utc::now().timestamp(),
			event,
			sdk_version: SDK_VERSION.to_string(),
			source_id: SDK_SOURCE_ID,
			metadata: HashMap::new(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum MetricsPayload {
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.LatencyMetricsEvent")]
	Latency(LatencyMetrics),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.SizeMetricsEvent")]
	Size(SizeMetrics),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.BadRequestErrorMetricsEvent")]
	BadRequestError(ErrorMetrics),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.UnauthorizedErrorMetricsEvent")]
	UnauthorizedError(ErrorMetrics),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.ForbiddenErrorMetricsEvent")]
	ForbiddenError(ErrorMetrics),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.NotFoundErrorMetricsEvent")]
	NotFoundError(ErrorMetrics),
	#[serde(
		rename = "type.googleapis.com/bucketeer.event.client.ClientClosedRequestErrorMetricsEvent"
	)]
	ClientClosedRequestError(ErrorMetrics),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.InternalServerErrorMetricsEvent")]
	InternalServerError(ErrorMetrics),
	#[serde(
		rename = "type.googleapis.com/bucketeer.event.client.ServiceUnavailableErrorMetricsEvent"
	)]
	ServiceUnavailableError(ErrorMetrics),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.TimeoutErrorMetricsEvent")]
	TimeoutError(ErrorMetrics),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.NetworkErrorMetricsEvent")]
	NetworkError(ErrorMetrics),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.InternalSdkErrorMetricsEvent")]
	InternalSdkError(ErrorMetrics),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.UnknownErrorMetricsEvent")]
	UnknownError(UnknownErrorMetrics),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencyMetrics {
	pub api_id: ApiId,
	pub labels: HashMap<String, String>,
	pub latency_second: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeMetrics {
	pub api_id: ApiId,
	pub labels: HashMap<String, String>,
	pub size_byte: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMetrics {
	pub api_id: ApiId,
	pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownErrorMetrics {
	pub api_id: ApiId,
	pub labels: HashMap<String, String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status_code: Option<u16>,
}

/// Classification of a failed API call for error metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsErrorKind {
	BadRequest,
	Unauthorized,
	Forbidden,
	NotFound,
	ClientClosedRequest,
	InternalServerError,
	ServiceUnavailable,
	Timeout,
	Network,
	InternalSdk,
	Unknown { status_code: Option<u16> },
}

impl MetricsErrorKind {
	/// Classifies a non-success HTTP status.
	pub fn from_status(status: u16) -> Self {
		match status {
			400 => MetricsErrorKind::BadRequest,
			401 => MetricsErrorKind::Unauthorized,
			403 => MetricsErrorKind::Forbidden,
			404 => MetricsErrorKind::NotFound,
			499 => MetricsErrorKind::ClientClosedRequest,
			500 => MetricsErrorKind::InternalServerError,
			503 => MetricsErrorKind::ServiceUnavailable,
			other => MetricsErrorKind::Unknown {
				status_code: Some(other),
			},
		}
	}

	pub fn into_payload(self, api_id: ApiId, tag: &str) -> MetricsPayload {
		let base = ErrorMetrics {
			api_id,
			labels: tag_labels(tag),
		};
		match self {
			MetricsErrorKind::BadRequest => MetricsPayload::BadRequestError(base),
			MetricsErrorKind::Unauthorized => MetricsPayload::UnauthorizedError(base),
			MetricsErrorKind::Forbidden => MetricsPayload::ForbiddenError(base),
			MetricsErrorKind::NotFound => MetricsPayload::NotFoundError(base),
			MetricsErrorKind::ClientClosedRequest => MetricsPayload::ClientClosedRequestError(base),
			MetricsErrorKind::InternalServerError => MetricsPayload::InternalServerError(base),
			MetricsErrorKind::ServiceUnavailable => MetricsPayload::ServiceUnavailableError(base),
			MetricsErrorKind::Timeout => MetricsPayload::TimeoutError(base),
			MetricsErrorKind::Network => MetricsPayload::NetworkError(base),
			MetricsErrorKind::InternalSdk => MetricsPayload::InternalSdkError(base),
			MetricsErrorKind::Unknown { status_code } => {
				MetricsPayload::UnknownError(UnknownErrorMetrics {
					api_id: base.api_id,
					labels: base.labels,
					status_code,
				})
			}
		}
	}
}

impl MetricsPayload {
	pub fn latency(api_id: ApiId, tag: &str, latency: Duration) -> Self {
		MetricsPayload::Latency(LatencyMetrics {
			api_id,
			labels: tag_labels(tag),
			latency_second: latency.as_secs_f64(),
		})
	}

	pub fn size(api_id: ApiId, tag: &str, size_byte: u64) -> Self {
		MetricsPayload::Size(SizeMetrics {
			api_id,
			labels: tag_labels(tag),
			size_byte,
		})
	}
}

fn tag_labels(tag: &str) -> HashMap<String, String> {
	HashMap::from([("tag".to_string(), tag.to_string())])
}
