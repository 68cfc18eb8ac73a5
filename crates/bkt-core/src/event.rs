// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Analytics events submitted in batches to `/register_events`.
//!
//! An [`Event`] wraps one of three payloads:
//!
//! | Payload | `type` | Records |
//! |---------|--------|---------|
//! | [`GoalEvent`] | 1 | A conversion goal reached by a user |
//! | [`EvaluationEvent`] | 2 | A flag exposure |
//! | [`MetricsEvent`] | 3 | SDK latency, response size or error counts |

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
	ApiId, CoreError, Evaluation, MetricsErrorKind, MetricsEvent, MetricsPayload, Reason,
	ReasonType, SourceId, User, SDK_SOURCE_ID, SDK_VERSION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum EventType {
	Goal,
	Evaluation,
	Metrics,
}

impl From<EventType> for i32 {
	fn from(t: EventType) -> Self {
		match t {
			EventType::Goal => 1,
			EventType::Evaluation => 2,
			EventType::Metrics => 3,
		}
	}
}

impl TryFrom<i32> for EventType {
	type Error = CoreError;

	fn try_from(value: i32) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(EventType::Goal),
			2 => Ok(EventType::Evaluation),
			3 => Ok(EventType::Metrics),
			other => Err(CoreError::UnknownEventType(other)),
		}
	}
}

/// One entry of a `/register_events` batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
	pub id: String,
	pub event: EventPayload,
	#[serde(default)]
	pub environment_namespace: String,
	#[serde(rename = "type")]
	pub event_type: EventType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum EventPayload {
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.GoalEvent")]
	Goal(GoalEvent),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.EvaluationEvent")]
	Evaluation(EvaluationEvent),
	#[serde(rename = "type.googleapis.com/bucketeer.event.client.MetricsEvent")]
	Metrics(MetricsEvent),
}

impl EventPayload {
	pub fn event_type(&self) -> EventType {
		match self {
			EventPayload::Goal(_) => EventType::Goal,
			EventPayload::Evaluation(_) => EventType::Evaluation,
			EventPayload::Metrics(_) => EventType::Metrics,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEvent {
	pub timestamp: i64,
	pub goal_id: String,
	pub user_id: String,
	pub value: f64,
	pub user: User,
	pub tag: String,
	pub source_id: SourceId,
	pub sdk_version: String,
	#[serde(default)]
	pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationEvent {
	pub timestamp: i64,
	pub feature_id: String,
	pub feature_version: i32,
	pub user_id: String,
	pub variation_id: String,
	pub user: User,
	pub reason: Reason,
	pub tag: String,
	pub source_id: SourceId,
	pub sdk_version: String,
	#[serde(default)]
	pub metadata: HashMap<String, String>,
}

impl Event {
	/// Wraps a payload with a fresh id and the matching event type.
	pub fn new(payload: EventPayload) -> Self {
		Self {
			id: Uuid::new_v4().to_string(),
			event_type: payload.event_type(),
			event: payload,
			environment_namespace: String::new(),
		}
	}

	pub fn with_environment_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.environment_namespace = namespace.into();
		self
	}

	/// A user reached the goal `goal_id`, optionally carrying a numeric value.
	pub fn goal(tag: &str, goal_id: &str, user: &User, value: f64) -> Self {
		Self::new(EventPayload::Goal(GoalEvent {
			timestamp: Utc::now().timestamp(),
			goal_id: goal_id.to_string(),
			user_id: user.id.clone(),
			value,
			user: user.clone(),
			tag: tag.to_string(),
			source_id: SDK_SOURCE_ID,
			sdk_version: SDK_VERSION.to_string(),
			metadata: HashMap::new(),
		}))
	}

	/// A user was exposed to the variation in `evaluation`.
	pub fn evaluation(tag: &str, user: &User, evaluation: &Evaluation) -> Self {
		Self::new(EventPayload::Evaluation(EvaluationEvent {
			timestamp: Utc::now().timestamp(),
			feature_id: evaluation.feature_id.clone(),
			feature_version: evaluation.feature_version,
			user_id: user.id.clone(),
			variation_id: evaluation.variation_id.clone(),
			user: user.clone(),
			reason: evaluation.reason.clone(),
			tag: tag.to_string(),
			source_id: SDK_SOURCE_ID,
			sdk_version: SDK_VERSION.to_string(),
			metadata: HashMap::new(),
		}))
	}

	/// A user was served the caller's default value because no evaluation
	/// was available.
	pub fn default_evaluation(tag: &str, user: &User, feature_id: &str) -> Self {
		let evaluation = Evaluation {
			feature_id: feature_id.to_string(),
			reason: Reason::new(ReasonType::Client),
			..Evaluation::default()
		};
		Self::evaluation(tag, user, &evaluation)
	}

	pub fn latency_metrics(tag: &str, api_id: ApiId, latency: Duration) -> Self {
		Self::metrics(MetricsPayload::latency(api_id, tag, latency))
	}

	pub fn size_metrics(tag: &str, api_id: ApiId, size_byte: u64) -> Self {
		Self::metrics(MetricsPayload::size(api_id, tag, size_byte))
	}

	pub fn error_metrics(tag: &str, api_id: ApiId, kind: MetricsErrorKind) -> Self {
		Self::metrics(kind.into_payload(api_id, tag))
	}

	fn metrics(payload: MetricsPayload) -> Self {
		Self::new(EventPayload::Metrics(MetricsEvent::new(payload)))
	}
}
