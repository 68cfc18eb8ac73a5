// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Response bodies for the two service endpoints.
//!
//! The client only requires that a response decode. Known fields are typed
//! and default when absent; anything else the service sends is kept in
//! `extra` so no field is lost.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Evaluation;

/// Body returned by `POST /get_evaluation`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetEvaluationResponse {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub evaluation: Option<Evaluation>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl GetEvaluationResponse {
	/// Variation value of the evaluation, if the service returned one.
	pub fn variation_value(&self) -> Option<&str> {
		self
			.evaluation
			.as_ref()
			.map(|e| e.variation_value.as_str())
	}
}

/// Body returned by `POST /register_events`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterEventsResponse {
	/// Per-event failures keyed by event id.
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub errors: HashMap<String, RegisterEventsError>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl RegisterEventsResponse {
	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	/// Ids of events the service asked to be sent again.
	pub fn retriable_event_ids(&self) -> impl Iterator<Item = &str> {
		self
			.errors
			.iter()
			.filter(|(_, e)| e.retriable)
			.map(|(id, _)| id.as_str())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterEventsError {
	pub retriable: bool,
	pub message: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_body_decodes_and_keeps_fields() {
		let body = r#"{"flag":"on"}"#;
		let a: GetEvaluationResponse = serde_json::from_str(body).unwrap();
		let b: GetEvaluationResponse = serde_json::from_str(body).unwrap();

		assert_eq!(a, b);
		assert!(a.evaluation.is_none());
		assert_eq!(a.extra["flag"], "on");
	}

	#[test]
	fn evaluation_response_typed_field() {
		let body = r#"{"evaluation":{"featureId":"f","variationValue":"blue"}}"#;
		let response: GetEvaluationResponse = serde_json::from_str(body).unwrap();
		assert_eq!(response.variation_value(), Some("blue"));
		assert!(response.extra.is_empty());
	}

	#[test]
	fn non_object_body_is_rejected() {
		assert!(serde_json::from_str::<GetEvaluationResponse>("[1,2]").is_err());
		assert!(serde_json::from_str::<RegisterEventsResponse>("\"ok\"").is_err());
	}

	#[test]
	fn mistyped_known_field_is_rejected() {
		let body = r#"{"evaluation":"nope"}"#;
		assert!(serde_json::from_str::<GetEvaluationResponse>(body).is_err());
	}

	#[test]
	fn register_events_errors() {
		let body = r#"{"errors":{
			"a":{"retriable":true,"message":"busy"},
			"b":{"retriable":false,"message":"invalid"}
		}}"#;
		let response: RegisterEventsResponse = serde_json::from_str(body).unwrap();

		assert!(response.has_errors());
		let retriable: Vec<&str> = response.retriable_event_ids().collect();
		assert_eq!(retriable, vec!["a"]);
	}

	#[test]
	fn empty_register_events_response() {
		let response: RegisterEventsResponse = serde_json::from_str("{}").unwrap();
		assert!(!response.has_errors());
		assert_eq!(response, RegisterEventsResponse::default());
	}
}
