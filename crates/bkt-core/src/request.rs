// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request bodies for the two service endpoints.
//!
//! Requests borrow the caller's values, so building and serializing one
//! never touches the caller's `User` or event list.

use serde::Serialize;

use crate::{Event, SourceId, User, SDK_SOURCE_ID};

/// Body of `POST /get_evaluation`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEvaluationRequest<'a> {
	tag: &'a str,
	user: &'a User,
	feature_id: &'a str,
	source_id: SourceId,
}

impl<'a> GetEvaluationRequest<'a> {
	/// Builds an evaluation request. The source id is always
	/// [`SDK_SOURCE_ID`].
	pub fn new(tag: &'a str, user: &'a User, feature_id: &'a str) -> Self {
		Self {
			tag,
			user,
			feature_id,
			source_id: SDK_SOURCE_ID,
		}
	}

	pub fn tag(&self) -> &str {
		self.tag
	}

	pub fn user(&self) -> &User {
		self.user
	}

	pub fn feature_id(&self) -> &str {
		self.feature_id
	}

	pub fn source_id(&self) -> SourceId {
		self.source_id
	}
}

/// Body of `POST /register_events`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterEventsRequest<'a> {
	events: &'a [Event],
}

impl<'a> RegisterEventsRequest<'a> {
	pub fn new(events: &'a [Event]) -> Self {
		Self { events }
	}

	pub fn events(&self) -> &[Event] {
		self.events
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn evaluation_request_wire_shape() {
		let user = User::new("user-1").with_attribute("plan", "pro");
		let request = GetEvaluationRequest::new("server", &user, "feature.a");
		let json = serde_json::to_value(&request).unwrap();

		assert_eq!(
			json,
			json!({
				"tag": "server",
				"user": {"id": "user-1", "data": {"plan": "pro"}},
				"featureId": "feature.a",
				"sourceId": 6,
			})
		);
	}

	#[test]
	fn empty_event_batch_serializes() {
		let request = RegisterEventsRequest::new(&[]);
		assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"events":[]}"#);
	}

	#[test]
	fn event_batch_keeps_order() {
		let user = User::new("u");
		let events = vec![
			Event::goal("t", "first", &user, 0.0),
			Event::goal("t", "second", &user, 0.0),
		];
		let json = serde_json::to_value(RegisterEventsRequest::new(&events)).unwrap();
		assert_eq!(json["events"][0]["id"], events[0].id.as_str());
		assert_eq!(json["events"][1]["id"], events[1].id.as_str());
	}
}
