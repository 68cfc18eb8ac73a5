// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The user a flag is evaluated for.
///
/// `data` carries free-form attributes used by targeting rules on the
/// service side. Nothing here is validated locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: String,
	#[serde(default)]
	pub data: HashMap<String, String>,
}

impl User {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			data: HashMap::new(),
		}
	}

	/// Adds a targeting attribute.
	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.data.insert(key.into(), value.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serializes_id_and_data() {
		let user = User::new("user-1").with_attribute("plan", "pro");
		let json = serde_json::to_value(&user).unwrap();
		assert_eq!(json["id"], "user-1");
		assert_eq!(json["data"]["plan"], "pro");
	}

	#[test]
	fn missing_data_defaults_to_empty() {
		let user: User = serde_json::from_str(r#"{"id":"u"}"#).unwrap();
		assert_eq!(user, User::new("u"));
	}
}
