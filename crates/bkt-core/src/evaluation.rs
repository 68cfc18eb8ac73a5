// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Evaluation results as returned by the service.

use serde::{Deserialize, Serialize};

/// Result of evaluating one feature flag for one user.
///
/// Zero-valued fields may be omitted by the service, so every field
/// defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Evaluation {
	pub id: String,
	pub feature_id: String,
	pub feature_version: i32,
	pub user_id: String,
	pub variation_id: String,
	pub variation_name: String,
	pub variation_value: String,
	pub reason: Reason,
}

/// Why the service picked the variation it returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reason {
	#[serde(rename = "type")]
	pub reason_type: ReasonType,
	#[serde(skip_serializing_if = "String::is_empty")]
	pub rule_id: String,
}

impl Reason {
	pub fn new(reason_type: ReasonType) -> Self {
		Self {
			reason_type,
			rule_id: String::new(),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonType {
	Target,
	Rule,
	#[default]
	Default,
	/// Set by the SDK when it fell back to the caller's default value.
	Client,
	OffVariation,
	Prerequisite,
	/// A reason this SDK version does not know about.
	#[serde(other)]
	Unknown,
}
