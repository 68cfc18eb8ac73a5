// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Numeric protocol enumerations identifying request origins and APIs.
//!
//! Both enums travel as bare integers on the wire, so they serialize through
//! `i32` rather than by variant name.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Version of this SDK, reported in every event.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server-side origin reported on every request this SDK builds.
pub const SDK_SOURCE_ID: SourceId = SourceId::NodeServer;

/// SDK platform that originated a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum SourceId {
	Unknown,
	Android,
	Ios,
	Web,
	GoalBatch,
	GoServer,
	NodeServer,
	JavaScript,
}

impl From<SourceId> for i32 {
	fn from(id: SourceId) -> Self {
		match id {
			SourceId::Unknown => 0,
			SourceId::Android => 1,
			SourceId::Ios => 2,
			SourceId::Web => 3,
			SourceId::GoalBatch => 4,
			SourceId::GoServer => 5,
			SourceId::NodeServer => 6,
			SourceId::JavaScript => 7,
		}
	}
}

impl TryFrom<i32> for SourceId {
	type Error = CoreError;

	fn try_from(value: i32) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(SourceId::Unknown),
			1 => Ok(SourceId::Android),
			2 => Ok(SourceId::Ios),
			3 => Ok(SourceId::Web),
			4 => Ok(SourceId::GoalBatch),
			5 => Ok(SourceId::GoServer),
			6 => Ok(SourceId::NodeServer),
			7 => Ok(SourceId::JavaScript),
			other => Err(CoreError::UnknownSourceId(other)),
		}
	}
}

/// Service API a metrics event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ApiId {
	UnknownApi,
	GetEvaluation,
	GetEvaluations,
	RegisterEvents,
}

impl From<ApiId> for i32 {
	fn from(id: ApiId) -> Self {
		match id {
			ApiId::UnknownApi => 0,
			ApiId::GetEvaluation => 1,
			ApiId::GetEvaluations => 2,
			ApiId::RegisterEvents => 3,
		}
	}
}

impl TryFrom<i32> for ApiId {
	type Error = CoreError;

	fn try_from(value: i32) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(ApiId::UnknownApi),
			1 => Ok(ApiId::GetEvaluation),
			2 => Ok(ApiId::GetEvaluations),
			3 => Ok(ApiId::RegisterEvents),
			other => Err(CoreError::UnknownApiId(other)),
		}
	}
}
