// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors raised while decoding wire enumerations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
	#[error("unknown source id: {0}")]
	UnknownSourceId(i32),

	#[error("unknown api id: {0}")]
	UnknownApiId(i32),

	#[error("unknown event type: {0}")]
	UnknownEventType(i32),
}
