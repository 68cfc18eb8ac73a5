// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction for the Bucketeer server SDK.
//!
//! Every request leaving the SDK goes through a [`reqwest::Client`] built
//! here, so the User-Agent header, TLS backend and redirect policy are
//! consistent.

mod client;

pub use client::{builder, builder_with_user_agent, user_agent};
