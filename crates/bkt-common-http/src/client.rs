// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP client with the SDK User-Agent header.

use reqwest::redirect::Policy;
use reqwest::ClientBuilder;
use tracing::debug;

/// Product token sent in the User-Agent header.
const PRODUCT: &str = "bucketeer-rust-server-sdk";

/// Creates a new HTTP client builder with the standard SDK User-Agent header.
///
/// Use this when you need to customize the client (e.g., set timeout).
///
/// # Example
/// ```ignore
/// let client = bkt_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	builder_with_user_agent(user_agent())
}

/// Creates a new HTTP client builder with a custom User-Agent header.
///
/// Redirects are never followed: a 3xx reply is returned to the caller as
/// is, and the request is never replayed against another location.
pub fn builder_with_user_agent(user_agent: impl Into<String>) -> ClientBuilder {
	let user_agent = user_agent.into();
	debug!(user_agent = %user_agent, "Configuring HTTP client");
	reqwest::Client::builder()
		.user_agent(user_agent)
		.redirect(Policy::none())
}

/// Returns the standard SDK User-Agent string.
///
/// Format: `bucketeer-rust-server-sdk/{version}`
pub fn user_agent() -> String {
	format!("{PRODUCT}/{}", env!("CARGO_PKG_VERSION"))
}
