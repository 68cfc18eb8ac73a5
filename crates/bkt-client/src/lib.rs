// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bucketeer feature flag server SDK client.
//!
//! The [`Client`] talks to the feature flag service over HTTPS and exposes two
//! operations:
//!
//! - [`Client::get_evaluation`] - evaluate one flag for one user
//!   (`POST /get_evaluation`)
//! - [`Client::register_events`] - submit a batch of analytics events
//!   (`POST /register_events`)
//!
//! Both return the decoded response paired with the response's
//! content-length, which callers use for size metrics. Failures are returned
//! as [`ClientError`]: a decode error, an [`InvalidStatusError`] for any
//! non-2xx status, or the underlying transport error. Nothing is retried.
//!
//! The client logs through `tracing` and stays silent unless the application
//! installs a subscriber. Structured observation is available through a
//! [`TransportHook`].
//!
//! # Example
//!
//! ```ignore
//! use bkt_client::{Client, Event, User};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("api.example.com", "api-key")?;
//!     let user = User::new("user123").with_attribute("plan", "enterprise");
//!
//!     let (response, size) = client.get_evaluation("server", &user, "feature.new_flow").await?;
//!     let enabled = response.variation_value() == Some("true");
//!
//!     let events = vec![Event::size_metrics("server", bkt_client::ApiId::GetEvaluation, size)];
//!     client.register_events(&events).await?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod hook;

pub use client::{Client, ClientBuilder};
pub use error::{ClientError, InvalidStatusError, Result};
pub use hook::{
	CompletionRecord, NoOpTransportHook, Outcome, RequestRecord, SharedTransportHook, TransportHook,
};

// Re-export core types for convenience
pub use bkt_core::{
	ApiId, Evaluation, Event, GetEvaluationResponse, MetricsErrorKind, Reason, ReasonType,
	RegisterEventsResponse, SourceId, User, SDK_SOURCE_ID,
};
