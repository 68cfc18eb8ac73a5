// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire types for the Bucketeer feature flag service.
//!
//! This crate holds the value objects exchanged with the service: the user
//! being evaluated, analytics events, and the request and response bodies of
//! the `/get_evaluation` and `/register_events` endpoints. It performs no I/O;
//! the transport lives in `bkt-client`.
//!
//! # Example
//!
//! ```
//! use bkt_core::{Event, GetEvaluationRequest, User, SDK_SOURCE_ID};
//!
//! let user = User::new("user-1").with_attribute("plan", "enterprise");
//! let request = GetEvaluationRequest::new("server", &user, "feature.new_flow");
//! assert_eq!(request.source_id(), SDK_SOURCE_ID);
//!
//! let goal = Event::goal("server", "checkout", &user, 1.0);
//! let json = serde_json::to_value(&goal).unwrap();
//! assert_eq!(json["type"], 1);
//! ```

pub mod error;
pub mod evaluation;
pub mod event;
pub mod metrics;
pub mod request;
pub mod response;
pub mod source;
pub mod user;

pub use error::CoreError;
pub use evaluation::{Evaluation, Reason, ReasonType};
pub use event::{EvaluationEvent, Event, EventPayload, EventType, GoalEvent};
pub use metrics::{ErrorMetrics, MetricsErrorKind, MetricsEvent, MetricsPayload};
pub use request::{GetEvaluationRequest, RegisterEventsRequest};
pub use response::{GetEvaluationResponse, RegisterEventsError, RegisterEventsResponse};
pub use source::{ApiId, SourceId, SDK_SOURCE_ID, SDK_VERSION};
pub use user::User;
