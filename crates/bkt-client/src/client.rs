// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the Bucketeer evaluation and event APIs.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bkt_core::{
	ApiId, Event, GetEvaluationRequest, GetEvaluationResponse, RegisterEventsRequest,
	RegisterEventsResponse, User,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, instrument, trace, warn};

use crate::error::{ClientError, InvalidStatusError, Result};
use crate::hook::{
	CompletionRecord, NoOpTransportHook, Outcome, RequestRecord, SharedTransportHook,
	TransportHook,
};

const DEFAULT_SCHEME: &str = "https";
const EVALUATION_API: &str = "/get_evaluation";
const EVENTS_API: &str = "/register_events";

/// Client for the two remote operations of the feature flag service.
///
/// Host and API key are fixed at construction. Cloning is cheap and clones
/// share the underlying connection pool; concurrent calls share no mutable
/// state.
#[derive(Clone)]
pub struct Client {
	http_client: reqwest::Client,
	scheme: String,
	host: String,
	authorization: HeaderValue,
	hook: SharedTransportHook,
}

impl fmt::Debug for Client {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Client")
			.field("scheme", &self.scheme)
			.field("host", &self.host)
			.field("api_key", &"[REDACTED]")
			.finish_non_exhaustive()
	}
}

impl Client {
	/// Creates a client with the default HTTPS transport.
	pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
		Self::builder().host(host).api_key(api_key).build()
	}

	pub fn builder() -> ClientBuilder {
		ClientBuilder::default()
	}

	pub fn host(&self) -> &str {
		&self.host
	}

	/// Evaluates `feature_id` for `user` in the environment selected by `tag`.
	///
	/// Returns the decoded response together with the response's
	/// content-length (0 when the header is absent).
	#[instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn get_evaluation(
		&self,
		tag: &str,
		user: &User,
		feature_id: &str,
	) -> Result<(GetEvaluationResponse, u64)> {
		let request = GetEvaluationRequest::new(tag, user, feature_id);
		self.call(ApiId::GetEvaluation, EVALUATION_API, &request).await
	}

	/// Submits a batch of events. An empty batch is sent as-is.
	#[instrument(skip(self, events), fields(count = events.len()))]
	pub async fn register_events(&self, events: &[Event]) -> Result<(RegisterEventsResponse, u64)> {
		let request = RegisterEventsRequest::new(events);
		self.call(ApiId::RegisterEvents, EVENTS_API, &request).await
	}

	async fn call<Req, Resp>(&self, api_id: ApiId, path: &str, request: &Req) -> Result<(Resp, u64)>
	where
		Req: Serialize,
		Resp: DeserializeOwned,
	{
		let payload = serde_json::to_string(request).map_err(ClientError::Serialize)?;
		let url = self.url(path);

		self
			.hook
			.on_request(&RequestRecord {
				api_id,
				url: url.clone(),
				body_bytes: payload.len(),
			})
			.await;

		let started = Instant::now();
		let (status, result) = match self.post_request(&url, payload).await {
			Ok(raw) => (
				Some(raw.status),
				decode::<Resp>(&raw.body).map(|response| (response, raw.size)),
			),
			Err(e) => (e.status_code(), Err(e)),
		};

		self
			.hook
			.on_complete(&CompletionRecord {
				api_id,
				url,
				status,
				latency: started.elapsed(),
				outcome: Outcome::from_result(&result),
			})
			.await;

		result
	}

	/// Performs one authenticated JSON POST and returns the body text with
	/// the reported content-length.
	#[instrument(skip(self, payload))]
	async fn post_request(&self, url: &str, payload: String) -> Result<RawResponse> {
		debug!(bytes = payload.len(), "Sending request");
		trace!(payload = %payload, "Request body");

		let response = self
			.http_client
			.post(url)
			.header(CONTENT_TYPE, "application/json")
			.header(AUTHORIZATION, self.authorization.clone())
			.body(payload)
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "Network error during request");
				ClientError::Transport(e)
			})?;

		let status = response.status();
		debug!(status = %status, "Received response");

		if !status.is_success() {
			let code = status.as_u16();
			error!(status = code, "Service returned non-success status");
			return Err(
				InvalidStatusError::new(
					format!("bucketeer/api: send HTTP request failed: {code} ({url})"),
					Some(code),
				)
				.into(),
			);
		}

		let size = content_length(response.headers());
		let body = response.text().await.map_err(|e| {
			error!(error = %e, "Failed to read response body");
			ClientError::Transport(e)
		})?;

		trace!(body = %body, size, "Response body");
		Ok(RawResponse {
			status: status.as_u16(),
			body,
			size,
		})
	}

	fn url(&self, path: &str) -> String {
		format!("{}://{}{}", self.scheme, self.host, path)
	}
}

/// A 2xx response read in full, not yet decoded.
struct RawResponse {
	status: u16,
	body: String,
	size: u64,
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
	serde_json::from_str(body).map_err(|e| {
		error!(error = %e, "Failed to parse response");
		ClientError::Decode(e)
	})
}

/// Numeric value of the content-length header, 0 when missing or not a
/// number.
fn content_length(headers: &HeaderMap) -> u64 {
	headers
		.get(CONTENT_LENGTH)
		.and_then(|v| v.to_str().ok())
		.and_then(|v| v.trim().parse().ok())
		.unwrap_or(0)
}

/// Builder for [`Client`].
///
/// Only `host` and `api_key` are required.
#[derive(Default)]
pub struct ClientBuilder {
	host: Option<String>,
	api_key: Option<String>,
	scheme: Option<String>,
	timeout: Option<Duration>,
	user_agent: Option<String>,
	http_client: Option<reqwest::Client>,
	hook: Option<SharedTransportHook>,
}

impl ClientBuilder {
	/// Service authority, e.g. `api.example.com` or `api.example.com:8443`.
	pub fn host(mut self, host: impl Into<String>) -> Self {
		self.host = Some(host.into());
		self
	}

	/// Credential sent verbatim in the `authorization` header.
	pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = Some(api_key.into());
		self
	}

	/// URL scheme, `https` by default. `http` exists for local test servers.
	pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
		self.scheme = Some(scheme.into());
		self
	}

	/// Whole-request timeout enforced by the transport. Unset by default.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());
		self
	}

	/// Uses a pre-built HTTP client. `timeout` and `user_agent` are then
	/// ignored, and the client keeps its own redirect policy. Clients from
	/// [`bkt_common_http::builder`] never follow redirects, so a 3xx reply
	/// surfaces as [`ClientError::InvalidStatus`]; a client that follows
	/// them may replay the request elsewhere.
	pub fn http_client(mut self, client: reqwest::Client) -> Self {
		self.http_client = Some(client);
		self
	}

	pub fn hook(self, hook: impl TransportHook) -> Self {
		self.shared_hook(Arc::new(hook))
	}

	pub fn shared_hook(mut self, hook: SharedTransportHook) -> Self {
		self.hook = Some(hook);
		self
	}

	pub fn build(self) -> Result<Client> {
		let host = self
			.host
			.map(|h| h.trim().to_string())
			.filter(|h| !h.is_empty())
			.ok_or_else(|| ClientError::Configuration("host is required".to_string()))?;
		if host.contains("://") {
			return Err(ClientError::Configuration(format!(
				"host must not include a scheme: {host}"
			)));
		}

		let api_key = self
			.api_key
			.filter(|k| !k.is_empty())
			.ok_or_else(|| ClientError::Configuration("api key is required".to_string()))?;
		let mut authorization = HeaderValue::from_str(&api_key).map_err(|_| {
			ClientError::Configuration("api key is not a valid header value".to_string())
		})?;
		authorization.set_sensitive(true);

		let scheme = self.scheme.unwrap_or_else(|| DEFAULT_SCHEME.to_string());
		if scheme != "https" && scheme != "http" {
			return Err(ClientError::Configuration(format!(
				"unsupported scheme: {scheme}"
			)));
		}
		validate_host(&scheme, &host)?;
		if scheme == "http" {
			warn!(host = %host, "Client configured without TLS");
		}

		let http_client = match self.http_client {
			Some(client) => {
				if self.timeout.is_some() || self.user_agent.is_some() {
					warn!("timeout and user_agent are ignored with a custom HTTP client");
				}
				client
			}
			None => {
				let mut builder = match self.user_agent {
					Some(ua) => bkt_common_http::builder_with_user_agent(ua),
					None => bkt_common_http::builder(),
				};
				if let Some(timeout) = self.timeout {
					builder = builder.timeout(timeout);
				}
				builder.build()?
			}
		};

		debug!(host = %host, scheme = %scheme, "Built client");

		Ok(Client {
			http_client,
			scheme,
			host,
			authorization,
			hook: self.hook.unwrap_or_else(|| Arc::new(NoOpTransportHook)),
		})
	}
}

/// Checks that `host` is a bare authority: no path, query or credentials.
fn validate_host(scheme: &str, host: &str) -> Result<()> {
	let url = Url::parse(&format!("{scheme}://{host}"))
		.map_err(|e| ClientError::Configuration(format!("invalid host {host:?}: {e}")))?;
	if url.path() != "/"
		|| url.query().is_some()
		|| url.fragment().is_some()
		|| !url.username().is_empty()
		|| url.password().is_some()
	{
		return Err(ClientError::Configuration(format!(
			"host must be a bare authority: {host}"
		)));
	}
	Ok(())
}
