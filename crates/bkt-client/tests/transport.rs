// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transport contract tests against a local mock service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bkt_client::{
	ApiId, Client, ClientError, CompletionRecord, Event, MetricsErrorKind, Outcome, RequestRecord,
	TransportHook, User,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";

fn client_for(server: &MockServer) -> Client {
	client_with_key(server, API_KEY)
}

fn client_with_key(server: &MockServer, api_key: &str) -> Client {
	Client::builder()
		.host(server.address().to_string())
		.api_key(api_key)
		.scheme("http")
		.build()
		.unwrap()
}

#[tokio::test]
async fn get_evaluation_sends_expected_request() {
	let server = MockServer::start().await;
	let user = User::new("user-1").with_attribute("plan", "pro");

	Mock::given(method("POST"))
		.and(path("/get_evaluation"))
		.and(header("content-type", "application/json"))
		.and(header("authorization", API_KEY))
		.and(body_json(json!({
			"tag": "server",
			"user": {"id": "user-1", "data": {"plan": "pro"}},
			"featureId": "feature.new_flow",
			"sourceId": 6,
		})))
		.respond_with(ResponseTemplate::new(200).set_body_string(r#"{"flag":"on"}"#))
		.expect(1)
		.mount(&server)
		.await;

	let (response, size) = client_for(&server)
		.get_evaluation("server", &user, "feature.new_flow")
		.await
		.unwrap();

	let expected: bkt_client::GetEvaluationResponse =
		serde_json::from_str(r#"{"flag":"on"}"#).unwrap();
	assert_eq!(response, expected);
	assert_eq!(size, 13);
}

#[tokio::test]
async fn get_evaluation_decodes_evaluation() {
	let server = MockServer::start().await;
	let body = json!({
		"evaluation": {
			"featureId": "feature.new_flow",
			"featureVersion": 2,
			"userId": "user-1",
			"variationId": "v-on",
			"variationValue": "true",
			"reason": {"type": "TARGET"}
		}
	});

	Mock::given(method("POST"))
		.and(path("/get_evaluation"))
		.respond_with(ResponseTemplate::new(200).set_body_json(&body))
		.mount(&server)
		.await;

	let (response, size) = client_for(&server)
		.get_evaluation("server", &User::new("user-1"), "feature.new_flow")
		.await
		.unwrap();

	assert_eq!(response.variation_value(), Some("true"));
	assert_eq!(size, serde_json::to_string(&body).unwrap().len() as u64);
}

#[tokio::test]
async fn success_range_never_raises_invalid_status() {
	for status in [200u16, 201, 202, 250, 299] {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/get_evaluation"))
			.respond_with(ResponseTemplate::new(status).set_body_string("{}"))
			.mount(&server)
			.await;

		let result = client_for(&server)
			.get_evaluation("server", &User::new("u"), "f")
			.await;
		assert!(result.is_ok(), "status {status} should succeed: {result:?}");
	}
}

#[tokio::test]
async fn non_success_status_raises_invalid_status_with_code() {
	for status in [300u16, 301, 302, 303, 307, 308, 400, 401, 403, 404, 429, 500, 503] {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/get_evaluation"))
			.respond_with(
				ResponseTemplate::new(status)
					.insert_header("location", "/elsewhere")
					.set_body_string(r#"{"error":"x"}"#),
			)
			.mount(&server)
			.await;
		Mock::given(path("/elsewhere"))
			.respond_with(ResponseTemplate::new(200).set_body_string(r#"{"hijacked":true}"#))
			.expect(0)
			.mount(&server)
			.await;

		let err = client_for(&server)
			.get_evaluation("server", &User::new("u"), "f")
			.await
			.unwrap_err();

		match &err {
			ClientError::InvalidStatus(e) => {
				assert_eq!(e.code, Some(status));
				assert!(e.message.contains(&status.to_string()));
				assert!(e.message.contains("/get_evaluation"));
			}
			other => panic!("status {status}: expected InvalidStatus, got {other:?}"),
		}
		assert_eq!(err.status_code(), Some(status));
	}
}

#[tokio::test]
async fn unauthorized_maps_to_status_401() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/register_events"))
		.respond_with(ResponseTemplate::new(401))
		.mount(&server)
		.await;

	let err = client_for(&server).register_events(&[]).await.unwrap_err();
	assert_eq!(err.status_code(), Some(401));
	assert_eq!(err.to_metrics_error_kind(), MetricsErrorKind::Unauthorized);
}

#[tokio::test]
async fn malformed_json_with_success_status_is_decode_error() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/get_evaluation"))
		.respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
		.mount(&server)
		.await;

	let err = client_for(&server)
		.get_evaluation("server", &User::new("u"), "f")
		.await
		.unwrap_err();
	assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
	assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn empty_event_batch_is_sent() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/register_events"))
		.and(header("authorization", API_KEY))
		.and(body_string(r#"{"events":[]}"#))
		.respond_with(ResponseTemplate::new(200).set_body_string("{}"))
		.expect(1)
		.mount(&server)
		.await;

	let (response, size) = client_for(&server).register_events(&[]).await.unwrap();
	assert!(!response.has_errors());
	assert_eq!(size, 2);
}

#[tokio::test]
async fn register_events_sends_batch_in_order() {
	let server = MockServer::start().await;
	let user = User::new("user-1");
	let events = vec![
		Event::goal("server", "checkout", &user, 1.0),
		Event::default_evaluation("server", &user, "feature.a"),
		Event::size_metrics("server", ApiId::GetEvaluation, 13),
	];
	let expected = json!({ "events": serde_json::to_value(&events).unwrap() });

	Mock::given(method("POST"))
		.and(path("/register_events"))
		.and(header("content-type", "application/json"))
		.and(body_json(&expected))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"errors": { (events[0].id.as_str()): {"retriable": true, "message": "busy"} }
		})))
		.expect(1)
		.mount(&server)
		.await;

	let (response, _) = client_for(&server).register_events(&events).await.unwrap();
	let retriable: Vec<&str> = response.retriable_event_ids().collect();
	assert_eq!(retriable, vec![events[0].id.as_str()]);
}

#[tokio::test]
async fn authorization_is_passed_verbatim_on_both_endpoints() {
	let server = MockServer::start().await;
	let api_key = "Bearer not-a-prefix-we-added";

	Mock::given(method("POST"))
		.and(header("authorization", api_key))
		.respond_with(ResponseTemplate::new(200).set_body_string("{}"))
		.expect(2)
		.mount(&server)
		.await;

	let client = client_with_key(&server, api_key);
	client
		.get_evaluation("server", &User::new("u"), "f")
		.await
		.unwrap();
	client.register_events(&[]).await.unwrap();
}

#[tokio::test]
async fn transport_failure_propagates() {
	// Reserve a port, then close it so nothing is listening.
	let port = std::net::TcpListener::bind("127.0.0.1:0")
		.unwrap()
		.local_addr()
		.unwrap()
		.port();
	let client = Client::builder()
		.host(format!("127.0.0.1:{port}"))
		.api_key(API_KEY)
		.scheme("http")
		.build()
		.unwrap();

	let err = client
		.get_evaluation("server", &User::new("u"), "f")
		.await
		.unwrap_err();
	assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
	assert_eq!(err.to_metrics_error_kind(), MetricsErrorKind::Network);
}

#[tokio::test]
async fn concurrent_calls_share_one_client() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/get_evaluation"))
		.respond_with(ResponseTemplate::new(200).set_body_string(r#"{"a":1}"#))
		.expect(2)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/register_events"))
		.respond_with(ResponseTemplate::new(200).set_body_string("{}"))
		.expect(1)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let user = User::new("u");
	let (a, b, c) = tokio::join!(
		client.get_evaluation("server", &user, "f1"),
		client.get_evaluation("server", &user, "f2"),
		client.register_events(&[]),
	);

	assert_eq!(a.unwrap().1, 7);
	assert_eq!(b.unwrap().1, 7);
	assert_eq!(c.unwrap().1, 2);
}

#[derive(Clone, Default)]
struct RecordingHook {
	requests: Arc<Mutex<Vec<RequestRecord>>>,
	completions: Arc<Mutex<Vec<CompletionRecord>>>,
}

#[async_trait]
impl TransportHook for RecordingHook {
	async fn on_request(&self, record: &RequestRecord) {
		self.requests.lock().unwrap().push(record.clone());
	}

	async fn on_complete(&self, record: &CompletionRecord) {
		self.completions.lock().unwrap().push(record.clone());
	}
}

#[tokio::test]
async fn hook_observes_success_and_failure() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/get_evaluation"))
		.respond_with(ResponseTemplate::new(200).set_body_string(r#"{"flag":"on"}"#))
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/register_events"))
		.respond_with(ResponseTemplate::new(503))
		.mount(&server)
		.await;

	let hook = RecordingHook::default();
	let client = Client::builder()
		.host(server.address().to_string())
		.api_key(API_KEY)
		.scheme("http")
		.hook(hook.clone())
		.build()
		.unwrap();

	client
		.get_evaluation("server", &User::new("u"), "f")
		.await
		.unwrap();
	client.register_events(&[]).await.unwrap_err();

	let requests = hook.requests.lock().unwrap();
	assert_eq!(requests.len(), 2);
	assert_eq!(requests[0].api_id, ApiId::GetEvaluation);
	assert!(requests[0].url.ends_with("/get_evaluation"));
	assert_eq!(requests[1].body_bytes, r#"{"events":[]}"#.len());

	let completions = hook.completions.lock().unwrap();
	assert_eq!(completions.len(), 2);
	assert_eq!(completions[0].outcome, Outcome::Success { size: 13 });
	assert_eq!(completions[0].status, Some(200));
	assert_eq!(
		completions[1].outcome,
		Outcome::InvalidStatus { code: Some(503) }
	);
	assert_eq!(completions[1].status, Some(503));
	assert_eq!(
		completions[1].outcome.metrics_error_kind(),
		Some(MetricsErrorKind::ServiceUnavailable)
	);
	assert_eq!(completions[1].metrics_events("server").len(), 1);
}

#[tokio::test]
async fn hook_distinguishes_decode_and_transport_failures() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/get_evaluation"))
		.respond_with(ResponseTemplate::new(202).set_body_string("{not json"))
		.mount(&server)
		.await;

	let hook = RecordingHook::default();
	let client = Client::builder()
		.host(server.address().to_string())
		.api_key(API_KEY)
		.scheme("http")
		.hook(hook.clone())
		.build()
		.unwrap();

	let err = client
		.get_evaluation("server", &User::new("u"), "f")
		.await
		.unwrap_err();
	assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");

	let port = std::net::TcpListener::bind("127.0.0.1:0")
		.unwrap()
		.local_addr()
		.unwrap()
		.port();
	let unreachable = Client::builder()
		.host(format!("127.0.0.1:{port}"))
		.api_key(API_KEY)
		.scheme("http")
		.hook(hook.clone())
		.build()
		.unwrap();
	unreachable.register_events(&[]).await.unwrap_err();

	let completions = hook.completions.lock().unwrap();
	assert_eq!(completions.len(), 2);

	assert_eq!(completions[0].outcome, Outcome::Decode);
	assert_eq!(completions[0].status, Some(202));
	assert_eq!(
		completions[0].outcome.metrics_error_kind(),
		Some(MetricsErrorKind::InternalSdk)
	);

	assert_eq!(completions[1].outcome, Outcome::Transport { timeout: false });
	assert_eq!(completions[1].status, None);
	assert_eq!(completions[1].api_id, ApiId::RegisterEvents);
}

#[tokio::test]
async fn timeout_is_a_transport_error() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(
			ResponseTemplate::new(200)
				.set_body_string("{}")
				.set_delay(std::time::Duration::from_millis(500)),
		)
		.mount(&server)
		.await;

	let client = Client::builder()
		.host(server.address().to_string())
		.api_key(API_KEY)
		.scheme("http")
		.timeout(std::time::Duration::from_millis(50))
		.build()
		.unwrap();

	let err = client.register_events(&[]).await.unwrap_err();
	assert!(err.is_timeout(), "got {err:?}");
	assert_eq!(err.to_metrics_error_kind(), MetricsErrorKind::Timeout);
}
