//! Tests for the HTTP client module

use super::*;
use crate::config::ClientConfig;
use crate::context::CallContext;
use crate::error::Error;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(uri: &str) -> ClientConfig {
    ClientConfig::builder()
        .base_url(uri)
        .api_key("test-key")
        .rate_limit(1000.0)
        .max_retries(3)
        .backoff(Duration::from_millis(1), Duration::from_millis(5))
        .build()
}

fn test_client(uri: &str) -> Client {
    Client::new(test_config(uri)).unwrap()
}

fn envelope(code: i64, data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": code, "data": data, "msg": "SUCCESS"}))
}

#[derive(Default)]
struct RecordingObserver {
    calls: Mutex<Vec<(String, i64)>>,
}

impl RateLimitObserver for RecordingObserver {
    fn on_reset_low(&self, path: &str, reset: i64) {
        self.calls.lock().unwrap().push((path.to_string(), reset));
    }
}

#[test]
fn test_client_requires_api_key() {
    let result = Client::new(ClientConfig::default());
    assert!(matches!(result, Err(Error::MissingConfigField { .. })));
}

#[test]
fn test_calculate_backoff() {
    let config = ClientConfig::builder().api_key("k").build();
    let client = Client::new(config).unwrap();

    let expected = [1, 2, 4, 8, 16, 30, 30];
    for (attempt, secs) in (1..=7).zip(expected) {
        assert_eq!(client.calculate_backoff(attempt), Duration::from_secs(secs));
    }
    assert_eq!(client.calculate_backoff(100), Duration::from_secs(30));
}

#[test]
fn test_request_spec_builder() {
    let spec = RequestSpec::get("/api/base/apitools/search")
        .param("words", "rust")
        .optional("cursor", Some(""))
        .optional("type", None)
        .user_token();

    assert_eq!(spec.params.len(), 1);
    assert_eq!(spec.auth, crate::types::AuthMode::UserToken);
}

#[tokio::test]
async fn test_get_injects_api_key_and_accept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/base/apitools/userByScreenNameV2"))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("screenName", "jack"))
        .and(header("accept", "application/json"))
        .respond_with(envelope(1, json!({"id": "12"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let value: Value = client
        .get(
            &CallContext::new(),
            "/api/base/apitools/userByScreenNameV2",
            [("screenName", "jack")],
        )
        .await
        .unwrap();

    assert_eq!(value, json!({"id": "12"}));
}

#[tokio::test]
async fn test_post_sends_form_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/form"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("apiKey=test-key"))
        .and(body_string_contains("words=hello+world"))
        .respond_with(envelope(1, json!(true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let ok: bool = client
        .post(&CallContext::new(), "/api/form", [("words", "hello world")])
        .await
        .unwrap();
    assert!(ok);
}

#[tokio::test]
async fn test_get_raw_returns_body_unchanged() {
    let mock_server = MockServer::start().await;
    let body = r#"{"code":1,"data":"{\"a\":1}","msg":"SUCCESS"}"#;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let bytes = client
        .get_raw(&CallContext::new(), "/raw", Params::new())
        .await
        .unwrap();
    assert_eq!(&bytes[..], body.as_bytes());
}

#[tokio::test]
async fn test_rate_limit_code_retried_until_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(envelope(88, Value::Null))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(envelope(1, json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let value: Value = client
        .get(&CallContext::new(), "/flaky", Params::new())
        .await
        .unwrap();
    assert_eq!(value, json!({"ok": true}));
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        max_retries: 2,
        ..test_config(&mock_server.uri())
    };
    let client = Client::new(config).unwrap();
    let err = client
        .get::<Value, _, _, _>(&CallContext::new(), "/limited", Params::new())
        .await
        .unwrap_err();

    let api = err.as_api().unwrap();
    assert_eq!(api.status, 429);
    assert_eq!(api.message, "Too Many Requests");
}

#[tokio::test]
async fn test_zero_retries_single_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        max_retries: 0,
        ..test_config(&mock_server.uri())
    };
    let client = Client::new(config).unwrap();
    let result = client
        .get_raw(&CallContext::new(), "/locked", Params::new())
        .await;
    assert!(result.unwrap_err().as_api().unwrap().is_forbidden());
}

#[tokio::test]
async fn test_forbidden_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"code": 0, "msg": "locked"})))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(envelope(1, json!("fine")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let value: String = client
        .get(&CallContext::new(), "/locked", Params::new())
        .await
        .unwrap();
    assert_eq!(value, "fine");
}

#[tokio::test]
async fn test_unauthorized_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"code": 88, "message": "bad key"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .get_raw(&CallContext::new(), "/secure", Params::new())
        .await
        .unwrap_err();

    let api = err.as_api().unwrap();
    assert_eq!(api.status, 401);
    assert_eq!(api.code, 88);
    assert_eq!(api.message, "bad key");
}

#[tokio::test]
async fn test_business_failure_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 2, "msg": "invalid user"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .get::<Value, _, _, _>(&CallContext::new(), "/user", Params::new())
        .await
        .unwrap_err();

    let api = err.as_api().unwrap();
    assert_eq!(api.status, 200);
    assert_eq!(api.code, 2);
    assert_eq!(api.message, "invalid user");
}

#[tokio::test]
async fn test_server_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"code": 500, "message": "boom"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .get_raw(&CallContext::new(), "/broken", Params::new())
        .await
        .unwrap_err();
    assert_eq!(err.as_api().unwrap().message, "boom");
}

#[tokio::test]
async fn test_decode_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .get::<Value, _, _, _>(&CallContext::new(), "/html", Params::new())
        .await
        .unwrap_err();

    match err {
        Error::Decode { snippet, .. } => assert!(snippet.contains("not json")),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(envelope(1, json!(1)).set_delay(Duration::from_secs(2)))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(envelope(1, json!(2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        timeout: Duration::from_millis(200),
        ..test_config(&mock_server.uri())
    };
    let client = Client::new(config).unwrap();
    let value: i64 = client
        .get(&CallContext::new(), "/slow", Params::new())
        .await
        .unwrap();
    assert_eq!(value, 2);
}

#[tokio::test]
async fn test_cancel_during_backoff_stops_retrying() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        initial_backoff: Duration::from_secs(10),
        max_backoff: Duration::from_secs(10),
        ..test_config(&mock_server.uri())
    };
    let client = Client::new(config).unwrap();

    let ctx = CallContext::new();
    let handle = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();
    });

    let started = std::time::Instant::now();
    let result = client.get_raw(&ctx, "/limited", Params::new()).await;
    assert!(matches!(result, Err(Error::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_cancelled_context_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(envelope(1, Value::Null))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let ctx = CallContext::new();
    ctx.cancel();

    let result = client.get_raw(&ctx, "/anything", Params::new()).await;
    assert!(matches!(result, Err(Error::Cancelled)));
}

#[tokio::test]
async fn test_user_token_required_before_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(envelope(1, Value::Null))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let spec = RequestSpec::get("/api/base/apitools/homeTimeline").user_token();
    let result = client.request_raw(&CallContext::new(), spec).await;
    assert!(matches!(result, Err(Error::AuthTokenRequired)));
}

#[tokio::test]
async fn test_user_token_injected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("auth_token", "account-token"))
        .and(query_param("ct0", "csrf"))
        .respond_with(envelope(1, json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        auth_token: Some("account-token".to_string()),
        ct0: Some("csrf".to_string()),
        ..test_config(&mock_server.uri())
    };
    let client = Client::new(config).unwrap();
    assert!(client.has_auth_token());

    let spec = RequestSpec::get("/api/base/apitools/homeTimeline").user_token();
    client.request_raw(&CallContext::new(), spec).await.unwrap();
}

#[tokio::test]
async fn test_api_key_mode_omits_account_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(envelope(1, Value::Null))
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        auth_token: Some("account-token".to_string()),
        ..test_config(&mock_server.uri())
    };
    let client = Client::new(config).unwrap();
    client
        .get_raw(&CallContext::new(), "/public", Params::new())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("apiKey=test-key"));
    assert!(!query.contains("auth_token"));
}

#[tokio::test]
async fn test_observer_fires_on_low_reset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/low"))
        .respond_with(envelope(1, Value::Null).insert_header("x-rate-limit-reset", "3"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/high"))
        .respond_with(envelope(1, Value::Null).insert_header("x-rate-limit-reset", "9"))
        .mount(&mock_server)
        .await;

    let observer = Arc::new(RecordingObserver::default());
    let client = Client::with_observer(test_config(&mock_server.uri()), observer.clone()).unwrap();
    let ctx = CallContext::new();

    client.get_raw(&ctx, "/high", Params::new()).await.unwrap();
    client.get_raw(&ctx, "/low", Params::new()).await.unwrap();

    let calls = observer.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![("/low".to_string(), 3)]);
}
