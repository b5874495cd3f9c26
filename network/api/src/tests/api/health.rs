use hyper::{header, Method, StatusCode};
use serde_json::json;

use super::{request, send};
use crate::api;
use crate::config::AppConfig;
use crate::tests::global::mock_global_state;

#[tokio::test]
async fn test_health() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let res = router.handle(request(Method::GET, "/v1/health", None, None)).await.unwrap();

	assert_eq!(res.status(), StatusCode::OK);
	assert_eq!(
		res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
		Some("*")
	);

	let (status, body) = send(&router, request(Method::GET, "/v1/health", None, None)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_not_found() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let (status, body) = send(&router, request(Method::GET, "/v1/nothing/here", None, None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({ "error": "not_found" }));

	let (status, _) = send(&router, request(Method::PUT, "/v1/likes", None, None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preflight() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let res = router.handle(request(Method::OPTIONS, "/v1/likes", None, None)).await.unwrap();

	assert_eq!(res.status(), StatusCode::NO_CONTENT);
	assert_eq!(
		res.headers()
			.get(header::ACCESS_CONTROL_ALLOW_METHODS)
			.and_then(|v| v.to_str().ok()),
		Some("GET, POST, DELETE, OPTIONS")
	);
}

#[tokio::test]
async fn test_cors_headers_on_auth_errors() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	// Rejected by the auth middleware before any route runs.
	let res = router
		.handle(request(Method::GET, "/v1/health", Some("garbage"), None))
		.await
		.unwrap();

	assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(
		res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
		Some("*")
	);

	// Rejected by the route itself.
	let res = router.handle(request(Method::GET, "/v1/users/me", None, None)).await.unwrap();

	assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(
		res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
		Some("*")
	);
}
