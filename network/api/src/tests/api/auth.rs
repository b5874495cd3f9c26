use chrono::{Duration, Utc};
use hyper::{header, Method, StatusCode};
use serde_json::json;

use super::{create_user, request, send, PASSWORD};
use crate::api;
use crate::api::jwt::{AuthJwtPayload, JwtState};
use crate::config::{AppConfig, JwtConfig};
use crate::tests::global::mock_global_state;

#[tokio::test]
async fn test_issue_token() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let user = create_user(&global, "Dave").await;

	let (status, body) = send(
		&router,
		request(
			Method::POST,
			"/v1/auth/token",
			None,
			Some(json!({ "username": "Dave", "password": PASSWORD })),
		),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert!(body["expires_at"].is_string());

	let token = body["access"].as_str().unwrap();
	let payload = AuthJwtPayload::verify(&global.config.jwt, token).unwrap();
	assert_eq!(payload.user_id, user.id);

	let (status, me) = send(&router, request(Method::GET, "/v1/users/me", Some(token), None)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(me["username"], "Dave");
}

#[tokio::test]
async fn test_issue_token_bad_credentials() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	create_user(&global, "erin").await;

	for body in [
		json!({ "username": "erin", "password": "Wrong-passw0rd" }),
		json!({ "username": "nobody", "password": PASSWORD }),
		json!({ "username": "Erin", "password": PASSWORD }),
	] {
		let (status, body) = send(&router, request(Method::POST, "/v1/auth/token", None, Some(body))).await;
		assert_eq!(status, StatusCode::UNAUTHORIZED);
		assert_eq!(body, json!({ "message": "invalid username or password", "success": false }));
	}

	let (status, body) = send(
		&router,
		request(Method::POST, "/v1/auth/token", None, Some(json!({ "username": "erin" }))),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "password": ["This field is required."] }));
}

#[tokio::test]
async fn test_rejected_tokens() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let user = create_user(&global, "frank").await;

	let expired = AuthJwtPayload {
		user_id: user.id,
		expiration: Some(Utc::now() - Duration::minutes(5)),
		issued_at: Utc::now() - Duration::hours(1),
		not_before: None,
		audience: None,
	}
	.serialize(&global.config.jwt)
	.unwrap();

	let other_issuer = AuthJwtPayload::new(user.id, &global.config.jwt)
		.serialize(&JwtConfig {
			issuer: "someone-else".to_string(),
			..global.config.jwt.clone()
		})
		.unwrap();

	for token in [expired.as_str(), other_issuer.as_str(), "garbage"] {
		let (status, body) = send(&router, request(Method::GET, "/v1/health", Some(token), None)).await;
		assert_eq!(status, StatusCode::UNAUTHORIZED);
		assert_eq!(body, json!({ "message": "invalid token", "success": false }));
	}

	let req = hyper::Request::builder()
		.method(Method::GET)
		.uri("/v1/health")
		.header(header::AUTHORIZATION, "Basic Zm9vOmJhcg==")
		.body(request(Method::GET, "/", None, None).into_body())
		.unwrap();

	let (status, body) = send(&router, req).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body, json!({ "message": "token must be a bearer token", "success": false }));
}

#[test]
fn test_token_signed_with_other_secret() {
	let config = JwtConfig::default();
	let token = AuthJwtPayload::new(7, &config).serialize(&config).unwrap();

	let rotated = JwtConfig {
		secret: "rotated".to_string(),
		..config.clone()
	};

	assert!(AuthJwtPayload::verify(&config, &token).is_some());
	assert!(AuthJwtPayload::verify(&rotated, &token).is_none());
}
