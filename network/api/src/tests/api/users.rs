use hyper::{Method, StatusCode};
use serde_json::json;

use super::{create_user, request, send, token_for, PASSWORD};
use crate::api;
use crate::config::AppConfig;
use crate::database::Store;
use crate::tests::global::mock_global_state;

#[tokio::test]
async fn test_register_round_trip() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let (status, body) = send(
		&router,
		request(
			Method::POST,
			"/v1/users/register",
			None,
			Some(json!({
				"username": "Alice",
				"password": PASSWORD,
				"email": "alice@example.com",
			})),
		),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["username"], "Alice");
	assert_eq!(body["email"], "alice@example.com");
	assert!(body.get("password").is_none());
	assert!(body.get("password_hash").is_none());

	let id = body["id"].as_i64().unwrap();
	let (status, fetched) = send(&router, request(Method::GET, &format!("/v1/users/{id}"), None, None)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(fetched, body);

	let user = global.store.user_by_username("Alice").await.unwrap().unwrap();
	assert!(user.verify_password(PASSWORD));
	assert!(!user.verify_password("wrong"));
	assert!(global.store.user_by_username("alice").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_validation() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let (status, body) = send(&router, request(Method::POST, "/v1/users/register", None, None)).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(
		body,
		json!({
			"password": ["This field is required."],
			"username": ["This field is required."],
		})
	);

	let (status, body) = send(
		&router,
		request(
			Method::POST,
			"/v1/users/register",
			None,
			Some(json!({ "username": "a b", "password": "weak" })),
		),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert!(body["username"].is_array());
	assert!(body["password"].is_array());
}

#[tokio::test]
async fn test_register_malformed_json() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let req = hyper::Request::builder()
		.method(Method::POST)
		.uri("/v1/users/register")
		.body({
			use http_body_util::BodyExt;
			http_body_util::Full::new(bytes::Bytes::from_static(b"{not json"))
				.map_err(|never| match never {})
				.boxed_unsync()
		})
		.unwrap();

	let (status, _) = send(&router, req).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_username() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	create_user(&global, "bob").await;

	let (status, body) = send(
		&router,
		request(
			Method::POST,
			"/v1/users/register",
			None,
			Some(json!({ "username": "bob", "password": PASSWORD })),
		),
	)
	.await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "username": ["A user with that username already exists."] }));

	// Usernames are case sensitive.
	let (status, body) = send(
		&router,
		request(
			Method::POST,
			"/v1/users/register",
			None,
			Some(json!({ "username": "Bob", "password": PASSWORD })),
		),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["username"], "Bob");
}

#[tokio::test]
async fn test_me() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let (status, _) = send(&router, request(Method::GET, "/v1/users/me", None, None)).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);

	let user = create_user(&global, "carol").await;
	let token = token_for(&global, &user);

	let (status, body) = send(&router, request(Method::GET, "/v1/users/me", Some(&token), None)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["id"], user.id);
	assert_eq!(body["username"], "carol");
}

#[tokio::test]
async fn test_get_unknown_user() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let (status, body) = send(&router, request(Method::GET, "/v1/users/42", None, None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({ "message": "user not found", "success": false }));

	let (status, _) = send(&router, request(Method::GET, "/v1/users/abc", None, None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
}
