use hyper::{Method, StatusCode};
use serde_json::json;

use super::{create_user, request, send, token_for};
use crate::api;
use crate::config::AppConfig;
use crate::database::Store;
use crate::tests::global::mock_global_state;

#[tokio::test]
async fn test_like_eval_is_case_insensitive() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let user = create_user(&global, "liker").await;
	let token = token_for(&global, &user);
	let post = global.store.create_post(user.id, "post").await.unwrap();

	for (eval, expected) in [("like", true), ("LIKE", true), ("Dislike", false), ("dislike", false)] {
		let (status, body) = send(
			&router,
			request(
				Method::POST,
				"/v1/likes",
				Some(&token),
				Some(json!({ "message_id": post.id, "eval": eval })),
			),
		)
		.await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["eval"], expected);
		assert_eq!(body["user"], user.id);
		assert_eq!(body["message"], post.id);
	}
}

#[tokio::test]
async fn test_like_invalid_eval() {
	let (global, memory, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let user = create_user(&global, "liker").await;
	let token = token_for(&global, &user);
	let post = global.store.create_post(user.id, "post").await.unwrap();

	for body in [
		json!({ "message_id": post.id, "eval": "maybe" }),
		json!({ "message_id": post.id, "eval": 1 }),
		json!({ "message_id": post.id }),
	] {
		let (status, body) = send(&router, request(Method::POST, "/v1/likes", Some(&token), Some(body))).await;

		assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
		assert_eq!(body, json!({ "result": "Invalid input data." }));
	}

	assert_eq!(memory.like_count().await, 0);
}

#[tokio::test]
async fn test_like_message_validation() {
	let (global, memory, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let user = create_user(&global, "liker").await;
	let token = token_for(&global, &user);

	let (status, body) = send(
		&router,
		request(Method::POST, "/v1/likes", Some(&token), Some(json!({ "eval": "like" }))),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "message_id": ["This field is required."] }));

	let (status, body) = send(
		&router,
		request(
			Method::POST,
			"/v1/likes",
			Some(&token),
			Some(json!({ "message_id": 5000, "eval": "like" })),
		),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "message_id": ["Invalid pk \"5000\" - object does not exist."] }));

	assert_eq!(memory.like_count().await, 0);
}

#[tokio::test]
async fn test_like_requires_auth() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let (status, _) = send(
		&router,
		request(Method::POST, "/v1/likes", None, Some(json!({ "message_id": 1, "eval": "like" }))),
	)
	.await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);

	let (status, _) = send(
		&router,
		request(Method::DELETE, "/v1/likes", None, Some(json!({ "message_id": 1 }))),
	)
	.await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_missing_like() {
	let (global, memory, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let user = create_user(&global, "liker").await;
	let other = create_user(&global, "other").await;
	let token = token_for(&global, &user);
	let post = global.store.create_post(user.id, "post").await.unwrap();

	// Only another user's like exists.
	global.store.create_like(other.id, post.id, true).await.unwrap();

	let (status, body) = send(
		&router,
		request(Method::DELETE, "/v1/likes", Some(&token), Some(json!({ "message_id": post.id }))),
	)
	.await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({ "result": "Like was not found" }));
	assert_eq!(memory.like_count().await, 1);

	let (status, _) = send(&router, request(Method::DELETE, "/v1/likes", Some(&token), None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(memory.like_count().await, 1);
}

#[tokio::test]
async fn test_delete_like_removes_oldest_record() {
	let (global, memory, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let user = create_user(&global, "liker").await;
	let token = token_for(&global, &user);
	let post = global.store.create_post(user.id, "post").await.unwrap();

	// Duplicates are allowed.
	let first = global.store.create_like(user.id, post.id, true).await.unwrap();
	let second = global.store.create_like(user.id, post.id, false).await.unwrap();

	let (status, body) = send(
		&router,
		request(Method::DELETE, "/v1/likes", Some(&token), Some(json!({ "message_id": post.id }))),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "result": "Like was successfully deleted." }));
	assert_eq!(memory.like_count().await, 1);
	assert_eq!(
		global.store.like_for_message(user.id, post.id).await.unwrap().map(|l| l.id),
		Some(second.id)
	);
	assert_ne!(first.id, second.id);

	let (status, _) = send(
		&router,
		request(
			Method::DELETE,
			&format!("/v1/likes?message_id={}", post.id),
			Some(&token),
			None,
		),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(memory.like_count().await, 0);
}
