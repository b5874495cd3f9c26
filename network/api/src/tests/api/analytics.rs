use chrono::{TimeZone, Utc};
use hyper::{Method, StatusCode};
use serde_json::json;

use super::{create_user, request, send, token_for};
use crate::api;
use crate::config::AppConfig;
use crate::database::Store;
use crate::tests::global::mock_global_state;

#[tokio::test]
async fn test_analytics_groups_by_day() {
	let (global, memory, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let user = create_user(&global, "analyst").await;
	let token = token_for(&global, &user);
	let post = global.store.create_post(user.id, "post").await.unwrap();

	for (day, hour, eval) in [(1, 9, true), (1, 23, false), (2, 0, true), (5, 12, true)] {
		let like = global.store.create_like(user.id, post.id, eval).await.unwrap();
		let created_at = Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap();
		assert!(memory.set_like_created_at(like.id, created_at).await);
	}

	for path in ["/v1/analitics", "/v1/analytics"] {
		let (status, body) = send(
			&router,
			request(
				Method::GET,
				&format!("{path}?date_from=2024-01-01&date_to=2024-01-02"),
				Some(&token),
				None,
			),
		)
		.await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(
			body,
			json!({
				"analitics": [
					{ "date": "2024-01-01", "likes": 2 },
					{ "date": "2024-01-02", "likes": 1 },
				]
			})
		);
	}
}

#[tokio::test]
async fn test_analytics_reversed_range() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let user = create_user(&global, "analyst").await;
	let token = token_for(&global, &user);

	let (status, body) = send(
		&router,
		request(
			Method::GET,
			"/v1/analitics?date_from=2024-02-01&date_to=2024-01-01",
			Some(&token),
			None,
		),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "analitics": [] }));
}

#[tokio::test]
async fn test_analytics_invalid_format() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let user = create_user(&global, "analyst").await;
	let token = token_for(&global, &user);

	for query in [
		"date_from=01-01-2024&date_to=2024-01-02",
		"date_from=%202024-01-01&date_to=2024-01-02",
		"date_from=2024-01-01&date_to=2024-01-02%20",
		"date_from=2024-01-01&date_to=2024-%2001-02",
		"date_from=2024-01-01",
		"date_to=2024-01-02",
		"",
	] {
		let (status, body) = send(
			&router,
			request(Method::GET, &format!("/v1/analitics?{query}"), Some(&token), None),
		)
		.await;

		assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
		assert_eq!(body, json!({ "result": "Invalid input format." }));
	}
}

#[tokio::test]
async fn test_analytics_requires_auth() {
	let (global, _, _handler) = mock_global_state(AppConfig::default());
	let router = api::routes(&global);

	let (status, _) = send(
		&router,
		request(
			Method::GET,
			"/v1/analitics?date_from=2024-01-01&date_to=2024-01-02",
			None,
			None,
		),
	)
	.await;

	assert_eq!(status, StatusCode::UNAUTHORIZED);
}
