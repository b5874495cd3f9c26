use bytes::Bytes;
use common::http::router::Router;
use common::http::RouteError;
use http_body_util::{BodyExt, Full};
use hyper::{header, Method, Request, StatusCode};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::jwt::{AuthJwtPayload, JwtState};
use crate::api::{Body, IncomingBody};
use crate::database::{NewUser, User};
use crate::global::GlobalState;

mod analytics;
mod auth;
mod health;
mod likes;
mod server;
mod users;

pub const PASSWORD: &str = "Passw0rd!";

pub type ApiRouter = Router<IncomingBody, Body, RouteError<ApiError>>;

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<IncomingBody> {
	let mut builder = Request::builder().method(method).uri(uri);

	if let Some(token) = token {
		builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
	}

	let body = body.map(|body| body.to_string()).unwrap_or_default();

	builder
		.body(Full::new(Bytes::from(body)).map_err(|never| match never {}).boxed_unsync())
		.unwrap()
}

pub async fn send(router: &ApiRouter, req: Request<IncomingBody>) -> (StatusCode, Value) {
	let res = router.handle(req).await.unwrap();
	let status = res.status();

	let bytes = res.into_body().collect().await.unwrap().to_bytes();

	(status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn create_user(global: &GlobalState, username: &str) -> User {
	let password_hash = User::hash_password(PASSWORD).unwrap();

	global
		.store
		.create_user(NewUser {
			username,
			email: None,
			password_hash: &password_hash,
		})
		.await
		.unwrap()
}

pub fn token_for(global: &GlobalState, user: &User) -> String {
	AuthJwtPayload::new(user.id, &global.config.jwt)
		.serialize(&global.config.jwt)
		.unwrap()
}
