use std::sync::Arc;

use common::http::ext::*;
use common::http::router::builder::RouterBuilder;
use common::http::router::ext::RequestExt;
use common::http::router::Router;
use common::http::RouteError;
use hyper::{Request, Response, StatusCode};

use super::models::{RegisterRequest, UserResponse};
use crate::api::auth::require_auth;
use crate::api::error::{ApiError, Result, ValidationErrors};
use crate::api::{body, Body, IncomingBody};
use crate::config::ApiConfig;
use crate::database::{NewUser, StoreError, User};
use crate::global::ApiGlobal;

const USERNAME_TAKEN: &str = "A user with that username already exists.";

async fn register<G: ApiGlobal>(req: Request<IncomingBody>) -> Result<Response<Body>> {
	let global = req.get_global::<G>()?;

	let request: RegisterRequest = body::json(req.into_body(), global.config::<ApiConfig>().max_body_size).await?;
	let registration = request.validate()?;

	if global.store().user_by_username(&registration.username).await?.is_some() {
		return Err(ValidationErrors::single("username", USERNAME_TAKEN).into());
	}

	let password_hash = User::hash_password(&registration.password)
		.map_err(ApiError::PasswordHash)
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to hash password"))?;

	let user = match global
		.store()
		.create_user(NewUser {
			username: &registration.username,
			email: registration.email.as_deref(),
			password_hash: &password_hash,
		})
		.await
	{
		Ok(user) => user,
		// Lost a race with another registration for the same name.
		Err(StoreError::UsernameTaken) => return Err(ValidationErrors::single("username", USERNAME_TAKEN).into()),
		Err(err) => return Err(err.into()),
	};

	tracing::info!(user_id = user.id, username = %user.username, "registered user");

	body::json_response(StatusCode::OK, &UserResponse::from(&user))
}

async fn me(req: Request<IncomingBody>) -> Result<Response<Body>> {
	let auth = require_auth(&req)?;

	body::json_response(StatusCode::OK, &UserResponse::from(&auth.user))
}

async fn get<G: ApiGlobal>(req: Request<IncomingBody>) -> Result<Response<Body>> {
	let global = req.get_global::<G>()?;

	let id = req
		.param("id")
		.and_then(|id| id.parse::<i64>().ok())
		.map_err_route((StatusCode::NOT_FOUND, "user not found"))?;

	let user = global
		.store()
		.user_by_id(id)
		.await?
		.map_err_route((StatusCode::NOT_FOUND, "user not found"))?;

	body::json_response(StatusCode::OK, &UserResponse::from(&user))
}

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<IncomingBody, Body, RouteError<ApiError>> {
	Router::builder()
		.post("/register", register::<G>)
		.get("/me", me)
		.get("/:id", get::<G>)
}
