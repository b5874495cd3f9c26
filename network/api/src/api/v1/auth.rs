use std::sync::Arc;

use common::http::ext::*;
use common::http::router::builder::RouterBuilder;
use common::http::router::Router;
use common::http::RouteError;
use hyper::{Request, Response, StatusCode};

use super::models::{TokenRequest, TokenResponse};
use crate::api::auth::AuthError;
use crate::api::error::{ApiError, Result};
use crate::api::jwt::{AuthJwtPayload, JwtState};
use crate::api::{body, Body, IncomingBody};
use crate::config::{ApiConfig, JwtConfig};
use crate::global::ApiGlobal;

async fn token<G: ApiGlobal>(req: Request<IncomingBody>) -> Result<Response<Body>> {
	let global = req.get_global::<G>()?;

	let request: TokenRequest = body::json(req.into_body(), global.config::<ApiConfig>().max_body_size).await?;
	let (username, password) = request.validate()?;

	let user = global
		.store()
		.user_by_username(&username)
		.await?
		.filter(|user| user.verify_password(&password))
		.ok_or(AuthError::InvalidCredentials)?;

	let payload = AuthJwtPayload::new(user.id, global.config::<JwtConfig>());
	let access = payload
		.serialize(global.config::<JwtConfig>())
		.ok_or(AuthError::IssueToken)?;

	tracing::debug!(user_id = user.id, "issued access token");

	body::json_response(
		StatusCode::OK,
		&TokenResponse {
			access,
			expires_at: payload.expiration,
		},
	)
}

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<IncomingBody, Body, RouteError<ApiError>> {
	Router::builder().post("/token", token::<G>)
}
