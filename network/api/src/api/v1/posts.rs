use std::sync::Arc;

use common::http::ext::*;
use common::http::router::builder::RouterBuilder;
use common::http::router::ext::RequestExt;
use common::http::router::Router;
use common::http::RouteError;
use hyper::{Request, Response, StatusCode};

use super::models::{CreatePostRequest, PostResponse};
use crate::api::auth::require_auth;
use crate::api::error::{ApiError, Result};
use crate::api::{body, Body, IncomingBody};
use crate::config::ApiConfig;
use crate::global::ApiGlobal;

async fn create<G: ApiGlobal>(req: Request<IncomingBody>) -> Result<Response<Body>> {
	let global = req.get_global::<G>()?;
	let auth = require_auth(&req)?;

	let request: CreatePostRequest = body::json(req.into_body(), global.config::<ApiConfig>().max_body_size).await?;
	let content = request.validate()?;

	let post = global.store().create_post(auth.user.id, &content).await?;

	tracing::debug!(post_id = post.id, user_id = post.user_id, "created post");

	body::json_response(StatusCode::OK, &PostResponse::from(&post))
}

async fn get<G: ApiGlobal>(req: Request<IncomingBody>) -> Result<Response<Body>> {
	let global = req.get_global::<G>()?;

	let id = req
		.param("id")
		.and_then(|id| id.parse::<i64>().ok())
		.map_err_route((StatusCode::NOT_FOUND, "post not found"))?;

	let post = global
		.store()
		.post_by_id(id)
		.await?
		.map_err_route((StatusCode::NOT_FOUND, "post not found"))?;

	body::json_response(StatusCode::OK, &PostResponse::from(&post))
}

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<IncomingBody, Body, RouteError<ApiError>> {
	Router::builder().post("", create::<G>).get("/:id", get::<G>)
}
