use std::sync::Arc;

use common::http::ext::*;
use common::http::router::builder::RouterBuilder;
use common::http::router::Router;
use common::http::RouteError;
use hyper::{Request, Response, StatusCode};

use super::models::{missing_pk, parse_pk, LikeRequest, LikeResponse};
use crate::api::auth::require_auth;
use crate::api::error::{result_response, ApiError, Result, ValidationErrors};
use crate::api::{body, Body, IncomingBody};
use crate::config::ApiConfig;
use crate::database::StoreError;
use crate::global::ApiGlobal;

const INVALID_INPUT: &str = "Invalid input data.";
const DELETED: &str = "Like was successfully deleted.";
const NOT_FOUND: &str = "Like was not found";

async fn create<G: ApiGlobal>(req: Request<IncomingBody>) -> Result<Response<Body>> {
	let global = req.get_global::<G>()?;
	let auth = require_auth(&req)?;

	let request: LikeRequest = body::json(req.into_body(), global.config::<ApiConfig>().max_body_size).await?;

	let Some(eval) = request.eval() else {
		return Ok(result_response(StatusCode::NOT_ACCEPTABLE, INVALID_INPUT));
	};

	let message_id = request.message_id()?;

	if global.store().post_by_id(message_id).await?.is_none() {
		return Err(ValidationErrors::single("message_id", missing_pk(message_id)).into());
	}

	let like = match global.store().create_like(auth.user.id, message_id, eval).await {
		Ok(like) => like,
		// The post was removed between the lookup and the insert.
		Err(StoreError::MissingReference("post")) => {
			return Err(ValidationErrors::single("message_id", missing_pk(message_id)).into());
		}
		Err(err) => return Err(err.into()),
	};

	tracing::debug!(like_id = like.id, user_id = like.user_id, message_id, eval, "created like");

	body::json_response(StatusCode::OK, &LikeResponse::from(&like))
}

async fn delete<G: ApiGlobal>(req: Request<IncomingBody>) -> Result<Response<Body>> {
	let global = req.get_global::<G>()?;
	let auth = require_auth(&req)?;

	// The query string wins over the body.
	let message_id = match body::query_param(&req, "message_id") {
		Some(message_id) => message_id.trim().parse::<i64>().ok(),
		None => {
			let request: LikeRequest = body::json(req.into_body(), global.config::<ApiConfig>().max_body_size).await?;
			parse_pk(request.message_id.as_ref()).ok()
		}
	};

	let Some(message_id) = message_id else {
		return Ok(result_response(StatusCode::NOT_FOUND, NOT_FOUND));
	};

	match global.store().delete_like_for_message(auth.user.id, message_id).await? {
		Some(like) => {
			tracing::debug!(like_id = like.id, user_id = like.user_id, message_id, "deleted like");
			Ok(result_response(StatusCode::OK, DELETED))
		}
		None => Ok(result_response(StatusCode::NOT_FOUND, NOT_FOUND)),
	}
}

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<IncomingBody, Body, RouteError<ApiError>> {
	Router::builder()
		.post("", create::<G>)
		.delete("", delete::<G>)
}
