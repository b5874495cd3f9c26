use std::sync::Arc;

use common::http::ext::*;
use common::http::router::builder::RouterBuilder;
use common::http::router::Router;
use common::http::RouteError;
use hyper::{Request, Response, StatusCode};

use super::models::{AnalyticsQuery, AnalyticsResponse};
use crate::api::auth::require_auth;
use crate::api::error::{result_response, ApiError, Result};
use crate::api::{body, Body, IncomingBody};
use crate::global::ApiGlobal;

const INVALID_FORMAT: &str = "Invalid input format.";

async fn analytics<G: ApiGlobal>(req: Request<IncomingBody>) -> Result<Response<Body>> {
	let global = req.get_global::<G>()?;
	require_auth(&req)?;

	let date_from = body::query_param(&req, "date_from");
	let date_to = body::query_param(&req, "date_to");

	let Some(query) = AnalyticsQuery::parse(date_from.as_deref(), date_to.as_deref()) else {
		return Ok(result_response(StatusCode::NOT_ACCEPTABLE, INVALID_FORMAT));
	};

	let (from, to) = query.range();
	let rows = global.store().like_analytics(from, to).await?;

	body::json_response(StatusCode::OK, &AnalyticsResponse::from(rows))
}

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<IncomingBody, Body, RouteError<ApiError>> {
	Router::builder().get("", analytics::<G>)
}
