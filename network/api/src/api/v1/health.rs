use std::sync::Arc;

use common::http::router::builder::RouterBuilder;
use common::http::router::Router;
use common::http::RouteError;
use common::make_response;
use hyper::{Request, Response, StatusCode};
use serde_json::json;

use crate::api::error::{ApiError, Result};
use crate::api::{Body, IncomingBody};
use crate::global::ApiGlobal;

async fn health(_: Request<IncomingBody>) -> Result<Response<Body>> {
	Ok(make_response!(
		StatusCode::OK,
		json!({
			"status": "ok"
		})
	))
}

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<IncomingBody, Body, RouteError<ApiError>> {
	Router::builder().get("", health)
}
