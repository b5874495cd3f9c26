use std::sync::Arc;

use common::http::router::middleware::Middleware;
use common::http::RouteError;
use hyper::header::{self, HeaderValue};

use crate::api::error::ApiError;
use crate::api::Body;
use crate::global::ApiGlobal;

pub fn cors_middleware<G: ApiGlobal>(_: &Arc<G>) -> Middleware<Body, RouteError<ApiError>> {
	Middleware::post(|mut resp| async move {
		let headers = resp.headers_mut();

		headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
		headers.insert(
			header::ACCESS_CONTROL_ALLOW_METHODS,
			HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
		);
		headers.insert(
			header::ACCESS_CONTROL_ALLOW_HEADERS,
			HeaderValue::from_static("Content-Type, Authorization"),
		);

		Ok(resp)
	})
}
