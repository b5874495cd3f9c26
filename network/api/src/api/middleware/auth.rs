use std::sync::Arc;

use common::http::ext::RequestGlobalExt;
use common::http::router::ext::RequestExt;
use common::http::router::middleware::Middleware;
use common::http::RouteError;
use hyper::header;

use crate::api::auth::{AuthData, AuthError};
use crate::api::error::ApiError;
use crate::api::request_context::RequestContext;
use crate::api::Body;
use crate::global::ApiGlobal;

/// Resolves the bearer token into the request context. Requests without an
/// `Authorization` header pass through anonymously, a bad token fails them.
pub fn auth_middleware<G: ApiGlobal>(_: &Arc<G>) -> Middleware<Body, RouteError<ApiError>> {
	Middleware::pre(|mut req| async move {
		let mut context = RequestContext::default();

		let Some(token) = req.headers().get(header::AUTHORIZATION) else {
			req.provide(context);
			return Ok(req);
		};

		let token = token
			.to_str()
			.map_err(|_| AuthError::HeaderToStr)?
			.strip_prefix("Bearer ") // Tokens will start with "Bearer " so we need to remove that
			.ok_or(AuthError::NotBearerToken)?
			.to_owned();

		let global = req.get_global::<G>()?;

		let data = AuthData::from_token(&global, &token).await?;
		context.set_auth(data);

		req.provide(context);

		Ok(req)
	})
}
