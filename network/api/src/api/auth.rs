use std::sync::Arc;

use common::http::router::ext::RequestExt;
use common::http::RouteError;
use hyper::StatusCode;

use super::error::ApiError;
use super::jwt::{AuthJwtPayload, JwtState};
use super::request_context::RequestContext;
use crate::config::JwtConfig;
use crate::database::User;
use crate::global::ApiGlobal;

#[derive(thiserror::Error, Debug, Clone)]
pub enum AuthError {
	#[error("token must be ascii only")]
	HeaderToStr,
	#[error("token must be a bearer token")]
	NotBearerToken,
	/// The user is not logged in
	#[error("not logged in")]
	NotLoggedIn,
	#[error("invalid token")]
	InvalidToken,
	#[error("invalid username or password")]
	InvalidCredentials,
	#[error("failed to fetch user")]
	FetchUser,
	#[error("failed to issue token")]
	IssueToken,
}

impl From<AuthError> for RouteError<ApiError> {
	#[track_caller]
	fn from(value: AuthError) -> Self {
		RouteError::from(match &value {
			AuthError::HeaderToStr => (StatusCode::UNAUTHORIZED, "token must be ascii only"),
			AuthError::NotBearerToken => (StatusCode::UNAUTHORIZED, "token must be a bearer token"),
			AuthError::NotLoggedIn => (StatusCode::UNAUTHORIZED, "not logged in"),
			AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid token"),
			AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid username or password"),
			AuthError::FetchUser => (StatusCode::INTERNAL_SERVER_ERROR, "failed to fetch user"),
			AuthError::IssueToken => (StatusCode::INTERNAL_SERVER_ERROR, "failed to issue token"),
		})
		.with_source(ApiError::Auth(value))
	}
}

#[derive(Debug, Clone)]
pub struct AuthData {
	pub user: User,
}

impl AuthData {
	pub async fn from_token<G: ApiGlobal>(global: &Arc<G>, token: &str) -> Result<Self, AuthError> {
		let jwt = AuthJwtPayload::verify(global.config::<JwtConfig>(), token).ok_or(AuthError::InvalidToken)?;

		let user = global
			.store()
			.user_by_id(jwt.user_id)
			.await
			.map_err(|err| {
				tracing::error!(user_id = jwt.user_id, error = %err, "failed to fetch user");
				AuthError::FetchUser
			})?
			// The user the token was issued for no longer exists.
			.ok_or(AuthError::InvalidToken)?;

		Ok(Self { user })
	}
}

/// Returns the authenticated user of the request or fails with
/// [`AuthError::NotLoggedIn`].
pub fn require_auth<B>(req: &hyper::Request<B>) -> Result<AuthData, AuthError> {
	req.data::<RequestContext>()
		.and_then(|ctx| ctx.auth().cloned())
		.ok_or(AuthError::NotLoggedIn)
}
