use std::collections::BTreeMap;
use std::fmt::Display;

use common::http::RouteError;
use common::make_response;
use hyper::StatusCode;

use super::auth::AuthError;
use crate::database::StoreError;

pub type Result<T, E = RouteError<ApiError>> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("failed to read http body: {0}")]
	ReadBody(#[from] hyper::Error),
	#[error("failed to parse json body: {0}")]
	ParseJson(#[from] serde_json::Error),
	#[error("invalid input: {0}")]
	Validation(ValidationErrors),
	#[error("store error: {0}")]
	Store(#[from] StoreError),
	#[error("auth error: {0}")]
	Auth(#[from] AuthError),
	#[error("failed to hash password: {0}")]
	PasswordHash(argon2::password_hash::Error),
}

/// Field level validation failures, serialized as a map from the field name
/// to its messages.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn single(field: &'static str, message: impl Into<String>) -> Self {
		let mut errors = Self::new();
		errors.add(field, message);
		errors
	}

	pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
		self.0.entry(field).or_default().push(message.into());
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[cfg(test)]
	pub fn get(&self, field: &str) -> Option<&[String]> {
		self.0.get(field).map(Vec::as_slice)
	}

	/// Returns `value` if nothing was recorded.
	pub fn into_result<T>(self, value: T) -> std::result::Result<T, Self> {
		if self.is_empty() {
			Ok(value)
		} else {
			Err(self)
		}
	}
}

impl Display for ValidationErrors {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut first = true;
		for (field, messages) in &self.0 {
			for message in messages {
				if !first {
					write!(f, ", ")?;
				}
				first = false;
				write!(f, "{field}: {message}")?;
			}
		}

		Ok(())
	}
}

impl From<ValidationErrors> for RouteError<ApiError> {
	#[track_caller]
	fn from(errors: ValidationErrors) -> Self {
		let body = serde_json::to_value(&errors).unwrap_or_default();

		RouteError::with_body(StatusCode::BAD_REQUEST, body).with_source(ApiError::Validation(errors))
	}
}

impl From<StoreError> for RouteError<ApiError> {
	#[track_caller]
	fn from(err: StoreError) -> Self {
		RouteError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error").with_source(ApiError::Store(err))
	}
}

/// Builds the `{"result": ...}` response used for domain level outcomes.
pub fn result_response(status: StatusCode, message: &str) -> hyper::Response<super::Body> {
	make_response!(status, serde_json::json!({ "result": message }))
}
