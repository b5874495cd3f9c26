use std::fmt::{Debug, Display};
use std::panic::Location;

use hyper::{Method, Response, StatusCode, Uri};
use serde_json::{json, Value};

use super::{respond, Body};

/// The error type returned by route handlers.
///
/// It carries the status and json body sent to the client, the error that
/// caused it, and where and in which span it was raised so the error handler
/// can log it in context.
pub struct RouteError<E> {
	status: StatusCode,
	body: Value,
	source: Option<E>,
	location: &'static Location<'static>,
	span: tracing::Span,
}

impl<E> RouteError<E> {
	/// A `{"message": ..., "success": false}` error.
	#[track_caller]
	pub fn new(status: StatusCode, message: impl AsRef<str>) -> Self {
		Self::with_body(status, json!({ "message": message.as_ref(), "success": false }))
	}

	#[track_caller]
	pub fn with_body(status: StatusCode, body: Value) -> Self {
		Self {
			status,
			body,
			source: None,
			location: Location::caller(),
			span: tracing::Span::current(),
		}
	}

	pub fn with_source(mut self, source: E) -> Self {
		self.source = Some(source);
		self
	}

	pub(crate) fn at(mut self, location: &'static Location<'static>) -> Self {
		self.location = location;
		self
	}

	pub fn into_response(self) -> Response<Body> {
		respond(self.status, self.body.to_string())
	}
}

impl<E: Debug> RouteError<E> {
	/// Server errors are always logged. Client errors only show up at debug
	/// level, and only when something caused them.
	pub fn log(&self, method: &Method, uri: &Uri) {
		let location = self.location;

		self.span.in_scope(|| {
			if self.status.is_server_error() {
				tracing::error!(%method, path = %uri, %location, status = %self.status, error = ?self.source, "http error");
			} else if self.source.is_some() {
				tracing::debug!(%method, path = %uri, %location, status = %self.status, error = ?self.source, "http error");
			}
		});
	}
}

impl<E, S: AsRef<str>> From<(StatusCode, S)> for RouteError<E> {
	#[track_caller]
	fn from((status, message): (StatusCode, S)) -> Self {
		Self::new(status, message)
	}
}

impl<E, S: AsRef<str>, T: Into<E>> From<(StatusCode, S, T)> for RouteError<E> {
	#[track_caller]
	fn from((status, message, source): (StatusCode, S, T)) -> Self {
		Self::new(status, message).with_source(source.into())
	}
}

impl<E> From<&'_ str> for RouteError<E> {
	#[track_caller]
	fn from(message: &'_ str) -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
	}
}

impl<E: Debug> Debug for RouteError<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteError")
			.field("status", &self.status)
			.field("source", &self.source)
			.field("location", &self.location)
			.finish()
	}
}

impl<E: Display> Display for RouteError<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.source {
			Some(err) => write!(f, "{}: {err}", self.status),
			None => write!(f, "{}", self.status),
		}
	}
}

impl<E: std::error::Error + 'static> std::error::Error for RouteError<E> {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source.as_ref().map(|err| err as _)
	}
}
