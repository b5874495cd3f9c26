use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Request, Response, StatusCode};

pub use bytes::Bytes;

mod error;
pub mod ext;
pub mod router;

pub use self::error::RouteError;

pub type Body = http_body_util::Full<Bytes>;

/// Builds a json response, `$body` is anything that implements `Display`
/// such as a `serde_json::Value` or a string.
#[macro_export]
macro_rules! make_response {
	($status:expr, $body:expr) => {
		$crate::http::respond($status, $body.to_string())
	};
}

pub fn respond(status: StatusCode, body: impl Into<Bytes>) -> Response<Body> {
	let mut res = Response::new(Body::new(body.into()));
	*res.status_mut() = status;
	res.headers_mut()
		.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	res
}

/// Logs the error inside the span it was raised in and turns it into the
/// response for the client.
pub async fn error_handler<E: std::fmt::Debug>(req: Request<()>, err: RouteError<E>) -> Response<Body> {
	err.log(req.method(), req.uri());
	err.into_response()
}
