use bytes::BytesMut;
use common::http::ext::ResultExt;
use common::http::RouteError;
use common::make_response;
use http_body_util::BodyExt;
use hyper::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::Result;
use super::{Body, IncomingBody};

/// Reads the whole body and parses it as json. An empty body is read as `{}`
/// so required fields are reported by validation instead of failing to parse.
pub async fn json<T: DeserializeOwned>(mut body: IncomingBody, limit: usize) -> Result<T> {
	let mut bytes = BytesMut::new();

	while let Some(frame) = body.frame().await {
		let frame = frame.map_err_route((StatusCode::BAD_REQUEST, "failed to read request body"))?;

		let Ok(data) = frame.into_data() else {
			continue;
		};

		if bytes.len() + data.len() > limit {
			return Err(RouteError::from((StatusCode::PAYLOAD_TOO_LARGE, "request body too large")));
		}

		bytes.extend_from_slice(&data);
	}

	if bytes.iter().all(u8::is_ascii_whitespace) {
		return serde_json::from_slice(b"{}").map_err_route((StatusCode::BAD_REQUEST, "invalid json body"));
	}

	serde_json::from_slice(&bytes).map_err_route((StatusCode::BAD_REQUEST, "invalid json body"))
}

/// Looks up a query string parameter, values are url decoded.
pub fn query_param<B>(req: &hyper::Request<B>, key: &str) -> Option<String> {
	let query = req.uri().query()?;

	url::form_urlencoded::parse(query.as_bytes())
		.find(|(k, _)| k == key)
		.map(|(_, v)| v.into_owned())
}

/// Serializes `value` as the json body of a response.
pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<hyper::Response<Body>> {
	let body = serde_json::to_string(value).map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to serialize response"))?;

	Ok(make_response!(status, body))
}
