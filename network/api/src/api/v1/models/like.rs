use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{NULL, REQUIRED};
use crate::api::error::ValidationErrors;
use crate::database::Like;

/// The body of both like endpoints. Fields are kept as raw json so a wrong
/// type can be reported the same way as a missing value.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct LikeRequest {
	#[serde(default)]
	pub message_id: Option<Value>,
	#[serde(default)]
	pub eval: Option<Value>,
}

impl LikeRequest {
	/// `"like"` is `true` and `"dislike"` is `false`, ignoring case. Anything
	/// else is not a valid evaluation.
	pub fn eval(&self) -> Option<bool> {
		match self.eval.as_ref()?.as_str()?.to_lowercase().as_str() {
			"like" => Some(true),
			"dislike" => Some(false),
			_ => None,
		}
	}

	pub fn message_id(&self) -> Result<i64, ValidationErrors> {
		parse_pk(self.message_id.as_ref()).map_err(|message| ValidationErrors::single("message_id", message))
	}
}

/// Accepts an integer or a string holding one, the same way a primary key
/// field would.
pub fn parse_pk(value: Option<&Value>) -> Result<i64, String> {
	let value = match value {
		None => return Err(REQUIRED.to_string()),
		Some(Value::Null) => return Err(NULL.to_string()),
		Some(value) => value,
	};

	let id = match value {
		Value::Number(n) => n.as_i64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	};

	id.ok_or_else(|| {
		let kind = match value {
			Value::Bool(_) => "bool",
			Value::Number(_) => "float",
			Value::String(_) => "str",
			Value::Array(_) => "list",
			Value::Object(_) => "dict",
			Value::Null => "NoneType",
		};

		format!("Incorrect type. Expected pk value, received {kind}.")
	})
}

pub fn missing_pk(id: i64) -> String {
	format!("Invalid pk \"{id}\" - object does not exist.")
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LikeResponse {
	pub id: i64,
	pub user: i64,
	pub message: i64,
	pub eval: bool,
	pub created_at: DateTime<Utc>,
}

impl From<&Like> for LikeResponse {
	fn from(like: &Like) -> Self {
		Self {
			id: like.id,
			user: like.user_id,
			message: like.message_id,
			eval: like.eval,
			created_at: like.created_at,
		}
	}
}
