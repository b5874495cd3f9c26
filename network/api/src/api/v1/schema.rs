use std::sync::Arc;

use common::http::router::builder::RouterBuilder;
use common::http::router::Router;
use common::http::RouteError;
use hyper::{Request, Response, StatusCode};

use crate::api::error::{ApiError, Result};
use crate::api::{body, Body, IncomingBody};
use crate::global::ApiGlobal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum In {
	Path,
	Query,
	Body,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Field {
	pub name: &'static str,
	#[serde(rename = "in")]
	pub location: In,
	#[serde(rename = "type")]
	pub kind: &'static str,
	pub required: bool,
	pub description: &'static str,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Endpoint {
	pub method: &'static str,
	pub path: &'static str,
	pub auth: bool,
	pub description: &'static str,
	pub fields: &'static [Field],
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Schema {
	pub endpoints: &'static [Endpoint],
}

const fn field(name: &'static str, location: In, kind: &'static str, required: bool, description: &'static str) -> Field {
	Field {
		name,
		location,
		kind,
		required,
		description,
	}
}

const CREDENTIALS: &[Field] = &[
	field("username", In::Body, "string", true, "Letters, digits and underscores, 3 to 20 characters."),
	field(
		"password",
		In::Body,
		"string",
		true,
		"8 to 100 characters with a lowercase and an uppercase letter, a digit and a special character.",
	),
];

const REGISTER: &[Field] = &[
	CREDENTIALS[0],
	CREDENTIALS[1],
	field("email", In::Body, "string", false, "A valid email address."),
];

const ID: &[Field] = &[field("id", In::Path, "integer", true, "The id of the record.")];

const LIKE: &[Field] = &[
	field("message_id", In::Body, "integer", true, "The id of the post."),
	field("eval", In::Body, "string", true, "`Like` or `Dislike`, case insensitive."),
];

const UNLIKE: &[Field] = &[field(
	"message_id",
	In::Query,
	"integer",
	true,
	"The id of the post. Read from the json body when the query string has none.",
)];

const ANALYTICS: &[Field] = &[
	field("date_from", In::Query, "date", true, "First day, `YYYY-MM-DD`."),
	field("date_to", In::Query, "date", true, "Last day, `YYYY-MM-DD`, included."),
];

pub const SCHEMA: Schema = Schema {
	endpoints: &[
		Endpoint {
			method: "GET",
			path: "/v1/health",
			auth: false,
			description: "Liveness check.",
			fields: &[],
		},
		Endpoint {
			method: "GET",
			path: "/v1/schema",
			auth: false,
			description: "This document.",
			fields: &[],
		},
		Endpoint {
			method: "POST",
			path: "/v1/users/register",
			auth: false,
			description: "Creates a user and returns it.",
			fields: REGISTER,
		},
		Endpoint {
			method: "POST",
			path: "/v1/auth/token",
			auth: false,
			description: "Exchanges credentials for a bearer token.",
			fields: CREDENTIALS,
		},
		Endpoint {
			method: "GET",
			path: "/v1/users/me",
			auth: true,
			description: "The authenticated user.",
			fields: &[],
		},
		Endpoint {
			method: "GET",
			path: "/v1/users/:id",
			auth: false,
			description: "A user by id.",
			fields: ID,
		},
		Endpoint {
			method: "POST",
			path: "/v1/posts",
			auth: true,
			description: "Creates a post owned by the authenticated user.",
			fields: &[field("content", In::Body, "string", true, "The text of the post.")],
		},
		Endpoint {
			method: "GET",
			path: "/v1/posts/:id",
			auth: false,
			description: "A post by id.",
			fields: ID,
		},
		Endpoint {
			method: "POST",
			path: "/v1/likes",
			auth: true,
			description: "Likes or dislikes a post.",
			fields: LIKE,
		},
		Endpoint {
			method: "DELETE",
			path: "/v1/likes",
			auth: true,
			description: "Removes the oldest reaction of the authenticated user to a post.",
			fields: UNLIKE,
		},
		Endpoint {
			method: "GET",
			path: "/v1/analitics",
			auth: true,
			description: "Reactions per day in a range of days. Also served at `/v1/analytics`.",
			fields: ANALYTICS,
		},
	],
};

async fn schema(_: Request<IncomingBody>) -> Result<Response<Body>> {
	body::json_response(StatusCode::OK, &SCHEMA)
}

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<IncomingBody, Body, RouteError<ApiError>> {
	Router::builder().get("", schema)
}
