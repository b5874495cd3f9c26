use std::sync::Arc;

use common::http::router::builder::RouterBuilder;
use common::http::router::Router;
use common::http::RouteError;

use super::error::ApiError;
use super::{Body, IncomingBody};
use crate::global::ApiGlobal;

pub mod analytics;
pub mod auth;
pub mod health;
pub mod likes;
pub mod models;
pub mod posts;
pub mod schema;
pub mod users;
pub mod validators;

pub fn routes<G: ApiGlobal>(global: &Arc<G>) -> RouterBuilder<IncomingBody, Body, RouteError<ApiError>> {
	Router::builder()
		.scope("/health", health::routes(global))
		.scope("/schema", schema::routes(global))
		.scope("/auth", auth::routes(global))
		.scope("/users", users::routes(global))
		.scope("/posts", posts::routes(global))
		.scope("/likes", likes::routes(global))
		.scope("/analitics", analytics::routes(global))
		.scope("/analytics", analytics::routes(global))
}
