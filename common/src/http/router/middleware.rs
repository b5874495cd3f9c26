use std::future::Future;
use std::sync::Arc;

use hyper::{Request, Response};

use super::types::{PostHook, PreHook};

/// A hook registered on a scope. It applies to every route of the scope and
/// of its nested scopes, outer scopes run first.
pub struct Middleware<O, E>(pub(crate) Stage<O, E>);

pub(crate) enum Stage<O, E> {
	Pre(PreHook<E>),
	Post(PostHook<O, E>),
}

impl<O: 'static, E: 'static> Middleware<O, E> {
	/// Runs before the route and only sees the request head, the body stays
	/// with the router until the route handler is called.
	pub fn pre<F>(hook: impl Fn(Request<()>) -> F + Send + Sync + 'static) -> Self
	where
		F: Future<Output = Result<Request<()>, E>> + Send + 'static,
	{
		Self(Stage::Pre(Arc::new(move |req| Box::pin(hook(req)))))
	}

	/// Runs on every response of the scope, including the ones the error
	/// handler builds after a failed pre middleware or route.
	pub fn post<F>(hook: impl Fn(Response<O>) -> F + Send + Sync + 'static) -> Self
	where
		F: Future<Output = Result<Response<O>, E>> + Send + 'static,
	{
		Self(Stage::Post(Arc::new(move |res| Box::pin(hook(res)))))
	}
}
