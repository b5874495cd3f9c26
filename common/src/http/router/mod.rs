use std::sync::Arc;

use hyper::http::request::Parts;
use hyper::{Request, Response};

use self::builder::RouterBuilder;
use self::error::RouterError;
use self::types::{ErrorHook, PostHook, PreHook, RouteHook, RouteParams};

pub mod builder;
pub mod error;
pub mod ext;
pub mod middleware;
pub mod types;

/// A method + path router. Routes live in a path tree keyed by
/// `/{METHOD}/{path}` so one lookup resolves both.
pub struct Router<I, O, E> {
	endpoints: Vec<Endpoint<I, O, E>>,
	tree: path_tree::PathTree<usize>,
}

struct Endpoint<I, O, E> {
	handler: RouteHook<I, O, E>,
	chain: Arc<Chain<O, E>>,
}

/// The middlewares and error handler in scope for a route.
pub(crate) struct Chain<O, E> {
	pre: Vec<PreHook<E>>,
	post: Vec<PostHook<O, E>>,
	on_error: Option<ErrorHook<O, E>>,
}

impl<O, E> Default for Chain<O, E> {
	fn default() -> Self {
		Self {
			pre: Vec::new(),
			post: Vec::new(),
			on_error: None,
		}
	}
}

impl<O, E> Chain<O, E> {
	/// `inner` runs after the hooks of `self`, and its error handler wins.
	fn nest(&self, inner: Chain<O, E>) -> Self {
		Self {
			pre: self.pre.iter().cloned().chain(inner.pre).collect(),
			post: self.post.iter().cloned().chain(inner.post).collect(),
			on_error: inner.on_error.or_else(|| self.on_error.clone()),
		}
	}

	async fn before(&self, mut head: Parts) -> Result<Parts, (Parts, E)> {
		for hook in &self.pre {
			match hook(Request::from_parts(head.clone(), ())).await {
				Ok(req) => head = req.into_parts().0,
				Err(err) => return Err((head, err)),
			}
		}

		Ok(head)
	}

	async fn after(&self, head: Parts, mut res: Response<O>) -> Result<Response<O>, RouterError<E>> {
		for hook in &self.post {
			res = match hook(res).await {
				Ok(res) => res,
				// The error response skips the remaining post middlewares.
				Err(err) => return self.recover(head, err).await,
			};
		}

		Ok(res)
	}

	async fn recover(&self, head: Parts, err: E) -> Result<Response<O>, RouterError<E>> {
		match &self.on_error {
			Some(hook) => Ok(hook((Request::from_parts(head, ()), err)).await),
			None => Err(RouterError::Unhandled(err)),
		}
	}
}

impl<I: 'static, O: 'static, E: 'static> Router<I, O, E> {
	pub fn builder() -> RouterBuilder<I, O, E> {
		RouterBuilder::new()
	}

	/// Every response, including the ones built by the error handler, passes
	/// through the post middlewares of the matched route.
	pub async fn handle(&self, req: Request<I>) -> Result<Response<O>, RouterError<E>> {
		let key = format!("/{}{}", req.method().as_str(), req.uri().path());
		let (idx, path) = self.tree.find(&key).ok_or(RouterError::NotFound)?;
		let endpoint = &self.endpoints[*idx];
		let chain = &endpoint.chain;

		let (mut head, body) = req.into_parts();
		head.extensions.insert(RouteParams(
			path.params_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect(),
		));

		let (head, res) = match chain.before(head).await {
			Ok(head) => {
				let res = (endpoint.handler)(Request::from_parts(head.clone(), body)).await;
				(head, res)
			}
			Err((head, err)) => (head, Err(err)),
		};

		let res = match res {
			Ok(res) => res,
			Err(err) => chain.recover(head.clone(), err).await?,
		};

		chain.after(head, res).await
	}
}
