use std::future::Future;
use std::sync::Arc;

use hyper::{Method, Request, Response};

use super::middleware::{Middleware, Stage};
use super::types::RouteHook;
use super::{Chain, Endpoint, Router};

enum Entry<I, O, E> {
	Route { method: Option<Method>, handler: RouteHook<I, O, E> },
	Scope(RouterBuilder<I, O, E>),
}

pub struct RouterBuilder<I, O, E> {
	entries: Vec<(&'static str, Entry<I, O, E>)>,
	chain: Chain<O, E>,
}

impl<I: 'static, O: 'static, E: 'static> Default for RouterBuilder<I, O, E> {
	fn default() -> Self {
		Self::new()
	}
}

macro_rules! verbs {
	($($name:ident => $method:ident),* $(,)?) => {
		$(
			pub fn $name<F>(self, path: &'static str, handler: impl Fn(Request<I>) -> F + Send + Sync + 'static) -> Self
			where
				F: Future<Output = Result<Response<O>, E>> + Send + 'static,
			{
				self.route(Some(Method::$method), path, handler)
			}
		)*
	};
}

impl<I: 'static, O: 'static, E: 'static> RouterBuilder<I, O, E> {
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			chain: Chain::default(),
		}
	}

	pub fn middleware(mut self, middleware: Middleware<O, E>) -> Self {
		match middleware.0 {
			Stage::Pre(hook) => self.chain.pre.push(hook),
			Stage::Post(hook) => self.chain.post.push(hook),
		}

		self
	}

	/// Makes `data` available to every route of the scope through
	/// [`RequestExt::data`](super::ext::RequestExt::data).
	pub fn data<T: Clone + Send + Sync + 'static>(self, data: T) -> Self {
		self.middleware(Middleware::pre(move |mut req| {
			req.extensions_mut().insert(data.clone());
			async move { Ok(req) }
		}))
	}

	/// Turns errors of this scope into responses. Nested scopes inherit it
	/// unless they set their own.
	pub fn error_handler<F>(mut self, handler: impl Fn(Request<()>, E) -> F + Send + Sync + 'static) -> Self
	where
		F: Future<Output = Response<O>> + Send + 'static,
	{
		self.chain.on_error = Some(Arc::new(move |(req, err)| Box::pin(handler(req, err))));
		self
	}

	verbs!(get => GET, post => POST, delete => DELETE, options => OPTIONS);

	/// Matches any method on any path no other route claimed.
	pub fn not_found<F>(self, handler: impl Fn(Request<I>) -> F + Send + Sync + 'static) -> Self
	where
		F: Future<Output = Result<Response<O>, E>> + Send + 'static,
	{
		self.route(None, "*", handler)
	}

	pub fn scope(mut self, path: &'static str, router: RouterBuilder<I, O, E>) -> Self {
		self.entries.push((path, Entry::Scope(router)));
		self
	}

	fn route<F>(
		mut self,
		method: Option<Method>,
		path: &'static str,
		handler: impl Fn(Request<I>) -> F + Send + Sync + 'static,
	) -> Self
	where
		F: Future<Output = Result<Response<O>, E>> + Send + 'static,
	{
		let handler: RouteHook<I, O, E> = Arc::new(move |req| Box::pin(handler(req)));
		self.entries.push((path, Entry::Route { method, handler }));
		self
	}

	fn build_into(self, prefix: &str, parent: &Chain<O, E>, router: &mut Router<I, O, E>) {
		let Self { entries, chain } = self;
		let chain = Arc::new(parent.nest(chain));

		for (path, entry) in entries {
			let path = join(prefix, path);

			match entry {
				Entry::Route { method, handler } => {
					// Routes without a method match any method segment.
					let method = method.as_ref().map(Method::as_str).unwrap_or(":method");
					let key = format!("/{method}/{path}");

					tracing::debug!(%key, "adding route");

					router.tree.insert(&key, router.endpoints.len());
					router.endpoints.push(Endpoint {
						handler,
						chain: chain.clone(),
					});
				}
				Entry::Scope(builder) => builder.build_into(&path, &chain, router),
			}
		}
	}

	pub fn build(self) -> Router<I, O, E> {
		let mut router = Router {
			endpoints: Vec::new(),
			tree: path_tree::PathTree::new(),
		};

		self.build_into("", &Chain::default(), &mut router);

		router
	}
}

fn join(prefix: &str, path: &str) -> String {
	let (prefix, path) = (prefix.trim_matches('/'), path.trim_matches('/'));

	match (prefix.is_empty(), path.is_empty()) {
		(true, _) => path.to_owned(),
		(false, true) => prefix.to_owned(),
		(false, false) => format!("{prefix}/{path}"),
	}
}
