use hyper::Request;

use super::types::RouteParams;

pub trait RequestExt {
	/// A parameter captured by the matched route, `/:id` is read with
	/// `param("id")`.
	fn param(&self, key: &str) -> Option<&str>;

	/// Stores `data` in the request so later middlewares and the route can
	/// read it back with [`RequestExt::data`].
	fn provide<T: Clone + Send + Sync + 'static>(&mut self, data: T);

	fn data<T: Send + Sync + 'static>(&self) -> Option<&T>;
}

impl<B> RequestExt for Request<B> {
	fn param(&self, key: &str) -> Option<&str> {
		let RouteParams(params) = self.extensions().get()?;
		params.iter().find_map(|(k, v)| (k == key).then_some(v.as_str()))
	}

	fn provide<T: Clone + Send + Sync + 'static>(&mut self, data: T) {
		self.extensions_mut().insert(data);
	}

	fn data<T: Send + Sync + 'static>(&self) -> Option<&T> {
		self.extensions().get()
	}
}
