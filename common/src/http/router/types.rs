use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use hyper::{Request, Response};

pub(crate) type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
pub(crate) type Hook<A, T> = Arc<dyn Fn(A) -> BoxFuture<T> + Send + Sync>;

pub(crate) type RouteHook<I, O, E> = Hook<Request<I>, Result<Response<O>, E>>;
pub(crate) type PreHook<E> = Hook<Request<()>, Result<Request<()>, E>>;
pub(crate) type PostHook<O, E> = Hook<Response<O>, Result<Response<O>, E>>;
pub(crate) type ErrorHook<O, E> = Hook<(Request<()>, E), Response<O>>;

/// Path parameters captured by the matched route, in path order.
#[derive(Debug, Clone, Default)]
pub struct RouteParams(pub(crate) Vec<(String, String)>);
