use std::panic::Location;
use std::sync::{Arc, Weak};

use hyper::StatusCode;

use super::router::ext::RequestExt;
use super::RouteError;

/// `map_err_route` turns a failed result into a [`RouteError`] built from
/// `ctx`, for example `(StatusCode::NOT_FOUND, "user not found")`, and keeps
/// the original error as its source.
pub trait ResultExt<T, E> {
	fn map_err_route<C, R>(self, ctx: C) -> Result<T, RouteError<R>>
	where
		RouteError<R>: From<C>,
		R: From<E>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
	#[track_caller]
	fn map_err_route<C, R>(self, ctx: C) -> Result<T, RouteError<R>>
	where
		RouteError<R>: From<C>,
		R: From<E>,
	{
		let location = Location::caller();
		self.map_err(|err| RouteError::from(ctx).with_source(err.into()).at(location))
	}
}

pub trait OptionExt<T> {
	fn map_err_route<C, R>(self, ctx: C) -> Result<T, RouteError<R>>
	where
		RouteError<R>: From<C>;
}

impl<T> OptionExt<T> for Option<T> {
	#[track_caller]
	fn map_err_route<C, R>(self, ctx: C) -> Result<T, RouteError<R>>
	where
		RouteError<R>: From<C>,
	{
		let location = Location::caller();
		self.ok_or_else(|| RouteError::from(ctx).at(location))
	}
}

/// Resolves the global state the router was built with. The router only
/// holds a weak reference so open connections do not keep it alive.
pub trait RequestGlobalExt<E> {
	fn get_global<G: Send + Sync + 'static>(&self) -> Result<Arc<G>, RouteError<E>>;
}

impl<E, B> RequestGlobalExt<E> for hyper::Request<B> {
	#[track_caller]
	fn get_global<G: Send + Sync + 'static>(&self) -> Result<Arc<G>, RouteError<E>> {
		let location = Location::caller();
		self.data::<Weak<G>>()
			.and_then(Weak::upgrade)
			.ok_or_else(|| RouteError::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to upgrade global state").at(location))
	}
}
