#[derive(thiserror::Error, Debug)]
pub enum RouterError<E> {
	/// The route or a middleware failed and no error handler was in scope.
	#[error("unhandled error: {0:?}")]
	Unhandled(E),
	/// Nothing matched, not even a `not_found` route.
	#[error("route not found")]
	NotFound,
}
