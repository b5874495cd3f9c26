//! Traits the global state of a service implements, so shared code can be
//! written against them instead of a concrete state type.

use crate::context::Context;

pub trait GlobalCtx {
	fn ctx(&self) -> &Context;
}

/// One section of the service configuration, selected by its type.
pub trait ConfigSection<C> {
	fn section(&self) -> &C;
}

pub trait GlobalConfig {
	/// `global.config::<ApiConfig>()`
	fn config<C>(&self) -> &C
	where
		Self: ConfigSection<C>,
	{
		ConfigSection::<C>::section(self)
	}
}

/// Implements [`GlobalConfig`] and one [`ConfigSection`] per listed section.
///
/// ```ignore
/// config_sections!(GlobalState {
/// 	ApiConfig => config.api,
/// 	JwtConfig => config.jwt,
/// });
/// ```
#[macro_export]
macro_rules! config_sections {
	($global:ty { $($section:ty => $($field:ident).+),* $(,)? }) => {
		impl $crate::global::GlobalConfig for $global {}

		$(
			impl $crate::global::ConfigSection<$section> for $global {
				fn section(&self) -> &$section {
					&self.$($field).+
				}
			}
		)*
	};
}
