use std::str::FromStr;

use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload::{self, Handle};
use tracing_subscriber::{fmt, EnvFilter, Registry};

static RELOAD_HANDLE: OnceCell<Handle<EnvFilter, Registry>> = OnceCell::new();

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	#[default]
	Default,
	Json,
	Pretty,
	Compact,
}

#[derive(thiserror::Error, Debug)]
pub enum LoggingError {
	#[error("invalid logging mode: {0}")]
	InvalidMode(String),
	#[error("failed to parse log level: {0}")]
	InvalidLevel(#[from] tracing_subscriber::filter::ParseError),
	#[error("failed to init logger: {0}")]
	Init(#[from] tracing_subscriber::util::TryInitError),
	#[error("failed to reload logger: {0}")]
	Reload(#[from] tracing_subscriber::reload::Error),
}

impl FromStr for Mode {
	type Err = LoggingError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"default" => Ok(Self::Default),
			"json" => Ok(Self::Json),
			"pretty" => Ok(Self::Pretty),
			"compact" => Ok(Self::Compact),
			_ => Err(LoggingError::InvalidMode(s.to_string())),
		}
	}
}

/// Installs the global subscriber on the first call. Later calls only swap
/// the level filter, the mode cannot be changed once set.
pub fn init(level: &str, mode: Mode) -> Result<(), LoggingError> {
	let reload = RELOAD_HANDLE.get_or_try_init(|| {
		let (filter, handle) = reload::Layer::new(EnvFilter::from_str(level)?);

		let registry = tracing_subscriber::registry().with(filter);
		let layer = fmt::layer().with_line_number(true).with_file(true);

		match mode {
			Mode::Default => registry.with(layer).try_init(),
			Mode::Json => registry.with(layer.json()).try_init(),
			Mode::Pretty => registry.with(layer.pretty()).try_init(),
			Mode::Compact => registry.with(layer.compact()).try_init(),
		}
		.map(|_| handle)
		.map_err(LoggingError::from)
	})?;

	reload.reload(EnvFilter::from_str(level)?)?;

	Ok(())
}
