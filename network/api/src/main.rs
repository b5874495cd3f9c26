use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use common::context::Context;
use common::{logging, signal};
use tokio::signal::unix::SignalKind;
use tokio::{select, time};

mod api;
mod config;
mod database;
mod global;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> Result<()> {
	let (config, files) = config::AppConfig::parse()?;

	logging::init(&config.logging.level, config.logging.mode)?;

	for file in &files {
		tracing::info!(file = file, "loaded config from file");
	}

	tracing::debug!("config: {:#?}", config);

	let store = global::setup_store(&config.database).await?;

	let (ctx, handler) = Context::new();

	let global = Arc::new(global::GlobalState::new(config, store, ctx));

	let api_future = tokio::spawn(api::run(global.clone()));

	// Listen on both sigint and sigterm and cancel the context when either is received
	let mut signal_handler = signal::SignalHandler::new()
		.with_signal(SignalKind::interrupt())?
		.with_signal(SignalKind::terminate())?;

	select! {
		r = api_future => tracing::error!("api stopped unexpectedly: {:?}", r),
		_ = signal_handler.recv() => tracing::info!("shutting down"),
	}

	// We cannot have a context in scope when we cancel the handler, otherwise it will deadlock.
	drop(global);

	tracing::info!("waiting for tasks to finish");

	select! {
		_ = time::sleep(Duration::from_secs(60)) => tracing::warn!("force shutting down"),
		_ = signal_handler.recv() => tracing::warn!("force shutting down"),
		_ = handler.cancel() => tracing::info!("shutting down"),
	}

	Ok(())
}
