use std::sync::Arc;

use common::context::Context;

use crate::config::{ApiConfig, AppConfig, DatabaseConfig, JwtConfig};
use crate::database::{MemoryStore, PgStore, Store};

pub trait GlobalStore {
	fn store(&self) -> &Arc<dyn Store>;
}

pub trait ApiGlobal:
	common::global::GlobalCtx
	+ common::global::ConfigSection<ApiConfig>
	+ common::global::ConfigSection<JwtConfig>
	+ common::global::GlobalConfig
	+ GlobalStore
	+ Send
	+ Sync
	+ 'static
{
}

impl<T> ApiGlobal for T where
	T: common::global::GlobalCtx
		+ common::global::ConfigSection<ApiConfig>
		+ common::global::ConfigSection<JwtConfig>
		+ common::global::GlobalConfig
		+ GlobalStore
		+ Send
		+ Sync
		+ 'static
{
}

pub struct GlobalState {
	pub config: AppConfig,
	pub ctx: Context,
	pub store: Arc<dyn Store>,
}

impl GlobalState {
	pub fn new(config: AppConfig, store: Arc<dyn Store>, ctx: Context) -> Self {
		Self { config, ctx, store }
	}
}

impl common::global::GlobalCtx for GlobalState {
	fn ctx(&self) -> &Context {
		&self.ctx
	}
}

common::config_sections!(GlobalState {
	ApiConfig => config.api,
	JwtConfig => config.jwt,
});

impl GlobalStore for GlobalState {
	fn store(&self) -> &Arc<dyn Store> {
		&self.store
	}
}

pub async fn setup_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn Store>> {
	if config.uri.starts_with("memory://") {
		tracing::warn!("using the in-memory store, data will be lost on shutdown");
		return Ok(Arc::new(MemoryStore::new()));
	}

	let store = PgStore::connect(config).await?;

	if config.migrate {
		tracing::info!("applying migrations");
		store.migrate().await?;
	}

	Ok(Arc::new(store))
}
