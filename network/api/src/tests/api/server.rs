use std::time::Duration;

use common::prelude::FutureTimeout;

use crate::api;
use crate::config::{ApiConfig, AppConfig};
use crate::tests::global::mock_global_state;

#[tokio::test]
async fn test_run_stops_on_cancel() {
	let (global, _, handler) = mock_global_state(AppConfig {
		api: ApiConfig {
			bind_address: "127.0.0.1:0".parse().unwrap(),
			..Default::default()
		},
		..Default::default()
	});

	let handle = tokio::spawn(api::run(global.clone()));

	// The server task holds the only remaining reference once this is dropped.
	drop(global);

	handler
		.cancel()
		.timeout(Duration::from_secs(1))
		.await
		.expect("failed to cancel context");

	handle
		.timeout(Duration::from_secs(1))
		.await
		.unwrap()
		.unwrap()
		.unwrap();
}
