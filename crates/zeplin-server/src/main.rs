// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Zeplin webhook receiver binary.

use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zeplin_common_webhook::WebhookConfig;
use zeplin_server::{create_router, ServerArgs};
use zeplin_server_webhook::WebhookVerification;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = ServerArgs::parse();

	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
	let registry = tracing_subscriber::registry().with(filter);
	if args.log_json {
		registry.with(tracing_subscriber::fmt::layer().json()).init();
	} else {
		registry.with(tracing_subscriber::fmt::layer()).init();
	}

	let mut config = WebhookConfig::from_env()?;
	if let Some(window) = args.expiration_override() {
		config = config.with_expiration_window(window);
	}

	let expiration_window = config.expiration_window();
	let verifier = config.into_verifier()?;
	let app = create_router(WebhookVerification::new(verifier), &args.path)
		.layer(TraceLayer::new_for_http());

	let addr = args.socket_addr()?;
	tracing::info!(
		%addr,
		path = %args.path,
		expiration_window = ?expiration_window,
		"starting zeplin-server"
	);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
