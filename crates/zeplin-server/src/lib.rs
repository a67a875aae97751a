// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Router and settings for the Zeplin webhook receiver.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
	body::Bytes,
	http::StatusCode,
	middleware,
	routing::{get, post},
	Router,
};
use clap::Parser;
use zeplin_server_webhook::{verify_webhook, WebhookVerification};

/// Zeplin webhook receiver.
#[derive(Parser, Debug, Clone)]
#[command(
	name = "zeplin-server",
	about = "Receives and verifies Zeplin webhook deliveries",
	version
)]
pub struct ServerArgs {
	/// Address to bind.
	#[arg(long, env = "ZEPLIN_SERVER_HOST", default_value = "0.0.0.0")]
	pub host: String,

	/// Port to listen on.
	#[arg(long, env = "ZEPLIN_SERVER_PORT", default_value_t = 8080)]
	pub port: u16,

	/// Route receiving webhook deliveries.
	#[arg(long, env = "ZEPLIN_SERVER_WEBHOOK_PATH", default_value = "/zeplin-webhook")]
	pub path: String,

	/// Expiration window in milliseconds; overrides ZEPLIN_WEBHOOK_EXPIRATION_MS.
	/// `0` disables the check.
	#[arg(long)]
	pub expiration_ms: Option<u64>,

	/// Emit logs as JSON.
	#[arg(long)]
	pub log_json: bool,
}

impl ServerArgs {
	pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
		format!("{}:{}", self.host, self.port).parse()
	}

	/// Expiration window requested on the command line, if any.
	pub fn expiration_override(&self) -> Option<Option<Duration>> {
		self
			.expiration_ms
			.map(|ms| (ms > 0).then(|| Duration::from_millis(ms)))
	}
}

async fn receive_delivery(body: Bytes) -> StatusCode {
	tracing::info!(bytes = body.len(), "Received Zeplin webhook delivery");
	StatusCode::NO_CONTENT
}

async fn health() -> &'static str {
	"ok"
}

/// Build the receiver router. Only the webhook route is verified.
pub fn create_router(verification: WebhookVerification, path: &str) -> Router {
	Router::new()
		.route(path, post(receive_delivery))
		.route_layer(middleware::from_fn_with_state(verification, verify_webhook))
		.route("/health", get(health))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_args() {
		let args = ServerArgs::parse_from(["zeplin-server"]);
		assert_eq!(args.port, 8080);
		assert_eq!(args.path, "/zeplin-webhook");
		assert!(!args.log_json);
		assert_eq!(args.expiration_override(), None);
	}

	#[test]
	fn test_expiration_override() {
		let args = ServerArgs::parse_from(["zeplin-server", "--expiration-ms", "60000"]);
		assert_eq!(
			args.expiration_override(),
			Some(Some(Duration::from_secs(60)))
		);

		let args = ServerArgs::parse_from(["zeplin-server", "--expiration-ms", "0"]);
		assert_eq!(args.expiration_override(), Some(None));
	}

	#[test]
	fn test_socket_addr() {
		let args = ServerArgs::parse_from(["zeplin-server", "--host", "127.0.0.1", "--port", "9000"]);
		assert_eq!(args.socket_addr().unwrap().to_string(), "127.0.0.1:9000");

		let args = ServerArgs::parse_from(["zeplin-server", "--host", "not a host"]);
		assert!(args.socket_addr().is_err());
	}
}
