// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP adapter for Zeplin webhook verification.
//!
//! # Example
//!
//! ```ignore
//! use axum::{middleware, routing::post, Router};
//! use zeplin_server_webhook::{verify_webhook, WebhookVerification};
//!
//! let verification = WebhookVerification::new(verifier);
//! Router::new()
//!     .route("/zeplin-webhook", post(handle_delivery))
//!     .route_layer(middleware::from_fn_with_state(verification, verify_webhook));
//! ```

pub mod headers;
pub mod middleware;
pub mod rejection;

pub use headers::{HeaderError, WebhookHeaders, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use middleware::{verify_webhook, WebhookVerification, DEFAULT_BODY_LIMIT};
pub use rejection::{RejectionBody, WebhookRejection};
