// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Request-level webhook verification.
//!
//! [`verify_webhook`] buffers the request body, verifies the delivery and
//! either forwards the request (with the same body bytes) or answers
//! `401 Unauthorized`. Every failure on the way, including a panic inside
//! verification, ends up as "Request is not authorized!".

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{
	body::{self, Body},
	extract::{Request, State},
	middleware::Next,
	response::{IntoResponse, Response},
};
use tracing::{debug, warn};
use zeplin_common_webhook::{
	RejectionReason, SignatureComparator, SignatureVerifier, VerificationResult,
};

use crate::headers::WebhookHeaders;
use crate::rejection::WebhookRejection;

/// Largest body buffered for verification (2 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// A [`SignatureVerifier`] with its comparator type erased.
trait DeliveryVerifier: Send + Sync {
	fn verify(&self, timestamp: i64, payload: &[u8], signature: &str) -> VerificationResult;
	fn expiration_window(&self) -> Option<Duration>;
	fn set_expiration_window(&mut self, window: Option<Duration>);
}

impl<C: SignatureComparator> DeliveryVerifier for SignatureVerifier<C> {
	fn verify(&self, timestamp: i64, payload: &[u8], signature: &str) -> VerificationResult {
		SignatureVerifier::verify(self, timestamp, payload, signature)
	}

	fn expiration_window(&self) -> Option<Duration> {
		SignatureVerifier::expiration_window(self)
	}

	fn set_expiration_window(&mut self, window: Option<Duration>) {
		SignatureVerifier::set_expiration_window(self, window)
	}
}

/// Shared state for [`verify_webhook`].
///
/// Clones share the same verifier, so changing the expiration window through
/// one handle is visible to all of them from the next request on.
#[derive(Clone)]
pub struct WebhookVerification {
	verifier: Arc<RwLock<Box<dyn DeliveryVerifier>>>,
	headers: WebhookHeaders,
	body_limit: usize,
}

impl fmt::Debug for WebhookVerification {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WebhookVerification")
			.field("expiration_window", &self.expiration_window())
			.field("headers", &self.headers)
			.field("body_limit", &self.body_limit)
			.finish()
	}
}

impl WebhookVerification {
	/// Wrap a verifier, whichever comparator it was built with.
	pub fn new<C>(verifier: SignatureVerifier<C>) -> Self
	where
		C: SignatureComparator + 'static,
	{
		let verifier: Box<dyn DeliveryVerifier> = Box::new(verifier);
		Self {
			verifier: Arc::new(RwLock::new(verifier)),
			headers: WebhookHeaders::default(),
			body_limit: DEFAULT_BODY_LIMIT,
		}
	}

	pub fn with_headers(mut self, headers: WebhookHeaders) -> Self {
		self.headers = headers;
		self
	}

	pub fn with_body_limit(mut self, limit: usize) -> Self {
		self.body_limit = limit;
		self
	}

	pub fn headers(&self) -> &WebhookHeaders {
		&self.headers
	}

	pub fn expiration_window(&self) -> Option<Duration> {
		self.verifier
			.read()
			.unwrap_or_else(|e| e.into_inner())
			.expiration_window()
	}

	/// Reconfigure the expiration window. In-flight verifications finish with
	/// the previous value.
	pub fn set_expiration_window(&self, window: Option<Duration>) {
		self.verifier
			.write()
			.unwrap_or_else(|e| e.into_inner())
			.set_expiration_window(window);
	}

	/// Verify one delivery from its headers and raw body.
	pub fn check(&self, headers: &axum::http::HeaderMap, body: &[u8]) -> VerificationResult {
		let timestamp = match self.headers.timestamp(headers) {
			Ok(ts) => ts,
			Err(e) => {
				debug!(error = %e, "Webhook delivery has no usable timestamp");
				return VerificationResult::Rejected(RejectionReason::Unauthorized);
			}
		};
		let signature = match self.headers.signature(headers) {
			Ok(sig) => sig,
			Err(e) => {
				debug!(error = %e, "Webhook delivery has no usable signature");
				return VerificationResult::Rejected(RejectionReason::Unauthorized);
			}
		};

		let verifier = self.verifier.read().unwrap_or_else(|e| e.into_inner());
		panic::catch_unwind(AssertUnwindSafe(|| verifier.verify(timestamp, body, signature)))
			.unwrap_or_else(|_| {
				warn!("Webhook verification panicked");
				VerificationResult::Rejected(RejectionReason::Unauthorized)
			})
	}
}

/// axum middleware that lets only verified deliveries through.
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn verify_webhook(
	State(verification): State<WebhookVerification>,
	request: Request,
	next: Next,
) -> Response {
	let (parts, body) = request.into_parts();

	let bytes = match body::to_bytes(body, verification.body_limit).await {
		Ok(bytes) => bytes,
		Err(e) => {
			warn!(error = %e, "Webhook rejected: failed to read body");
			return WebhookRejection(RejectionReason::Unauthorized).into_response();
		}
	};

	match verification.check(&parts.headers, &bytes) {
		VerificationResult::Accepted => {
			debug!(path = %parts.uri.path(), "Webhook delivery verified");
			next.run(Request::from_parts(parts, Body::from(bytes))).await
		}
		VerificationResult::Rejected(reason) => {
			warn!(path = %parts.uri.path(), reason = %reason, "Webhook rejected");
			WebhookRejection(reason).into_response()
		}
	}
}
