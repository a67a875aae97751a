// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The [`SignatureVerifier`] and its verdict types.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::compare::{ConstantTimeComparator, SignatureComparator};
use crate::error::VerifierError;
use crate::secret::SecretKey;
use crate::signature::compute_signature;

/// Why a delivery was rejected.
///
/// The `Display` strings are part of the wire contract and are returned
/// verbatim to the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RejectionReason {
	/// The delivery timestamp is older than the expiration window.
	#[error("Request is expired!")]
	Expired,

	/// The signature did not match, or the request was malformed.
	#[error("Request is not authorized!")]
	Unauthorized,
}

/// Outcome of verifying one delivery.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
	Accepted,
	Rejected(RejectionReason),
}

impl VerificationResult {
	pub fn is_accepted(&self) -> bool {
		matches!(self, VerificationResult::Accepted)
	}

	pub fn into_result(self) -> Result<(), RejectionReason> {
		match self {
			VerificationResult::Accepted => Ok(()),
			VerificationResult::Rejected(reason) => Err(reason),
		}
	}
}

/// Options applied when verifying deliveries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifierOptions {
	/// How long after its delivery timestamp a request stays valid. `None`
	/// disables the freshness check.
	pub expiration_window: Option<Duration>,
}

impl VerifierOptions {
	pub fn with_expiration_window(mut self, window: Duration) -> Self {
		self.expiration_window = Some(window);
		self
	}
}

/// Decides whether a webhook delivery is authentic and fresh.
///
/// Holds only read-only state during verification, so one instance can be
/// shared across concurrent requests.
#[derive(Debug, Clone)]
pub struct SignatureVerifier<C = ConstantTimeComparator> {
	secret: SecretKey,
	expiration_window: Option<Duration>,
	comparator: C,
}

impl SignatureVerifier {
	/// Create a verifier using the constant-time comparator.
	///
	/// Returns [`VerifierError::EmptySecret`] for an empty secret.
	pub fn new(secret: impl Into<SecretKey>, options: VerifierOptions) -> Result<Self, VerifierError> {
		let secret = secret.into();
		if secret.is_empty() {
			return Err(VerifierError::EmptySecret);
		}

		Ok(Self {
			secret,
			expiration_window: options.expiration_window,
			comparator: ConstantTimeComparator,
		})
	}
}

impl<C: SignatureComparator> SignatureVerifier<C> {
	/// Replace the comparison primitive.
	pub fn with_comparator<D: SignatureComparator>(self, comparator: D) -> SignatureVerifier<D> {
		SignatureVerifier {
			secret: self.secret,
			expiration_window: self.expiration_window,
			comparator,
		}
	}

	pub fn expiration_window(&self) -> Option<Duration> {
		self.expiration_window
	}

	/// Change the expiration window for subsequent verifications.
	pub fn set_expiration_window(&mut self, window: Option<Duration>) {
		self.expiration_window = window;
	}

	/// Signature this verifier expects for the given delivery.
	pub fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> String {
		compute_signature(self.secret.expose(), timestamp, payload)
	}

	/// Whether a delivery sent at `timestamp` is stale right now.
	pub fn is_expired(&self, timestamp: i64) -> bool {
		self.is_expired_at(timestamp, now_millis())
	}

	/// Whether a delivery sent at `timestamp` is stale at `now` (both in
	/// milliseconds since the epoch).
	///
	/// A delivery expires once `timestamp + window` is strictly before `now`.
	/// Future-dated timestamps are not rejected.
	pub fn is_expired_at(&self, timestamp: i64, now: i64) -> bool {
		let Some(window) = self.expiration_window else {
			return false;
		};

		let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX);
		timestamp.saturating_add(window_ms) < now
	}

	/// Compare two hex-encoded signatures.
	///
	/// Both sides are decoded before comparing; invalid hex never matches.
	pub fn verify_signature(&self, claimed_hex: &str, expected_hex: &str) -> bool {
		let (Ok(claimed), Ok(expected)) = (hex::decode(claimed_hex), hex::decode(expected_hex)) else {
			return false;
		};

		self.comparator.equals(&claimed, &expected)
	}

	/// Verify a delivery against the current time.
	pub fn verify(&self, timestamp: i64, payload: &[u8], claimed_signature: &str) -> VerificationResult {
		self.verify_at(timestamp, payload, claimed_signature, now_millis())
	}

	/// Verify a delivery against `now`.
	///
	/// Expiration is checked first, so a stale delivery is reported as
	/// expired whether or not its signature is valid.
	pub fn verify_at(
		&self,
		timestamp: i64,
		payload: &[u8],
		claimed_signature: &str,
		now: i64,
	) -> VerificationResult {
		if self.is_expired_at(timestamp, now) {
			debug!(timestamp, now, "Webhook delivery expired");
			return VerificationResult::Rejected(RejectionReason::Expired);
		}

		let expected = self.compute_signature(timestamp, payload);
		if self.verify_signature(claimed_signature, &expected) {
			debug!(timestamp, "Webhook signature verified successfully");
			VerificationResult::Accepted
		} else {
			debug!(timestamp, "Webhook signature mismatch");
			VerificationResult::Rejected(RejectionReason::Unauthorized)
		}
	}
}

fn now_millis() -> i64 {
	chrono::Utc::now().timestamp_millis()
}
