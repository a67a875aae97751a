// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Extraction of the signature and delivery timestamp headers.

use axum::http::{request, HeaderMap, HeaderName};
use thiserror::Error;

pub const SIGNATURE_HEADER: &str = "zeplin-signature";
pub const TIMESTAMP_HEADER: &str = "zeplin-delivery-timestamp";

/// Errors while reading webhook headers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
	#[error("missing {0} header")]
	Missing(HeaderName),

	#[error("{0} header is not valid ASCII")]
	NotAscii(HeaderName),

	#[error("{0} header is not an integer timestamp")]
	InvalidTimestamp(HeaderName),

	#[error("{0} header is not in canonical decimal form")]
	NonCanonicalTimestamp(HeaderName),
}

/// Names of the headers carrying the signature and delivery timestamp.
#[derive(Debug, Clone)]
pub struct WebhookHeaders {
	signature: HeaderName,
	timestamp: HeaderName,
}

impl Default for WebhookHeaders {
	fn default() -> Self {
		Self {
			signature: HeaderName::from_static(SIGNATURE_HEADER),
			timestamp: HeaderName::from_static(TIMESTAMP_HEADER),
		}
	}
}

impl WebhookHeaders {
	pub fn new(signature: HeaderName, timestamp: HeaderName) -> Self {
		Self {
			signature,
			timestamp,
		}
	}

	pub fn signature_name(&self) -> &HeaderName {
		&self.signature
	}

	pub fn timestamp_name(&self) -> &HeaderName {
		&self.timestamp
	}

	/// Read the claimed hex signature.
	pub fn signature<'a>(&self, headers: &'a HeaderMap) -> Result<&'a str, HeaderError> {
		let value = headers
			.get(&self.signature)
			.ok_or_else(|| HeaderError::Missing(self.signature.clone()))?;
		value
			.to_str()
			.map(str::trim)
			.map_err(|_| HeaderError::NotAscii(self.signature.clone()))
	}

	/// Read the delivery timestamp in milliseconds since the epoch.
	///
	/// The signature covers the decimal rendering of the timestamp, so only
	/// the canonical form is accepted: no sign prefix, no leading zeros.
	/// Surrounding whitespace is not part of the header value and is ignored.
	pub fn timestamp(&self, headers: &HeaderMap) -> Result<i64, HeaderError> {
		let value = headers
			.get(&self.timestamp)
			.ok_or_else(|| HeaderError::Missing(self.timestamp.clone()))?;
		let raw = value
			.to_str()
			.map_err(|_| HeaderError::NotAscii(self.timestamp.clone()))?
			.trim();
		let timestamp: i64 = raw
			.parse()
			.map_err(|_| HeaderError::InvalidTimestamp(self.timestamp.clone()))?;

		if timestamp.to_string() != raw {
			return Err(HeaderError::NonCanonicalTimestamp(self.timestamp.clone()));
		}
		Ok(timestamp)
	}

	/// Attach a delivery timestamp and signature to an outgoing request.
	pub fn sign_request(
		&self,
		builder: request::Builder,
		timestamp: i64,
		signature: &str,
	) -> request::Builder {
		builder
			.header(&self.timestamp, timestamp.to_string())
			.header(&self.signature, signature)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::http::{HeaderValue, Request};

	fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
		let mut map = HeaderMap::new();
		for (name, value) in pairs {
			map.insert(*name, HeaderValue::from_static(*value));
		}
		map
	}

	#[test]
	fn test_reads_default_headers() {
		let map = headers(&[
			(SIGNATURE_HEADER, "abcdef"),
			(TIMESTAMP_HEADER, "1700000000000"),
		]);
		let h = WebhookHeaders::default();
		assert_eq!(h.signature(&map), Ok("abcdef"));
		assert_eq!(h.timestamp(&map), Ok(1_700_000_000_000));
	}

	#[test]
	fn test_header_names_are_case_insensitive() {
		let mut map = HeaderMap::new();
		map.insert(
			HeaderName::from_bytes(b"Zeplin-Delivery-Timestamp").unwrap(),
			HeaderValue::from_static("42"),
		);
		assert_eq!(WebhookHeaders::default().timestamp(&map), Ok(42));
	}

	#[test]
	fn test_missing_headers() {
		let h = WebhookHeaders::default();
		let map = HeaderMap::new();
		assert_eq!(
			h.signature(&map),
			Err(HeaderError::Missing(HeaderName::from_static(SIGNATURE_HEADER)))
		);
		assert_eq!(
			h.timestamp(&map),
			Err(HeaderError::Missing(HeaderName::from_static(TIMESTAMP_HEADER)))
		);
	}

	#[test]
	fn test_non_integer_timestamp() {
		let h = WebhookHeaders::default();
		for raw in ["yesterday", "1.5", "", "99999999999999999999"] {
			let map = headers(&[(TIMESTAMP_HEADER, raw)]);
			assert!(matches!(
				h.timestamp(&map),
				Err(HeaderError::InvalidTimestamp(_))
			));
		}
	}

	#[test]
	fn test_non_canonical_timestamp_is_rejected() {
		let h = WebhookHeaders::default();
		for raw in ["+42", "0042", "+0042", "-0", "-042"] {
			let map = headers(&[(TIMESTAMP_HEADER, raw)]);
			assert_eq!(
				h.timestamp(&map),
				Err(HeaderError::NonCanonicalTimestamp(h.timestamp_name().clone())),
				"{raw}"
			);
		}
	}

	#[test]
	fn test_canonical_timestamps() {
		let h = WebhookHeaders::default();
		for (raw, expected) in [("0", 0), ("42", 42), ("-42", -42), (" 42 ", 42), ("\t42", 42)] {
			let map = headers(&[(TIMESTAMP_HEADER, raw)]);
			assert_eq!(h.timestamp(&map), Ok(expected), "{raw:?}");
		}
	}

	#[test]
	fn test_non_ascii_signature() {
		let mut map = HeaderMap::new();
		map.insert(
			SIGNATURE_HEADER,
			HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
		);
		assert!(matches!(
			WebhookHeaders::default().signature(&map),
			Err(HeaderError::NotAscii(_))
		));
	}

	#[test]
	fn test_custom_header_names() {
		let h = WebhookHeaders::new(
			HeaderName::from_static("x-signature"),
			HeaderName::from_static("x-timestamp"),
		);
		let map = headers(&[("x-signature", "ab"), ("x-timestamp", "7")]);
		assert_eq!(h.signature(&map), Ok("ab"));
		assert_eq!(h.timestamp(&map), Ok(7));
	}

	#[test]
	fn test_sign_request_sets_both_headers() {
		let h = WebhookHeaders::default();
		let request = h
			.sign_request(Request::post("/"), 123, "cafe")
			.body(())
			.unwrap();

		assert_eq!(h.timestamp(request.headers()), Ok(123));
		assert_eq!(h.signature(request.headers()), Ok("cafe"));
	}
}
