// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use zeplin_common_webhook::RejectionReason;

/// JSON body returned with a rejected delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionBody {
	pub message: String,
}

/// A rejected delivery, rendered as `401 Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookRejection(pub RejectionReason);

impl From<RejectionReason> for WebhookRejection {
	fn from(reason: RejectionReason) -> Self {
		Self(reason)
	}
}

impl IntoResponse for WebhookRejection {
	fn into_response(self) -> Response {
		let body = RejectionBody {
			message: self.0.to_string(),
		};
		(StatusCode::UNAUTHORIZED, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn renders_unauthorized_with_message() {
		let response = WebhookRejection(RejectionReason::Expired).into_response();
		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
		assert_eq!(body, serde_json::json!({ "message": "Request is expired!" }));
	}

	#[test]
	fn body_serializes_message_only() {
		let body = RejectionBody {
			message: RejectionReason::Unauthorized.to_string(),
		};
		assert_eq!(
			serde_json::to_string(&body).unwrap(),
			r#"{"message":"Request is not authorized!"}"#
		);
	}
}
