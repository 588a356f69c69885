//! Success envelopes shared across resources.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Message Response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessageResponse {
    pub status: String,
    pub status_code: u16,
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            status_code: 200,
            message: message.into(),
        }
    }

    pub(crate) fn created(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            status_code: 201,
            message: message.into(),
        }
    }
}
