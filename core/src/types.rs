//! Response envelope and pagination shapes shared by every endpoint.
//!
//! # Design
//! Every backend reply is wrapped in `ApiResponse<T>`. The client returns the
//! envelope as it was received; whether the call succeeded at the
//! application level is the backend's `success` flag, not the HTTP status.

use serde::{Deserialize, Serialize};

use crate::error::EnvelopeFailure;

/// The uniform `{success, data?, message?, error?}` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// `error` when present, otherwise `message`.
    pub fn failure_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }

    /// Treat an unsuccessful envelope as an error. `Ok(None)` means the
    /// backend reported success without a payload (e.g. a delete).
    pub fn into_result(self) -> Result<Option<T>, EnvelopeFailure> {
        if self.success {
            Ok(self.data)
        } else {
            Err(EnvelopeFailure {
                error: self.error,
                message: self.message,
            })
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// `true` when `total_pages` matches `total`/`limit` and the page does
    /// not hold more than `limit` items.
    pub fn is_consistent(&self) -> bool {
        self.total_pages == total_pages_for(self.total, self.limit)
            && self.items.len() as u64 <= u64::from(self.limit)
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `ceil(total / limit)`, or 0 for a zero `limit`.
pub fn total_pages_for(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
