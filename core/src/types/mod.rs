//! Domain DTOs for the expense API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently of
//! the mock-server crate; integration tests catch schema drift. Numeric ids
//! are sequential `i64`s. Money fields the server computes arrive as decimal
//! strings and stay strings here (they are display data); amounts the client
//! submits are plain `f64`s, matching what the API accepts.

pub mod account;
pub mod auth;
pub mod budget;
pub mod category;
pub mod expense;
pub mod recurring;
pub mod tag;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, UNKNOWN_ERROR};

/// The server's uniform response envelope.
///
/// Distinct from the client-side `Result`: a request can succeed at the
/// HTTP level and still carry `data: null` here, which resource services
/// surface as [`ApiError::NoData`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: ResponseStatus,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, treating a null `data` field as an error.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data.ok_or(ApiError::NoData)
    }

    /// Confirm the envelope reports success, discarding the payload. For
    /// endpoints whose `data` is null by design (deletes).
    pub fn ensure_success(self) -> Result<(), ApiError> {
        match self.status {
            ResponseStatus::Success => Ok(()),
            ResponseStatus::Error => Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            )),
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u32,
}

/// Category summary embedded in budgets, expenses, and recurring expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Account summary embedded in expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub id: i64,
    pub name: String,
    pub initial_balance: String,
}

/// Tag summary embedded in expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_data_unwraps() {
        let env: Envelope<i64> = serde_json::from_str(
            r#"{"status":"success","data":7,"message":null}"#,
        )
        .unwrap();
        assert_eq!(env.status, ResponseStatus::Success);
        assert_eq!(env.into_data().unwrap(), 7);
    }

    #[test]
    fn envelope_with_null_data_is_no_data() {
        let env: Envelope<i64> = serde_json::from_str(
            r#"{"status":"success","data":null,"message":"Deleted"}"#,
        )
        .unwrap();
        assert!(matches!(env.into_data(), Err(ApiError::NoData)));
    }

    #[test]
    fn delete_envelope_success_is_ok() {
        let env: Envelope<()> = serde_json::from_str(
            r#"{"status":"success","data":null,"message":"Account deleted"}"#,
        )
        .unwrap();
        assert!(env.ensure_success().is_ok());
    }

    #[test]
    fn delete_envelope_error_status_is_rejected() {
        let env: Envelope<()> = serde_json::from_str(
            r#"{"status":"error","data":null,"message":"boom"}"#,
        )
        .unwrap();
        let err = env.ensure_success().unwrap_err();
        assert_eq!(err.to_string(), "boom");

        let env: Envelope<()> =
            serde_json::from_str(r#"{"status":"error","data":null,"message":null}"#).unwrap();
        assert_eq!(env.ensure_success().unwrap_err().to_string(), UNKNOWN_ERROR);
    }

    #[test]
    fn page_deserializes() {
        let page: Page<TagRef> = serde_json::from_str(
            r#"{"items":[{"id":1,"name":"food"}],"total":1,"page":1,"size":10,"pages":1}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "food");
        assert_eq!(page.pages, 1);
    }
}
