//! Async API client for the personal expense-tracking service.
//!
//! # Overview
//! [`ApiClient`] is a generic typed facade over the REST API: it builds
//! URLs, injects headers (including the bearer token installed after
//! login), serializes JSON, and normalizes every failure — transport
//! faults, non-2xx statuses, undecodable bodies — into [`ApiError`].
//! Resource services ([`ApiClient::accounts`], [`ApiClient::budgets`], …)
//! fix the path prefix and payload types per resource and unwrap the
//! server's `{status, data, message}` envelope.
//!
//! # Design
//! - Every call returns `Result<T, ApiError>`; the facade never panics on
//!   ordinary failures, and `ApiError`'s `Display` is the user-facing
//!   message (the server's `detail` field when it provided one).
//! - The client is a cheap `Arc` handle configured once; clones share the
//!   bearer-token slot written by login/logout.
//! - DTOs are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod services;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{error_message, ApiError, UNKNOWN_ERROR};
pub use http::Query;
pub use types::{Envelope, Page, ResponseStatus};
