//! Typed resource services over the client facade.
//!
//! # Design
//! Each service is a borrowed view of an [`ApiClient`] that fixes a path
//! prefix and the payload/response types for one resource. Services unwrap
//! the server envelope after the facade succeeds, so a success response
//! whose `data` is null surfaces as [`ApiError::NoData`](crate::ApiError),
//! and any facade error propagates unchanged with `?`.

pub mod accounts;
pub mod auth;
pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod recurring;
pub mod tags;

use crate::ApiClient;

impl ApiClient {
    pub fn accounts(&self) -> accounts::Accounts<'_> {
        accounts::Accounts { client: self }
    }

    pub fn auth(&self) -> auth::Auth<'_> {
        auth::Auth { client: self }
    }

    pub fn budgets(&self) -> budgets::Budgets<'_> {
        budgets::Budgets { client: self }
    }

    pub fn categories(&self) -> categories::Categories<'_> {
        categories::Categories { client: self }
    }

    pub fn expenses(&self) -> expenses::Expenses<'_> {
        expenses::Expenses { client: self }
    }

    pub fn recurring(&self) -> recurring::Recurring<'_> {
        recurring::Recurring { client: self }
    }

    pub fn tags(&self) -> tags::Tags<'_> {
        tags::Tags { client: self }
    }
}
