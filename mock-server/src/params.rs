//! Shared query-parameter shapes.

use serde::Deserialize;

/// Pagination parameters accepted by every listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn size(&self) -> u32 {
        self.size.unwrap_or(10)
    }

    pub fn descending(&self) -> bool {
        self.order.as_deref() == Some("desc")
    }
}

/// Year/month pair for budget status and overview.
#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
}
