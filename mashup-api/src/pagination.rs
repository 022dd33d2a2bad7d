//! List window parsing for collection endpoints
//!
//! `GET /audio-assets/?skip=N&limit=M` with `skip` defaulting to 0 and `limit`
//! to 100. Negative values are rejected; `limit` is clamped to 1000.

use mashup_common::db::models::DEFAULT_LIST_LIMIT;
use mashup_common::{ListWindow, Result};
use serde::Deserialize;

/// Query parameters for list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    /// Number of records to skip
    #[serde(default)]
    pub skip: i64,

    /// Maximum number of records to return
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

impl ListQuery {
    /// Convert into a validated repository window
    pub fn into_window(self) -> Result<ListWindow> {
        ListWindow::new(self.skip, self.limit)
    }
}
