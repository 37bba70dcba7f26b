//! Query parameters for fill listing.

use crate::shared::Market;
use chrono::{DateTime, Utc};

/// Filters and paging for `GET /v1/fills`.
///
/// Parameters are emitted in a fixed order (`startTime`, `endTime`, `market`,
/// `limit`, `cursor`) and only when set; a zero `limit` counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillParams {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub market: Option<Market>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl FillParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_time(mut self, t: DateTime<Utc>) -> Self {
        self.start_time = Some(t);
        self
    }

    pub fn with_end_time(mut self, t: DateTime<Utc>) -> Self {
        self.end_time = Some(t);
        self
    }

    pub fn with_market(mut self, market: impl Into<Market>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// `?k=v&k=v`, or the empty string when nothing is set.
    pub fn to_query(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(t) = self.start_time {
            parts.push(format!("startTime={}", t.timestamp_millis()));
        }
        if let Some(t) = self.end_time {
            parts.push(format!("endTime={}", t.timestamp_millis()));
        }
        if let Some(market) = self.market.as_ref().filter(|m| !m.is_empty()) {
            parts.push(format!("market={}", urlencoding::encode(market.as_str())));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            parts.push(format!("limit={}", limit));
        }
        if let Some(cursor) = self.cursor.as_deref().filter(|c| !c.is_empty()) {
            parts.push(format!("cursor={}", urlencoding::encode(cursor)));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}
