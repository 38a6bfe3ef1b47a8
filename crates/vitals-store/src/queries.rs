//! Query builder for stored samples.

use time::OffsetDateTime;

/// Fluent filter for [`Store::query_samples`](crate::Store::query_samples).
///
/// All filters are optional and chain in any order. By default results are
/// ordered newest first with no time bounds or limit.
///
/// # Example
///
/// ```
/// use vitals_store::SampleQuery;
/// use time::{Duration, OffsetDateTime};
///
/// let yesterday = OffsetDateTime::now_utc() - Duration::hours(24);
/// let query = SampleQuery::new().since(yesterday).limit(50);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SampleQuery {
    /// Include only samples at or after this time.
    pub since: Option<OffsetDateTime>,
    /// Include only samples before this time (exclusive).
    pub until: Option<OffsetDateTime>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Order by timestamp descending (newest first). Default: true.
    pub newest_first: bool,
}

impl SampleQuery {
    /// Create a query with default settings (all samples, newest first).
    pub fn new() -> Self {
        Self {
            newest_first: true,
            ..Default::default()
        }
    }

    /// Filter to samples recorded at or after this time.
    pub fn since(mut self, time: OffsetDateTime) -> Self {
        self.since = Some(time);
        self
    }

    /// Filter to samples recorded strictly before this time.
    pub fn until(mut self, time: OffsetDateTime) -> Self {
        self.until = Some(time);
        self
    }

    /// Limit the number of results returned.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Order results oldest first (chronological).
    pub fn oldest_first(mut self) -> Self {
        self.newest_first = false;
        self
    }

    /// Build the WHERE clause and its parameters (epoch milliseconds).
    pub(crate) fn build_where(&self) -> (String, Vec<i64>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(since) = self.since {
            conditions.push("timestamp >= ?");
            params.push(crate::store::to_millis(since));
        }

        if let Some(until) = self.until {
            conditions.push("timestamp < ?");
            params.push(crate::store::to_millis(until));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, params)
    }

    /// Build the trailing ORDER BY / LIMIT clause.
    pub(crate) fn build_tail(&self) -> String {
        let order = if self.newest_first { "DESC" } else { "ASC" };
        let mut tail = format!("ORDER BY timestamp {}", order);
        if let Some(limit) = self.limit {
            tail.push_str(&format!(" LIMIT {}", limit));
        }
        tail
    }
}
