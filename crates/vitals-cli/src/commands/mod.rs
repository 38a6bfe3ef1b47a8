//! Command implementations.

pub mod config;
pub mod edit;
pub mod graph;
pub mod list;
pub mod log;
pub mod report;
pub mod set_calories;

use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Parse an optional RFC 3339 timestamp, defaulting to now.
fn resolve_timestamp(at: Option<&str>) -> Result<OffsetDateTime> {
    match at {
        Some(s) => OffsetDateTime::parse(s, &Rfc3339)
            .with_context(|| format!("invalid timestamp {:?} (expected RFC 3339)", s)),
        None => Ok(OffsetDateTime::now_utc()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_resolve_timestamp_parses_rfc3339() {
        let parsed = resolve_timestamp(Some("2024-03-15T09:30:00Z")).unwrap();
        assert_eq!(parsed, datetime!(2024-03-15 09:30:00 UTC));
    }

    #[test]
    fn test_resolve_timestamp_rejects_garbage() {
        assert!(resolve_timestamp(Some("yesterday")).is_err());
    }

    #[test]
    fn test_resolve_timestamp_defaults_to_now() {
        let before = OffsetDateTime::now_utc();
        let resolved = resolve_timestamp(None).unwrap();
        assert!(resolved >= before);
    }
}
