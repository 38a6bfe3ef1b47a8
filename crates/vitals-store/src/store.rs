//! Main store implementation.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

use vitals_types::{DayAggregate, MetricKind, NewSample, Sample};

use crate::error::{Error, Result};
use crate::queries::SampleQuery;
use crate::schema;

/// SQLite-based store for health samples.
///
/// One table per metric kind, all sharing the `(id, timestamp, value)`
/// shape; the calorie table additionally carries the optional name label.
/// Implements [`vitals_engine::SampleStore`], so it can sit behind the
/// aggregation engine directly.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        schema::initialize(&conn)?;

        Ok(Self { conn })
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    // === Sample operations ===

    /// Insert a sample, returning its assigned id.
    pub fn insert_sample(&self, kind: MetricKind, sample: &NewSample) -> Result<i64> {
        let timestamp = to_millis(sample.timestamp);

        match kind {
            MetricKind::Calories => self.conn.execute(
                "INSERT INTO calorie_samples (timestamp, calories, name) VALUES (?1, ?2, ?3)",
                params![timestamp, sample.value, sample.name],
            )?,
            _ => self.conn.execute(
                &format!(
                    "INSERT INTO {} (timestamp, {}) VALUES (?1, ?2)",
                    table(kind),
                    value_column(kind)
                ),
                params![timestamp, sample.value],
            )?,
        };

        Ok(self.conn.last_insert_rowid())
    }

    /// Replace the sample with `sample.id`.
    pub fn update_sample(&self, kind: MetricKind, sample: &Sample) -> Result<()> {
        let timestamp = to_millis(sample.timestamp);

        let changed = match kind {
            MetricKind::Calories => self.conn.execute(
                "UPDATE calorie_samples SET timestamp = ?2, calories = ?3, name = ?4 WHERE id = ?1",
                params![sample.id, timestamp, sample.value, sample.name],
            )?,
            _ => self.conn.execute(
                &format!(
                    "UPDATE {} SET timestamp = ?2, {} = ?3 WHERE id = ?1",
                    table(kind),
                    value_column(kind)
                ),
                params![sample.id, timestamp, sample.value],
            )?,
        };

        if changed == 0 {
            return Err(Error::SampleNotFound {
                kind,
                id: sample.id,
            });
        }
        Ok(())
    }

    /// Delete a sample by id.
    pub fn delete_sample(&self, kind: MetricKind, id: i64) -> Result<()> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", table(kind)),
            params![id],
        )?;

        if changed == 0 {
            return Err(Error::SampleNotFound { kind, id });
        }
        Ok(())
    }

    /// Delete all samples recorded before `cutoff`, returning the count.
    pub fn delete_samples_before(&self, kind: MetricKind, cutoff: OffsetDateTime) -> Result<u64> {
        let deleted = self.conn.execute(
            &format!("DELETE FROM {} WHERE timestamp < ?1", table(kind)),
            params![to_millis(cutoff)],
        )?;

        debug!("Deleted {} old {} samples", deleted, kind);
        Ok(deleted as u64)
    }

    /// Query samples with filters.
    pub fn query_samples(&self, kind: MetricKind, query: &SampleQuery) -> Result<Vec<Sample>> {
        let (where_clause, params) = query.build_where();
        let sql = format!(
            "SELECT id, timestamp, {} AS value, {} AS name FROM {} {} {}",
            value_column(kind),
            name_column(kind),
            table(kind),
            where_clause,
            query.build_tail()
        );

        debug!("Executing query: {}", sql);

        let params_ref: Vec<&dyn rusqlite::ToSql> =
            params.iter().map(|p| p as &dyn rusqlite::ToSql).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let samples = stmt
            .query_map(params_ref.as_slice(), |row| {
                Ok(Sample {
                    id: row.get(0)?,
                    timestamp: timestamp_from_millis(row.get(1)?, 1)?,
                    value: row.get(2)?,
                    name: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(samples)
    }

    /// All samples of a kind, newest first.
    pub fn list_samples(&self, kind: MetricKind) -> Result<Vec<Sample>> {
        self.query_samples(kind, &SampleQuery::new())
    }

    /// Count samples of a kind.
    pub fn count_samples(&self, kind: MetricKind) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table(kind)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

// Range aggregates
impl Store {
    /// Sum of sample values in `[start, end)`.
    pub fn sum_in_range(
        &self,
        kind: MetricKind,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<f64> {
        let sum: f64 = self.conn.query_row(
            &format!(
                "SELECT COALESCE(SUM({}), 0) FROM {} WHERE timestamp >= ?1 AND timestamp < ?2",
                value_column(kind),
                table(kind)
            ),
            params![to_millis(start), to_millis(end)],
            |row| row.get(0),
        )?;
        Ok(sum)
    }

    /// Average of sample values in `[start, end)`, 0 when empty.
    pub fn average_in_range(
        &self,
        kind: MetricKind,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<f64> {
        let avg: f64 = self.conn.query_row(
            &format!(
                "SELECT COALESCE(AVG({}), 0) FROM {} WHERE timestamp >= ?1 AND timestamp < ?2",
                value_column(kind),
                table(kind)
            ),
            params![to_millis(start), to_millis(end)],
            |row| row.get(0),
        )?;
        Ok(avg)
    }

    /// Distinct UTC calendar days in `[start, end)` with at least one
    /// sample. Derived from timestamps, so a zero-valued sample still
    /// counts its day.
    pub fn days_with_data(
        &self,
        kind: MetricKind,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<u32> {
        let days: i64 = self.conn.query_row(
            &format!(
                "SELECT COUNT(DISTINCT strftime('%Y-%m-%d', timestamp / 1000, 'unixepoch'))
                 FROM {} WHERE timestamp >= ?1 AND timestamp < ?2",
                table(kind)
            ),
            params![to_millis(start), to_millis(end)],
            |row| row.get(0),
        )?;
        Ok(days as u32)
    }

    /// Per-day aggregates in `[start, end)`, keyed by UTC calendar day.
    /// Sums for calories and exercise, averages for weight.
    pub fn daily_aggregates(
        &self,
        kind: MetricKind,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<BTreeMap<Date, f64>> {
        let agg = match kind.day_aggregate() {
            DayAggregate::Sum => "SUM",
            DayAggregate::Average => "AVG",
        };

        let mut stmt = self.conn.prepare(&format!(
            "SELECT strftime('%Y-%m-%d', timestamp / 1000, 'unixepoch') AS day, {}({}) AS value
             FROM {} WHERE timestamp >= ?1 AND timestamp < ?2
             GROUP BY day ORDER BY day",
            agg,
            value_column(kind),
            table(kind)
        ))?;

        let rows = stmt.query_map(params![to_millis(start), to_millis(end)], |row| {
            let day: String = row.get(0)?;
            let value: f64 = row.get(1)?;
            Ok((day, value))
        })?;

        let mut aggregates = BTreeMap::new();
        for row in rows {
            let (day, value) = row?;
            aggregates.insert(parse_day_key(&day)?, value);
        }

        Ok(aggregates)
    }
}

// Calorie name operations
impl Store {
    /// The most recent calorie sample under `name` (case-insensitive) with
    /// a non-zero value, if any.
    pub fn most_recent_nonzero_calories(&self, name: &str) -> Result<Option<Sample>> {
        let sample = self
            .conn
            .query_row(
                "SELECT id, timestamp, calories AS value, name FROM calorie_samples
                 WHERE name = ?1 COLLATE NOCASE AND calories > 0
                 ORDER BY timestamp DESC LIMIT 1",
                params![name],
                |row| {
                    Ok(Sample {
                        id: row.get(0)?,
                        timestamp: timestamp_from_millis(row.get(1)?, 1)?,
                        value: row.get(2)?,
                        name: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(sample)
    }

    /// Overwrite the calorie value of every sample with exactly this name,
    /// returning the number of rows changed.
    pub fn set_calories_for_name(&self, name: &str, calories: f64) -> Result<u64> {
        let changed = self.conn.execute(
            "UPDATE calorie_samples SET calories = ?2 WHERE name = ?1",
            params![name, calories],
        )?;

        debug!("Set calories={} on {} samples named {:?}", calories, changed, name);
        Ok(changed as u64)
    }
}

/// Table name for a metric kind.
fn table(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Weight => "weight_samples",
        MetricKind::Calories => "calorie_samples",
        MetricKind::Exercise => "exercise_samples",
    }
}

/// Value column for a metric kind.
fn value_column(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Weight => "pounds",
        MetricKind::Calories => "calories",
        MetricKind::Exercise => "minutes",
    }
}

/// Name column expression; only calorie samples carry a label.
fn name_column(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Calories => "name",
        _ => "NULL",
    }
}

/// Convert a timestamp to the epoch milliseconds the schema stores.
pub(crate) fn to_millis(timestamp: OffsetDateTime) -> i64 {
    (timestamp.unix_timestamp_nanos() / 1_000_000) as i64
}

fn timestamp_from_millis(millis: i64, column: usize) -> rusqlite::Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, Box::new(e)))
}

fn parse_day_key(day: &str) -> Result<Date> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(day, &format).map_err(|source| Error::InvalidDayKey {
        value: day.to_string(),
        source,
    })
}

// The engine's store interface, backed by the methods above.
impl vitals_engine::SampleStore for Store {
    fn insert(&self, kind: MetricKind, sample: NewSample) -> vitals_engine::Result<i64> {
        Ok(self.insert_sample(kind, &sample)?)
    }

    fn update(&self, kind: MetricKind, sample: &Sample) -> vitals_engine::Result<()> {
        Ok(self.update_sample(kind, sample)?)
    }

    fn delete(&self, kind: MetricKind, id: i64) -> vitals_engine::Result<()> {
        Ok(self.delete_sample(kind, id)?)
    }

    fn delete_before(
        &self,
        kind: MetricKind,
        cutoff: OffsetDateTime,
    ) -> vitals_engine::Result<u64> {
        Ok(self.delete_samples_before(kind, cutoff)?)
    }

    fn list_all(&self, kind: MetricKind) -> vitals_engine::Result<Vec<Sample>> {
        Ok(self.list_samples(kind)?)
    }

    fn sum_in_range(
        &self,
        kind: MetricKind,
        window: vitals_engine::Window,
    ) -> vitals_engine::Result<f64> {
        Ok(self.sum_in_range(kind, window.start(), window.end())?)
    }

    fn average_in_range(
        &self,
        kind: MetricKind,
        window: vitals_engine::Window,
    ) -> vitals_engine::Result<f64> {
        Ok(self.average_in_range(kind, window.start(), window.end())?)
    }

    fn days_with_data(
        &self,
        kind: MetricKind,
        window: vitals_engine::Window,
    ) -> vitals_engine::Result<u32> {
        Ok(self.days_with_data(kind, window.start(), window.end())?)
    }

    fn daily_aggregates(
        &self,
        kind: MetricKind,
        window: vitals_engine::Window,
    ) -> vitals_engine::Result<BTreeMap<Date, f64>> {
        Ok(self.daily_aggregates(kind, window.start(), window.end())?)
    }

    fn most_recent_nonzero_calories(&self, name: &str) -> vitals_engine::Result<Option<Sample>> {
        Ok(Store::most_recent_nonzero_calories(self, name)?)
    }

    fn set_calories_for_name(&self, name: &str, calories: f64) -> vitals_engine::Result<u64> {
        Ok(Store::set_calories_for_name(self, name, calories)?)
    }
}
