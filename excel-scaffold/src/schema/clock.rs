//! Migration timestamp sequencing
//!
//! Laravel orders migrations by their file-name prefix. Each table in a run
//! gets a distinct prefix one second after the previous one, and a run never
//! reuses a prefix already present in the migrations directory.

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use std::path::Path;

use crate::error::{Result, ScaffoldError};

/// File-name prefix format, e.g. `2024_01_15_103000`
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

const TIMESTAMP_LEN: usize = 17;

/// Hands out strictly increasing migration timestamps
#[derive(Debug, Clone)]
pub struct MigrationClock {
    next: NaiveDateTime,
}

impl MigrationClock {
    /// Clock whose first tick is `base`
    #[must_use]
    pub fn starting_at(base: NaiveDateTime) -> Self {
        Self {
            next: base.with_nanosecond(0).unwrap_or(base),
        }
    }

    /// Clock starting at the configured base, or the local time when unset
    ///
    /// The first tick is moved past the newest migration already in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a valid timestamp or `dir` cannot
    /// be listed.
    pub fn for_directory(dir: &Path, base: Option<&str>) -> Result<Self> {
        let base = match base {
            Some(value) => parse_timestamp(value)?,
            None => Local::now().naive_local(),
        };
        let mut clock = Self::starting_at(base);

        if let Some(latest) = latest_in(dir)? {
            let floor = latest + Duration::seconds(1);
            if floor > clock.next {
                tracing::debug!(
                    latest = %latest.format(TIMESTAMP_FORMAT),
                    "advancing past existing migrations"
                );
                clock.next = floor;
            }
        }

        Ok(clock)
    }

    /// Next timestamp, formatted for a file name
    pub fn tick(&mut self) -> String {
        let stamp = self.next.format(TIMESTAMP_FORMAT).to_string();
        self.next += Duration::seconds(1);
        stamp
    }
}

/// Parse a `YYYY_MM_DD_HHMMSS` timestamp
///
/// # Errors
///
/// Returns [`ScaffoldError::InvalidTimestamp`] if the value does not match.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| ScaffoldError::InvalidTimestamp(value.to_string()))
}

/// Newest timestamp prefix among files in `dir`
///
/// A missing directory has no migrations. Files without a timestamp prefix
/// are ignored.
///
/// # Errors
///
/// Returns an error if `dir` exists but cannot be read.
pub fn latest_in(dir: &Path) -> Result<Option<NaiveDateTime>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let entries = std::fs::read_dir(dir).map_err(|e| ScaffoldError::io(dir, e))?;
    let mut latest = None;
    for entry in entries {
        let entry = entry.map_err(|e| ScaffoldError::io(dir, e))?;
        let name = entry.file_name();
        let Some(prefix) = name.to_str().and_then(|n| n.get(..TIMESTAMP_LEN)) else {
            continue;
        };
        if let Ok(stamp) = NaiveDateTime::parse_from_str(prefix, TIMESTAMP_FORMAT) {
            latest = latest.max(Some(stamp));
        }
    }

    Ok(latest)
}
