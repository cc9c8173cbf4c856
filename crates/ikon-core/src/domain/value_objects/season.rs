//! Leaderboard seasons.
//!
//! Seasons are consecutive three-month windows counted from 2024-01-01 UTC.

use crate::{IkonError, IkonResult};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const EPOCH_YEAR: i32 = 2024;
const SEASON_LENGTH_MONTHS: u32 = 3;
const DAY_MS: i64 = 86_400_000;

/// Returns the season number containing `now` (first season is 1).
#[must_use]
pub fn season_number_at(now: DateTime<Utc>) -> u32 {
    let months = (now.year() - EPOCH_YEAR) * 12 + now.month0() as i32;
    if months < 0 {
        return 1;
    }
    months.unsigned_abs() / SEASON_LENGTH_MONTHS + 1
}

fn season_start(season_number: u32) -> Option<DateTime<Utc>> {
    let months = season_number.checked_sub(1)? * SEASON_LENGTH_MONTHS;
    let year = EPOCH_YEAR + i32::try_from(months / 12).ok()?;
    NaiveDate::from_ymd_opt(year, months % 12 + 1, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

/// Snapshot of the current season window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SeasonInfo {
    pub season_number: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub days_remaining: i64,
}

impl SeasonInfo {
    /// Describes the season containing `now`.
    pub fn at(now: DateTime<Utc>) -> IkonResult<Self> {
        let season_number = season_number_at(now);
        let start_date = season_start(season_number)
            .ok_or_else(|| IkonError::internal(format!("season {season_number} start out of range")))?;
        let end_date = season_start(season_number + 1)
            .ok_or_else(|| IkonError::internal(format!("season {season_number} end out of range")))?;
        let remaining_ms = (end_date - now).num_milliseconds().max(0);

        Ok(Self {
            season_number,
            start_date,
            end_date,
            days_remaining: (remaining_ms + DAY_MS - 1) / DAY_MS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_season_numbers() {
        assert_eq!(season_number_at(at(2024, 1, 1)), 1);
        assert_eq!(season_number_at(at(2024, 3, 31)), 1);
        assert_eq!(season_number_at(at(2024, 4, 1)), 2);
        assert_eq!(season_number_at(at(2025, 1, 15)), 5);
        assert_eq!(season_number_at(at(2023, 6, 1)), 1);
    }

    #[test]
    fn test_season_window() {
        let info = SeasonInfo::at(at(2024, 5, 10)).unwrap();
        assert_eq!(info.season_number, 2);
        assert_eq!(info.start_date, at(2024, 4, 1));
        assert_eq!(info.end_date, at(2024, 7, 1));
        assert_eq!(info.days_remaining, 52);
    }

    #[test]
    fn test_season_window_crosses_year() {
        let info = SeasonInfo::at(at(2024, 11, 30)).unwrap();
        assert_eq!(info.season_number, 4);
        assert_eq!(info.start_date, at(2024, 10, 1));
        assert_eq!(info.end_date, at(2025, 1, 1));
    }

    #[test]
    fn test_days_remaining_rounds_up() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let info = SeasonInfo::at(now).unwrap();
        assert_eq!(info.days_remaining, 1);
    }
}
