//! Server-local calendar helpers.
//!
//! Daily quotas (games, quests) reset at the server's local midnight, while
//! every timestamp is stored in UTC. These helpers translate between the two.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};

fn local_midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        // midnight skipped by a DST transition
        .or_else(|| Local.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Returns the instant of the local midnight that starts the day containing `now`.
#[must_use]
pub fn local_day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.with_timezone(&Local).date_naive();
    local_midnight(date).unwrap_or(now)
}

/// Returns the last millisecond (23:59:59.999 local) of the day containing `now`.
#[must_use]
pub fn local_day_end(now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.with_timezone(&Local).date_naive();
    date.succ_opt()
        .and_then(local_midnight)
        .map_or(now, |next| next - Duration::milliseconds(1))
}
