//! Calendar-day arithmetic for due dates.

use chrono::{DateTime, Days, Duration, NaiveDateTime, Offset, TimeZone};

/// Add `days` calendar days to the local date of `now`, keeping its local time of day.
///
/// Unlike adding `days * 24h`, this lands on the same wall-clock time across daylight
/// saving transitions. An ambiguous local time resolves to the earlier instant; a local
/// time that falls into a gap is shifted forward by the length of the gap.
///
/// Returns `None` for negative `days` or when the result leaves chrono's range.
pub fn add_calendar_days<Tz: TimeZone>(now: &DateTime<Tz>, days: i64) -> Option<DateTime<Tz>> {
    let days = u64::try_from(days).ok()?;
    let target = now.naive_local().checked_add_days(Days::new(days))?;
    let tz = now.timezone();

    match tz.from_local_datetime(&target).earliest() {
        Some(resolved) => Some(resolved),
        None => resolve_gap(&tz, target),
    }
}

/// Interpret a nonexistent local time with the offset in effect before the gap.
fn resolve_gap<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    let before = local.checked_sub_signed(Duration::days(1))?;
    let offset = tz.from_local_datetime(&before).earliest()?.offset().fix();
    let utc = local.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
    Some(tz.from_utc_datetime(&utc))
}
