use chrono::{Duration, NaiveDate};

/// Compute the calendar days that still need a backup, oldest first.
///
/// Returns every day strictly between `latest` and `today`. `today` itself is
/// never included because its data is still accumulating; with no prior
/// backup the starting point defaults to two days back, so a first run backs
/// up exactly yesterday instead of attempting an unbounded historical
/// backfill.
pub fn missing_days(latest: Option<NaiveDate>, today: NaiveDate) -> Vec<NaiveDate> {
    let latest = latest.unwrap_or_else(|| today - Duration::days(2));

    let delta = (today - latest).num_days();
    if delta < 1 {
        return Vec::new();
    }

    (1..delta).map(|i| latest + Duration::days(i)).collect()
}
