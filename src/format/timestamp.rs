//! Human friendly timestamps for transaction lists.

use time::{
    Date, Duration, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

/// Clock time, e.g. "3:05 pm".
const CLOCK_FORMAT: &[BorrowedFormatItem] =
    format_description!("[hour repr:12 padding:none]:[minute] [period case:lower]");
/// Day and month, e.g. "5 Oct".
const DAY_MONTH_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:none] [month repr:short]");
/// Day, month and year, e.g. "5 Oct 2025".
const DAY_MONTH_YEAR_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:none] [month repr:short] [year]");
/// Long date, e.g. "Thursday, 15 October 2026".
const LONG_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[weekday], [day padding:none] [month repr:long] [year]");

/// Format the time of a transaction relative to `now`.
///
/// - Less than 24 hours ago: the clock time, e.g. "3:05 pm".
/// - 24 to 48 hours ago: "Yesterday".
/// - Older: the date, e.g. "5 Oct", with the year only if it differs from the
///   year of `now`.
///
/// Clock times and dates are shown in `local_offset`.
pub fn format_transaction_time(
    time: OffsetDateTime,
    now: OffsetDateTime,
    local_offset: UtcOffset,
) -> String {
    let elapsed = now - time;
    let local_time = time.to_offset(local_offset);

    if elapsed < Duration::hours(24) {
        format_or_fallback(local_time, CLOCK_FORMAT)
    } else if elapsed < Duration::hours(48) {
        "Yesterday".to_owned()
    } else if local_time.year() != now.to_offset(local_offset).year() {
        format_or_fallback(local_time, DAY_MONTH_YEAR_FORMAT)
    } else {
        format_or_fallback(local_time, DAY_MONTH_FORMAT)
    }
}

/// Format how long ago `time` was, truncated to whole hours or days.
///
/// Gives "Just now" under an hour, "<N>h ago" under a day and "<N>d ago"
/// otherwise. Times in the future count as "Just now".
pub fn format_relative_time(time: OffsetDateTime, now: OffsetDateTime) -> String {
    let hours = (now - time).whole_hours().max(0);

    if hours < 1 {
        "Just now".to_owned()
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{}d ago", hours / 24)
    }
}

/// Format a date in full, e.g. "Thursday, 15 October 2026".
pub fn format_long_date(date: Date) -> String {
    date.format(LONG_DATE_FORMAT).unwrap_or_else(|error| {
        tracing::warn!("could not format date {date}: {error}");
        date.to_string()
    })
}

fn format_or_fallback(time: OffsetDateTime, format: &[BorrowedFormatItem]) -> String {
    time.format(format).unwrap_or_else(|error| {
        tracing::warn!("could not format date time {time}: {error}");
        time.date().to_string()
    })
}
