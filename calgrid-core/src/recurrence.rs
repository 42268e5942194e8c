//! Recurrence expansion for repeating events.
//!
//! Expands a compact recurrence rule (every n weeks, months or years) into the
//! concrete dates falling inside one calendar month.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::CalGridResult;
use crate::event::{RecurrenceUnit, RecurringEvent, ShortMonthPolicy};
use crate::month::month_bounds;

/// Expand a recurring event into its occurrence dates within the given month.
///
/// An occurrence is included when it falls inside the month and inside the
/// rule's own window: on or after `start_date`, and on or before `end_date`
/// when one is set (`end_date` itself counts).
pub fn expand_in_month(
    rule: &RecurringEvent,
    year: i32,
    month: u32,
) -> CalGridResult<BTreeSet<NaiveDate>> {
    let (first_day, last_day) = month_bounds(year, month)?;

    // Intersect the month window with the rule's active window.
    let window_start = first_day.max(rule.start_date);
    let window_end = match rule.end_date {
        Some(end) => last_day.min(end),
        None => last_day,
    };

    let mut occurrences = BTreeSet::new();
    if window_start > window_end {
        return Ok(occurrences);
    }

    let start = rule.start_date;
    let interval = i64::from(rule.recurrence.interval);

    match rule.recurrence.unit {
        RecurrenceUnit::Week => {
            // Jump straight to the first occurrence on or after the window
            // start, then step through the window.
            let step = 7 * interval;
            let gap = (window_start - start).num_days();
            // gap is never negative here, so this is a plain ceiling division.
            let whole_steps = (gap + step - 1) / step;
            let mut date = start + Duration::days(whole_steps * step);

            while date <= window_end {
                occurrences.insert(date);
                date += Duration::days(step);
            }
        }
        RecurrenceUnit::Month => {
            // At most one candidate per month: the start date's day-of-month,
            // in months a whole number of intervals after the start month.
            let months_from_start =
                i64::from(year - start.year()) * 12 + i64::from(month) - i64::from(start.month());

            if months_from_start >= 0 && months_from_start % interval == 0 {
                let candidate = match NaiveDate::from_ymd_opt(year, month, start.day()) {
                    Some(date) => Some(date),
                    // The month is too short for the rule's day-of-month.
                    None => match rule.recurrence.short_month {
                        ShortMonthPolicy::Skip => None,
                        ShortMonthPolicy::Clamp => Some(last_day),
                    },
                };

                if let Some(date) = candidate {
                    if date >= window_start && date <= window_end {
                        occurrences.insert(date);
                    }
                }
            }
        }
        RecurrenceUnit::Year => {
            let years_from_start = i64::from(year - start.year());

            if years_from_start >= 0
                && years_from_start % interval == 0
                && month == start.month()
            {
                // A Feb 29 start has no candidate in non-leap years.
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, start.day()) {
                    if date >= window_start && date <= window_end {
                        occurrences.insert(date);
                    }
                }
            }
        }
    }

    Ok(occurrences)
}
