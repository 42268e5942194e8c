//! Event types placed on the calendar.
//!
//! These are the validated, strongly typed forms. The raw on-disk schema lives
//! in `config` and is converted into these types by a single validation pass.

use chrono::NaiveDate;

/// Unit of a recurrence step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceUnit {
    Week,
    Month,
    Year,
}

/// What a monthly rule does when the target month is shorter than the rule's
/// day-of-month (e.g. a day-31 rule hitting February).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortMonthPolicy {
    /// Drop the occurrence for that month.
    #[default]
    Skip,
    /// Move the occurrence to the month's last day.
    Clamp,
}

impl ShortMonthPolicy {
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.eq_ignore_ascii_case("skip") {
            Ok(Self::Skip)
        } else if s.eq_ignore_ascii_case("clamp") {
            Ok(Self::Clamp)
        } else {
            Err(format!("Invalid short_month '{s}': use 'skip' or 'clamp'"))
        }
    }
}

/// A compact recurrence rule: every `interval` weeks, months or years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub unit: RecurrenceUnit,
    pub interval: u32,
    pub short_month: ShortMonthPolicy,
}

impl Recurrence {
    /// Parse the compact `<int><w|m|y>` form (`1w`, `2M`, `10y`). The unit
    /// letter is case-insensitive.
    pub fn parse(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        let err = || format!("Invalid recurrence '{s}': use '<n>w', '<n>m' or '<n>y'");

        let Some(unit_char) = trimmed.chars().last() else {
            return Err(err());
        };
        let unit = match unit_char.to_ascii_lowercase() {
            'w' => RecurrenceUnit::Week,
            'm' => RecurrenceUnit::Month,
            'y' => RecurrenceUnit::Year,
            _ => return Err(err()),
        };

        let count = &trimmed[..trimmed.len() - unit_char.len_utf8()];
        let interval: u32 = count.parse().map_err(|_| err())?;
        if interval == 0 {
            return Err(format!("Invalid recurrence '{s}': interval must be at least 1"));
        }

        Ok(Recurrence { unit, interval, short_month: ShortMonthPolicy::default() })
    }
}

/// An event on exactly one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleEvent {
    pub date: NaiveDate,
    pub description: String,
}

/// An event repeating from `start_date`, optionally until `end_date`
/// (inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringEvent {
    pub recurrence: Recurrence,
    pub start_date: NaiveDate,
    pub description: String,
    pub end_date: Option<NaiveDate>,
}

/// All events from one config, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSet {
    pub single_events: Vec<SingleEvent>,
    pub recurring_events: Vec<RecurringEvent>,
}
