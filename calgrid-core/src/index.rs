//! Per-day event index for one month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::error::CalGridResult;
use crate::event::EventSet;
use crate::recurrence::expand_in_month;

/// The event descriptions attached to one calendar date for one render pass.
///
/// Single events come before recurring ones; within each group the config's
/// input order is kept. Events carry no time of day, so there is nothing else
/// to sort by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub descriptions: Vec<String>,
}

impl DayEntry {
    pub fn empty(date: NaiveDate) -> Self {
        DayEntry { date, descriptions: Vec::new() }
    }
}

/// Build the day-of-month -> events mapping for the given month.
///
/// Pure function of its inputs: days without events simply have no entry.
pub fn build_day_index(
    events: &EventSet,
    year: i32,
    month: u32,
) -> CalGridResult<BTreeMap<u32, DayEntry>> {
    let mut index: BTreeMap<u32, DayEntry> = BTreeMap::new();

    for event in &events.single_events {
        if event.date.year() == year && event.date.month() == month {
            index
                .entry(event.date.day())
                .or_insert_with(|| DayEntry::empty(event.date))
                .descriptions
                .push(event.description.clone());
        }
    }

    for event in &events.recurring_events {
        for date in expand_in_month(event, year, month)? {
            index
                .entry(date.day())
                .or_insert_with(|| DayEntry::empty(date))
                .descriptions
                .push(event.description.clone());
        }
    }

    Ok(index)
}
