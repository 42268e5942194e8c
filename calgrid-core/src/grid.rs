//! Month grid construction.
//!
//! Turns a month plus its day index into a fixed 7-wide grid of cells, the
//! shape the layout engine draws. Weeks start on Sunday.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::error::{CalGridError, CalGridResult};
use crate::index::DayEntry;
use crate::month::month_bounds;

/// One calendar month as a grid of day cells.
///
/// `cells` holds `rows * 7` slots in row-major order; `None` marks the padding
/// cells before day 1 and after the last day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthPage {
    pub year: i32,
    pub month: u32,
    /// Column of day 1, counted from Sunday (0 = Sunday, 6 = Saturday).
    pub first_weekday_offset: u32,
    pub days_in_month: u32,
    pub rows: u32,
    pub cells: Vec<Option<DayEntry>>,
}

impl MonthPage {
    /// Build the grid for one month, attaching each day's index entry to its
    /// cell. Days without events get an entry with no descriptions.
    pub fn build(
        year: i32,
        month: u32,
        index: &BTreeMap<u32, DayEntry>,
    ) -> CalGridResult<MonthPage> {
        let (first_day, last_day) = month_bounds(year, month)?;
        let first_weekday_offset = first_day.weekday().num_days_from_sunday();
        let days_in_month = last_day.day();
        let rows = (first_weekday_offset + days_in_month).div_ceil(7);

        let mut cells = Vec::with_capacity((rows * 7) as usize);
        for slot in 0..rows * 7 {
            if slot < first_weekday_offset || slot >= first_weekday_offset + days_in_month {
                cells.push(None);
                continue;
            }

            let day = slot - first_weekday_offset + 1;
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                CalGridError::Render(format!("No such date: {year:04}-{month:02}-{day:02}"))
            })?;
            let entry = index
                .get(&day)
                .cloned()
                .unwrap_or_else(|| DayEntry::empty(date));
            cells.push(Some(entry));
        }

        Ok(MonthPage {
            year,
            month,
            first_weekday_offset,
            days_in_month,
            rows,
            cells,
        })
    }

    /// The cell at the given row and column, if it belongs to the month.
    pub fn cell(&self, row: u32, col: u32) -> Option<&DayEntry> {
        self.cells
            .get((row * 7 + col) as usize)
            .and_then(|cell| cell.as_ref())
    }
}
