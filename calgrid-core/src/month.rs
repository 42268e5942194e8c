//! Calendar month arithmetic shared by expansion and layout.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::error::{CalGridError, CalGridResult};

/// A calendar month, as listed in `months_to_print`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Parse a `"YYYY-MM"` string. The month is validated by parsing it as the
    /// first day of that month, so `2025-1` and `2025-01` both work.
    pub fn parse(s: &str) -> Result<Self, String> {
        let first = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map_err(|_| format!("Invalid month '{s}': use 'YYYY-MM'"))?;

        let ym = YearMonth { year: first.year(), month: first.month() };
        if !(1..=9999).contains(&ym.year) {
            return Err(format!("Month '{s}' is out of range: year must be 1-9999"));
        }
        Ok(ym)
    }

    /// First and last day of this month.
    pub fn bounds(self) -> CalGridResult<(NaiveDate, NaiveDate)> {
        month_bounds(self.year, self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// First and last day of the given month.
pub fn month_bounds(year: i32, month: u32) -> CalGridResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalGridError::Render(format!("No such month: {year:04}-{month:02}")))?;

    let next_month_first = match month {
        12 => NaiveDate::from_ymd_opt(year + 1, 1, 1),
        _ => NaiveDate::from_ymd_opt(year, month + 1, 1),
    };
    let last = next_month_first
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| CalGridError::Render(format!("No such month: {year:04}-{month:02}")))?;

    Ok((first, last))
}

/// Number of days in the given month, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> CalGridResult<u32> {
    let (_, last) = month_bounds(year, month)?;
    Ok(last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_padded_and_unpadded() {
        assert_eq!(YearMonth::parse("2025-01").unwrap(), YearMonth { year: 2025, month: 1 });
        assert_eq!(YearMonth::parse("2025-1").unwrap(), YearMonth { year: 2025, month: 1 });
        assert_eq!(YearMonth::parse("1999-12").unwrap(), YearMonth { year: 1999, month: 12 });
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(YearMonth::parse("2025").is_err());
        assert!(YearMonth::parse("2025-13").is_err());
        assert!(YearMonth::parse("2025-00").is_err());
        assert!(YearMonth::parse("January 2025").is_err());
        assert!(YearMonth::parse("").is_err());
    }

    #[test]
    fn parse_rejects_out_of_range_year() {
        assert!(YearMonth::parse("0000-01").is_err());
    }

    #[test]
    fn bounds_cover_leap_years() {
        let (first, last) = month_bounds(2024, 2).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        assert_eq!(days_in_month(2025, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
    }

    #[test]
    fn bounds_handle_december() {
        let (first, last) = month_bounds(2025, 12).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(YearMonth { year: 2025, month: 3 }.to_string(), "2025-03");
    }
}
