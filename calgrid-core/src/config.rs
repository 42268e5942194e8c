//! Calendar configuration loading and validation.
//!
//! The YAML file is deserialized into a permissive raw schema first, then a
//! single validation pass converts it into the typed model, collecting every
//! defect so the user sees them all at once instead of one per run.

use std::path::Path;

use chrono::NaiveDate;
use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::{CalGridError, CalGridResult};
use crate::event::{EventSet, Recurrence, RecurringEvent, ShortMonthPolicy, SingleEvent};
use crate::month::YearMonth;

/// Default filename for `write_template`.
pub static TEMPLATE_FILENAME: &str = "template_config.yaml";

/// A validated calendar configuration, read-only after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    /// Months to render, in output page order.
    pub months_to_print: Vec<YearMonth>,
    pub events: EventSet,
}

impl CalendarConfig {
    /// Load and validate a config file.
    ///
    /// Validation reports every defect it finds in one error rather than
    /// stopping at the first.
    pub fn load(path: &Path) -> CalGridResult<Self> {
        if !path.exists() {
            return Err(CalGridError::ConfigNotFound(path.display().to_string()));
        }

        let raw: RawConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml))
            .build()
            .map_err(|e| CalGridError::ConfigParse(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalGridError::ConfigParse(e.to_string()))?;

        raw.validate()
    }

    /// Write a sample config file showing every supported option.
    pub fn write_template(path: &Path) -> CalGridResult<()> {
        let contents = r#"# calgrid configuration
#
# Months render in the order listed, one PDF page each.

months_to_print:
  - "2025-01"
  - "2025-02"

events:
  single_events:
    - date: "2025-01-01"
      description: "New Year's Day"
    - date: "2025-02-14"
      description: "Valentine's Day"

  # recurrence is "<n>w", "<n>m" or "<n>y": every n weeks, months or years,
  # counted from start_date. end_date is optional and inclusive.
  recurring_events:
    - recurrence: "1w"
      start_date: "2025-01-06"
      description: "Weekly Meeting"
      end_date: "2025-03-31"
    - recurrence: "1m"
      start_date: "2025-01-15"
      description: "Monthly Report Due"
"#;

        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// On-disk schema. Unknown keys are ignored; the top-level keys are optional
/// here so their absence surfaces as a validation defect, not a parse error.
#[derive(Debug, Deserialize)]
struct RawConfig {
    months_to_print: Option<Vec<String>>,
    events: Option<RawEvents>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEvents {
    #[serde(default)]
    single_events: Vec<RawSingleEvent>,
    #[serde(default)]
    recurring_events: Vec<RawRecurringEvent>,
}

#[derive(Debug, Deserialize)]
struct RawSingleEvent {
    date: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawRecurringEvent {
    recurrence: String,
    start_date: String,
    description: String,
    end_date: Option<String>,
    short_month: Option<String>,
}

impl RawConfig {
    fn validate(self) -> CalGridResult<CalendarConfig> {
        let mut defects: Vec<String> = Vec::new();
        let mut months_to_print = Vec::new();
        let mut events = EventSet::default();

        match &self.months_to_print {
            None => defects.push("Missing 'months_to_print' key".to_string()),
            Some(list) => {
                if list.is_empty() {
                    defects.push("'months_to_print' must list at least one month".to_string());
                }
                for raw in list {
                    match YearMonth::parse(raw) {
                        Ok(ym) => months_to_print.push(ym),
                        Err(msg) => defects.push(msg),
                    }
                }
            }
        }

        match self.events {
            None => defects.push("Missing 'events' key".to_string()),
            Some(raw_events) => {
                for raw in raw_events.single_events {
                    match parse_date(&raw.date, "date") {
                        Ok(date) => events.single_events.push(SingleEvent {
                            date,
                            description: raw.description,
                        }),
                        Err(msg) => defects.push(msg),
                    }
                }

                for raw in raw_events.recurring_events {
                    match validate_recurring(raw) {
                        Ok(event) => events.recurring_events.push(event),
                        Err(msgs) => defects.extend(msgs),
                    }
                }
            }
        }

        if defects.is_empty() {
            Ok(CalendarConfig { months_to_print, events })
        } else {
            let listed: Vec<String> = defects.iter().map(|d| format!("- {d}")).collect();
            Err(CalGridError::ConfigValidation(listed.join("\n")))
        }
    }
}

/// Check one raw recurring event, reporting all of its defects together.
fn validate_recurring(raw: RawRecurringEvent) -> Result<RecurringEvent, Vec<String>> {
    let mut defects = Vec::new();

    let mut recurrence = match Recurrence::parse(&raw.recurrence) {
        Ok(r) => Some(r),
        Err(msg) => {
            defects.push(msg);
            None
        }
    };

    if let Some(policy_raw) = &raw.short_month {
        match ShortMonthPolicy::parse(policy_raw) {
            Ok(policy) => {
                if let Some(r) = recurrence.as_mut() {
                    r.short_month = policy;
                }
            }
            Err(msg) => defects.push(msg),
        }
    }

    let start_date = match parse_date(&raw.start_date, "start_date") {
        Ok(date) => Some(date),
        Err(msg) => {
            defects.push(msg);
            None
        }
    };

    let end_date = match &raw.end_date {
        None => None,
        Some(raw_end) => match parse_date(raw_end, "end_date") {
            Ok(date) => Some(date),
            Err(msg) => {
                defects.push(msg);
                None
            }
        },
    };

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            defects.push(format!(
                "end_date {end} is before start_date {start} for '{}'",
                raw.description
            ));
        }
    }

    if let (true, Some(recurrence), Some(start_date)) =
        (defects.is_empty(), recurrence, start_date)
    {
        Ok(RecurringEvent {
            recurrence,
            start_date,
            description: raw.description,
            end_date,
        })
    } else {
        Err(defects)
    }
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Invalid {field} '{raw}': use 'YYYY-MM-DD'"))
}
