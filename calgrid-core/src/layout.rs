//! Month page layout.
//!
//! Turns a month grid into a flat list of draw primitives with page
//! coordinates (origin bottom-left, y up, PDF points). The list is everything
//! the PDF boundary needs; nothing here touches a PDF library.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::config::CalendarConfig;
use crate::error::CalGridResult;
use crate::grid::MonthPage;
use crate::index::{DayEntry, build_day_index};
use crate::month::month_bounds;

// Page geometry in PDF points (1/72 inch), landscape US letter. The usable
// height is split in sevenths: one for the weekday header band, six for the
// tallest possible month.
pub const PAGE_WIDTH: f64 = 792.0;
pub const PAGE_HEIGHT: f64 = 612.0;
pub const MARGIN: f64 = 72.0;

const HEADER_HEIGHT: f64 = 36.0;
const TITLE_BASELINE_RISE: f64 = 18.0;
const TEXT_INSET: f64 = 7.2;
const HEADER_INSET: f64 = 14.4;
const DAY_NUMBER_DROP: f64 = 14.4;
const EVENT_LINE_STEP: f64 = 10.8;
const DAY_NUMBER_BAND: f64 = 18.0;

const TITLE_FONT_SIZE: f64 = 24.0;
const WEEKDAY_FONT_SIZE: f64 = 12.0;
const DAY_NUMBER_FONT_SIZE: f64 = 10.0;
const EVENT_FONT_SIZE: f64 = 8.0;

// Helvetica glyphs average out to about half the font size in width.
const AVG_GLYPH_WIDTH_EM: f64 = 0.5;

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Font face for a text run. The concrete fonts are the PDF boundary's
/// business; layout only distinguishes weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Regular,
    Bold,
}

/// One draw primitive with page-relative coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Stroked rectangle; `(x, y)` is the bottom-left corner.
    Rect { x: f64, y: f64, w: f64, h: f64 },
    /// Text run; `(x, y)` is the baseline start.
    Text {
        x: f64,
        y: f64,
        size: f64,
        style: TextStyle,
        content: String,
    },
}

/// The full draw plan for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

/// Lay out every requested month, one page plan per month, in config order.
pub fn layout_document(config: &CalendarConfig) -> CalGridResult<Vec<PagePlan>> {
    let mut plans = Vec::with_capacity(config.months_to_print.len());

    for ym in &config.months_to_print {
        let index = build_day_index(&config.events, ym.year, ym.month)?;
        plans.push(layout_month(ym.year, ym.month, &index)?);
    }

    Ok(plans)
}

/// Lay out a single month page from its day index.
pub fn layout_month(
    year: i32,
    month: u32,
    index: &BTreeMap<u32, DayEntry>,
) -> CalGridResult<PagePlan> {
    let page = MonthPage::build(year, month, index)?;
    let (first_day, _) = month_bounds(year, month)?;
    let title = first_day.format("%B %Y").to_string();

    Ok(layout_page(&page, &title))
}

fn layout_page(page: &MonthPage, title: &str) -> PagePlan {
    let cell_w = (PAGE_WIDTH - 2.0 * MARGIN) / 7.0;
    let cell_h = (PAGE_HEIGHT - 2.0 * MARGIN) / 7.0;
    let grid_top = PAGE_HEIGHT - MARGIN - HEADER_HEIGHT;

    let mut ops = Vec::new();

    // Month title above the grid.
    ops.push(DrawOp::Text {
        x: MARGIN,
        y: PAGE_HEIGHT - MARGIN + TITLE_BASELINE_RISE,
        size: TITLE_FONT_SIZE,
        style: TextStyle::Bold,
        content: title.to_string(),
    });

    // Weekday header band.
    for (col, name) in WEEKDAY_NAMES.iter().enumerate() {
        ops.push(DrawOp::Text {
            x: MARGIN + col as f64 * cell_w + HEADER_INSET,
            y: grid_top + HEADER_INSET,
            size: WEEKDAY_FONT_SIZE,
            style: TextStyle::Bold,
            content: (*name).to_string(),
        });
    }

    // Day cells, row by row. Padding cells get their border and nothing else.
    for row in 0..page.rows {
        let cell_top = grid_top - row as f64 * cell_h;

        for col in 0..7 {
            let x = MARGIN + col as f64 * cell_w;
            ops.push(DrawOp::Rect {
                x,
                y: cell_top - cell_h,
                w: cell_w,
                h: cell_h,
            });

            let Some(entry) = page.cell(row, col) else {
                continue;
            };

            ops.push(DrawOp::Text {
                x: x + TEXT_INSET,
                y: cell_top - DAY_NUMBER_DROP,
                size: DAY_NUMBER_FONT_SIZE,
                style: TextStyle::Regular,
                content: entry.date.day().to_string(),
            });

            // Event lines stack bottom-up and stop short of the day-number
            // band; whatever does not fit is dropped.
            let mut baseline = cell_top - cell_h + TEXT_INSET;
            for description in &entry.descriptions {
                if baseline >= cell_top - DAY_NUMBER_BAND {
                    break;
                }
                ops.push(DrawOp::Text {
                    x: x + TEXT_INSET,
                    y: baseline,
                    size: EVENT_FONT_SIZE,
                    style: TextStyle::Regular,
                    content: ellipsize(description, cell_w - 2.0 * TEXT_INSET, EVENT_FONT_SIZE),
                });
                baseline += EVENT_LINE_STEP;
            }
        }
    }

    PagePlan {
        width: PAGE_WIDTH,
        height: PAGE_HEIGHT,
        ops,
    }
}

/// Shorten a description to the cell's estimated character budget, marking
/// the cut with a trailing `...`.
fn ellipsize(text: &str, max_width: f64, font_size: f64) -> String {
    let budget = (max_width / (font_size * AVG_GLYPH_WIDTH_EM)).floor() as usize;
    if text.chars().count() <= budget {
        return text.to_string();
    }

    let kept: String = text.chars().take(budget.saturating_sub(3)).collect();
    format!("{kept}...")
}
