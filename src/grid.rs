//! Month-page generation for the calendar grid.

use chrono::{Datelike, NaiveDate};

/// A single position on a rendered month page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    /// Leading blank used to align the first day with its weekday column.
    Empty,
    Day(NaiveDate),
}

/// The ordered cells of one Gregorian month, aligned to a Saturday-first
/// week (Persian convention: Saturday is column 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Builds the page containing `anchor`; its day-of-month is ignored.
    pub fn for_month(anchor: NaiveDate) -> MonthGrid {
        let first = anchor.with_day(1).unwrap();
        let days = days_of_month(first);
        let leading = (first.weekday().num_days_from_sunday() + 1) % 7;

        let mut cells = Vec::with_capacity((leading + days) as usize);
        cells.extend(std::iter::repeat(DayCell::Empty).take(leading as usize));
        cells.extend((1..=days).map(|day| DayCell::Day(first.with_day(day).unwrap())));

        MonthGrid {
            year: anchor.year(),
            month: anchor.month(),
            cells,
        }
    }

    /// Whether this page was built for the month containing `anchor`.
    pub fn matches(&self, anchor: NaiveDate) -> bool {
        self.year == anchor.year() && self.month == anchor.month()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }
}

/// Number of days in the Gregorian month containing `date`.
pub fn days_of_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .signed_duration_since(NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap())
        .num_days() as u32
}
