//! The date-selection state machine.

use chrono::{Datelike, Local, NaiveDate};

use crate::grid::{days_of_month, DayCell, MonthGrid};
use crate::jalali;
use crate::locale::Formatter;

/// Source of the current wall-clock date, injectable so tests can pin
/// "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local-timezone wall-clock dates.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Notification handed to the host on every completed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateChangeEvent {
    /// `YYYY/MM/DD` in Persian script.
    pub persian_text: String,
    pub gregorian: NaiveDate,
    pub year_label: String,
    /// Two-digit month numerals.
    pub month_label: String,
    /// Two-digit day numerals.
    pub day_label: String,
}

/// Selection state, visibility and month navigation of one picker.
///
/// The embedding surface ([`crate::widget::DatePicker`]) drives these
/// operations and forwards the returned events to the host; the picker
/// itself never calls out.
pub struct Picker {
    selected: Option<NaiveDate>,
    /// Anchors the visible page; only year and month matter.
    displayed_month: NaiveDate,
    open: bool,
    disabled: bool,
    clock: Box<dyn Clock>,
    formatter: Box<dyn Formatter>,
    /// Last built page, keyed on the displayed month.
    grid: Option<MonthGrid>,
}

impl Picker {
    pub fn new(clock: Box<dyn Clock>, formatter: Box<dyn Formatter>) -> Picker {
        let today = clock.today();
        Picker {
            selected: None,
            displayed_month: today,
            open: false,
            disabled: false,
            clock,
            formatter,
            grid: None,
        }
    }

    /// Re-initializes selection and displayed month from a Persian date
    /// text, following the mount rule: parseable text selects and anchors
    /// the page, anything else clears the selection and anchors at today.
    ///
    /// Does not produce a change event; initialization is not a user
    /// action.
    pub fn reset_value(&mut self, value: &str) {
        match jalali::persian_text_to_gregorian(value) {
            Some(date) => {
                self.selected = Some(date);
                self.displayed_month = date;
            }
            None => {
                if !value.is_empty() {
                    log::warn!("ignoring unparseable initial date {:?}", value);
                }
                self.selected = None;
                self.displayed_month = self.clock.today();
            }
        }
        self.grid = None;
    }

    /// Flips visibility; no-op while disabled.
    pub fn toggle_open(&mut self) {
        if !self.disabled {
            self.open = !self.open;
        }
    }

    /// Selects `date`, closes the picker and returns the event to emit.
    ///
    /// While disabled nothing changes and no event is produced.
    pub fn select_date(&mut self, date: NaiveDate) -> Option<DateChangeEvent> {
        if self.disabled {
            return None;
        }

        self.selected = Some(date);
        self.open = false;

        Some(self.change_event(date))
    }

    /// Moves the displayed page `delta` months, rolling over year
    /// boundaries in both directions. The selection is untouched.
    pub fn navigate_month(&mut self, delta: i32) {
        let months =
            self.displayed_month.year() * 12 + self.displayed_month.month0() as i32 + delta;
        let year = months.div_euclid(12);
        let month = months.rem_euclid(12) as u32 + 1;

        let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        // clamp the (ignored) day component so the anchor stays a real date
        let day = self.displayed_month.day().min(days_of_month(first));
        self.displayed_month = first.with_day(day).unwrap();
    }

    /// Selects the clock's today and moves the displayed page to it.
    pub fn jump_to_today(&mut self) -> Option<DateChangeEvent> {
        let today = self.clock.today();
        let event = self.select_date(today);
        if event.is_some() {
            self.displayed_month = today;
        }
        event
    }

    /// Forces the picker closed without altering the selection; the
    /// outside-press path.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// The cells of the displayed month page, rebuilt only when the page
    /// changed since the last call.
    pub fn grid(&mut self) -> &[DayCell] {
        let anchor = self.displayed_month;
        let stale = self.grid.as_ref().map_or(true, |g| !g.matches(anchor));
        if stale {
            self.grid = Some(MonthGrid::for_month(anchor));
        }

        self.grid.as_ref().unwrap().cells()
    }

    /// Month name shown in the page header.
    pub fn month_label(&self) -> String {
        self.formatter.month_name(self.displayed_month)
    }

    /// Year numerals shown in the page header.
    pub fn year_label(&self) -> String {
        self.formatter.year_digits(self.displayed_month)
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.open = false;
        }
    }

    fn change_event(&self, date: NaiveDate) -> DateChangeEvent {
        DateChangeEvent {
            persian_text: jalali::gregorian_to_persian_text(Some(date)),
            gregorian: date,
            year_label: self.formatter.year_digits(date),
            month_label: self.formatter.month_digits(date),
            day_label: self.formatter.day_digits(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::JalaliFormatter;

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    fn greg(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn picker_at(today: NaiveDate) -> Picker {
        Picker::new(Box::new(FixedClock(today)), Box::new(JalaliFormatter))
    }

    #[test]
    fn starts_closed_at_today() {
        let picker = picker_at(greg(2024, 3, 20));
        assert!(!picker.is_open());
        assert_eq!(picker.selected(), None);
        assert_eq!(picker.displayed_month(), greg(2024, 3, 20));
    }

    #[test]
    fn toggle_open_and_dismiss() {
        let mut picker = picker_at(greg(2024, 3, 20));
        picker.toggle_open();
        assert!(picker.is_open());
        picker.dismiss();
        assert!(!picker.is_open());
    }

    #[test]
    fn select_closes_and_reports() {
        let mut picker = picker_at(greg(2024, 3, 20));
        picker.toggle_open();

        let event = picker.select_date(greg(2024, 3, 25)).unwrap();
        assert!(!picker.is_open());
        assert_eq!(picker.selected(), Some(greg(2024, 3, 25)));
        assert_eq!(event.gregorian, greg(2024, 3, 25));
        assert_eq!(event.persian_text, "۱۴۰۳/۰۱/۰۶");
        assert_eq!(event.year_label, "۱۴۰۳");
        assert_eq!(event.month_label, "۰۱");
        assert_eq!(event.day_label, "۰۶");
    }

    #[test]
    fn disabled_blocks_everything() {
        let mut picker = picker_at(greg(2024, 3, 20));
        picker.set_disabled(true);

        picker.toggle_open();
        assert!(!picker.is_open());
        assert_eq!(picker.select_date(greg(2024, 3, 25)), None);
        assert_eq!(picker.selected(), None);
        assert_eq!(picker.jump_to_today(), None);
    }

    #[test]
    fn navigate_month_round_trip() {
        let mut picker = picker_at(greg(2024, 5, 17));
        picker.navigate_month(1);
        picker.navigate_month(-1);
        assert_eq!(picker.displayed_month().year(), 2024);
        assert_eq!(picker.displayed_month().month(), 5);
    }

    #[test]
    fn navigate_month_rolls_over_year_boundaries() {
        let mut picker = picker_at(greg(2024, 12, 10));
        picker.navigate_month(1);
        assert_eq!(picker.displayed_month().year(), 2025);
        assert_eq!(picker.displayed_month().month(), 1);

        picker.navigate_month(-1);
        picker.navigate_month(-1);
        assert_eq!(picker.displayed_month().year(), 2024);
        assert_eq!(picker.displayed_month().month(), 11);
    }

    #[test]
    fn navigate_month_clamps_short_months() {
        let mut picker = picker_at(greg(2025, 1, 31));
        picker.navigate_month(1);
        assert_eq!(picker.displayed_month(), greg(2025, 2, 28));
    }

    #[test]
    fn navigate_month_keeps_selection() {
        let mut picker = picker_at(greg(2024, 3, 20));
        picker.select_date(greg(2024, 3, 25));
        picker.navigate_month(1);
        assert_eq!(picker.selected(), Some(greg(2024, 3, 25)));
    }

    #[test]
    fn jump_to_today_selects_and_anchors() {
        let mut picker = picker_at(greg(2024, 3, 20));
        picker.navigate_month(3);
        picker.toggle_open();

        let event = picker.jump_to_today().unwrap();
        assert_eq!(event.gregorian, greg(2024, 3, 20));
        assert_eq!(picker.displayed_month(), greg(2024, 3, 20));
        assert!(!picker.is_open());
    }

    #[test]
    fn reset_value_parses_or_falls_back() {
        let mut picker = picker_at(greg(2024, 3, 20));

        picker.reset_value("۱۴۰۳/۰۱/۰۱");
        assert_eq!(picker.selected(), Some(greg(2024, 1, 1)));
        assert_eq!(picker.displayed_month(), greg(2024, 1, 1));

        picker.reset_value("nonsense");
        assert_eq!(picker.selected(), None);
        assert_eq!(picker.displayed_month(), greg(2024, 3, 20));
    }

    #[test]
    fn grid_follows_displayed_month() {
        let mut picker = picker_at(greg(2024, 3, 20));
        let march_len = picker
            .grid()
            .iter()
            .filter(|c| matches!(c, DayCell::Day(_)))
            .count();
        assert_eq!(march_len, 31);

        picker.navigate_month(-1);
        let feb_len = picker
            .grid()
            .iter()
            .filter(|c| matches!(c, DayCell::Day(_)))
            .count();
        assert_eq!(feb_len, 29);
    }
}
