//! Locale formatting as an injected capability.
//!
//! The picker never talks to the calendar arithmetic directly when it
//! builds labels; it goes through a [`Formatter`] so an alternate calendar
//! backend can be substituted in tests or by embedding hosts.

use chrono::NaiveDate;

use crate::digits::to_persian_digits;
use crate::jalali::{JalaliDate, MONTH_NAMES};

/// Label formatting for the calendar a picker displays.
///
/// Implementations degrade to an empty string instead of failing; the
/// widget never surfaces a formatting problem to its host.
pub trait Formatter {
    /// Full month name of the month containing `date`.
    fn month_name(&self, date: NaiveDate) -> String;
    /// Year numerals of the year containing `date`.
    fn year_digits(&self, date: NaiveDate) -> String;
    /// Two-digit month numerals of the month containing `date`.
    fn month_digits(&self, date: NaiveDate) -> String;
    /// Two-digit day-of-month numerals of `date`.
    fn day_digits(&self, date: NaiveDate) -> String;
}

/// Default backend: Persian calendar with Persian-script numerals.
#[derive(Debug, Default, Clone, Copy)]
pub struct JalaliFormatter;

impl Formatter for JalaliFormatter {
    fn month_name(&self, date: NaiveDate) -> String {
        let jalali = JalaliDate::from_gregorian(date);
        MONTH_NAMES[(jalali.month - 1) as usize].to_owned()
    }

    fn year_digits(&self, date: NaiveDate) -> String {
        to_persian_digits(&JalaliDate::from_gregorian(date).year.to_string())
    }

    fn month_digits(&self, date: NaiveDate) -> String {
        to_persian_digits(&format!("{:02}", JalaliDate::from_gregorian(date).month))
    }

    fn day_digits(&self, date: NaiveDate) -> String {
        to_persian_digits(&format!("{:02}", JalaliDate::from_gregorian(date).day))
    }
}
