//! Conversion between the Gregorian and the Persian (solar Hijri) calendar.
//!
//! All Gregorian arithmetic happens on [`chrono::NaiveDate`]; Persian dates
//! are represented by [`JalaliDate`]. The conversion counts days relative to
//! a fixed Gregorian anchor and distributes them over the arithmetic 33-year
//! leap cycle of the Persian calendar.

use chrono::{Duration, NaiveDate};

use crate::digits::{to_ascii_digits, to_persian_digits};
use crate::error::{Error, ErrorKind};

/// Day count per Persian month in a non-leap year.
const MONTH_DAYS: [u32; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];

/// Full Persian month names, Farvardin through Esfand.
pub const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Fixed year offset used by the textual parse path.
///
/// This is a linear approximation of the real calendar relationship, kept
/// for compatibility with the form fields this crate feeds. See
/// [`persian_text_to_gregorian`].
const PARSE_YEAR_OFFSET: i32 = 621;

/// Gregorian date of day number zero in the conversion arithmetic.
fn gregorian_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(1600, 1, 1).unwrap()
}

/// First Persian year supported by the day-count arithmetic.
const MIN_YEAR: i32 = 979;

/// A date in the Persian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct JalaliDate {
    pub year: i32,
    /// 1 (Farvardin) to 12 (Esfand).
    pub month: u32,
    pub day: u32,
}

impl JalaliDate {
    /// Converts a Gregorian date into the Persian calendar.
    ///
    /// Days are counted from the Gregorian anchor and folded over the
    /// 33-year cycle (12053 days) and its 4-year sub-cycles (1461 days),
    /// with the first year of every sub-cycle taking the leap day.
    pub fn from_gregorian(date: NaiveDate) -> JalaliDate {
        let day_no = date.signed_duration_since(gregorian_anchor()).num_days() - 79;

        let cycles = day_no.div_euclid(12053);
        let mut day_no = day_no.rem_euclid(12053);

        let mut year = MIN_YEAR + 33 * cycles as i32 + 4 * (day_no / 1461) as i32;
        day_no %= 1461;

        if day_no >= 366 {
            year += ((day_no - 1) / 365) as i32;
            day_no = (day_no - 1) % 365;
        }

        let mut day = day_no as u32;
        let mut month = 0usize;
        while month < 11 && day >= MONTH_DAYS[month] {
            day -= MONTH_DAYS[month];
            month += 1;
        }

        JalaliDate {
            year,
            month: month as u32 + 1,
            day: day + 1,
        }
    }

    /// Converts this date back to the Gregorian calendar.
    ///
    /// Exact inverse of [`JalaliDate::from_gregorian`]. Returns `None` if
    /// the fields do not name a real Persian calendar date or the year lies
    /// before the supported range.
    pub fn to_gregorian(&self) -> Option<NaiveDate> {
        if self.year < MIN_YEAR
            || self.month < 1
            || self.month > 12
            || self.day < 1
            || self.day > days_in_month(self.year, self.month)
        {
            return None;
        }

        let years = (self.year - MIN_YEAR) as i64;
        let mut day_no = 365 * years + (years / 33) * 8 + ((years % 33) + 3) / 4;

        for month in 0..(self.month - 1) as usize {
            day_no += MONTH_DAYS[month] as i64;
        }
        day_no += (self.day - 1) as i64;

        gregorian_anchor().checked_add_signed(Duration::days(day_no + 79))
    }

    /// Renders this date as `YYYY/MM/DD` with Persian-script digits.
    pub fn to_text(&self) -> String {
        to_persian_digits(&format!("{}/{:02}/{:02}", self.year, self.month, self.day))
    }
}

/// Whether the given Persian year is a leap year of the 33-year cycle.
pub fn is_leap_year(year: i32) -> bool {
    (25 * year + 11).rem_euclid(33) < 8
}

/// Number of days in the given Persian month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        12 if is_leap_year(year) => 30,
        12 => 29,
        _ => 0,
    }
}

/// Persian `YYYY/MM/DD` text for a Gregorian date, or an empty string when
/// no date is present.
pub fn gregorian_to_persian_text(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => JalaliDate::from_gregorian(date).to_text(),
        None => String::new(),
    }
}

/// Parses `Y/M/D` text (Persian or ASCII digits) into a Gregorian date.
///
/// The year is mapped with the fixed additive offset of 621 years and the
/// month and day are taken over verbatim, so the result is an approximation
/// rather than a true calendrical inverse of [`gregorian_to_persian_text`];
/// use [`JalaliDate::to_gregorian`] where accuracy matters. Returns `None`
/// for malformed text and for component triples that do not form a real
/// Gregorian date.
pub fn persian_text_to_gregorian(text: &str) -> Option<NaiveDate> {
    let (year, month, day) = match split_ymd(text) {
        Ok(parts) => parts,
        Err(err) => {
            log::debug!("discarding date text {:?}: {}", text, err);
            return None;
        }
    };

    NaiveDate::from_ymd_opt(year + PARSE_YEAR_OFFSET, month, day)
}

/// Full Persian month name of the Persian month containing `date`; empty
/// string when no date is present.
pub fn month_name(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => {
            let jalali = JalaliDate::from_gregorian(date);
            MONTH_NAMES[(jalali.month - 1) as usize].to_owned()
        }
        None => String::new(),
    }
}

/// Persian-script numerals of the Persian year containing `date`; empty
/// string when no date is present.
pub fn year_label(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => to_persian_digits(&JalaliDate::from_gregorian(date).year.to_string()),
        None => String::new(),
    }
}

fn split_ymd(text: &str) -> Result<(i32, u32, u32), Error> {
    let ascii = to_ascii_digits(text);
    let parts: Vec<&str> = ascii.split('/').collect();

    if parts.len() != 3 {
        return Err(Error::new(
            ErrorKind::DateParse,
            &format!("expected 3 components, found {}", parts.len()),
        ));
    }

    let year = parts[0].trim().parse::<i32>();
    let month = parts[1].trim().parse::<u32>();
    let day = parts[2].trim().parse::<u32>();

    match (year, month, day) {
        (Ok(year), Ok(month), Ok(day)) => Ok((year, month, day)),
        _ => Err(Error::new(ErrorKind::DateParse, "non-numeric component")),
    }
}
