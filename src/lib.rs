//! Core of a Persian (Jalali) calendar date-picker: Gregorian/Persian
//! conversion, month-grid generation, numeral localization and the
//! date-selection state machine, plus the surface an embedding form talks
//! to.

pub mod config;
pub mod digits;
pub mod error;
pub mod events;
pub mod grid;
pub mod jalali;
pub mod locale;
pub mod picker;
pub mod widget;
