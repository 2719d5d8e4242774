//! Aggregation engine.
//!
//! Pure functions over a [`ClinicSnapshot`](crate::db::ClinicSnapshot) and a
//! local wall-clock "now". Nothing here touches storage, so every report can
//! be tested with hand-built records and a fixed date.

mod dashboard;
mod expenses;
mod inventory;
mod period;

pub use dashboard::*;
pub use expenses::*;
pub use inventory::*;
pub use period::*;

use chrono::{Datelike, NaiveDate};

/// `part / whole` as a percentage, 0 when `whole` is 0.
pub(crate) fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// First and last day of a calendar month.
pub(crate) fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// (year, month) stepped back `back` months from `date`.
pub(crate) fn months_back(date: NaiveDate, back: u32) -> (i32, u32) {
    let index = date.year() * 12 + date.month0() as i32 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
