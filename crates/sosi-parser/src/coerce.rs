// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Permissive conversion of SOSI value tokens into scalars
//!
//! Nothing here fails. A token that does not parse becomes zero, and
//! malformed dates come back as all-zero components so callers can decide
//! to leave the field unset.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a leading integer, 0 when nothing parses
pub fn to_integer(token: &str) -> i64 {
    let token = crate::tokenizer::unquote(token);
    match lexical_core::parse_partial::<i64>(token.as_bytes()) {
        Ok((value, read)) if read > 0 => value,
        _ => 0,
    }
}

/// Parse a leading real number, 0.0 when nothing parses
pub fn to_real(token: &str) -> f64 {
    let token = crate::tokenizer::unquote(token);
    match lexical_core::parse_partial::<f64>(token.as_bytes()) {
        Ok((value, read)) if read > 0 => value,
        _ => 0.0,
    }
}

/// Parse a real that may use an implicit decimal position
///
/// Tokens written with a decimal point are taken literally. Integer tokens
/// are multiplied by `unit`, the file's coordinate resolution.
pub fn to_scaled_real(token: &str, unit: f64) -> f64 {
    if token.contains('.') {
        to_real(token)
    } else {
        to_integer(token) as f64 * unit
    }
}

/// A `YYYYMMDD` date; all components zero when the token was not a date
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SosiDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SosiDate {
    /// Whether every component is zero
    pub fn is_zero(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }

    /// Convert to a calendar date, `None` for zero or impossible dates
    pub fn to_naive(self) -> Option<NaiveDate> {
        if self.year <= 0 {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// A `YYYYMMDDhhmmss` date-time; all components zero when not parseable
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SosiDateTime {
    pub date: SosiDate,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl SosiDateTime {
    /// Whether every component is zero
    pub fn is_zero(&self) -> bool {
        self.date.is_zero() && self.hour == 0 && self.minute == 0 && self.second == 0
    }

    /// Convert to a calendar date-time, `None` when the date part is unusable
    pub fn to_naive(self) -> Option<NaiveDateTime> {
        let date = self.date.to_naive()?;
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, self.second)?;
        Some(date.and_time(time))
    }
}

/// Parse `n` ASCII digits at the start of `s`
fn digits(s: &str, n: usize) -> Option<u32> {
    let part = s.get(..n)?;
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a `YYYYMMDD` token
///
/// Anything else, including dates with separators, yields a zero date.
pub fn to_date(token: &str) -> SosiDate {
    let token = crate::tokenizer::unquote(token);
    let (Some(year), Some(month), Some(day)) = (
        digits(token, 4),
        token.get(4..).and_then(|s| digits(s, 2)),
        token.get(6..).and_then(|s| digits(s, 2)),
    ) else {
        return SosiDate::default();
    };

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return SosiDate::default();
    }

    SosiDate {
        year: year as i32,
        month,
        day,
    }
}

/// Parse a `YYYYMMDDhhmmss` token
///
/// A valid date without a usable time part keeps the date and zeroes the
/// time.
pub fn to_datetime(token: &str) -> SosiDateTime {
    let date = to_date(token);
    if date.is_zero() {
        return SosiDateTime::default();
    }

    let token = crate::tokenizer::unquote(token);
    let time = token.get(8..).and_then(|rest| {
        let hour = digits(rest, 2)?;
        let minute = rest.get(2..).and_then(|s| digits(s, 2))?;
        let second = rest.get(4..).and_then(|s| digits(s, 2))?;
        (hour < 24 && minute < 60 && second < 60).then_some((hour, minute, second))
    });
    let (hour, minute, second) = time.unwrap_or((0, 0, 0));

    SosiDateTime {
        date,
        hour,
        minute,
        second,
    }
}
