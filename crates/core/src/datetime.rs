//! Tolerant calendar date-time parsing for `datetime` payloads.
//!
//! Stored values come from several editors and imports, so the same instant
//! can arrive as `2024-01-02T03:04:05Z`, `2024-1-2T3:04:05` or
//! `2024-01-02 03:04:05.000+00:00`. All of them parse to the same
//! [`OffsetDateTime`], whose ordering is chronological.

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Parse a calendar date-time string.
///
/// Accepted shape: `Y-M-D[(T| )H:M[:S[.fraction]]][Z|±HH:MM]`. Month, day,
/// hour, minute and second may be one or two digits. A missing time means
/// midnight; a missing offset means UTC. Returns `None` for anything else,
/// including impossible calendar dates such as February 30th.
pub fn parse_datetime(s: &str) -> Option<OffsetDateTime> {
    let s = s.trim();
    let (date_part, time_part) = match s.find(['T', 't', ' ']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let date = parse_date(date_part)?;
    let (time, offset) = match time_part {
        None => (Time::MIDNIGHT, UtcOffset::UTC),
        Some(rest) => {
            let (clock, offset) = split_offset(rest)?;
            (parse_time(clock)?, offset)
        }
    };
    Some(PrimitiveDateTime::new(date, time).assume_offset(offset))
}

/// Parse a `Y-M-D` calendar date with one- or two-digit month and day.
pub fn parse_date(s: &str) -> Option<Date> {
    let mut parts = s.split('-');
    let year = parts.next().filter(|p| is_digits(p, 1, 6))?;
    let month = parts.next().filter(|p| is_digits(p, 1, 2))?;
    let day = parts.next().filter(|p| is_digits(p, 1, 2))?;
    if parts.next().is_some() {
        return None;
    }
    let month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
    Date::from_calendar_date(year.parse().ok()?, month, day.parse().ok()?).ok()
}

fn parse_time(s: &str) -> Option<Time> {
    let mut parts = s.split(':');
    let hour = parts.next().filter(|p| is_digits(p, 1, 2))?;
    let minute = parts.next().filter(|p| is_digits(p, 1, 2))?;
    let (second, nanos) = match parts.next() {
        None => (0, 0),
        Some(sec) => {
            let (whole, frac) = match sec.split_once('.') {
                Some((w, f)) => (w, Some(f)),
                None => (sec, None),
            };
            if !is_digits(whole, 1, 2) {
                return None;
            }
            let nanos = match frac {
                None => 0,
                Some(f) if is_digits(f, 1, 9) => {
                    // right-pad to nanosecond precision
                    format!("{:0<9}", f).parse::<u32>().ok()?
                }
                Some(_) => return None,
            };
            (whole.parse::<u8>().ok()?, nanos)
        }
    };
    if parts.next().is_some() {
        return None;
    }
    Time::from_hms_nano(hour.parse().ok()?, minute.parse().ok()?, second, nanos).ok()
}

/// Split a trailing `Z` or `±HH[:MM]` offset off the clock part.
fn split_offset(s: &str) -> Option<(&str, UtcOffset)> {
    if let Some(clock) = s.strip_suffix(['Z', 'z']) {
        return Some((clock, UtcOffset::UTC));
    }
    let Some(i) = s.rfind(['+', '-']) else {
        return Some((s, UtcOffset::UTC));
    };
    let (clock, offset) = (&s[..i], &s[i..]);
    let sign: i8 = if offset.starts_with('-') { -1 } else { 1 };
    let digits = &offset[1..];
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None if digits.len() == 4 => digits.split_at(2),
        None => (digits, "0"),
    };
    if !is_digits(hours, 1, 2) || !is_digits(minutes, 1, 2) {
        return None;
    }
    let hours: i8 = hours.parse().ok()?;
    let minutes: i8 = minutes.parse().ok()?;
    let offset = UtcOffset::from_hms(sign * hours, sign * minutes, 0).ok()?;
    Some((clock, offset))
}

fn is_digits(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}
