//! Record layout: timestamp prefix and multi-line message body.
//!
//! A record looks like
//!
//! ```text
//! 2026-10-19 14:03:07.512 CEST I first line
//!                                second line
//! ```
//!
//! The prefix is the timestamp, one space, the level tag, one space.
//! Continuation lines are indented by exactly the prefix width (in bytes) so
//! they line up under the first character of the message.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};

use super::core::LogLevel;

/// Date/time part of the timestamp, millisecond precision.
pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A list of string parts making up one record.
///
/// This is the variadic argument list of the plain logging calls: a single
/// `&str` or `String`, or an array, slice or `Vec` of string-likes.
pub trait MessageParts {
    fn each_part(&self, f: &mut dyn FnMut(&str));
}

impl MessageParts for str {
    fn each_part(&self, f: &mut dyn FnMut(&str)) {
        f(self)
    }
}

impl MessageParts for String {
    fn each_part(&self, f: &mut dyn FnMut(&str)) {
        f(self)
    }
}

impl<T: MessageParts + ?Sized> MessageParts for &T {
    fn each_part(&self, f: &mut dyn FnMut(&str)) {
        (**self).each_part(f)
    }
}

impl<S: AsRef<str>, const N: usize> MessageParts for [S; N] {
    fn each_part(&self, f: &mut dyn FnMut(&str)) {
        self.iter().for_each(|part| f(part.as_ref()))
    }
}

impl<S: AsRef<str>> MessageParts for [S] {
    fn each_part(&self, f: &mut dyn FnMut(&str)) {
        self.iter().for_each(|part| f(part.as_ref()))
    }
}

impl<S: AsRef<str>> MessageParts for Vec<S> {
    fn each_part(&self, f: &mut dyn FnMut(&str)) {
        self.as_slice().each_part(f)
    }
}

/// Formats `now` as `YYYY-MM-DD HH:MM:SS.mmm ZONE`, where `ZONE` is the
/// offset's display form: the abbreviation for a `chrono_tz` zone (`MDT`,
/// `CET`), `UTC` for `Utc`.
pub fn format_timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("{} {}", now.format(LOG_DATE_FORMAT), now.format("%Z"))
}

/// Fallback for a local zone without a known name: `UTC` at zero offset,
/// `+hhmm`/`-hhmm` otherwise.
pub fn format_offset_timestamp(now: &DateTime<FixedOffset>) -> String {
    let date = now.format(LOG_DATE_FORMAT);
    if now.offset().local_minus_utc() == 0 {
        format!("{date} UTC")
    } else {
        format!("{date} {}", now.format("%z"))
    }
}

/// The local IANA zone: `TZ` when it names one, else the system setting.
/// Resolved once per process.
fn local_zone() -> Option<chrono_tz::Tz> {
    static LOCAL_ZONE: OnceLock<Option<chrono_tz::Tz>> = OnceLock::new();
    *LOCAL_ZONE.get_or_init(|| {
        std::env::var("TZ")
            .ok()
            .and_then(|raw| raw.trim_start_matches(':').parse().ok())
            .or_else(|| iana_time_zone::get_timezone().ok()?.parse().ok())
    })
}

/// Current local time in record form.
pub fn local_timestamp() -> String {
    match local_zone() {
        Some(zone) => format_timestamp(&Utc::now().with_timezone(&zone)),
        None => {
            let now = Local::now();
            format_offset_timestamp(&now.with_timezone(&now.offset().fix()))
        }
    }
}

/// Builds the record header for `level` at the given instant.
pub fn prefix_at<Tz>(level: LogLevel, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("{} {} ", format_timestamp(now), level.tag())
}

/// Record header for `level`, stamped with the current local time.
pub fn prefix(level: LogLevel) -> String {
    format!("{} {} ", local_timestamp(), level.tag())
}

/// Lays out the parts of a plain (non-formatted) record.
///
/// Every part is split on `\n` and empty lines are dropped. The first
/// surviving line is written after `prefix`; every later one, from the same
/// part or a later part, is indented by `prefix.len()` spaces. Each line ends
/// with a newline. Trailing spaces of the whole message are trimmed, which
/// only matters when no line survives: the record is then the bare header.
pub fn build_message<P>(prefix: &str, parts: &P) -> String
where
    P: MessageParts + ?Sized,
{
    let indent = " ".repeat(prefix.len());
    let mut message = String::new();
    let mut first = true;

    parts.each_part(&mut |part| {
        for line in part.split('\n').filter(|line| !line.is_empty()) {
            message.push_str(if first { prefix } else { indent.as_str() });
            message.push_str(line);
            message.push('\n');
            first = false;
        }
    });

    if first {
        message.push_str(prefix);
    }

    let trimmed = message.trim_end_matches(' ').len();
    message.truncate(trimmed);
    message
}

/// Lays out a formatted record: the arguments are formatted into one part,
/// which then gets the same layout as a plain record.
pub fn build_formatted(prefix: &str, args: fmt::Arguments<'_>) -> String {
    build_message(prefix, args.to_string().as_str())
}
