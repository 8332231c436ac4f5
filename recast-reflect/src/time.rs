//! Time zones and the time-string heuristic.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use recast_core::zero_time;

use crate::trace;

const ZERO_DATETIMES: [&str; 2] = ["0000-00-00 00:00:00", "0001-01-01 00:00:00"];

const LAYOUT_FRACTION: &str = "%Y-%m-%d %H:%M:%S%.f";
const LAYOUT_FRACTION_OFFSET: &str = "%Y-%m-%d %H:%M:%S%.f %:z";
const LAYOUT_DATETIME: &str = "%Y-%m-%d %H:%M:%S";
const LAYOUT_DATE: &str = "%Y-%m-%d";

/// The zone epoch seconds and zone-less time strings are read in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Zone {
    /// The zone of the running process.
    #[default]
    Local,
    /// UTC.
    Utc,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl Zone {
    /// Interpret a wall-clock time in this zone. Times skipped by a
    /// daylight-saving jump give `None`; ambiguous ones take the earlier
    /// instant.
    pub fn localize(self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Zone::Local => chrono::Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|t| t.fixed_offset()),
            Zone::Utc => Some(Utc.from_utc_datetime(&naive).fixed_offset()),
            Zone::Fixed(offset) => offset.from_local_datetime(&naive).single(),
        }
    }

    /// The instant `secs` seconds after the Unix epoch, shown in this zone.
    pub fn from_unix(self, secs: i64) -> Option<DateTime<FixedOffset>> {
        let utc = Utc.timestamp_opt(secs, 0).single()?;
        Some(match self {
            Zone::Local => utc.with_timezone(&chrono::Local).fixed_offset(),
            Zone::Utc => utc.fixed_offset(),
            Zone::Fixed(offset) => utc.with_timezone(&offset),
        })
    }
}

/// Read a time instant out of loosely formatted text.
///
/// The trimmed text is tried as, in order:
/// - one of the zero datetimes `0000-00-00 00:00:00` / `0001-01-01 00:00:00`;
/// - Unix epoch seconds, when it has no `-`, space or `:`;
/// - when longer than 19 bytes: RFC 3339, then `YYYY-MM-DD HH:MM:SS.fff` in
///   `zone`, then the same followed by ` ±HH:MM` or ` Z`;
/// - `YYYY-MM-DD HH:MM:SS` in `zone`, when exactly 19 bytes;
/// - `YYYY-MM-DD` at midnight in `zone`.
///
/// Text that matches none of these gives the zero instant rather than an
/// error.
pub fn parse_time(bytes: &[u8], zone: Zone) -> DateTime<FixedOffset> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    match parse_layouts(text, zone) {
        Some(t) => t,
        None => {
            trace!("`{text}` read as the zero time");
            zero_time()
        }
    }
}

fn parse_layouts(text: &str, zone: Zone) -> Option<DateTime<FixedOffset>> {
    if ZERO_DATETIMES.contains(&text) {
        return None;
    }
    if !text.contains(['-', ' ', ':']) {
        return zone.from_unix(text.parse().ok()?);
    }

    let dashed = text.contains('-');
    let bytes = text.as_bytes();
    if text.len() > 19 && dashed {
        DateTime::parse_from_rfc3339(text)
            .ok()
            .or_else(|| zone.localize(NaiveDateTime::parse_from_str(text, LAYOUT_FRACTION).ok()?))
            .or_else(|| parse_with_offset(text))
    } else if text.len() == 19 && dashed {
        zone.localize(NaiveDateTime::parse_from_str(text, LAYOUT_DATETIME).ok()?)
    } else if text.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-' {
        let date = NaiveDate::parse_from_str(text, LAYOUT_DATE).ok()?;
        zone.localize(date.and_hms_opt(0, 0, 0)?)
    } else {
        None
    }
}

fn parse_with_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    match text.strip_suffix(" Z") {
        Some(wall) => Zone::Utc.localize(NaiveDateTime::parse_from_str(wall, LAYOUT_FRACTION).ok()?),
        None => DateTime::parse_from_str(text, LAYOUT_FRACTION_OFFSET).ok(),
    }
}
