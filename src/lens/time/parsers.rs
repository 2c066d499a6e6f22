//! Ordered parser chain for timestamp literals
//!
//! Every parser is a plain function from the input string to an instant. The
//! chain is evaluated in order by [`TimeLens::parse_time_string`], and the first
//! parser that accepts the input wins.
//!
//! [`TimeLens::parse_time_string`]: super::TimeLens::parse_time_string

use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDateTime, TimeZone, Utc, Weekday};

/// Integers that land past this year as seconds are read as milliseconds instead
pub const MAX_UNIX_SECONDS_YEAR: i32 = 10_000;

/// Zone abbreviations that always mean UTC in Unix date strings
const UTC_ZONE_NAMES: &[&str] = &["UTC", "GMT", "Z"];

/// A single named entry of the parser chain
#[derive(Debug, Clone, Copy)]
pub struct TimeParser {
    /// Short name used in debug logs
    pub name: &'static str,
    /// The parse function itself
    pub parse: fn(&str) -> Result<DateTime<Utc>>,
}

/// Build the ordered parser chain for the enabled program variant
pub fn parser_chain() -> Vec<TimeParser> {
    let mut chain = vec![
        TimeParser {
            name: "rfc3339",
            parse: parse_rfc3339,
        },
        TimeParser {
            name: "unix-date",
            parse: parse_unix_date,
        },
        TimeParser {
            name: "unix-seconds",
            parse: parse_unix_seconds,
        },
        TimeParser {
            name: "unix-millis",
            parse: parse_unix_millis,
        },
        TimeParser {
            name: "unix-float",
            parse: parse_unix_float,
        },
    ];

    #[cfg(feature = "uuid")]
    chain.push(TimeParser {
        name: "uuid",
        parse: super::ulid::parse_uuid,
    });

    chain
}

/// Parse an RFC3339 date-time with an explicit offset and optional fraction
///
/// Date and time must be separated by `T`.
pub fn parse_rfc3339(input: &str) -> Result<DateTime<Utc>> {
    // chrono also takes a space or `t` here
    if input.as_bytes().get(10) != Some(&b'T') {
        return Err(anyhow!("expected 'T' between date and time"));
    }
    Ok(DateTime::parse_from_rfc3339(input)?.with_timezone(&Utc))
}

/// Parse a `date(1)` style string, e.g. `Mon Jan  2 15:04:05 MST 2006`
///
/// The weekday must be a valid name but is not checked against the date.
/// `UTC`/`GMT`/`Z` and numeric offsets are honored; any other zone
/// abbreviation is taken to be the local time zone.
pub fn parse_unix_date(input: &str) -> Result<DateTime<Utc>> {
    let fields: Vec<&str> = input.split_whitespace().collect();
    let [weekday, month, day, clock, zone, year] = fields.as_slice() else {
        return Err(anyhow!("expected 6 fields, found {}", fields.len()));
    };

    weekday
        .parse::<Weekday>()
        .map_err(|_| anyhow!("invalid weekday: {}", weekday))?;

    let naive = NaiveDateTime::parse_from_str(
        &format!("{} {} {} {}", month, day, clock, year),
        "%b %d %H:%M:%S %Y",
    )?;

    resolve_zone(&naive, zone)
}

/// `UTC`/`GMT`/`Z` are UTC, numeric offsets are applied, and any other
/// abbreviation is read as host local time.
fn resolve_zone(naive: &NaiveDateTime, zone: &str) -> Result<DateTime<Utc>> {
    if UTC_ZONE_NAMES
        .iter()
        .any(|name| zone.eq_ignore_ascii_case(name))
    {
        return Ok(Utc.from_utc_datetime(naive));
    }

    if zone.starts_with(['+', '-']) {
        let offset =
            parse_numeric_offset(zone).ok_or_else(|| anyhow!("invalid zone offset: {}", zone))?;
        return offset
            .from_local_datetime(naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| anyhow!("invalid date-time for offset {}", zone));
    }

    if !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(anyhow!("invalid zone abbreviation: {}", zone));
    }

    Local
        .from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("{} does not exist in the local time zone", naive))
}

/// Parse `+HH`, `+HHMM` or `+HH:MM` (and the `-` forms)
fn parse_numeric_offset(zone: &str) -> Option<FixedOffset> {
    let sign = match zone.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let digits: String = zone[1..].chars().filter(|c| *c != ':').collect();
    if !matches!(digits.len(), 2 | 4) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = match digits.len() {
        4 => digits[2..].parse().ok()?,
        _ => 0,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse a base-10 integer as seconds since the epoch
///
/// Rejects values whose year is past [`MAX_UNIX_SECONDS_YEAR`], leaving them
/// to the millisecond parser.
pub fn parse_unix_seconds(input: &str) -> Result<DateTime<Utc>> {
    let secs: i64 = input.parse()?;
    let ts = DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| anyhow!("{} seconds is out of range", secs))?;
    if ts.year() > MAX_UNIX_SECONDS_YEAR {
        return Err(anyhow!(
            "year {} > {}, probably not seconds",
            ts.year(),
            MAX_UNIX_SECONDS_YEAR
        ));
    }
    Ok(ts)
}

/// Parse a base-10 integer as milliseconds since the epoch
pub fn parse_unix_millis(input: &str) -> Result<DateTime<Utc>> {
    let millis: i64 = input.parse()?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| anyhow!("{} milliseconds is out of range", millis))
}

/// Parse a decimal number as fractional seconds since the epoch
pub fn parse_unix_float(input: &str) -> Result<DateTime<Utc>> {
    let value: f64 = input.parse()?;
    if !value.is_finite() {
        return Err(anyhow!("{} is not a finite number", value));
    }

    let floor = value.floor();
    // the product can round up to exactly 1e9 for values just below an integer
    let nanos = (((value - floor) * 1e9) as u32).min(999_999_999);
    DateTime::from_timestamp(floor as i64, nanos)
        .ok_or_else(|| anyhow!("{} seconds is out of range", value))
}
