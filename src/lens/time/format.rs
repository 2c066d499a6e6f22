//! Renderers for a parsed instant

use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike, Utc};
use std::fmt::Display;

/// Render as RFC3339 with nanosecond precision
///
/// Trailing zeros of the fraction are trimmed (the fraction is dropped when
/// zero) and a zero offset is written as `Z`.
pub fn format_rfc3339_nano<Tz>(ts: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    // chrono's %Y signs years past 9999, RFC3339 years carry no sign
    let year = ts.year();
    let mut out = if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{:04}", year)
    };
    out.push_str(&ts.format("-%m-%dT%H:%M:%S").to_string());

    let nanos = ts.nanosecond() % 1_000_000_000;
    if nanos > 0 {
        let fraction = format!("{:09}", nanos);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }

    if ts.offset().fix().local_minus_utc() == 0 {
        out.push('Z');
    } else {
        out.push_str(&ts.format("%:z").to_string());
    }
    out
}

pub fn format_rfc3339_utc(ts: &DateTime<Utc>) -> String {
    format_rfc3339_nano(ts)
}

/// Render in the time zone of the running process
pub fn format_rfc3339_local(ts: &DateTime<Utc>) -> String {
    format_rfc3339_nano(&ts.with_timezone(&Local))
}

/// Seconds since the epoch with six decimal places
pub fn format_unix_float(ts: &DateTime<Utc>) -> String {
    let seconds = ts.timestamp() as f64 + f64::from(ts.timestamp_subsec_nanos()) / 1e9;
    format!("{:.6}", seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_rfc3339_nano() {
        let ts = DateTime::from_timestamp(1696982400, 0).unwrap();
        assert_eq!(format_rfc3339_utc(&ts), "2023-10-11T00:00:00Z");

        let ts = DateTime::from_timestamp(1696982400, 123_456_789).unwrap();
        assert_eq!(format_rfc3339_utc(&ts), "2023-10-11T00:00:00.123456789Z");

        let ts = DateTime::from_timestamp(1696982400, 500_000_000).unwrap();
        assert_eq!(format_rfc3339_utc(&ts), "2023-10-11T00:00:00.5Z");

        let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let ts = ts.with_timezone(&offset);
        assert_eq!(format_rfc3339_nano(&ts), "2023-10-11T05:30:00.5+05:30");

        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let ts = DateTime::from_timestamp(1136239445, 0)
            .unwrap()
            .with_timezone(&offset);
        assert_eq!(format_rfc3339_nano(&ts), "2006-01-02T15:04:05-07:00");
    }

    #[test]
    fn test_format_rfc3339_year_padding() {
        let ts = DateTime::from_timestamp(253433923199, 0).unwrap();
        assert_eq!(format_rfc3339_utc(&ts), "10000-12-31T23:59:59Z");

        let ts = DateTime::from_timestamp(253402300799, 0).unwrap();
        assert_eq!(format_rfc3339_utc(&ts), "9999-12-31T23:59:59Z");

        let ts = Utc.with_ymd_and_hms(12, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(format_rfc3339_utc(&ts), "0012-03-04T05:06:07Z");

        let ts = Utc.with_ymd_and_hms(-44, 3, 15, 0, 0, 0).unwrap();
        assert_eq!(format_rfc3339_utc(&ts), "-0044-03-15T00:00:00Z");
    }

    #[test]
    fn test_format_rfc3339_local_same_instant() {
        let ts = DateTime::from_timestamp(1696982400, 42).unwrap();
        let local = format_rfc3339_local(&ts);
        let parsed = DateTime::parse_from_rfc3339(&local).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), ts);
    }

    #[test]
    fn test_format_unix_float() {
        let ts = DateTime::from_timestamp(1700000000, 500_000_000).unwrap();
        assert_eq!(format_unix_float(&ts), "1700000000.500000");

        let ts = DateTime::from_timestamp(-2, 500_000_000).unwrap();
        assert_eq!(format_unix_float(&ts), "-1.500000");

        let ts = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(format_unix_float(&ts), "0.000000");
    }
}
