//! ULID timestamps carried in UUID literals
//!
//! A ULID is 128 bits: a 48-bit big-endian millisecond timestamp followed by
//! 80 bits of entropy. Rendered as a UUID, its raw bytes are kept as-is, so a
//! UUID literal can carry a ULID timestamp in its first six bytes.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use ::ulid::Ulid;
use uuid::Uuid;

/// Largest millisecond value a ULID timestamp can hold
pub const MAX_ULID_MILLIS: i64 = (1 << 48) - 1;

/// Parse a UUID literal and read its first 48 bits as a ULID timestamp
pub fn parse_uuid(input: &str) -> Result<DateTime<Utc>> {
    let id = Uuid::parse_str(input)?;
    let millis = ulid_millis(&id);
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| anyhow!("{} milliseconds is out of range", millis))
}

/// Millisecond timestamp stored in the ULID layout of `id`
pub fn ulid_millis(id: &Uuid) -> i64 {
    // 48 bits always fit in an i64
    Ulid::from(*id).timestamp_ms() as i64
}

/// Build a UUID with the ULID timestamp of `ts` and all entropy bits zero
///
/// Fails when the instant is before the epoch or past the 48-bit limit.
pub fn to_uuid(ts: &DateTime<Utc>) -> Result<Uuid> {
    let millis = ts.timestamp_millis();
    if !(0..=MAX_ULID_MILLIS).contains(&millis) {
        return Err(anyhow!(
            "{} milliseconds does not fit in a ULID timestamp",
            millis
        ));
    }

    Ok(Uuid::from(Ulid::from_parts(millis as u64, 0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_MILLIS: i64 = 1697043600123;
    const KNOWN_UUID: &str = "018b1fae-52fb-0000-0000-000000000000";

    #[test]
    fn test_to_uuid() {
        let ts = DateTime::from_timestamp_millis(KNOWN_MILLIS).unwrap();
        let id = to_uuid(&ts).unwrap();
        assert_eq!(id.to_string(), KNOWN_UUID);
        assert_eq!(ulid_millis(&id), KNOWN_MILLIS);
        assert_eq!(Ulid::from(id).random(), 0);

        // sub-millisecond precision is dropped
        let ts = DateTime::from_timestamp(1697043600, 123_999_999).unwrap();
        assert_eq!(to_uuid(&ts).unwrap().to_string(), KNOWN_UUID);

        let epoch = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(to_uuid(&epoch).unwrap(), Uuid::nil());
    }

    #[test]
    fn test_to_uuid_out_of_range() {
        let before_epoch = DateTime::from_timestamp_millis(-1).unwrap();
        assert!(to_uuid(&before_epoch).is_err());

        let max = DateTime::from_timestamp_millis(MAX_ULID_MILLIS).unwrap();
        assert_eq!(
            to_uuid(&max).unwrap().to_string(),
            "ffffffff-ffff-0000-0000-000000000000"
        );

        // rejected rather than wrapped into 48 bits
        let too_big = DateTime::from_timestamp_millis(MAX_ULID_MILLIS + 1).unwrap();
        assert!(to_uuid(&too_big).is_err());
    }

    #[test]
    fn test_parse_uuid() {
        let ts = parse_uuid(KNOWN_UUID).unwrap();
        assert_eq!(ts.timestamp_millis(), KNOWN_MILLIS);

        // entropy bits are ignored, other literal forms are accepted
        let ts = parse_uuid("018B1FAE52FB7A3C9D2E112233445566").unwrap();
        assert_eq!(ts.timestamp_millis(), KNOWN_MILLIS);
        let ts = parse_uuid("urn:uuid:018b1fae-52fb-0000-0000-000000000000").unwrap();
        assert_eq!(ts.timestamp_millis(), KNOWN_MILLIS);

        assert!(parse_uuid("not-a-time").is_err());
        assert!(parse_uuid("018b1fae-52fb-0000-0000").is_err());
    }
}
