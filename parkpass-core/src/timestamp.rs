//! Wire format for pass validity timestamps.
//!
//! Offset-qualified timestamps are converted to UTC. Timestamps without an
//! offset (`2026-07-04T09:00:00`) are taken to be UTC already.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}

pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = raw.parse::<DateTime<Utc>>() {
        return Ok(at);
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|err| format!("invalid datetime `{raw}`: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_with_and_without_offset() {
        let expected = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse("2020-01-01T00:00:00Z").unwrap(), expected);
        assert_eq!(parse("2020-01-01T02:00:00+02:00").unwrap(), expected);
        assert_eq!(parse("2020-01-01T00:00:00").unwrap(), expected);
        assert_eq!(
            parse("2020-01-01T00:00:00.250").unwrap(),
            expected + chrono::Duration::milliseconds(250)
        );
        assert!(parse("2020-01-01").is_err());
        assert!(parse("tomorrow").is_err());
    }
}
