use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::FolioError;

/// Parses the dates found in front-matter and CMS payloads. Accepts a plain
/// date such as "2024-09-01", an RFC 3339 timestamp such as
/// "2024-09-01T05:10:44.123Z" or a timestamp without an offset. Only the date
/// part is kept.
pub fn parse_content_date(s: &str) -> Result<NaiveDate, FolioError> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    Err(FolioError::DateParseFailure(s.to_string()))
}

/// Formats `date` the way pages show it, e.g. "January 15, 2024".
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Formats `date` as "2024-01-15". Used in `datetime` attributes and the
/// sitemap.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Serde glue so that records can hold a `NaiveDate` while the files hold
/// any of the formats [`parse_content_date`] understands.
pub(crate) mod serde_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{format_iso_date, parse_content_date};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_iso_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_content_date(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_date() {
        assert_eq!(parse_content_date("2024-01-15").unwrap(), ymd(2024, 1, 15));
    }

    #[test]
    fn parses_rfc3339_timestamp() {
        assert_eq!(
            parse_content_date("2025-03-02T10:11:12.345Z").unwrap(),
            ymd(2025, 3, 2)
        );
    }

    #[test]
    fn parses_timestamp_without_offset() {
        assert_eq!(
            parse_content_date(" 2023-12-31T23:59:59 ").unwrap(),
            ymd(2023, 12, 31)
        );
    }

    #[test]
    fn rejects_garbage() {
        match parse_content_date("last tuesday") {
            Err(FolioError::DateParseFailure(s)) if s == "last tuesday" => {}
            x => panic!("Unexpected result from parse_content_date(): {:?}", x),
        }
    }

    #[test]
    fn display_format_uses_long_month() {
        assert_eq!(format_display_date(ymd(2024, 1, 5)), "January 5, 2024");
        assert_eq!(format_iso_date(ymd(2024, 1, 5)), "2024-01-05");
    }
}
