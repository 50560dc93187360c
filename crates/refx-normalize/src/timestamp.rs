//! Epoch-second timestamp handling.
//!
//! Library timestamps are epoch seconds, stored inconsistently as integers,
//! numeric strings, or float-like strings. Zero, null, and unparsable values
//! all mean "no timestamp", never an error.

use chrono::{DateTime, Local, TimeZone};

use refx_model::RawValue;

/// Parse an epoch-seconds value into a local datetime.
pub fn parse_epoch(value: Option<&RawValue>) -> Option<DateTime<Local>> {
    let seconds = value?.as_int()?;
    if seconds == 0 {
        return None;
    }
    Local.timestamp_opt(seconds, 0).single()
}

/// ISO-8601 rendering at second precision, local time.
pub fn iso_second(datetime: &DateTime<Local>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Parse-and-render convenience for note stamping.
pub fn epoch_iso(value: Option<&RawValue>) -> Option<String> {
    parse_epoch(value).map(|datetime| iso_second(&datetime))
}

/// Access-date handling: numeric epoch values are reformatted to a fixed
/// human-readable local-time string, anything else passes through verbatim.
pub fn format_access_date(value: Option<&RawValue>) -> Option<String> {
    let value = value?;
    if value.as_int().is_some() {
        return parse_epoch(Some(value))
            .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    value.display().filter(|text| !text.trim().is_empty())
}
