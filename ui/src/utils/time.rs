use jiff::{Timestamp, tz};

/// Server timestamps in the browser's time zone, or "-" when missing.
pub fn format_timestamp(timestamp: Option<Timestamp>) -> String {
    match timestamp {
        Some(timestamp) => timestamp
            .to_zoned(tz::TimeZone::system())
            .strftime("%d %b %Y %H:%M")
            .to_string(),
        None => "-".to_string(),
    }
}
