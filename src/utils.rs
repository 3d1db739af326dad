/// Utility functions
use chrono::{Duration, FixedOffset};
use serde::Serializer;

/// Signed duration as fractional seconds
pub fn duration_secs(d: &Duration) -> f64 {
    match d.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => d.num_milliseconds() as f64 / 1_000.0,
    }
}

/// Serialize an optional UTC offset as `+08:00`
pub fn serialize_offset<S>(offset: &Option<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match offset {
        Some(o) => serializer.collect_str(o),
        None => serializer.serialize_none(),
    }
}

/// Serialize an optional duration as fractional seconds
pub fn serialize_seconds<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match duration {
        Some(d) => serializer.serialize_f64(duration_secs(d)),
        None => serializer.serialize_none(),
    }
}
