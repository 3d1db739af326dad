/// Domain models for the Deep Space Network feeds
use crate::utils::{serialize_offset, serialize_seconds};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Serialize;

/// Ground station site from the configuration document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub name: String,
    pub display_name: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub dishes: Vec<DishConfig>,
}

/// Antenna as described by the configuration document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishConfig {
    pub name: String,
    pub display_name: Option<String>,
    pub dish_type: Option<String>,
}

/// Presentation metadata for a spacecraft
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacecraftProfile {
    pub name: String,
    pub explorer_name: Option<String>,
    pub friendly_acronym: Option<String>,
    pub friendly_name: Option<String>,
    pub has_thumbnail: Option<bool>,
}

/// Slowly-changing topology document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub sites: Vec<Site>,
    pub spacecraft: Vec<SpacecraftProfile>,
}

/// Live station clock data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub name: String,
    pub display_name: Option<String>,
    pub time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_offset")]
    pub time_zone_offset: Option<FixedOffset>,
}

/// Up or down link carried by a dish
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub active: Option<bool>,
    pub signal_type: Option<String>,
    pub data_rate: Option<f64>,
    pub frequency: Option<f64>,
    pub band: Option<String>,
    pub power: Option<f64>,
    pub spacecraft: Option<String>,
    pub spacecraft_id: Option<i64>,
}

/// Spacecraft a dish is currently pointed at.
///
/// `round_trip_light_time` keeps the feed's negative sentinel (`-1`) as a
/// negative duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub name: String,
    pub id: Option<i64>,
    pub up_leg_range: Option<f64>,
    pub down_leg_range: Option<f64>,
    #[serde(serialize_with = "serialize_seconds")]
    pub round_trip_light_time: Option<Duration>,
}

/// Live antenna telemetry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishState {
    pub name: String,
    pub azimuth: Option<f64>,
    pub elevation: Option<f64>,
    pub wind_speed: Option<f64>,
    pub multiple_spacecraft_per_aperture: Option<bool>,
    pub array: Option<bool>,
    pub delta_differential_one_way_ranging: Option<bool>,
    pub activity: Option<String>,
    pub up_signals: Vec<Signal>,
    pub down_signals: Vec<Signal>,
    pub targets: Vec<Target>,
}

/// Frequently-changing telemetry snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub stations: Vec<Station>,
    pub dishes: Vec<DishState>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedTarget {
    pub name: String,
    pub id: Option<i64>,
    pub up_leg_range: Option<f64>,
    pub down_leg_range: Option<f64>,
    #[serde(serialize_with = "serialize_seconds")]
    pub round_trip_light_time: Option<Duration>,
    pub explorer_name: Option<String>,
    pub friendly_acronym: Option<String>,
    pub friendly_name: Option<String>,
    pub has_thumbnail: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedDish {
    pub name: String,
    pub display_name: Option<String>,
    pub dish_type: Option<String>,
    pub azimuth: Option<f64>,
    pub elevation: Option<f64>,
    pub wind_speed: Option<f64>,
    pub multiple_spacecraft_per_aperture: Option<bool>,
    pub array: Option<bool>,
    pub delta_differential_one_way_ranging: Option<bool>,
    pub activity: Option<String>,
    pub up_signals: Vec<Signal>,
    pub down_signals: Vec<Signal>,
    pub targets: Vec<MergedTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedStation {
    pub name: String,
    pub display_name: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_offset")]
    pub time_zone_offset: Option<FixedOffset>,
    pub dishes: Vec<MergedDish>,
}

/// Denormalized view in configuration site order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedResult {
    pub stations: Vec<MergedStation>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
