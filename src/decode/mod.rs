/// Tolerant decoding of the configuration and live-state documents
use crate::domain::{
    Configuration, DishConfig, DishState, Signal, Site, SpacecraftProfile, State, Station, Target,
};
use crate::errors::DecodeError;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use node::Node;

pub mod node;

/// Decode the configuration document (`<config>` with `sites` and `spacecraftMap`)
pub fn decode_configuration(bytes: &[u8]) -> Result<Configuration, DecodeError> {
    let (tag, tree) = Node::parse(bytes)?;
    let root = Record::root(&tag, &tree);

    let sites = root
        .wrapped("sites", "site")
        .iter()
        .map(site)
        .collect::<Result<Vec<_>, _>>()?;
    let spacecraft = root
        .wrapped("spacecraftMap", "spacecraft")
        .iter()
        .map(spacecraft_profile)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Configuration { sites, spacecraft })
}

/// Decode the live-state document (`<dsn>` with interleaved stations and dishes)
pub fn decode_state(bytes: &[u8]) -> Result<State, DecodeError> {
    let (tag, tree) = Node::parse(bytes)?;
    let root = Record::root(&tag, &tree);

    let stations = root
        .sequence("station")
        .iter()
        .map(station)
        .collect::<Result<Vec<_>, _>>()?;
    let dishes = root
        .sequence("dish")
        .iter()
        .map(dish_state)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(State {
        stations,
        dishes,
        timestamp: root.epoch_millis("timestamp")?,
    })
}

/// Older whole-second rule for spacecraft-level light time: absent or
/// negative input means "no value". Live targets must not use this, since
/// their `-1` sentinel is meaningful.
///
/// Neither current document carries a spacecraft-level light time, so the
/// decoders here do not call it.
pub fn clamped_seconds(value: Option<f64>) -> Option<Duration> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .and_then(|v| Duration::try_seconds(v as i64))
}

fn site(record: &Record<'_>) -> Result<Site, DecodeError> {
    Ok(Site {
        name: record.name()?,
        display_name: record.string("friendlyName")?,
        longitude: record.real("longitude")?,
        latitude: record.real("latitude")?,
        dishes: record
            .sequence("dish")
            .iter()
            .map(dish_config)
            .collect::<Result<Vec<_>, _>>()?,
    })
}

fn dish_config(record: &Record<'_>) -> Result<DishConfig, DecodeError> {
    Ok(DishConfig {
        name: record.name()?,
        display_name: record.string("friendlyName")?,
        dish_type: record.string("type")?,
    })
}

fn spacecraft_profile(record: &Record<'_>) -> Result<SpacecraftProfile, DecodeError> {
    Ok(SpacecraftProfile {
        name: record.name()?,
        explorer_name: record.string("explorerName")?,
        friendly_acronym: record.string("friendlyAcronym")?,
        friendly_name: record.string("friendlyName")?,
        has_thumbnail: record.flag("thumbnail")?,
    })
}

fn station(record: &Record<'_>) -> Result<Station, DecodeError> {
    Ok(Station {
        name: record.name()?,
        display_name: record.string("friendlyName")?,
        time: record.epoch_millis("timeUTC")?,
        time_zone_offset: record.offset_millis("timeZoneOffset")?,
    })
}

fn dish_state(record: &Record<'_>) -> Result<DishState, DecodeError> {
    Ok(DishState {
        name: record.name()?,
        azimuth: record.real("azimuthAngle")?,
        elevation: record.real("elevationAngle")?,
        wind_speed: record.real("windSpeed")?,
        multiple_spacecraft_per_aperture: record.flag("isMSPA")?,
        array: record.flag("isArray")?,
        delta_differential_one_way_ranging: record.flag("isDDOR")?,
        activity: record.string("activity")?,
        up_signals: record
            .sequence("upSignal")
            .iter()
            .map(signal)
            .collect::<Result<Vec<_>, _>>()?,
        down_signals: record
            .sequence("downSignal")
            .iter()
            .map(signal)
            .collect::<Result<Vec<_>, _>>()?,
        targets: record
            .sequence("target")
            .iter()
            .map(target)
            .collect::<Result<Vec<_>, _>>()?,
    })
}

fn signal(record: &Record<'_>) -> Result<Signal, DecodeError> {
    Ok(Signal {
        active: record.flag("active")?,
        signal_type: record.string("signalType")?,
        data_rate: record.real("dataRate")?,
        frequency: record.real("frequency")?,
        band: record.string("band")?,
        power: record.real("power")?,
        spacecraft: record.string("spacecraft")?,
        spacecraft_id: record.integer("spacecraftID")?,
    })
}

fn target(record: &Record<'_>) -> Result<Target, DecodeError> {
    Ok(Target {
        name: record.name()?,
        id: record.integer("id")?,
        up_leg_range: record.real("uplegRange")?,
        down_leg_range: record.real("downlegRange")?,
        round_trip_light_time: record.signed_seconds("rtlt")?,
    })
}

/// Cursor over one node, remembering where it sits in the document.
///
/// [`Node::parse`] builds the untyped tree and a `Record` walks it to fill
/// the domain records. Every repeated child (site dishes, dish signals and
/// targets, root stations and dishes) goes through [`Record::sequence`], so
/// one occurrence still yields a one-element `Vec` and zero occurrences
/// yield an empty one. Blank leaves decode as `None`; content that cannot be
/// coerced is a [`DecodeError::Field`] carrying the path of the field.
struct Record<'a> {
    node: &'a Node,
    path: String,
}

impl<'a> Record<'a> {
    fn root(tag: &str, node: &'a Node) -> Self {
        Self {
            node,
            path: tag.to_string(),
        }
    }

    fn field_path(&self, key: &str) -> String {
        format!("{}.{}", self.path, key)
    }

    fn error(&self, key: &str, message: impl Into<String>) -> DecodeError {
        DecodeError::Field {
            path: self.field_path(key),
            message: message.into(),
        }
    }

    /// Zero, one or many `key` children, always as a sequence
    fn sequence(&self, key: &str) -> Vec<Record<'a>> {
        match self.node.get(key) {
            None => Vec::new(),
            Some(node) => node
                .occurrences()
                .into_iter()
                .enumerate()
                .map(|(i, node)| Record {
                    node,
                    path: format!("{}.{}[{}]", self.path, key, i),
                })
                .collect(),
        }
    }

    /// Items of `item` under one or more `wrapper` elements
    fn wrapped(&self, wrapper: &str, item: &str) -> Vec<Record<'a>> {
        self.sequence(wrapper)
            .iter()
            .flat_map(|w| w.sequence(item))
            .collect()
    }

    /// Trimmed leaf text; blank or missing is `None`
    fn leaf(&self, key: &str) -> Result<Option<&'a str>, DecodeError> {
        let Some(node) = self.node.get(key) else {
            return Ok(None);
        };
        match node.text() {
            Some(text) => {
                let text = text.trim();
                Ok(if text.is_empty() { None } else { Some(text) })
            }
            None => Err(self.error(key, "expected a single value")),
        }
    }

    fn string(&self, key: &str) -> Result<Option<String>, DecodeError> {
        Ok(self.leaf(key)?.map(str::to_string))
    }

    fn name(&self) -> Result<String, DecodeError> {
        self.string("name")?
            .ok_or_else(|| self.error("name", "missing lookup name"))
    }

    fn real(&self, key: &str) -> Result<Option<f64>, DecodeError> {
        self.leaf(key)?
            .map(|text| {
                parse_real(text)
                    .ok_or_else(|| self.error(key, format!("expected a number, found `{}`", text)))
            })
            .transpose()
    }

    fn integer(&self, key: &str) -> Result<Option<i64>, DecodeError> {
        self.leaf(key)?
            .map(|text| {
                parse_integer(text)
                    .ok_or_else(|| self.error(key, format!("expected an integer, found `{}`", text)))
            })
            .transpose()
    }

    fn flag(&self, key: &str) -> Result<Option<bool>, DecodeError> {
        self.leaf(key)?
            .map(|text| {
                parse_flag(text)
                    .ok_or_else(|| self.error(key, format!("expected a boolean, found `{}`", text)))
            })
            .transpose()
    }

    fn epoch_millis(&self, key: &str) -> Result<Option<DateTime<Utc>>, DecodeError> {
        self.integer(key)?
            .map(|ms| {
                Utc.timestamp_millis_opt(ms)
                    .single()
                    .ok_or_else(|| self.error(key, format!("timestamp {} out of range", ms)))
            })
            .transpose()
    }

    /// Signed millisecond offset, truncated to whole seconds
    fn offset_millis(&self, key: &str) -> Result<Option<FixedOffset>, DecodeError> {
        self.integer(key)?
            .map(|ms| {
                i32::try_from(ms / 1000)
                    .ok()
                    .and_then(FixedOffset::east_opt)
                    .ok_or_else(|| self.error(key, format!("utc offset {}ms out of range", ms)))
            })
            .transpose()
    }

    /// Fractional seconds, sign preserved
    fn signed_seconds(&self, key: &str) -> Result<Option<Duration>, DecodeError> {
        self.real(key)?
            .map(|secs| {
                let micros = (secs * 1_000_000.0).round();
                if micros.abs() < i64::MAX as f64 {
                    Ok(Duration::microseconds(micros as i64))
                } else {
                    Err(self.error(key, format!("duration {}s out of range", secs)))
                }
            })
            .transpose()
    }
}

fn parse_real(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_integer(text: &str) -> Option<i64> {
    text.parse::<i64>().ok().or_else(|| {
        parse_real(text)
            .filter(|v| v.abs() < i64::MAX as f64)
            .map(|v| v.trunc() as i64)
    })
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
