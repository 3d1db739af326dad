/// Name-keyed join of configuration against live state
use crate::domain::{
    Configuration, DishConfig, DishState, MergedDish, MergedResult, MergedStation, MergedTarget,
    Site, SpacecraftProfile, State, Station, Target,
};
use std::collections::HashMap;

fn key(name: &str) -> String {
    name.to_lowercase()
}

/// Case-insensitive index; output fields keep the source casing.
///
/// Folded left to right, so when two entries share a lowercased name the
/// later one wins. That is a compatibility quirk, not a guarantee.
fn index_by_name<'a, T>(items: &'a [T], name: impl Fn(&T) -> &str) -> HashMap<String, &'a T> {
    items.iter().fold(HashMap::new(), |mut index, item| {
        index.insert(key(name(item)), item);
        index
    })
}

struct Indexes<'a> {
    stations: HashMap<String, &'a Station>,
    dishes: HashMap<String, &'a DishState>,
    spacecraft: HashMap<String, &'a SpacecraftProfile>,
}

/// Join a configuration and a state snapshot. Never fails: unmatched names
/// leave the state-sourced fields empty.
pub fn merge(configuration: &Configuration, state: &State) -> MergedResult {
    let indexes = Indexes {
        stations: index_by_name(&state.stations, |s| s.name.as_str()),
        dishes: index_by_name(&state.dishes, |d| d.name.as_str()),
        spacecraft: index_by_name(&configuration.spacecraft, |s| s.name.as_str()),
    };

    MergedResult {
        stations: configuration
            .sites
            .iter()
            .map(|site| merge_station(site, &indexes))
            .collect(),
        timestamp: state.timestamp,
    }
}

fn merge_station(site: &Site, indexes: &Indexes<'_>) -> MergedStation {
    let station = indexes.stations.get(&key(&site.name));

    MergedStation {
        name: site.name.clone(),
        display_name: site.display_name.clone(),
        longitude: site.longitude,
        latitude: site.latitude,
        time: station.and_then(|s| s.time),
        time_zone_offset: station.and_then(|s| s.time_zone_offset),
        dishes: site
            .dishes
            .iter()
            .map(|dish| merge_dish(dish, indexes))
            .collect(),
    }
}

fn merge_dish(config: &DishConfig, indexes: &Indexes<'_>) -> MergedDish {
    let Some(dish) = indexes.dishes.get(&key(&config.name)) else {
        return MergedDish {
            name: config.name.clone(),
            display_name: config.display_name.clone(),
            dish_type: config.dish_type.clone(),
            azimuth: None,
            elevation: None,
            wind_speed: None,
            multiple_spacecraft_per_aperture: None,
            array: None,
            delta_differential_one_way_ranging: None,
            activity: None,
            up_signals: Vec::new(),
            down_signals: Vec::new(),
            targets: Vec::new(),
        };
    };

    MergedDish {
        name: config.name.clone(),
        display_name: config.display_name.clone(),
        dish_type: config.dish_type.clone(),
        azimuth: dish.azimuth,
        elevation: dish.elevation,
        wind_speed: dish.wind_speed,
        multiple_spacecraft_per_aperture: dish.multiple_spacecraft_per_aperture,
        array: dish.array,
        delta_differential_one_way_ranging: dish.delta_differential_one_way_ranging,
        activity: dish.activity.clone(),
        up_signals: dish.up_signals.clone(),
        down_signals: dish.down_signals.clone(),
        targets: dish
            .targets
            .iter()
            .map(|target| merge_target(target, indexes))
            .collect(),
    }
}

fn merge_target(target: &Target, indexes: &Indexes<'_>) -> MergedTarget {
    let profile = indexes.spacecraft.get(&key(&target.name));

    MergedTarget {
        name: target.name.clone(),
        id: target.id,
        up_leg_range: target.up_leg_range,
        down_leg_range: target.down_leg_range,
        round_trip_light_time: target.round_trip_light_time,
        explorer_name: profile.and_then(|p| p.explorer_name.clone()),
        friendly_acronym: profile.and_then(|p| p.friendly_acronym.clone()),
        friendly_name: profile.and_then(|p| p.friendly_name.clone()),
        has_thumbnail: profile.and_then(|p| p.has_thumbnail),
    }
}
