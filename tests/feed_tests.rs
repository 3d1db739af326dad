use chrono::{Duration, FixedOffset, TimeZone, Utc};
use dsn_now::decode::{decode_configuration, decode_state};
use dsn_now::services::merge::merge;
use dsn_now::{DsnService, DsnUrls, Transport, TransportError};

const CONFIG: &[u8] = include_bytes!("fixtures/config.xml");
const STATE: &[u8] = include_bytes!("fixtures/dsn.xml");

struct FixtureTransport;

impl Transport for FixtureTransport {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        match url {
            "fixture://config.xml" => Ok(CONFIG.to_vec()),
            "fixture://dsn.xml" => Ok(STATE.to_vec()),
            _ => Err(TransportError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

fn fixture_service() -> DsnService<FixtureTransport> {
    DsnService::new(
        FixtureTransport,
        DsnUrls {
            configuration: "fixture://config.xml".to_string(),
            state: "fixture://dsn.xml".to_string(),
        },
    )
}

#[test]
fn decodes_configuration_fixture() {
    let config = decode_configuration(CONFIG).unwrap();

    let sites: Vec<_> = config.sites.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(sites, vec!["mdscc", "gdscc", "cdscc"]);

    let madrid: Vec<_> = config.sites[0].dishes.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(madrid, vec!["DSS63", "DSS65", "DSS53", "DSS54"]);

    assert_eq!(config.sites[2].longitude, Some(148.9812673));
    assert_eq!(config.spacecraft.len(), 8);
    assert_eq!(config.spacecraft[3].explorer_name, None);
    assert_eq!(config.spacecraft[7].friendly_acronym.as_deref(), Some("art1"));
}

#[test]
fn decodes_state_fixture() {
    let state = decode_state(STATE).unwrap();

    assert_eq!(state.stations.len(), 3);
    assert_eq!(state.stations[0].time_zone_offset, FixedOffset::west_opt(8 * 3600));
    assert_eq!(state.stations[2].time_zone_offset, FixedOffset::east_opt(11 * 3600));
    assert_eq!(state.dishes.len(), 8);

    let dss14 = &state.dishes[0];
    assert_eq!(dss14.activity.as_deref(), Some("Antenna Unplanned Maintenance"));
    assert_eq!(dss14.wind_speed, None);
    assert!(dss14.up_signals.is_empty());
    assert_eq!(dss14.targets[0].round_trip_light_time, Some(Duration::seconds(-1)));

    let dss54 = &state.dishes[4];
    assert_eq!(dss54.name, "DSS54");
    assert_eq!(dss54.up_signals.len(), 1);
    assert_eq!(dss54.down_signals.len(), 2);
    assert_eq!(dss54.down_signals[1].band.as_deref(), Some("S"));

    let dss36 = &state.dishes[6];
    assert_eq!(dss36.targets[0].up_leg_range, Some(21400000000.0));

    assert_eq!(state.timestamp, Utc.timestamp_millis_opt(1770497799000).single());
}

#[test]
fn merges_fixtures() {
    let merged = merge(&decode_configuration(CONFIG).unwrap(), &decode_state(STATE).unwrap());

    let madrid = &merged.stations[0];
    assert_eq!(madrid.display_name.as_deref(), Some("Madrid"));
    assert_eq!(madrid.time_zone_offset, FixedOffset::east_opt(3600));

    let dss63 = &madrid.dishes[0];
    assert_eq!(dss63.display_name.as_deref(), Some("DSS 63"));
    assert_eq!(dss63.dish_type.as_deref(), Some("70M"));
    assert_eq!(dss63.azimuth, Some(131.0));
    assert_eq!(dss63.targets[0].explorer_name.as_deref(), Some("sc_juno"));
    assert_eq!(dss63.targets[0].friendly_name.as_deref(), Some("Juno"));
    assert_eq!(dss63.targets[0].has_thumbnail, Some(true));

    // DSS65 is configured but absent from the live feed
    let dss65 = &madrid.dishes[1];
    assert_eq!(dss65.display_name.as_deref(), Some("DSS 65"));
    assert_eq!(dss65.azimuth, None);
    assert_eq!(dss65.multiple_spacecraft_per_aperture, None);
    assert!(dss65.targets.is_empty());

    let dss53 = &madrid.dishes[2];
    assert_eq!(dss53.activity.as_deref(), Some("Engineering Upgrades"));
    assert_eq!(dss53.targets[0].name, "DSN");
    assert_eq!(dss53.targets[0].friendly_name, None);

    // DSS25 and DSS26 are configured for Goldstone but not reporting
    let goldstone = &merged.stations[1];
    assert_eq!(goldstone.dishes.len(), 4);
    assert!(goldstone.dishes[2].activity.is_none());

    assert_eq!(merged.timestamp, Utc.timestamp_millis_opt(1770497799000).single());
}

#[test]
fn merged_json_shape() {
    let merged = merge(&decode_configuration(CONFIG).unwrap(), &decode_state(STATE).unwrap());
    let json = serde_json::to_value(&merged).unwrap();

    let station = &json["stations"][1];
    assert_eq!(station["name"], "gdscc");
    assert_eq!(station["timeZoneOffset"], "-08:00");

    let target = &station["dishes"][0]["targets"][0];
    assert_eq!(target["roundTripLightTime"], -1.0);
    assert_eq!(target["explorerName"], serde_json::Value::Null);
}

#[tokio::test]
async fn service_fetches_and_merges() {
    let service = fixture_service();

    let merged = service.fetch_merged(Duration::minutes(30)).await.unwrap();
    assert_eq!(merged.stations.len(), 3);
    assert_eq!(merged.stations[2].name, "cdscc");
    assert_eq!(merged.stations[2].dishes[0].name, "DSS43");
    assert_eq!(
        merged.stations[2].dishes[0].targets[0].friendly_name.as_deref(),
        Some("Mars Reconnaissance Orbiter")
    );

    let again = service.fetch_merged(Duration::minutes(30)).await.unwrap();
    assert_eq!(merged, again);
}

#[tokio::test]
async fn service_exposes_each_document() {
    let service = fixture_service();

    let config = service.fetch_configuration().await.unwrap();
    assert_eq!(config.sites.len(), 3);

    let state = service.fetch_state().await.unwrap();
    assert_eq!(state.stations[1].name, "mdscc");
}
