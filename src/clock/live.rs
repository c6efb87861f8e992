// src/clock/live.rs

use super::{
    zone_abbreviation, FieldSet, Instant, Side, SyncState, WallClockConverter, ZoneFormatter,
    ZoneId,
};
use log::trace;

/// Placeholder shown for a zone that cannot be rendered.
pub const BLANK_TIME: &str = "--:--:--";

/// What a live clock for one zone shows at a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveReading {
    pub zone: ZoneId,
    /// "2024-01-15"
    pub date: String,
    /// "14:05:09"
    pub time: String,
    pub abbreviation: String,
}

/// Zones that get a live clock: both field zones as they are now, then the extras.
pub fn displayed_zones(state: &SyncState, extras: &[ZoneId]) -> Vec<ZoneId> {
    let mut zones = vec![
        state.field(Side::A).zone.clone(),
        state.field(Side::B).zone.clone(),
    ];
    for zone in extras {
        if !zones.contains(zone) {
            zones.push(zone.clone());
        }
    }
    zones
}

/// Render every displayed zone against `now`. Called once per second by the host.
pub fn tick<F: ZoneFormatter>(
    converter: &WallClockConverter<F>,
    zones: &[ZoneId],
    now: Instant,
) -> Vec<LiveReading> {
    zones
        .iter()
        .map(|zone| {
            let abbreviation = zone_abbreviation(converter.formatter(), now, zone);
            match converter.render_fields(now, zone, FieldSet::Seconds) {
                Ok(f) => LiveReading {
                    zone: zone.clone(),
                    date: format!("{:04}-{:02}-{:02}", f.year, f.month, f.day),
                    time: format!("{:02}:{:02}:{:02}", f.hour, f.minute, f.second),
                    abbreviation,
                },
                Err(e) => {
                    trace!("Live clock for {} unavailable: {}", zone, e);
                    LiveReading {
                        zone: zone.clone(),
                        date: String::new(),
                        time: BLANK_TIME.to_string(),
                        abbreviation,
                    }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::FixedFormatter;
    use crate::clock::{SyncEvent, TzFormatter};
    use chrono::{TimeZone, Utc};

    #[test]
    fn renders_each_zone_with_seconds() {
        let c = WallClockConverter::new(TzFormatter::new());
        let now = Instant::from(Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 7).single().unwrap());
        let zones = [ZoneId::new("UTC"), ZoneId::new("Asia/Kolkata"), ZoneId::new("Bad/Zone")];

        let readings = tick(&c, &zones, now);
        assert_eq!(readings.len(), 3);

        assert_eq!(readings[0].date, "2024-01-15");
        assert_eq!(readings[0].time, "23:59:07");
        assert_eq!(readings[0].abbreviation, "UTC (GMT)");

        assert_eq!(readings[1].date, "2024-01-16");
        assert_eq!(readings[1].time, "05:29:07");
        assert_eq!(readings[1].abbreviation, "IST (GMT+5:30)");

        assert_eq!(readings[2].time, BLANK_TIME);
        assert!(readings[2].abbreviation.is_empty());
    }

    #[test]
    fn displayed_zones_follow_zone_changes() {
        let c = WallClockConverter::new(TzFormatter::new());
        let now = Instant::from(Utc.with_ymd_and_hms(2024, 3, 1, 14, 20, 0).single().unwrap());
        let extras = [ZoneId::new("Asia/Tokyo"), ZoneId::new("Asia/Kolkata")];

        let state = SyncState::initial("America/New_York".into(), "Europe/London".into(), now, &c);
        assert_eq!(
            displayed_zones(&state, &extras),
            vec![
                ZoneId::new("America/New_York"),
                ZoneId::new("Europe/London"),
                ZoneId::new("Asia/Tokyo"),
                ZoneId::new("Asia/Kolkata"),
            ]
        );

        let state = state.apply(
            SyncEvent::ChangeZone {
                side: Side::B,
                zone: ZoneId::new("Asia/Tokyo"),
            },
            &c,
        );
        let zones = displayed_zones(&state, &extras);
        assert_eq!(
            zones,
            vec![
                ZoneId::new("America/New_York"),
                ZoneId::new("Asia/Tokyo"),
                ZoneId::new("Asia/Kolkata"),
            ]
        );

        let readings = tick(&c, &zones, now);
        assert_eq!(readings[1].zone, ZoneId::new("Asia/Tokyo"));
        assert_eq!(readings[1].time, "23:20:00");
    }

    #[test]
    fn midnight_ticks_show_hour_zero() {
        let c = WallClockConverter::new(FixedFormatter::new().zone("Fake/Utc", 0, "UTC", "").midnight_as_24());
        let now = Instant::from(Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 30).single().unwrap());
        let readings = tick(&c, &[ZoneId::new("Fake/Utc")], now);
        assert_eq!(readings[0].time, "00:00:30");
        assert_eq!(readings[0].date, "2024-01-16");
    }
}
