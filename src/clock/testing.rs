// Deterministic formatter for tests: fixed offset tables instead of tzdata.

use super::formatter::{long_offset, short_offset};
use super::{CalendarFields, ClockError, FieldSet, Instant, NameStyle, ZoneFormatter, ZoneId};
use chrono::{DateTime, Datelike, Timelike};
use std::collections::HashMap;

struct Rule {
    from: i64,
    offset_minutes: i32,
    short: String,
    long: String,
}

#[derive(Default)]
pub(crate) struct FixedFormatter {
    zones: HashMap<String, Vec<Rule>>,
    midnight_as_24: bool,
}

impl FixedFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constant offset for all instants.
    pub fn zone(self, id: &str, offset_minutes: i32, short: &str, long: &str) -> Self {
        self.transition(id, Instant::from_millis(i64::MIN), offset_minutes, short, long)
    }

    /// Offset in force from `from` onwards.
    pub fn transition(
        mut self,
        id: &str,
        from: Instant,
        offset_minutes: i32,
        short: &str,
        long: &str,
    ) -> Self {
        let rules = self.zones.entry(id.to_string()).or_default();
        rules.push(Rule {
            from: from.as_millis(),
            offset_minutes,
            short: short.to_string(),
            long: long.to_string(),
        });
        rules.sort_by_key(|r| r.from);
        self
    }

    /// Report midnight as hour 24, like some 24-hour locale formatters.
    pub fn midnight_as_24(mut self) -> Self {
        self.midnight_as_24 = true;
        self
    }

    fn rule(&self, instant: Instant, zone: &ZoneId) -> Result<&Rule, ClockError> {
        self.zones
            .get(zone.as_str())
            .and_then(|rules| rules.iter().rev().find(|r| r.from <= instant.as_millis()))
            .ok_or_else(|| ClockError::UnknownZone(zone.to_string()))
    }
}

impl ZoneFormatter for FixedFormatter {
    fn format(
        &self,
        instant: Instant,
        zone: &ZoneId,
        fields: FieldSet,
    ) -> Result<CalendarFields, ClockError> {
        let rule = self.rule(instant, zone)?;
        let local_ms = instant.as_millis() + i64::from(rule.offset_minutes) * 60_000;
        let local = DateTime::from_timestamp_millis(local_ms)
            .ok_or_else(|| ClockError::InvalidWallClock(local_ms.to_string()))?
            .naive_utc();

        let mut out = CalendarFields {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: match fields {
                FieldSet::Minutes => 0,
                FieldSet::Seconds => local.second(),
            },
        };
        if self.midnight_as_24 && out.hour == 0 {
            out.hour = 24;
        }
        Ok(out)
    }

    fn format_name(
        &self,
        instant: Instant,
        zone: &ZoneId,
        style: NameStyle,
    ) -> Result<String, ClockError> {
        let rule = self.rule(instant, zone)?;
        let secs = rule.offset_minutes * 60;
        Ok(match style {
            NameStyle::Short => rule.short.clone(),
            NameStyle::Long => rule.long.clone(),
            NameStyle::ShortOffset => short_offset(secs),
            NameStyle::LongOffset => long_offset(secs),
        })
    }
}
