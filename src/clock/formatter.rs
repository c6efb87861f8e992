// src/clock/formatter.rs

use super::{CalendarFields, ClockError, Instant, ZoneId};
use chrono::{DateTime, Datelike, Offset, Timelike};
use chrono_tz::{OffsetName, Tz};
use log::trace;
use std::collections::HashMap;

/// Which calendar fields a `format` call should fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSet {
    /// Date, hour and minute; `second` is reported as 0.
    Minutes,
    Seconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    /// Letter abbreviation such as "EST", or a short offset when the zone has none.
    Short,
    /// "GMT", "GMT+5:30", "GMT-5"
    ShortOffset,
    /// "GMT", "GMT+05:30", "GMT-05:00"
    LongOffset,
    /// "India Standard Time", or the long offset when no name is known.
    Long,
}

/// Zone-aware formatting capability the converter pivots through.
///
/// Given an absolute instant and a zone identifier, reports what a clock
/// in that zone displays, and how the zone is named at that instant.
pub trait ZoneFormatter {
    fn format(
        &self,
        instant: Instant,
        zone: &ZoneId,
        fields: FieldSet,
    ) -> Result<CalendarFields, ClockError>;

    fn format_name(
        &self,
        instant: Instant,
        zone: &ZoneId,
        style: NameStyle,
    ) -> Result<String, ClockError>;
}

impl<F: ZoneFormatter + ?Sized> ZoneFormatter for &F {
    fn format(
        &self,
        instant: Instant,
        zone: &ZoneId,
        fields: FieldSet,
    ) -> Result<CalendarFields, ClockError> {
        (**self).format(instant, zone, fields)
    }

    fn format_name(
        &self,
        instant: Instant,
        zone: &ZoneId,
        style: NameStyle,
    ) -> Result<String, ClockError> {
        (**self).format_name(instant, zone, style)
    }
}

/// Formatter backed by the IANA database bundled with `chrono-tz`.
///
/// tzdata carries no long display names, so `NameStyle::Long` answers
/// from names registered with [`TzFormatter::with_long_name`] (usually
/// the zone catalog) and otherwise falls back to the long offset.
#[derive(Debug, Clone, Default)]
pub struct TzFormatter {
    long_names: HashMap<String, String>,
}

impl TzFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_long_name(mut self, zone: &ZoneId, name: impl Into<String>) -> Self {
        self.long_names.insert(zone.as_str().to_string(), name.into());
        self
    }

    pub fn resolve(zone: &ZoneId) -> Result<Tz, ClockError> {
        zone.as_str()
            .parse::<Tz>()
            .map_err(|_| ClockError::UnknownZone(zone.to_string()))
    }

    fn local(instant: Instant, zone: &ZoneId) -> Result<DateTime<Tz>, ClockError> {
        let tz = Self::resolve(zone)?;
        let utc = instant.to_utc().ok_or_else(|| {
            ClockError::InvalidWallClock(format!("instant {}ms out of range", instant.as_millis()))
        })?;
        Ok(utc.with_timezone(&tz))
    }
}

impl ZoneFormatter for TzFormatter {
    fn format(
        &self,
        instant: Instant,
        zone: &ZoneId,
        fields: FieldSet,
    ) -> Result<CalendarFields, ClockError> {
        let local = Self::local(instant, zone)?;
        let second = match fields {
            FieldSet::Minutes => 0,
            FieldSet::Seconds => local.second(),
        };
        let out = CalendarFields {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second,
        };
        trace!("Formatted {} in {}: {:?}", instant, zone, out);
        Ok(out)
    }

    fn format_name(
        &self,
        instant: Instant,
        zone: &ZoneId,
        style: NameStyle,
    ) -> Result<String, ClockError> {
        let local = Self::local(instant, zone)?;
        let offset_secs = local.offset().fix().local_minus_utc();

        let name = match style {
            NameStyle::ShortOffset => short_offset(offset_secs),
            NameStyle::LongOffset => long_offset(offset_secs),
            NameStyle::Short => {
                // Numeric tzdata abbreviations ("+04") are not names.
                let abbr: Option<&str> = local.offset().abbreviation().into();
                match abbr {
                    Some(a) if !a.is_empty() && a.chars().all(|c| c.is_ascii_alphabetic()) => {
                        a.to_string()
                    }
                    _ => short_offset(offset_secs),
                }
            }
            NameStyle::Long => self
                .long_names
                .get(zone.as_str())
                .cloned()
                .unwrap_or_else(|| long_offset(offset_secs)),
        };
        Ok(name)
    }
}

fn split_offset(offset_secs: i32) -> (char, u32, u32) {
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.unsigned_abs();
    (sign, abs / 3600, (abs % 3600) / 60)
}

pub fn short_offset(offset_secs: i32) -> String {
    if offset_secs == 0 {
        return "GMT".to_string();
    }
    match split_offset(offset_secs) {
        (sign, h, 0) => format!("GMT{sign}{h}"),
        (sign, h, m) => format!("GMT{sign}{h}:{m:02}"),
    }
}

pub fn long_offset(offset_secs: i32) -> String {
    if offset_secs == 0 {
        return "GMT".to_string();
    }
    let (sign, h, m) = split_offset(offset_secs);
    format!("GMT{sign}{h:02}:{m:02}")
}
