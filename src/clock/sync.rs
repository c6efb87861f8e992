// src/clock/sync.rs

use super::{Instant, WallClock, WallClockConverter, ZoneFormatter, ZoneId};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Which field was edited last and is held fixed when a zone changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    AnchoredOnA,
    AnchoredOnB,
}

impl Anchor {
    pub fn side(self) -> Side {
        match self {
            Anchor::AnchoredOnA => Side::A,
            Anchor::AnchoredOnB => Side::B,
        }
    }
}

impl From<Side> for Anchor {
    fn from(side: Side) -> Self {
        match side {
            Side::A => Anchor::AnchoredOnA,
            Side::B => Anchor::AnchoredOnB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// The user typed into a wall-clock field. Empty text clears both fields.
    EditWallClock { side: Side, text: String },
    /// The user picked another zone for a field.
    ChangeZone { side: Side, zone: ZoneId },
}

/// One wall-clock field as displayed: its zone and current text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockField {
    pub zone: ZoneId,
    pub text: String,
}

impl ClockField {
    fn new(zone: ZoneId) -> Self {
        Self {
            zone,
            text: String::new(),
        }
    }

    /// The parsed reading, if the text is a valid wall clock.
    pub fn wall_clock(&self) -> Option<WallClock> {
        self.text.parse().ok()
    }
}

/// Two meeting-time fields kept in step across their zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncState {
    anchor: Anchor,
    a: ClockField,
    b: ClockField,
    // False until the first event is applied
    touched: bool,
}

impl SyncState {
    /// Field A seeded to the next whole hour in zone A, field B derived.
    pub fn initial<F: ZoneFormatter>(
        zone_a: ZoneId,
        zone_b: ZoneId,
        now: Instant,
        converter: &WallClockConverter<F>,
    ) -> Self {
        let mut state = Self {
            anchor: Anchor::AnchoredOnA,
            a: ClockField::new(zone_a),
            b: ClockField::new(zone_b),
            touched: false,
        };
        match converter.render_wall_clock(now, &state.a.zone) {
            Ok(wc) => state.a.text = wc.next_whole_hour().to_string(),
            Err(e) => debug!("Cannot seed field A: {}", e),
        }
        state.derive_from(Side::A, converter);
        state
    }

    /// True while no edit or zone change has been applied since `initial`.
    pub fn is_pristine(&self) -> bool {
        !self.touched
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn field(&self, side: Side) -> &ClockField {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    fn field_mut(&mut self, side: Side) -> &mut ClockField {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    /// Pure transition: the state after `event`.
    pub fn apply<F: ZoneFormatter>(
        &self,
        event: SyncEvent,
        converter: &WallClockConverter<F>,
    ) -> Self {
        let mut next = self.clone();
        next.touched = true;
        match event {
            SyncEvent::EditWallClock { side, text } => {
                if text.trim().is_empty() {
                    next.a.text.clear();
                    next.b.text.clear();
                } else {
                    next.anchor = side.into();
                    next.field_mut(side).text = text;
                    next.derive_from(side, converter);
                }
            }
            SyncEvent::ChangeZone { side, zone } => {
                next.field_mut(side).zone = zone;
                let anchored = next.anchor.side();
                next.derive_from(anchored, converter);
            }
        }
        debug!(
            "Sync {:?}: A='{}' ({}), B='{}' ({})",
            next.anchor, next.a.text, next.a.zone, next.b.text, next.b.zone
        );
        next
    }

    /// Recompute the field opposite `source`; any failure blanks it.
    fn derive_from<F: ZoneFormatter>(&mut self, source: Side, converter: &WallClockConverter<F>) {
        let from = self.field(source).clone();
        let target = source.other();
        let to_zone = self.field(target).zone.clone();

        let derived = match from.text.parse::<WallClock>() {
            Ok(wc) => match converter.convert(&wc, &from.zone, &to_zone) {
                Ok(out) => out.to_string(),
                Err(e) => {
                    debug!("Conversion {} -> {} failed: {}", from.zone, to_zone, e);
                    String::new()
                }
            },
            Err(e) => {
                if !from.text.trim().is_empty() {
                    debug!("Skipping conversion: {}", e);
                }
                String::new()
            }
        };
        self.field_mut(target).text = derived;
    }
}
