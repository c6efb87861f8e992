// src/clock/converter.rs

use super::{CalendarFields, ClockError, FieldSet, Instant, WallClock, ZoneFormatter, ZoneId};
use log::{debug, trace};

/// Iteration cap for `resolve_instant`. Offsets are bounded to ±14h and DST
/// shifts to 2h, so real zones settle within two or three guesses.
pub const MAX_ITERATIONS: u32 = 3;

/// A residual below this is treated as converged.
pub const CONVERGENCE_TOLERANCE_MS: i64 = 1_000;

/// Converts wall-clock readings between zones through an injected formatter.
#[derive(Debug, Clone)]
pub struct WallClockConverter<F> {
    formatter: F,
}

impl<F: ZoneFormatter> WallClockConverter<F> {
    pub fn new(formatter: F) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Finds the instant at which a clock in `zone` reads `wall_clock`.
    ///
    /// The zone's offset depends on the instant, so this is a fixed-point
    /// search: seed with the fields read as UTC, then repeatedly shift the
    /// guess by the gap between the desired and the observed reading.
    ///
    /// Known imprecision, reproduced as-is:
    /// - a reading inside a spring-forward gap has no instant; the search
    ///   stops next to the gap (for New York 02:30 it lands on 03:30 EDT).
    /// - a reading inside a fall-back overlap resolves to whichever
    ///   occurrence the offset at the naive seed leads to (usually the
    ///   earlier, daylight-time one for zones west of UTC).
    ///
    /// Exhausting the iteration cap is not an error; the last guess is returned.
    pub fn resolve_instant(
        &self,
        wall_clock: &WallClock,
        zone: &ZoneId,
    ) -> Result<Instant, ClockError> {
        let desired = wall_clock.naive_millis();
        let mut guess = Instant::from_millis(desired);

        for iteration in 1..=MAX_ITERATIONS {
            let observed = self
                .formatter
                .format(guess, zone, FieldSet::Seconds)?
                .naive_millis()?;
            let delta = desired - observed;
            trace!(
                "resolve {} in {}: iteration {} guess {} delta {}ms",
                wall_clock,
                zone,
                iteration,
                guess,
                delta
            );

            if delta.abs() < CONVERGENCE_TOLERANCE_MS {
                return Ok(guess);
            }
            guess = guess.shifted(delta);
        }

        debug!(
            "resolve {} in {} did not converge after {} iterations, using {}",
            wall_clock, zone, MAX_ITERATIONS, guess
        );
        Ok(guess)
    }

    /// Calendar fields `instant` displays in `zone`, hour 24 normalized.
    pub fn render_fields(
        &self,
        instant: Instant,
        zone: &ZoneId,
        fields: FieldSet,
    ) -> Result<CalendarFields, ClockError> {
        Ok(self.formatter.format(instant, zone, fields)?.normalized())
    }

    pub fn render_wall_clock(&self, instant: Instant, zone: &ZoneId) -> Result<WallClock, ClockError> {
        self.render_fields(instant, zone, FieldSet::Minutes)?
            .wall_clock()
    }

    /// Re-expresses a reading in `from` as the reading in `to`.
    ///
    /// `convert(convert(w, a, b), b, a) == w` away from DST transitions.
    pub fn convert(
        &self,
        wall_clock: &WallClock,
        from: &ZoneId,
        to: &ZoneId,
    ) -> Result<WallClock, ClockError> {
        let instant = self.resolve_instant(wall_clock, from)?;
        self.render_wall_clock(instant, to)
    }
}
