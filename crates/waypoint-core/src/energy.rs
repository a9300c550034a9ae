//! The energy gauge.
//!
//! Energy drains a little every tick a task makes progress. It may dip
//! below zero within a tick; the depletion check at the end of the tick
//! clamps it back to zero and ends the run.

use serde::{Deserialize, Serialize};

/// Current and maximum energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyGauge {
    /// Energy left in this run.
    pub current: f64,
    /// Energy restored by a reset. Only ever grows.
    pub max: f64,
}

impl EnergyGauge {
    /// A full gauge holding `max` energy.
    pub const fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    /// Subtract energy. May leave the gauge negative.
    pub const fn drain(&mut self, amount: f64) {
        self.current -= amount;
    }

    /// Add energy, capped at the maximum.
    pub const fn restore(&mut self, amount: f64) {
        self.current += amount;
        if self.current > self.max {
            self.current = self.max;
        }
    }

    /// Refill to the maximum.
    pub const fn refill(&mut self) {
        self.current = self.max;
    }

    /// Permanently raise the maximum. Current energy is unchanged.
    pub const fn raise_max(&mut self, amount: f64) {
        self.max += amount;
    }

    /// Whether the run is out of energy.
    pub const fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Clamp a negative reading to zero.
    pub const fn clamp_at_zero(&mut self) {
        if self.current < 0.0 {
            self.current = 0.0;
        }
    }
}

impl Default for EnergyGauge {
    fn default() -> Self {
        Self::full(100.0)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn restore_caps_at_max() {
        let mut gauge = EnergyGauge::full(10.0);
        gauge.drain(4.0);
        gauge.restore(10.0);
        assert_eq!(gauge.current, 10.0);
    }

    #[test]
    fn drain_can_go_negative_until_clamped() {
        let mut gauge = EnergyGauge::full(1.0);
        gauge.drain(1.5);
        assert!(gauge.is_depleted());
        assert!(gauge.current < 0.0);
        gauge.clamp_at_zero();
        assert_eq!(gauge.current, 0.0);
    }

    #[test]
    fn raise_max_keeps_current() {
        let mut gauge = EnergyGauge::full(100.0);
        gauge.drain(30.0);
        gauge.raise_max(50.0);
        assert_eq!(gauge.max, 150.0);
        assert_eq!(gauge.current, 70.0);
        gauge.refill();
        assert_eq!(gauge.current, 150.0);
    }
}
