use contracts::WorldSnapshot;

use super::*;

/// Half-away-from-zero at the third decimal.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

impl World {
    /// Point-in-time value copy of the scalar state. Pure and idempotent;
    /// the continuous metrics are rounded to 3 decimals, counters and flags
    /// pass through untouched.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            matrix_control: round3(self.matrix_control),
            zion_defense: round3(self.zion_defense),
            smith_factor: round3(self.smith_factor),
            humans_free: self.humans_free,
            humans_enslaved: self.humans_enslaved,
            neo_awake: self.neo_awake,
            neo_alive: self.neo_alive,
            trinity_alive: self.trinity_alive,
            zion_alive: self.zion_alive,
            peace: self.peace,
            prophecy_valid: self.prophecy_valid,
        }
    }
}
