//! Electric field and potential queries over a charge snapshot.
//!
//! The sampler is read-only and used by probes and visualisation data
//! (heatmap, arrows, streamlines). The integrator never goes through it:
//! forces come from exact pairwise sums in `simulation::forces`.

pub mod grid;
pub mod streamline;

pub use grid::{arrow_grid, field_magnitude_color, heatmap, potential_color, potential_grid, FieldArrow};
pub use streamline::{streamlines, trace, StreamlineSettings};

use crate::charge::Charge;
use crate::config::{SimConfig, MIN_SEPARATION, PROBE_TEST_CHARGE};
use crate::simulation::forces::external_field;
use ultraviolet::DVec2;

#[cfg(test)]
mod tests;

/// Field and potential at one point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldSample {
    pub potential: f64,
    pub field: DVec2,
}

/// What the mouse probe reports.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Probe {
    pub field: DVec2,
    pub magnitude: f64,
    pub potential: f64,
    /// Force magnitude on a 1 µC test charge.
    pub test_force: f64,
}

/// Borrowed view of the charges plus the external field frozen at one time.
#[derive(Clone, Copy, Debug)]
pub struct FieldSampler<'a> {
    charges: &'a [Charge],
    k: f64,
    external: DVec2,
}

impl<'a> FieldSampler<'a> {
    pub fn new(charges: &'a [Charge], config: &SimConfig, time: f64) -> Self {
        Self {
            charges,
            k: config.coulomb_constant,
            external: external_field(&config.external_field, time),
        }
    }

    pub fn charges(&self) -> &'a [Charge] {
        self.charges
    }

    /// Superposed `k·q/r²` along `r̂` from each charge, skipping charges with
    /// `r² < 1`, plus the external field.
    pub fn field_at(&self, point: DVec2) -> DVec2 {
        let mut field = self.external;
        for c in self.charges {
            let d = point - c.pos;
            let r_sq = d.mag_sq();
            if r_sq < MIN_SEPARATION * MIN_SEPARATION {
                continue;
            }
            let r = r_sq.sqrt();
            field += d * (self.k * c.charge / (r_sq * r));
        }
        field
    }

    /// Superposed `k·q/r`, skipping charges with `r < 1`.
    pub fn potential_at(&self, point: DVec2) -> f64 {
        self.charges
            .iter()
            .filter_map(|c| {
                let r = c.distance_to(point);
                (r >= MIN_SEPARATION).then(|| self.k * c.charge / r)
            })
            .sum()
    }

    pub fn sample(&self, point: DVec2) -> FieldSample {
        FieldSample {
            potential: self.potential_at(point),
            field: self.field_at(point),
        }
    }

    pub fn probe(&self, point: DVec2) -> Probe {
        let sample = self.sample(point);
        let magnitude = sample.field.mag();
        Probe {
            field: sample.field,
            magnitude,
            potential: sample.potential,
            test_force: PROBE_TEST_CHARGE * magnitude,
        }
    }
}
