//! Force calculation functions for the charge simulation.
//!
//! Provides the pairwise Coulomb interaction, the sinusoidal external field and
//! the out-of-plane magnetic (Lorentz) term. [`accumulate`] combines them into
//! each charge's `net_force` and is called once per RK4 stage.

use crate::charge::Charge;
use crate::config::{ExternalField, SimConfig, MIN_SEPARATION};
use crate::profile_scope;
use std::f64::consts::TAU;
use ultraviolet::DVec2;

/// Coulomb force exerted on `a` by `b`, or `None` when the pair is closer than
/// [`MIN_SEPARATION`] (`r² < 1`). The force on `b` is the negation.
pub fn coulomb_pair_force(a: &Charge, b: &Charge, k: f64) -> Option<DVec2> {
    let r_vec = b.pos - a.pos;
    let r_sq = r_vec.mag_sq();
    if r_sq < MIN_SEPARATION * MIN_SEPARATION {
        return None;
    }
    let r = r_sq.sqrt();
    let force_mag = k * a.charge * b.charge / r_sq;
    // Like charges push `a` away from `b`.
    Some(r_vec * (-force_mag / r))
}

/// External field at time `t`, zero when disabled.
pub fn external_field(field: &ExternalField, t: f64) -> DVec2 {
    if !field.enabled {
        return DVec2::zero();
    }
    DVec2::new(field.amplitude * (TAU * field.frequency * t).sin(), 0.0)
}

/// `q (v × B)` for planar `v` and `B` along the plane normal.
pub fn lorentz_force(charge: f64, vel: DVec2, b: f64) -> DVec2 {
    DVec2::new(vel.y * b, -vel.x * b) * charge
}

/// Overwrite every charge's `net_force` with the total force at time `t`,
/// evaluated at the charges' current positions and velocities.
pub fn accumulate(charges: &mut [Charge], t: f64, config: &SimConfig) {
    profile_scope!("forces_accumulate");
    for charge in charges.iter_mut() {
        charge.net_force = DVec2::zero();
    }

    let k = config.coulomb_constant;
    let n = charges.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(force) = coulomb_pair_force(&charges[i], &charges[j], k) {
                charges[i].net_force += force;
                charges[j].net_force -= force;
            }
        }
    }

    let e_ext = external_field(&config.external_field, t);
    for charge in charges.iter_mut() {
        charge.net_force += e_ext * charge.charge;
    }

    if config.magnetic_field.enabled {
        let b = config.magnetic_field.strength;
        for charge in charges.iter_mut() {
            charge.net_force += lorentz_force(charge.charge, charge.vel, b);
        }
    }
}
