// Defines the point charge entity (position, velocity, charge, mass, scratch force)
// and the store that owns every charge in the sandbox.

use crate::config;
use ultraviolet::DVec2;

pub mod store;

pub use store::ChargeStore;


/// Stable identity handed out by the [`ChargeStore`]. Zero means "not yet stored".
pub type ChargeId = u64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Charge {
    pub id: ChargeId,
    pub pos: DVec2,
    pub vel: DVec2,
    /// Signed charge in coulombs. Zero is allowed and contributes nothing.
    pub charge: f64,
    /// Always positive.
    pub mass: f64,
    /// Net force written by the most recent accumulation pass. Tick-scoped
    /// scratch: overwritten at every RK4 stage, never carried between ticks.
    pub net_force: DVec2,
}

impl Charge {
    pub fn new(pos: DVec2, vel: DVec2, charge: f64, mass: f64) -> Self {
        Self {
            id: 0,
            pos,
            vel,
            charge,
            mass,
            net_force: DVec2::zero(),
        }
    }

    pub fn at_rest(pos: DVec2, charge: f64, mass: f64) -> Self {
        Self::new(pos, DVec2::zero(), charge, mass)
    }

    /// A user-placed charge: at rest with the light default mass.
    pub fn placed(pos: DVec2, charge: f64) -> Self {
        Self::at_rest(pos, charge, config::PLACED_CHARGE_MASS)
    }

    pub fn acceleration(&self) -> DVec2 {
        self.net_force / self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.mag_sq()
    }

    pub fn is_positive(&self) -> bool {
        self.charge > 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.pos.x.is_finite()
            && self.pos.y.is_finite()
            && self.vel.x.is_finite()
            && self.vel.y.is_finite()
            && self.charge.is_finite()
            && self.mass.is_finite()
    }

    pub fn distance_to(&self, point: DVec2) -> f64 {
        (point - self.pos).mag()
    }
}

/// The dipole preset: a resting ±1 µC pair around `center`, followed by a
/// second pair at the same places moving towards each other.
pub fn dipole_preset(center: DVec2, mass: f64) -> [Charge; 4] {
    let offset = DVec2::new(config::DIPOLE_HALF_SEPARATION, 0.0);
    let spin = DVec2::new(config::DIPOLE_SPIN_SPEED, 0.0);
    let q = config::DIPOLE_CHARGE;
    [
        Charge::at_rest(center + offset, q, mass),
        Charge::at_rest(center - offset, -q, mass),
        Charge::new(center + offset, -spin, q, mass),
        Charge::new(center - offset, spin, -q, mass),
    ]
}
