// simulation/integrator.rs
// Classical fourth-order Runge-Kutta over every charge's (x, y, vx, vy).

use super::forces;
use crate::charge::Charge;
use crate::config::SimConfig;
use crate::profile_scope;
use ultraviolet::DVec2;

/// Position and velocity of one charge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhaseState {
    pub pos: DVec2,
    pub vel: DVec2,
}

/// Time derivative of a [`PhaseState`]: (velocity, acceleration).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Derivative {
    pub dpos: DVec2,
    pub dvel: DVec2,
}

impl PhaseState {
    pub fn of(charge: &Charge) -> Self {
        Self {
            pos: charge.pos,
            vel: charge.vel,
        }
    }

    pub fn advanced(&self, k: &Derivative, dt: f64) -> Self {
        Self {
            pos: self.pos + k.dpos * dt,
            vel: self.vel + k.dvel * dt,
        }
    }

    pub fn apply_to(&self, charge: &mut Charge) {
        charge.pos = self.pos;
        charge.vel = self.vel;
    }
}

impl Derivative {
    /// Read after a force pass: velocity and `net_force / mass`.
    pub fn of(charge: &Charge) -> Self {
        Self {
            dpos: charge.vel,
            dvel: charge.acceleration(),
        }
    }
}

/// RK4 stepper. Keeps its stage buffers between ticks to avoid reallocating.
#[derive(Clone, Debug, Default)]
pub struct RungeKutta4 {
    initial: Vec<PhaseState>,
    k1: Vec<Derivative>,
    k2: Vec<Derivative>,
    k3: Vec<Derivative>,
    k4: Vec<Derivative>,
}

impl RungeKutta4 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all charges from time `t` by `h` using the full force model.
    pub fn step(&mut self, charges: &mut [Charge], t: f64, h: f64, config: &SimConfig) {
        self.step_with(charges, t, h, |charges, time| {
            forces::accumulate(charges, time, config)
        });
    }

    /// Advance all charges using `accumulate` to fill `net_force` at each stage.
    ///
    /// Every stage perturbs from the state saved at the start of the step
    /// (never from the previous stage), so the four evaluations are the
    /// textbook k1..k4.
    pub fn step_with<F>(&mut self, charges: &mut [Charge], t: f64, h: f64, mut accumulate: F)
    where
        F: FnMut(&mut [Charge], f64),
    {
        profile_scope!("rk4_step");
        let half = h * 0.5;

        self.initial.clear();
        self.initial.extend(charges.iter().map(PhaseState::of));

        accumulate(charges, t);
        collect_derivatives(charges, &mut self.k1);

        perturb(charges, &self.initial, &self.k1, half);
        accumulate(charges, t + half);
        collect_derivatives(charges, &mut self.k2);

        perturb(charges, &self.initial, &self.k2, half);
        accumulate(charges, t + half);
        collect_derivatives(charges, &mut self.k3);

        perturb(charges, &self.initial, &self.k3, h);
        accumulate(charges, t + h);
        collect_derivatives(charges, &mut self.k4);

        let sixth = h / 6.0;
        for (i, charge) in charges.iter_mut().enumerate() {
            let init = self.initial[i];
            let (k1, k2, k3, k4) = (self.k1[i], self.k2[i], self.k3[i], self.k4[i]);
            charge.pos = init.pos + (k1.dpos + k2.dpos * 2.0 + k3.dpos * 2.0 + k4.dpos) * sixth;
            charge.vel = init.vel + (k1.dvel + k2.dvel * 2.0 + k3.dvel * 2.0 + k4.dvel) * sixth;
        }
    }
}

fn collect_derivatives(charges: &[Charge], out: &mut Vec<Derivative>) {
    out.clear();
    out.extend(charges.iter().map(Derivative::of));
}

fn perturb(charges: &mut [Charge], initial: &[PhaseState], k: &[Derivative], dt: f64) {
    for ((charge, init), k) in charges.iter_mut().zip(initial).zip(k) {
        init.advanced(k, dt).apply_to(charge);
    }
}
