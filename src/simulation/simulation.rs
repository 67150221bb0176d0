// simulation/simulation.rs
// Contains the Simulation context (charges, config, clock, samples) and the tick pipeline

use super::boundary;
use super::collision;
use super::history::{SampleLog, SimulationSample};
use super::integrator::RungeKutta4;
use crate::charge::ChargeStore;
use crate::config::SimConfig;
use crate::diagnostics::{self, FluxPolygon};
use crate::field::FieldSampler;
use crate::profile_scope;
use crate::view::WorldRect;
use ultraviolet::DVec2;

/// Everything one tick reads or mutates. Owned by a single controller; no
/// process-wide state.
pub struct Simulation {
    pub config: SimConfig,
    pub charges: ChargeStore,
    /// Simulation time in seconds, advanced by `config.dt` per tick.
    pub time: f64,
    pub frame: usize,
    pub samples: SampleLog,
    integrator: RungeKutta4,
    rng: fastrand::Rng,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            charges: ChargeStore::new(),
            time: 0.0,
            frame: 0,
            samples: SampleLog::new(),
            integrator: RungeKutta4::new(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Same as [`Simulation::new`] with a deterministic start-kick generator.
    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        let mut sim = Self::new(config);
        sim.rng = fastrand::Rng::with_seed(seed);
        sim
    }

    /// One tick: advance the clock by `dt`, RK4 with stages from the advanced
    /// time, collisions, boundary reflection against `bounds`, then a
    /// diagnostics sample stamped with the advanced time.
    pub fn step(&mut self, bounds: &WorldRect, polygon: &FluxPolygon) -> SimulationSample {
        profile_scope!("simulation_step");
        let dt = self.config.dt;
        let charges = self.charges.as_mut_slice();

        self.time += dt;
        self.frame += 1;
        self.integrator.step(charges, self.time, dt, &self.config);
        collision::collide(
            charges,
            self.config.collision_radius,
            self.config.restitution,
        );
        boundary::reflect(
            charges,
            bounds,
            self.config.collision_radius,
            self.config.bounce_factor,
        );

        let bad = self.count_non_finite();
        if bad > 0 {
            log::warn!("{} charge(s) have non-finite state at t={:.3}", bad, self.time);
        }

        let sample = SimulationSample {
            time: self.time,
            flux: self.flux(polygon),
            energy: self.energy(),
        };
        self.samples.push(sample);
        sample
    }

    /// Field sampler over the current charges at the current time.
    pub fn sampler(&self) -> FieldSampler<'_> {
        FieldSampler::new(self.charges.as_slice(), &self.config, self.time)
    }

    pub fn energy(&self) -> f64 {
        diagnostics::system_energy(self.charges.as_slice(), self.config.coulomb_constant)
    }

    pub fn flux(&self, polygon: &FluxPolygon) -> f64 {
        diagnostics::flux(self.charges.as_slice(), polygon, self.config.permittivity)
    }

    pub fn dipole_moment(&self) -> DVec2 {
        diagnostics::dipole_moment(self.charges.as_slice())
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.charges.iter().map(|c| c.kinetic_energy()).sum()
    }

    /// Give every charge at exact rest a small random velocity.
    pub fn kick_resting_charges(&mut self) -> usize {
        let kicked = self
            .charges
            .kick_resting(self.config.start_kick_speed, &mut self.rng);
        if kicked > 0 {
            log::debug!("Kicked {} resting charge(s)", kicked);
        }
        kicked
    }

    pub fn count_non_finite(&self) -> usize {
        self.charges.iter().filter(|c| !c.is_finite()).count()
    }

    /// Rewind the clock and drop recorded samples. Charges are untouched.
    pub fn reset_clock(&mut self) {
        self.time = 0.0;
        self.frame = 0;
        self.samples.clear();
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
