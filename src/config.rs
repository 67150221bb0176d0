// Centralized configuration for simulation parameters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

// ====================
// Physical Constants
// ====================
/// Coulomb's constant in N·m²/C². One world unit (pixel) is treated as one metre.
pub const COULOMB_K: f64 = 8.99e9;
/// Vacuum permittivity ε₀ in F/m, used by the 2D Gauss-law flux estimate.
pub const EPSILON_0: f64 = 8.854e-12;
/// Separations below this distance are dropped from force, field, potential and energy sums.
pub const MIN_SEPARATION: f64 = 1.0;

// ====================
// Integration
// ====================
/// Fixed simulation time advanced per tick.
pub const DEFAULT_DT: f64 = 0.03;
/// Wall-clock interval between scheduled ticks (one animation frame).
pub const FRAME_INTERVAL_MS: u64 = 16;

// ====================
// Collisions / Boundary
// ====================
pub const COLLISION_RADIUS: f64 = 10.0; // Disc radius used for contacts and wall inset
pub const RESTITUTION: f64 = 1.0; // Perfectly elastic charge-charge contacts
pub const BOUNCE_FACTOR: f64 = -0.7; // Velocity scale on wall contact, per axis

// ====================
// Charges
// ====================
/// Mass of a user-placed charge. Deliberately light so F = ma gives visible motion.
pub const PLACED_CHARGE_MASS: f64 = 1e-6;
/// Mass of the charges created by the dipole preset.
pub const DIPOLE_CHARGE_MASS: f64 = 1.0;
pub const DIPOLE_CHARGE: f64 = 1e-6;
pub const DIPOLE_HALF_SEPARATION: f64 = 30.0;
pub const DIPOLE_SPIN_SPEED: f64 = 10.0;
/// Full width of the random velocity given to resting charges when a run starts.
pub const START_KICK_SPEED: f64 = 5.0;
pub const DRAG_PICK_RADIUS: f64 = 15.0;
pub const REMOVE_PICK_RADIUS: f64 = 10.0;

// ====================
// External Fields
// ====================
pub const EXTERNAL_FIELD_AMPLITUDE: f64 = 500.0; // N/C
pub const EXTERNAL_FIELD_FREQUENCY: f64 = 1.0; // Hz

// ====================
// Field Visualisation
// ====================
pub const STREAMLINE_START_RADIUS: f64 = 14.0;
pub const STREAMLINE_STEP: f64 = 2.0;
pub const STREAMLINE_MAX_STEPS: usize = 600;
pub const STREAMLINE_MIN_FIELD: f64 = 1e-4;
pub const STREAMLINE_STOP_RADIUS: f64 = 10.0;
pub const DEFAULT_LINES_PER_MICROCOULOMB: usize = 12;
pub const DEFAULT_ARROW_SPACING: f64 = 50.0;
pub const ARROW_MIN_FIELD: f64 = 1e-3;
/// Potentials are clamped to ±this value before colour mapping.
pub const HEATMAP_MAX_POTENTIAL: f64 = 3000.0;
/// Test charge used by the probe to report a force magnitude.
pub const PROBE_TEST_CHARGE: f64 = 1e-6;

/// Sinusoidal external electric field along +x: `E(t) = (A·sin(2πft), 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalField {
    pub enabled: bool,
    pub amplitude: f64,
    pub frequency: f64,
}

impl Default for ExternalField {
    fn default() -> Self {
        Self {
            enabled: false,
            amplitude: EXTERNAL_FIELD_AMPLITUDE,
            frequency: EXTERNAL_FIELD_FREQUENCY,
        }
    }
}

/// Uniform magnetic field normal to the plane, in tesla.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagneticField {
    pub enabled: bool,
    pub strength: f64,
}

impl MagneticField {
    /// Build a field from a strength given in microtesla.
    pub fn from_microtesla(enabled: bool, microtesla: f64) -> Self {
        Self {
            enabled,
            strength: microtesla * 1e-6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed time step per tick
    pub dt: f64,
    pub coulomb_constant: f64,
    pub permittivity: f64,
    pub collision_radius: f64,
    pub restitution: f64,
    /// Multiplier applied to a velocity component on wall contact
    pub bounce_factor: f64,
    pub placed_charge_mass: f64,
    pub dipole_charge_mass: f64,
    pub start_kick_speed: f64,
    /// Scheduler period in milliseconds
    pub frame_interval_ms: u64,
    pub external_field: ExternalField,
    pub magnetic_field: MagneticField,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            coulomb_constant: COULOMB_K,
            permittivity: EPSILON_0,
            collision_radius: COLLISION_RADIUS,
            restitution: RESTITUTION,
            bounce_factor: BOUNCE_FACTOR,
            placed_charge_mass: PLACED_CHARGE_MASS,
            dipole_charge_mass: DIPOLE_CHARGE_MASS,
            start_kick_speed: START_KICK_SPEED,
            frame_interval_ms: FRAME_INTERVAL_MS,
            external_field: ExternalField::default(),
            magnetic_field: MagneticField::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl SimConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load `path`, falling back to the defaults when it is missing or malformed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(config) => {
                log::info!("Loaded simulation config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e} ({}); using default configuration", path.display());
                Self::default()
            }
        }
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.frame_interval_ms.max(1))
    }
}
