//! Charge display units and number formatting.
//!
//! Charges are stored in coulombs. The UI enters and labels magnitudes in
//! either microcoulombs or nanocoulombs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Microcoulomb in coulombs.
pub const MICROCOULOMB: f64 = 1e-6;
/// Nanocoulomb in coulombs.
pub const NANOCOULOMB: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeUnit {
    #[default]
    Microcoulomb,
    Nanocoulomb,
}

impl ChargeUnit {
    /// Coulombs per one of this unit.
    pub fn scale(self) -> f64 {
        match self {
            ChargeUnit::Microcoulomb => MICROCOULOMB,
            ChargeUnit::Nanocoulomb => NANOCOULOMB,
        }
    }

    pub fn to_coulombs(self, magnitude: f64) -> f64 {
        magnitude * self.scale()
    }

    pub fn from_coulombs(self, charge: f64) -> f64 {
        charge / self.scale()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ChargeUnit::Microcoulomb => "µC",
            ChargeUnit::Nanocoulomb => "nC",
        }
    }

    /// Unsigned label such as `1.00µC`, as drawn above a charge.
    pub fn label(self, charge: f64) -> String {
        format!("{}{}", format_number(self.from_coulombs(charge).abs()), self.symbol())
    }
}

impl fmt::Display for ChargeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ChargeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "uC" | "µC" | "micro" => Ok(ChargeUnit::Microcoulomb),
            "nC" | "nano" => Ok(ChargeUnit::Nanocoulomb),
            other => Err(format!("unknown charge unit: {other}")),
        }
    }
}

/// Two decimals, switching to scientific notation outside `[0.001, 1e5]`.
pub fn format_number(value: f64) -> String {
    if value.abs() < 0.001 || value.abs() > 1e5 {
        format!("{:.2e}", value)
    } else {
        format!("{:.2}", value)
    }
}
