// simulation/history.rs
// Append-only log of per-tick diagnostics and its CSV export.

use crate::io::StateError;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// Diagnostics captured at the end of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSample {
    pub time: f64,
    pub flux: f64,
    pub energy: f64,
}

#[derive(Clone, Debug, Default)]
pub struct SampleLog {
    samples: Vec<SimulationSample>,
}

impl SampleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: SimulationSample) {
        self.samples.push(sample);
    }

    pub fn as_slice(&self) -> &[SimulationSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&SimulationSample> {
        self.samples.last()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// `time,flux,energy` rows; time to 3 decimals, the rest in scientific
    /// notation with 3 fractional digits.
    pub fn to_csv(&self) -> Result<String, StateError> {
        if self.samples.is_empty() {
            return Err(StateError::NoSamples);
        }
        let mut csv = String::from("time,flux,energy\n");
        for s in &self.samples {
            // Writing into a String cannot fail.
            let _ = writeln!(csv, "{:.3},{:.3e},{:.3e}", s.time, s.flux, s.energy);
        }
        Ok(csv)
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), StateError> {
        let csv = self.to_csv()?;
        std::fs::write(path, csv)?;
        log::info!("Exported {} samples to {}", self.samples.len(), path.display());
        Ok(())
    }
}
