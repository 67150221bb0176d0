// field/streamline.rs
// Field lines seeded around each charge and traced with fixed-length steps

use super::FieldSampler;
use crate::config;
use crate::profile_scope;
use crate::units::MICROCOULOMB;
use crate::view::WorldRect;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use ultraviolet::DVec2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamlineSettings {
    /// Lines seeded per microcoulomb of |q|; every charge gets at least one.
    pub lines_per_microcoulomb: usize,
    pub start_radius: f64,
    pub step: f64,
    pub max_steps: usize,
    pub min_field: f64,
    /// Tracing stops this close to any charge.
    pub stop_radius: f64,
}

impl Default for StreamlineSettings {
    fn default() -> Self {
        Self {
            lines_per_microcoulomb: config::DEFAULT_LINES_PER_MICROCOULOMB,
            start_radius: config::STREAMLINE_START_RADIUS,
            step: config::STREAMLINE_STEP,
            max_steps: config::STREAMLINE_MAX_STEPS,
            min_field: config::STREAMLINE_MIN_FIELD,
            stop_radius: config::STREAMLINE_STOP_RADIUS,
        }
    }
}

impl StreamlineSettings {
    pub fn line_count(&self, charge: f64) -> usize {
        let lines = (self.lines_per_microcoulomb as f64 * (charge / MICROCOULOMB).abs()).round();
        (lines as usize).max(1)
    }
}

/// Follow the field from `start`, along `E` for `sign > 0` and against it
/// otherwise. Stops on a weak field, on leaving `bounds`, near a charge, or
/// after `max_steps` points.
pub fn trace(
    sampler: &FieldSampler<'_>,
    start: DVec2,
    sign: f64,
    bounds: &WorldRect,
    settings: &StreamlineSettings,
) -> Vec<DVec2> {
    let mut path = Vec::new();
    let mut current = start;
    for _ in 0..settings.max_steps {
        path.push(current);

        let field = sampler.field_at(current);
        let magnitude = field.mag();
        if magnitude < settings.min_field {
            break;
        }
        current += field * (sign * settings.step / magnitude);

        if !bounds.contains(current) {
            break;
        }
        if sampler
            .charges()
            .iter()
            .any(|c| c.distance_to(current) < settings.stop_radius)
        {
            break;
        }
    }
    path
}

/// Every field line for the current charges. Lines with fewer than two points
/// are dropped.
pub fn streamlines(
    sampler: &FieldSampler<'_>,
    bounds: &WorldRect,
    settings: &StreamlineSettings,
) -> Vec<Vec<DVec2>> {
    profile_scope!("streamlines");
    let seeds: Vec<(DVec2, f64)> = sampler
        .charges()
        .iter()
        .flat_map(|c| {
            let n = settings.line_count(c.charge);
            let sign = if c.charge >= 0.0 { 1.0 } else { -1.0 };
            (0..n).map(move |i| {
                let angle = TAU * i as f64 / n as f64;
                let offset = DVec2::new(angle.cos(), angle.sin()) * settings.start_radius;
                (c.pos + offset, sign)
            })
        })
        .collect();

    seeds
        .par_iter()
        .map(|&(start, sign)| trace(sampler, start, sign, bounds, settings))
        .filter(|line| line.len() >= 2)
        .collect()
}
