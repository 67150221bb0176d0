// field/grid.rs
// Gridded samples for the potential heatmap and the vector-arrow overlay

use super::FieldSampler;
use crate::config::{ARROW_MIN_FIELD, HEATMAP_MAX_POTENTIAL};
use crate::profile_scope;
use crate::view::WorldRect;
use palette::Srgb;
use rayon::prelude::*;
use ultraviolet::DVec2;

/// One arrow of the vector overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldArrow {
    pub origin: DVec2,
    pub field: DVec2,
    pub magnitude: f64,
}

/// Row-major potentials sampled at the top-left corner of each of
/// `columns` x `rows` cells covering `rect`.
pub fn potential_grid(
    sampler: &FieldSampler<'_>,
    rect: &WorldRect,
    columns: usize,
    rows: usize,
) -> Vec<f64> {
    profile_scope!("potential_grid");
    if columns == 0 || rows == 0 {
        return Vec::new();
    }
    let cell = DVec2::new(rect.width() / columns as f64, rect.height() / rows as f64);
    let mut grid = vec![0.0f64; columns * rows];
    grid.par_iter_mut().enumerate().for_each(|(i, val)| {
        let ix = (i % columns) as f64;
        let iy = (i / columns) as f64;
        let pos = rect.min + DVec2::new(ix * cell.x, iy * cell.y);
        *val = sampler.potential_at(pos);
    });
    grid
}

/// [`potential_grid`] mapped through [`potential_color`].
pub fn heatmap(
    sampler: &FieldSampler<'_>,
    rect: &WorldRect,
    columns: usize,
    rows: usize,
) -> Vec<Srgb<u8>> {
    potential_grid(sampler, rect, columns, rows)
        .par_iter()
        .map(|&v| potential_color(v))
        .collect()
}

/// Grid points aligned to multiples of `spacing` (offset by half a cell) inside
/// `rect`. Points where the field is weaker than `1e-3` are dropped.
pub fn arrow_grid(sampler: &FieldSampler<'_>, rect: &WorldRect, spacing: f64) -> Vec<FieldArrow> {
    profile_scope!("arrow_grid");
    if !(spacing > 0.0) {
        return Vec::new();
    }
    let xs = aligned_steps(rect.min.x, rect.max.x, spacing);
    let ys = aligned_steps(rect.min.y, rect.max.y, spacing);
    let points: Vec<DVec2> = xs
        .iter()
        .flat_map(|&x| ys.iter().map(move |&y| DVec2::new(x, y)))
        .collect();

    points
        .par_iter()
        .filter_map(|&origin| {
            let field = sampler.field_at(origin);
            let magnitude = field.mag();
            (magnitude >= ARROW_MIN_FIELD).then_some(FieldArrow {
                origin,
                field,
                magnitude,
            })
        })
        .collect()
}

fn aligned_steps(min: f64, max: f64, spacing: f64) -> Vec<f64> {
    let start = (min / spacing).floor() * spacing + spacing * 0.5;
    let count = ((max - start) / spacing).floor();
    if !(count >= 0.0) {
        return Vec::new();
    }
    (0..=count as usize)
        .map(|i| start + i as f64 * spacing)
        .collect()
}

/// Blue (negative) through white (zero) to red (positive), saturating at
/// ±3000 V.
pub fn potential_color(potential: f64) -> Srgb<u8> {
    let clamped = potential.clamp(-HEATMAP_MAX_POTENTIAL, HEATMAP_MAX_POTENTIAL);
    let ratio = ((clamped + HEATMAP_MAX_POTENTIAL) / (2.0 * HEATMAP_MAX_POTENTIAL)) as f32;
    let color = if ratio < 0.5 {
        let sub = ratio / 0.5;
        Srgb::new(sub, sub, 1.0)
    } else {
        let sub = (ratio - 0.5) / 0.5;
        Srgb::new(1.0, 1.0 - sub, 1.0 - sub)
    };
    color.into_format()
}

/// Blue through green to red for a field strength ratio in `[0, 1]`.
pub fn field_magnitude_color(ratio: f64) -> Srgb<u8> {
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) } as f32;
    let color = if ratio < 0.5 {
        let sub = ratio / 0.5;
        Srgb::new(0.0, sub, 1.0 - sub)
    } else {
        let sub = (ratio - 0.5) / 0.5;
        Srgb::new(sub, 1.0 - sub, 0.0)
    };
    color.into_format()
}
