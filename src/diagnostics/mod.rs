// diagnostics/mod.rs
// Scalar aggregates over the charge store: potential energy, flux through the
// user polygon, dipole moment.

pub mod polygon;

pub use polygon::FluxPolygon;

use crate::charge::Charge;
use crate::config::MIN_SEPARATION;
use crate::profile_scope;
use ultraviolet::DVec2;

#[cfg(test)]
mod tests;

/// Sum of `k·qi·qj/r` over unordered pairs, skipping pairs closer than 1.
pub fn system_energy(charges: &[Charge], k: f64) -> f64 {
    profile_scope!("system_energy");
    let mut energy = 0.0;
    for (i, a) in charges.iter().enumerate() {
        for b in &charges[i + 1..] {
            let r = (b.pos - a.pos).mag();
            if r < MIN_SEPARATION {
                continue;
            }
            energy += k * a.charge * b.charge / r;
        }
    }
    energy
}

/// Total charge inside `vertices` (even-odd rule).
pub fn enclosed_charge(charges: &[Charge], vertices: &[DVec2]) -> f64 {
    charges
        .iter()
        .filter(|c| point_in_polygon(c.pos, vertices))
        .map(|c| c.charge)
        .sum()
}

/// Enclosed charge over `permittivity`. Zero unless the polygon is closed.
pub fn flux(charges: &[Charge], polygon: &FluxPolygon, permittivity: f64) -> f64 {
    match polygon {
        FluxPolygon::Closed(vertices) if vertices.len() >= 3 => {
            enclosed_charge(charges, vertices) / permittivity
        }
        _ => 0.0,
    }
}

/// `Σ q·r`, in coulomb-pixels.
pub fn dipole_moment(charges: &[Charge]) -> DVec2 {
    charges
        .iter()
        .fold(DVec2::zero(), |acc, c| acc + c.pos * c.charge)
}

/// Ray casting towards +x. Points exactly on an edge may land either side.
pub fn point_in_polygon(point: DVec2, vertices: &[DVec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
