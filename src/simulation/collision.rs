// simulation/collision.rs
// Contains collision detection and resolution between charges treated as equal discs

use crate::charge::Charge;
use crate::profile_scope;

/// Resolve every overlapping pair in ascending (i, j) order. Returns the number
/// of contacts handled. A charge may be corrected several times in one call.
pub fn collide(charges: &mut [Charge], radius: f64, restitution: f64) -> usize {
    profile_scope!("collision");
    let mut contacts = 0;
    let n = charges.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if resolve(charges, i, j, radius, restitution) {
                contacts += 1;
            }
        }
    }
    contacts
}

fn resolve(charges: &mut [Charge], i: usize, j: usize, radius: f64, restitution: f64) -> bool {
    let d = charges[j].pos - charges[i].pos;
    let dist = d.mag();
    let min_dist = 2.0 * radius;
    // Coincident discs have no normal and are left alone.
    if !(dist > 0.0 && dist < min_dist) {
        return false;
    }

    let normal = d / dist;
    let overlap = (min_dist - dist) * 0.5;
    charges[i].pos -= normal * overlap;
    charges[j].pos += normal * overlap;

    let v_rel = (charges[j].vel - charges[i].vel).dot(normal);
    if v_rel < 0.0 {
        let m1 = charges[i].mass;
        let m2 = charges[j].mass;
        let impulse = -(1.0 + restitution) * v_rel / (1.0 / m1 + 1.0 / m2);
        charges[i].vel -= normal * (impulse / m1);
        charges[j].vel += normal * (impulse / m2);
    }
    true
}
