// simulation/boundary.rs
// Keeps charges inside the visible world rectangle with a lossy bounce

use crate::charge::Charge;
use crate::view::WorldRect;

/// Clamp each charge into `bounds` shrunk by `radius`. On contact the matching
/// velocity component is multiplied by `bounce` (negative). Both axes are
/// checked independently, so a corner hit flips both. Returns the number of
/// axis contacts.
pub fn reflect(charges: &mut [Charge], bounds: &WorldRect, radius: f64, bounce: f64) -> usize {
    let inner = bounds.inset(radius);
    let mut contacts = 0;
    for charge in charges.iter_mut() {
        if charge.pos.x < inner.min.x {
            charge.pos.x = inner.min.x;
            charge.vel.x *= bounce;
            contacts += 1;
        }
        if charge.pos.x > inner.max.x {
            charge.pos.x = inner.max.x;
            charge.vel.x *= bounce;
            contacts += 1;
        }
        if charge.pos.y < inner.min.y {
            charge.pos.y = inner.min.y;
            charge.vel.y *= bounce;
            contacts += 1;
        }
        if charge.pos.y > inner.max.y {
            charge.pos.y = inner.max.y;
            charge.vel.y *= bounce;
            contacts += 1;
        }
    }
    contacts
}
