// charge/store.rs
// Insertion-ordered owner of every charge. All structural edits go through here.

use super::{Charge, ChargeId};
use ultraviolet::DVec2;

#[derive(Clone, Debug, Default)]
pub struct ChargeStore {
    charges: Vec<Charge>,
    next_id: ChargeId,
}

impl ChargeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Charge> {
        self.charges.iter()
    }

    pub fn as_slice(&self) -> &[Charge] {
        &self.charges
    }

    /// Mutable view for the tick pipeline. Length cannot change through it.
    pub fn as_mut_slice(&mut self) -> &mut [Charge] {
        &mut self.charges
    }

    pub fn get(&self, index: usize) -> Option<&Charge> {
        self.charges.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Charge> {
        self.charges.get_mut(index)
    }

    pub fn index_of(&self, id: ChargeId) -> Option<usize> {
        self.charges.iter().position(|c| c.id == id)
    }

    fn fresh_id(&mut self) -> ChargeId {
        self.next_id += 1;
        self.next_id
    }

    /// Append a charge under a fresh id and return that id.
    pub fn push(&mut self, mut charge: Charge) -> ChargeId {
        charge.id = self.fresh_id();
        self.charges.push(charge);
        charge.id
    }

    /// Put a previously removed charge back at `index` (clamped), keeping its id.
    pub fn reinsert(&mut self, index: usize, charge: Charge) {
        let index = index.min(self.charges.len());
        self.next_id = self.next_id.max(charge.id);
        self.charges.insert(index, charge);
    }

    pub fn remove(&mut self, index: usize) -> Option<Charge> {
        if index < self.charges.len() {
            Some(self.charges.remove(index))
        } else {
            None
        }
    }

    pub fn remove_by_id(&mut self, id: ChargeId) -> Option<(usize, Charge)> {
        let index = self.index_of(id)?;
        self.remove(index).map(|c| (index, c))
    }

    pub fn clear(&mut self) {
        self.charges.clear();
    }

    /// Swap in a whole new charge set, e.g. after a load. Ids are reassigned.
    pub fn replace(&mut self, charges: Vec<Charge>) {
        self.charges.clear();
        self.charges.reserve(charges.len());
        for charge in charges {
            self.push(charge);
        }
    }

    /// Last (top-most drawn) charge within `radius` of `point`.
    pub fn topmost_at(&self, point: DVec2, radius: f64) -> Option<usize> {
        self.charges
            .iter()
            .rposition(|c| c.distance_to(point) < radius)
    }

    /// First charge within `radius` of `point`.
    pub fn first_at(&self, point: DVec2, radius: f64) -> Option<usize> {
        self.charges
            .iter()
            .position(|c| c.distance_to(point) < radius)
    }

    /// Move a charge directly (drag). Velocity is forced to zero.
    pub fn drag_to(&mut self, index: usize, pos: DVec2) -> bool {
        match self.charges.get_mut(index) {
            Some(charge) => {
                charge.pos = pos;
                charge.vel = DVec2::zero();
                true
            }
            None => false,
        }
    }

    /// Give every charge at exact rest a random velocity in `[-speed/2, speed/2)` per axis.
    pub fn kick_resting(&mut self, speed: f64, rng: &mut fastrand::Rng) -> usize {
        let mut kicked = 0;
        for charge in &mut self.charges {
            if charge.vel.x == 0.0 && charge.vel.y == 0.0 {
                charge.vel = DVec2::new((rng.f64() - 0.5) * speed, (rng.f64() - 0.5) * speed);
                kicked += 1;
            }
        }
        kicked
    }
}

impl<'a> IntoIterator for &'a ChargeStore {
    type Item = &'a Charge;
    type IntoIter = std::slice::Iter<'a, Charge>;

    fn into_iter(self) -> Self::IntoIter {
        self.charges.iter()
    }
}
