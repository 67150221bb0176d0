// commands.rs
// Messages accepted by the controller, and the reversible edit stack behind undo/redo

use crate::charge::{Charge, ChargeStore};
use crate::units::ChargeUnit;
use std::path::PathBuf;
use ultraviolet::DVec2;

/// Everything the command loop can be asked to do. Screen positions are canvas
/// pixels; the controller converts them through the active view.
#[derive(Clone, Debug, PartialEq)]
pub enum SimCommand {
    /// `magnitude` is in the active [`ChargeUnit`].
    PlaceCharge { screen: DVec2, magnitude: f64, negative: bool },
    /// Remove the first charge under the cursor.
    RemoveAt { screen: DVec2 },
    RemoveIndex { index: usize },
    Clear,
    PlaceDipole,
    /// Pick the top-most charge under the cursor for dragging.
    BeginDrag { screen: DVec2 },
    DragTo { screen: DVec2 },
    EndDrag,
    Undo,
    Redo,
    Start,
    Stop,
    StepOnce,
    SetExternalField { enabled: bool, amplitude: f64, frequency: f64 },
    SetMagneticField { enabled: bool, microtesla: f64 },
    SetChargeUnit { unit: ChargeUnit },
    AddPolygonVertex { screen: DVec2 },
    ClosePolygon,
    ResetPolygon,
    Zoom { screen: DVec2, zoom_in: bool },
    Pan { delta: DVec2 },
    Resize { width: f64, height: f64 },
    SaveState { path: PathBuf },
    LoadState { path: PathBuf },
    LoadJson { json: String },
    ExportSamples { path: PathBuf },
    ResetSamples,
    Shutdown,
}

/// A reversible change to the charge store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edit {
    Added(Charge),
    Removed { index: usize, charge: Charge },
}

impl Edit {
    /// Reverse the edit in `store`. Returns the edit to keep for the opposite
    /// stack, refreshed with the charge's latest state.
    fn revert(self, store: &mut ChargeStore) -> Edit {
        match self {
            Edit::Added(charge) => match store.remove_by_id(charge.id) {
                Some((_, current)) => Edit::Added(current),
                None => Edit::Added(charge),
            },
            Edit::Removed { index, charge } => {
                store.reinsert(index, charge);
                Edit::Removed { index, charge }
            }
        }
    }

    fn reapply(self, store: &mut ChargeStore) -> Edit {
        match self {
            Edit::Added(charge) => {
                store.reinsert(store.len(), charge);
                Edit::Added(charge)
            }
            Edit::Removed { index, charge } => match store.remove_by_id(charge.id) {
                Some((_, current)) => Edit::Removed { index, charge: current },
                None => Edit::Removed { index, charge },
            },
        }
    }
}

/// Undo/redo stacks. Recording a new edit discards everything redoable.
#[derive(Clone, Debug, Default)]
pub struct EditHistory {
    undo: Vec<Edit>,
    redo: Vec<Edit>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, edit: Edit) {
        self.undo.push(edit);
        self.redo.clear();
    }

    /// Returns false when there was nothing to undo.
    pub fn undo(&mut self, store: &mut ChargeStore) -> bool {
        match self.undo.pop() {
            Some(edit) => {
                self.redo.push(edit.revert(store));
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self, store: &mut ChargeStore) -> bool {
        match self.redo.pop() {
            Some(edit) => {
                self.undo.push(edit.reapply(store));
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(store: &mut ChargeStore, history: &mut EditHistory, x: f64) -> Charge {
        let id = store.push(Charge::placed(DVec2::new(x, 0.0), 1e-6));
        let charge = *store.get(store.index_of(id).unwrap()).unwrap();
        history.record(Edit::Added(charge));
        charge
    }

    fn xs(store: &ChargeStore) -> Vec<f64> {
        store.iter().map(|c| c.pos.x).collect()
    }

    #[test]
    fn undo_and_redo_add() {
        let mut store = ChargeStore::new();
        let mut history = EditHistory::new();
        add(&mut store, &mut history, 1.0);
        add(&mut store, &mut history, 2.0);

        assert!(history.undo(&mut store));
        assert_eq!(xs(&store), vec![1.0]);
        assert!(history.redo(&mut store));
        assert_eq!(xs(&store), vec![1.0, 2.0]);
        assert!(!history.redo(&mut store));
    }

    #[test]
    fn undo_remove_restores_position_in_order() {
        let mut store = ChargeStore::new();
        let mut history = EditHistory::new();
        for x in [1.0, 2.0, 3.0] {
            add(&mut store, &mut history, x);
        }
        let charge = store.remove(1).unwrap();
        history.record(Edit::Removed { index: 1, charge });
        assert_eq!(xs(&store), vec![1.0, 3.0]);

        history.undo(&mut store);
        assert_eq!(xs(&store), vec![1.0, 2.0, 3.0]);
        history.redo(&mut store);
        assert_eq!(xs(&store), vec![1.0, 3.0]);
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut store = ChargeStore::new();
        let mut history = EditHistory::new();
        add(&mut store, &mut history, 1.0);
        history.undo(&mut store);
        assert!(history.can_redo());
        add(&mut store, &mut history, 5.0);
        assert!(!history.can_redo());
        assert!(!history.redo(&mut store));
    }

    #[test]
    fn undo_of_moved_charge_redoes_latest_state() {
        let mut store = ChargeStore::new();
        let mut history = EditHistory::new();
        add(&mut store, &mut history, 1.0);
        store.drag_to(0, DVec2::new(40.0, 40.0));
        history.undo(&mut store);
        assert!(store.is_empty());
        history.redo(&mut store);
        assert_eq!(store.get(0).unwrap().pos, DVec2::new(40.0, 40.0));
    }

    #[test]
    fn undo_on_empty_history_is_a_no_op() {
        let mut store = ChargeStore::new();
        let mut history = EditHistory::new();
        assert!(!history.undo(&mut store));
        assert!(!history.can_undo());
    }
}
