// app/controller.rs
// Top-level owner of the simulation context. Applies commands strictly between ticks.

use crate::charge::{dipole_preset, Charge, ChargeId};
use crate::commands::{Edit, EditHistory, SimCommand};
use crate::config::{self, ExternalField, MagneticField, SimConfig};
use crate::diagnostics::FluxPolygon;
use crate::field::{FieldSampler, Probe};
use crate::io::{self, StateError};
use crate::profile_scope;
use crate::simulation::{Simulation, SimulationSample};
use crate::units::ChargeUnit;
use crate::view::{ViewTransform, WorldRect};
use ultraviolet::DVec2;

use super::scheduler::TickScheduler;

pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragState {
    id: ChargeId,
    /// Charge position minus the grab point, in world units.
    offset: DVec2,
}

/// Read-only copy of what a renderer needs after each tick or edit.
#[derive(Clone, Debug, Default)]
pub struct FrameSnapshot {
    pub charges: Vec<Charge>,
    pub time: f64,
    pub frame: usize,
    pub running: bool,
    pub latest: Option<SimulationSample>,
    pub polygon: FluxPolygon,
    pub view: ViewTransform,
}

pub struct Controller {
    pub simulation: Simulation,
    pub polygon: FluxPolygon,
    pub view: ViewTransform,
    pub history: EditHistory,
    pub unit: ChargeUnit,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub scheduler: TickScheduler,
    drag: Option<DragState>,
}

impl Controller {
    pub fn new(config: SimConfig) -> Self {
        let scheduler = TickScheduler::new(config.frame_interval());
        Self::from_simulation(Simulation::new(config), scheduler)
    }

    pub fn from_simulation(simulation: Simulation, scheduler: TickScheduler) -> Self {
        Self {
            simulation,
            polygon: FluxPolygon::new(),
            view: ViewTransform::default(),
            history: EditHistory::new(),
            unit: ChargeUnit::default(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            scheduler,
            drag: None,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.simulation.config
    }

    pub fn visible_rect(&self) -> WorldRect {
        self.view.visible_rect(self.canvas_width, self.canvas_height)
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Run one tick of the pipeline against the current view.
    pub fn tick(&mut self) -> SimulationSample {
        let bounds = self.visible_rect();
        self.simulation.step(&bounds, &self.polygon)
    }

    /// Kick resting charges and begin scheduling ticks.
    pub fn start(&mut self) {
        if self.scheduler.is_running() {
            return;
        }
        self.simulation.kick_resting_charges();
        self.scheduler.start();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn sampler(&self) -> FieldSampler<'_> {
        self.simulation.sampler()
    }

    pub fn probe_at(&self, screen: DVec2) -> Probe {
        self.sampler().probe(self.view.screen_to_world(screen))
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            charges: self.simulation.charges.as_slice().to_vec(),
            time: self.simulation.time,
            frame: self.simulation.frame,
            running: self.is_running(),
            latest: self.simulation.samples.latest().copied(),
            polygon: self.polygon.clone(),
            view: self.view,
        }
    }

    /// Append a user charge at a world position. Returns its id.
    pub fn place_charge(&mut self, world: DVec2, magnitude: f64, negative: bool) -> ChargeId {
        let sign = if negative { -1.0 } else { 1.0 };
        let q = self.unit.to_coulombs(magnitude) * sign;
        let charge = Charge::at_rest(world, q, self.simulation.config.placed_charge_mass);
        let id = self.simulation.charges.push(charge);
        self.history.record(Edit::Added(Charge { id, ..charge }));
        log::debug!("Placed {} at ({:.1}, {:.1})", self.unit.label(q), world.x, world.y);
        id
    }

    pub fn remove_index(&mut self, index: usize) -> Option<Charge> {
        let charge = self.simulation.charges.remove(index)?;
        self.history.record(Edit::Removed { index, charge });
        if self.drag.is_some_and(|d| d.id == charge.id) {
            self.drag = None;
        }
        Some(charge)
    }

    pub fn remove_at(&mut self, world: DVec2) -> Option<Charge> {
        let index = self
            .simulation
            .charges
            .first_at(world, config::REMOVE_PICK_RADIUS)?;
        self.remove_index(index)
    }

    /// Drop every charge and the flux polygon.
    pub fn clear(&mut self) {
        self.simulation.charges.clear();
        self.polygon.reset();
        self.drag = None;
    }

    /// Dipole preset around the centre of the visible area.
    /// Dipole preset around the canvas centre in world coordinates, regardless
    /// of pan or zoom.
    pub fn place_dipole(&mut self) {
        let center = WorldRect::from_size(self.canvas_width, self.canvas_height).center();
        let mass = self.simulation.config.dipole_charge_mass;
        for charge in dipole_preset(center, mass) {
            self.simulation.charges.push(charge);
        }
        let p = self.simulation.dipole_moment();
        log::info!("Dipole placed; moment = ({:.3e}, {:.3e}) C·px", p.x, p.y);
    }

    pub fn begin_drag(&mut self, world: DVec2) -> bool {
        let charges = &mut self.simulation.charges;
        let Some(index) = charges.topmost_at(world, config::DRAG_PICK_RADIUS) else {
            return false;
        };
        let Some(charge) = charges.get_mut(index) else {
            return false;
        };
        charge.vel = DVec2::zero();
        self.drag = Some(DragState {
            id: charge.id,
            offset: charge.pos - world,
        });
        true
    }

    pub fn drag_to(&mut self, world: DVec2) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        match self.simulation.charges.index_of(drag.id) {
            Some(index) => self.simulation.charges.drag_to(index, world + drag.offset),
            None => {
                self.drag = None;
                false
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn load_json(&mut self, json: &str) -> Result<usize, StateError> {
        let count = io::replace_from_json(&mut self.simulation.charges, json)?;
        self.after_replace();
        Ok(count)
    }

    pub fn load_state(&mut self, path: &std::path::Path) -> Result<usize, StateError> {
        let count = io::load_state(path, &mut self.simulation.charges)?;
        self.after_replace();
        Ok(count)
    }

    fn after_replace(&mut self) {
        // Recorded edits refer to ids that no longer exist.
        self.history.clear();
        self.drag = None;
    }

    /// Apply one command. Only I/O commands can fail.
    pub fn handle(&mut self, cmd: SimCommand) -> Result<(), StateError> {
        profile_scope!("command_handling");
        match cmd {
            SimCommand::PlaceCharge {
                screen,
                magnitude,
                negative,
            } => {
                let world = self.view.screen_to_world(screen);
                self.place_charge(world, magnitude, negative);
            }
            SimCommand::RemoveAt { screen } => {
                let world = self.view.screen_to_world(screen);
                self.remove_at(world);
            }
            SimCommand::RemoveIndex { index } => {
                self.remove_index(index);
            }
            SimCommand::Clear => self.clear(),
            SimCommand::PlaceDipole => self.place_dipole(),
            SimCommand::BeginDrag { screen } => {
                let world = self.view.screen_to_world(screen);
                self.begin_drag(world);
            }
            SimCommand::DragTo { screen } => {
                let world = self.view.screen_to_world(screen);
                self.drag_to(world);
            }
            SimCommand::EndDrag => self.end_drag(),
            SimCommand::Undo => {
                self.history.undo(&mut self.simulation.charges);
            }
            SimCommand::Redo => {
                self.history.redo(&mut self.simulation.charges);
            }
            SimCommand::Start => self.start(),
            SimCommand::Stop => self.stop(),
            SimCommand::StepOnce => {
                self.tick();
            }
            SimCommand::SetExternalField {
                enabled,
                amplitude,
                frequency,
            } => {
                self.simulation.config.external_field = ExternalField {
                    enabled,
                    amplitude,
                    frequency,
                };
            }
            SimCommand::SetMagneticField {
                enabled,
                microtesla,
            } => {
                self.simulation.config.magnetic_field =
                    MagneticField::from_microtesla(enabled, microtesla);
            }
            SimCommand::SetChargeUnit { unit } => self.unit = unit,
            SimCommand::AddPolygonVertex { screen } => {
                let world = self.view.screen_to_world(screen);
                self.polygon.push_vertex(world);
            }
            SimCommand::ClosePolygon => {
                if !self.polygon.close() {
                    log::debug!("Polygon needs at least 3 vertices to close");
                }
            }
            SimCommand::ResetPolygon => self.polygon.reset(),
            SimCommand::Zoom { screen, zoom_in } => self.view.zoom_at(screen, zoom_in),
            SimCommand::Pan { delta } => self.view.pan_by(delta),
            SimCommand::Resize { width, height } => {
                self.canvas_width = width.max(1.0);
                self.canvas_height = height.max(1.0);
            }
            SimCommand::SaveState { path } => {
                io::save_state(&path, &self.simulation.charges)?;
            }
            SimCommand::LoadState { path } => {
                self.load_state(&path)?;
            }
            SimCommand::LoadJson { json } => {
                self.load_json(&json)?;
            }
            SimCommand::ExportSamples { path } => {
                self.simulation.samples.write_csv(&path)?;
            }
            SimCommand::ResetSamples => self.simulation.reset_clock(),
            SimCommand::Shutdown => self.stop(),
        }
        Ok(())
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
