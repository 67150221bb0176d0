// app/command_loop.rs
// Single-threaded loop that interleaves commands and scheduled ticks.

use crate::commands::SimCommand;
use crate::profile_scope;
use crossbeam::channel::Receiver;
use crossbeam::select;
use parking_lot::Mutex;
use std::sync::Arc;

use super::controller::{Controller, FrameSnapshot};

pub type SharedFrame = Arc<Mutex<FrameSnapshot>>;

pub fn publish(controller: &Controller, frame: &SharedFrame) {
    profile_scope!("publish_frame");
    *frame.lock() = controller.snapshot();
}

/// Apply one command and report whether the loop should keep going.
pub fn handle_command(cmd: SimCommand, controller: &mut Controller) -> bool {
    if cmd == SimCommand::Shutdown {
        controller.stop();
        return false;
    }
    if let Err(e) = controller.handle(cmd) {
        log::warn!("Command failed: {e}");
    }
    true
}

/// Runs until `Shutdown` arrives or every sender is dropped, then hands the
/// controller back. A tick never overlaps a command: both run on this thread.
pub fn run_command_loop(
    rx: Receiver<SimCommand>,
    mut controller: Controller,
    frame: SharedFrame,
) -> Controller {
    publish(&controller, &frame);
    loop {
        // Re-read every pass so start/stop swaps take effect immediately.
        let ticks = controller.scheduler.ticks().clone();
        select! {
            recv(rx) -> msg => {
                let keep_going = match msg {
                    Ok(cmd) => handle_command(cmd, &mut controller),
                    Err(_) => {
                        log::debug!("Command channel closed");
                        controller.stop();
                        false
                    }
                };
                publish(&controller, &frame);
                if !keep_going {
                    break;
                }
            }
            recv(ticks) -> _ => {
                if controller.is_running() {
                    controller.tick();
                    publish(&controller, &frame);
                }
            }
        }
    }
    log::info!(
        "Command loop finished at t={:.3} after {} ticks",
        controller.simulation.time,
        controller.simulation.frame
    );
    controller
}
