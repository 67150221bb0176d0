// app/spawn.rs
// Start the command loop on its own thread and hand back a handle to drive it.

use crate::commands::SimCommand;
use crossbeam::channel::{self, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::command_loop::{run_command_loop, SharedFrame};
use super::controller::{Controller, FrameSnapshot};

pub struct SandboxHandle {
    commands: Sender<SimCommand>,
    frame: SharedFrame,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<Controller>>,
}

pub fn spawn(controller: Controller) -> SandboxHandle {
    let (tx, rx) = channel::unbounded();
    let frame: SharedFrame = Arc::new(Mutex::new(controller.snapshot()));
    let running = controller.scheduler.running_flag();
    let loop_frame = Arc::clone(&frame);
    let thread = std::thread::spawn(move || run_command_loop(rx, controller, loop_frame));
    SandboxHandle {
        commands: tx,
        frame,
        running,
        thread: Some(thread),
    }
}

impl SandboxHandle {
    /// Queue a command. Returns false once the loop has exited.
    pub fn send(&self, cmd: SimCommand) -> bool {
        self.commands.send(cmd).is_ok()
    }

    pub fn latest_frame(&self) -> FrameSnapshot {
        self.frame.lock().clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the loop and take the controller back.
    pub fn shutdown(mut self) -> Option<Controller> {
        let _ = self.commands.send(SimCommand::Shutdown);
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(controller) => Some(controller),
            Err(_) => {
                log::error!("Command loop thread panicked");
                None
            }
        }
    }
}

impl Drop for SandboxHandle {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.commands.send(SimCommand::Shutdown);
            let _ = thread.join();
        }
    }
}
