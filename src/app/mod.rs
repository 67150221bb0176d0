pub mod command_loop;
pub mod controller;
pub mod scheduler;
pub mod spawn;

pub use command_loop::{run_command_loop, SharedFrame};
pub use controller::{Controller, FrameSnapshot};
pub use scheduler::TickScheduler;
pub use spawn::{spawn, SandboxHandle};
