pub mod app;
pub mod charge;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod field;
pub mod io;
pub mod profiler;
pub mod simulation;
pub mod units;
pub mod view;

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
