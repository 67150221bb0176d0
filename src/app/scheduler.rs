// app/scheduler.rs
// Cancellable repeating tick source for the command loop.

use crossbeam::channel::{self, Receiver};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fires once per `interval` while running. Stopping swaps the ticker for a
/// channel that never fires, which revokes any tick not yet delivered.
pub struct TickScheduler {
    interval: Duration,
    ticker: Receiver<Instant>,
    running: Arc<AtomicBool>,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ticker: channel::never(),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn start(&mut self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        self.ticker = channel::tick(self.interval);
        log::info!("Tick scheduler started ({:?} per tick)", self.interval);
    }

    pub fn stop(&mut self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.ticker = channel::never();
        log::info!("Tick scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Shared flag so other threads can ask whether ticks are flowing.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn ticks(&self) -> &Receiver<Instant> {
        &self.ticker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_scheduler_never_fires() {
        let scheduler = TickScheduler::new(Duration::from_millis(1));
        assert!(!scheduler.is_running());
        assert!(scheduler
            .ticks()
            .recv_timeout(Duration::from_millis(20))
            .is_err());
    }

    #[test]
    fn running_scheduler_fires_until_stopped() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(1));
        let flag = scheduler.running_flag();
        scheduler.start();
        assert!(flag.load(Ordering::SeqCst));
        assert!(scheduler
            .ticks()
            .recv_timeout(Duration::from_millis(500))
            .is_ok());

        scheduler.stop();
        assert!(!flag.load(Ordering::SeqCst));
        assert!(scheduler
            .ticks()
            .recv_timeout(Duration::from_millis(20))
            .is_err());
    }
}
