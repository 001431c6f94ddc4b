//! Background progress reporting

use super::context::SearchContext;
use super::parallel::channel::stop_channel;
use super::progress::Phase;
use crossbeam_channel::{RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::info;

/// Logs the frontier size and expansion progress every interval until stopped.
///
/// Dropping the monitor stops it and joins the thread.
pub struct Monitor {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Monitor {
    /// Start polling `ctx`; a zero interval gives an inert monitor.
    pub fn spawn(ctx: Arc<SearchContext>, interval: Duration) -> Monitor {
        if interval.is_zero() {
            return Monitor {
                stop: None,
                handle: None,
            };
        }
        let (tx, rx) = stop_channel();
        let handle = std::thread::spawn(move || {
            loop {
                match rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => report(&ctx),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        Monitor {
            stop: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One progress line; the percentage only while children are being generated.
pub fn report(ctx: &SearchContext) {
    let progress = &ctx.progress;
    let phase = progress.phase();
    let frontier = ctx.frontier.size();
    if phase == Phase::Expanding {
        info!(
            level = progress.level(),
            %phase,
            frontier,
            percent = (progress.fraction() * 100.0).round() as u64,
            "progress"
        );
    } else {
        info!(level = progress.level(), %phase, frontier, "progress");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::config::SearchConfig;

    #[test]
    fn test_zero_interval_is_inert() {
        let ctx = Arc::new(SearchContext::new(&SearchConfig::new(3)));
        let monitor = Monitor::spawn(ctx, Duration::ZERO);
        assert!(!monitor.is_running());
    }

    #[test]
    fn test_stop_joins_thread() {
        let ctx = Arc::new(SearchContext::new(&SearchConfig::new(3)));
        ctx.progress.start_level(1, 3);
        ctx.progress.set_phase(Phase::Expanding);
        let mut monitor = Monitor::spawn(Arc::clone(&ctx), Duration::from_millis(5));
        assert!(monitor.is_running());
        std::thread::sleep(Duration::from_millis(20));
        monitor.stop();
        assert!(!monitor.is_running());
        assert_eq!(Arc::strong_count(&ctx), 1);
    }
}
