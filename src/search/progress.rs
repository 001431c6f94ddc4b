//! Thread-safe progress counters read by the monitor

use std::fmt;
use std::sync::atomic::{AtomicU8, AtomicU64, AtomicUsize, Ordering};

/// Where a level is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Idle = 0,
    Seeding = 1,
    Expanding = 2,
    FinalChecking = 3,
    Trimming = 4,
    Advancing = 5,
    Done = 6,
}

impl Phase {
    fn from_u8(raw: u8) -> Phase {
        match raw {
            1 => Phase::Seeding,
            2 => Phase::Expanding,
            3 => Phase::FinalChecking,
            4 => Phase::Trimming,
            5 => Phase::Advancing,
            6 => Phase::Done,
            _ => Phase::Idle,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Seeding => "seeding",
            Phase::Expanding => "expanding",
            Phase::FinalChecking => "final-check",
            Phase::Trimming => "trimming",
            Phase::Advancing => "advancing",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Counters the orchestrator and its tasks update; only ever read from outside.
#[derive(Debug)]
pub struct Progress {
    level: AtomicUsize,
    phase: AtomicU8,
    checked: AtomicU64,
    total: AtomicU64,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            level: AtomicUsize::new(0),
            phase: AtomicU8::new(Phase::Idle as u8),
            checked: AtomicU64::new(0),
            total: AtomicU64::new(0),
        }
    }
}

impl Progress {
    /// Reset the counters for a level expecting `total` candidate children.
    pub fn start_level(&self, level: usize, total: u64) {
        self.level.store(level, Ordering::SeqCst);
        self.checked.store(0, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
        self.set_phase(Phase::Seeding);
    }

    pub fn set_phase(&self, phase: Phase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
    }

    pub fn add_checked(&self, count: u64) {
        self.checked.fetch_add(count, Ordering::Relaxed);
    }

    pub fn level(&self) -> usize {
        self.level.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    pub fn checked(&self) -> u64 {
        self.checked.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::SeqCst)
    }

    /// Fraction of the level's candidates examined (0.0 to 1.0)
    pub fn fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => (self.checked() as f64 / total as f64).min(1.0),
        }
    }
}
