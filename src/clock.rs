//! Hour sources.
//!
//! The selector never reads the wall clock directly; it asks an [`HourSource`]
//! for the current local hour. [`LocalClock`] is the real clock, and
//! [`FixedHour`] is a shared, settable hour used by tests and by the `--hour`
//! CLI flag.

use chrono::{Local, Timelike};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Capability returning the current local hour (0-23).
pub trait HourSource: Send + Sync {
    fn current_hour(&self) -> u32;
}

/// Local wall-clock time, as configured for the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl HourSource for LocalClock {
    fn current_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// A settable hour. Clones share the same value.
#[derive(Debug, Clone)]
pub struct FixedHour(Arc<AtomicU32>);

impl FixedHour {
    pub fn new(hour: u32) -> Self {
        Self(Arc::new(AtomicU32::new(hour)))
    }

    /// Change the hour reported to every clone.
    pub fn set(&self, hour: u32) {
        self.0.store(hour, Ordering::SeqCst);
    }
}

impl HourSource for FixedHour {
    fn current_hour(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

impl<T: HourSource + ?Sized> HourSource for Arc<T> {
    fn current_hour(&self) -> u32 {
        (**self).current_hour()
    }
}
