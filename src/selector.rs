//! The time-of-day theme selector.
//!
//! [`ThemeSelector`] ties an [`HourSource`] to a [`MarkerSurface`]:
//!
//! ```text
//! activate() ──► refresh now ──► spawn ticker (every 60s) ──► refresh ...
//!                                      │
//! deactivate() / drop ─────────────────┘ cancel
//! ```
//!
//! A refresh classifies the current hour, publishes the label on the
//! observable [`ThemeWatch`], and swaps the marker on the surface.
//!
//! ## Cancellation
//!
//! The surface, clock and publisher sit behind a single mutex shared with the
//! ticker task. Every activation takes a new generation number and the ticker
//! only refreshes while holding the lock with its own generation still
//! current. `deactivate()` bumps the generation under the same lock, so once
//! it returns no tick can touch the surface, even one whose timer had already
//! fired.

use crate::clock::HourSource;
use crate::surface::{MarkerSurface, apply_theme};
use crate::theme::Theme;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

/// How often an active selector re-derives the theme.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// Read-only view of the selector's current theme.
///
/// Clones are independent subscribers: each tracks which changes it has seen.
#[derive(Debug, Clone)]
pub struct ThemeWatch {
    rx: watch::Receiver<Theme>,
}

impl ThemeWatch {
    /// The most recently computed theme.
    pub fn get(&self) -> Theme {
        *self.rx.borrow()
    }

    /// The most recently computed theme, marking it as seen so the next
    /// [`changed`](Self::changed) only fires on a newer value.
    pub fn take_current(&mut self) -> Theme {
        *self.rx.borrow_and_update()
    }

    /// Wait until the theme changes and return the new value.
    ///
    /// Returns `None` once the selector has been dropped.
    pub async fn changed(&mut self) -> Option<Theme> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

struct Shared<C, S> {
    clock: C,
    surface: S,
    publisher: watch::Sender<Theme>,
    generation: u64,
}

impl<C: HourSource, S: MarkerSurface> Shared<C, S> {
    fn refresh(&mut self) -> Theme {
        let hour = self.clock.current_hour();
        let theme = Theme::for_hour(hour);
        let changed = self.publisher.send_if_modified(|current| {
            if *current == theme {
                return false;
            }
            *current = theme;
            true
        });
        if let Err(e) = apply_theme(&mut self.surface, theme) {
            warn!(error = %e, marker = theme.marker(), "skipping theme marker update");
        }
        debug!(hour, %theme, changed, "theme refreshed");
        theme
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keeps a surface's theme marker in step with the local hour.
///
/// Dropping an active selector deactivates it.
pub struct ThemeSelector<C, S>
where
    C: HourSource + 'static,
    S: MarkerSurface + 'static,
{
    shared: Arc<Mutex<Shared<C, S>>>,
    watch: ThemeWatch,
    ticker: Option<JoinHandle<()>>,
}

impl<C, S> ThemeSelector<C, S>
where
    C: HourSource + 'static,
    S: MarkerSurface + 'static,
{
    /// Create an inactive selector. The theme starts as the `morning`
    /// placeholder until the first activation.
    pub fn new(clock: C, surface: S) -> Self {
        let (publisher, rx) = watch::channel(Theme::default());
        Self {
            shared: Arc::new(Mutex::new(Shared {
                clock,
                surface,
                publisher,
                generation: 0,
            })),
            watch: ThemeWatch { rx },
            ticker: None,
        }
    }

    /// Apply the current theme immediately and start the periodic refresh.
    ///
    /// Activating an already active selector restarts it: the old ticker is
    /// cancelled first, so only one ever runs.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn activate(&mut self) {
        if self.ticker.is_some() {
            debug!("restarting active theme selector");
            self.deactivate();
        }

        let (generation, theme) = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            (shared.generation, shared.refresh())
        };

        let shared = Arc::clone(&self.shared);
        self.ticker = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + REFRESH_PERIOD, REFRESH_PERIOD);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let mut state = lock(&shared);
                if state.generation != generation {
                    break;
                }
                state.refresh();
            }
        }));

        info!(%theme, period_secs = REFRESH_PERIOD.as_secs(), "theme selector activated");
    }

    /// Stop the periodic refresh. Does nothing when inactive.
    pub fn deactivate(&mut self) {
        let Some(ticker) = self.ticker.take() else {
            return;
        };
        lock(&self.shared).generation += 1;
        ticker.abort();
        info!("theme selector deactivated");
    }

    pub fn is_active(&self) -> bool {
        self.ticker.is_some()
    }

    /// Observable handle on the current theme.
    pub fn current_theme(&self) -> ThemeWatch {
        self.watch.clone()
    }
}

impl<C, S> Drop for ThemeSelector<C, S>
where
    C: HourSource + 'static,
    S: MarkerSurface + 'static,
{
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl<C, S> std::fmt::Debug for ThemeSelector<C, S>
where
    C: HourSource + 'static,
    S: MarkerSurface + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSelector")
            .field("theme", &self.watch.get())
            .field("active", &self.is_active())
            .finish()
    }
}
