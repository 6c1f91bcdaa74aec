//! # dayglow
//!
//! Time-of-day theming for a content website. The site switches between a
//! morning, evening and night look depending on the visitor's local hour;
//! this crate owns that switch and the declarative site configuration around
//! it.
//!
//! # Architecture
//!
//! ```text
//!  HourSource ──► ThemeSelector ──► MarkerSurface   (body class list)
//!                      │
//!                      └──────────► ThemeWatch      (observable label)
//!
//!  config.toml ──► SiteConfig ──► themes.css / preview.html
//! ```
//!
//! The selector takes its clock and its surface as capabilities rather than
//! reaching for the wall clock and a DOM, so the same logic runs under a UI
//! host, a CLI, or a paused Tokio clock in tests.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | `Theme` labels, hour classification, marker class names |
//! | [`clock`] | `HourSource` capability: local clock, settable fixed hour |
//! | [`surface`] | `MarkerSurface` trait, in-memory `ClassList`, the apply step |
//! | [`selector`] | `ThemeSelector` lifecycle and the once-a-minute refresh |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`images`] | Remote image domain allow-list |
//! | [`preview`] | Static HTML snapshot of a themed page |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Closed-Open Hour Buckets
//!
//! Buckets are `[6, 16)` morning, `[16, 20)` evening, everything else night.
//! The lower bound belongs to the new bucket, so 16:00 is already evening.
//!
//! ## One Ticker, Fenced by Generation
//!
//! Re-activating a selector restarts it instead of stacking a second timer,
//! and every tick checks its activation generation under the same lock that
//! `deactivate()` takes. No tick lands after deactivation returns.
//!
//! ## Cosmetic Failures Stay Cosmetic
//!
//! A surface that rejects a marker update is logged and skipped. The
//! observable theme still updates and the next minute retries.

pub mod clock;
pub mod config;
pub mod images;
pub mod output;
pub mod preview;
pub mod selector;
pub mod surface;
pub mod theme;

pub use clock::{FixedHour, HourSource, LocalClock};
pub use selector::{REFRESH_PERIOD, ThemeSelector, ThemeWatch};
pub use surface::{ClassList, MarkerSurface, SurfaceError};
pub use theme::Theme;
