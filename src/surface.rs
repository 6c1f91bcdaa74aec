//! Marker surfaces.
//!
//! A [`MarkerSurface`] is the root display node's class set: the selector
//! removes stale theme markers and adds the current one through it. The
//! in-memory [`ClassList`] keeps insertion order and never holds duplicates,
//! matching a DOM `classList`.

use crate::theme::{ALL_MARKERS, Theme};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("display surface is unavailable")]
    Unavailable,
    #[error("invalid marker '{0}'")]
    InvalidMarker(String),
}

/// A mutable set of class-like markers on a root display node.
pub trait MarkerSurface: Send {
    /// Remove each marker that is present. Absent markers are ignored.
    fn remove_markers(&mut self, markers: &[&str]) -> Result<(), SurfaceError>;

    /// Add a marker if it is not already present.
    fn add_marker(&mut self, marker: &str) -> Result<(), SurfaceError>;
}

/// Replace whatever theme marker is on `surface` with the one for `theme`.
///
/// All three candidates are removed before the new one is added, so a stale
/// marker never coexists with the current one.
pub fn apply_theme(surface: &mut dyn MarkerSurface, theme: Theme) -> Result<(), SurfaceError> {
    surface.remove_markers(&ALL_MARKERS)?;
    surface.add_marker(theme.marker())
}

/// In-memory class list. Clones share the same underlying list, so a caller
/// can hand one clone to the selector and inspect another.
#[derive(Debug, Clone, Default)]
pub struct ClassList {
    classes: Arc<Mutex<Vec<String>>>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing classes, e.g. those already on `<body>`.
    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Vec::new();
        for class in classes {
            let class = class.into();
            if !list.contains(&class) {
                list.push(class);
            }
        }
        Self {
            classes: Arc::new(Mutex::new(list)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.classes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn contains(&self, class: &str) -> bool {
        self.lock().iter().any(|c| c == class)
    }

    /// Snapshot of the classes in insertion order.
    pub fn classes(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// The `class` attribute value, space separated.
    pub fn to_attribute(&self) -> String {
        self.lock().join(" ")
    }
}

/// A class token must survive [`ClassList::to_attribute`] as one class, so it
/// can be neither empty nor contain whitespace. Theme markers always pass;
/// this guards arbitrary tokens added through the trait.
fn check_marker(marker: &str) -> Result<(), SurfaceError> {
    if marker.is_empty() || marker.chars().any(char::is_whitespace) {
        return Err(SurfaceError::InvalidMarker(marker.to_string()));
    }
    Ok(())
}

impl MarkerSurface for ClassList {
    fn remove_markers(&mut self, markers: &[&str]) -> Result<(), SurfaceError> {
        self.lock().retain(|c| !markers.contains(&c.as_str()));
        Ok(())
    }

    fn add_marker(&mut self, marker: &str) -> Result<(), SurfaceError> {
        check_marker(marker)?;
        let mut classes = self.lock();
        if !classes.iter().any(|c| c == marker) {
            classes.push(marker.to_string());
        }
        Ok(())
    }
}
