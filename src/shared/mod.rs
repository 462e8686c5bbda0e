//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die sowohl `app` als auch die Binary nutzen.

pub mod options;

pub use options::{DragCancelPolicy, PlacementOptions};
pub use options::{MIN_DRAG_DISTANCE, SURFACE_HEIGHT};
