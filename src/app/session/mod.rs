//! Platzierungs-Session: Zustandsmaschine einer einzelnen Kette.
//!
//! Die Session besitzt alle Bauteile ihrer Kette (Primary, Secondary,
//! Tertiary, Filler) und wechselt zwischen `Idle`, `Dragging` und `Placed`.
//! Szenen-Host und Pool werden pro Transition als `PlacementContext`
//! übergeben.

mod lifecycle;
mod retile;
mod state;

pub use state::{EndpointSide, PlacedChain, PlacementContext, PlacementSession, SessionState};
