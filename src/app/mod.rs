//! Application-Layer: Router, Controller, Session und Events.

pub mod controller;
pub mod event_log;
pub mod events;
pub mod router;
/// Platzierungs-Session (Zustandsmaschine einer Kette)
pub mod session;

pub use controller::PlacementController;
pub use event_log::{EventLog, LoggedEvent};
pub use events::{
    EndpointDragListener, PlacementEvent, PointerEventKind, PointerListener, PointerSample,
};
pub use router::{PointerInputRouter, PointerInputRouterBuilder};
pub use session::{EndpointSide, PlacedChain, PlacementContext, PlacementSession, SessionState};
