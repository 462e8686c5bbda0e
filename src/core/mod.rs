//! Core-Domänentypen: Definitionen, Bauteile, Kachelung, Pool, Fläche.

pub mod definition;
pub mod error;
pub mod piece;
pub mod pool;
pub mod surface;
/// Reine Linien-Kachelung zwischen zwei Endpunkten
pub mod tiling;

pub use definition::{
    PieceMetrics, PieceSlot, PlaceableCatalog, PlaceableDefinition, PrototypeKey, SlotKind,
};
pub use error::ConfigurationError;
pub use piece::{DragHandle, PieceId, PieceRole, PlaceablePiece, SceneNodeId};
pub use pool::{PiecePool, ReleaseOutcome};
pub use surface::{HorizontalSurface, PointerRay, SurfaceProjector};
pub use tiling::{
    compute_tiling, compute_tiling_into, look_along, tiling_counts, PiecePlacement,
    TilingCounts, TilingLayout, TilingMetrics, TilingParams,
};
