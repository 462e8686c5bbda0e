//! Bridge Line Placer Library.
//! Platzierung linearer Bauteil-Ketten (Brücken, Zäune, Leitungen) im Level-Editor,
//! als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod scene;
pub mod shared;

pub use app::{
    EndpointDragListener, EndpointSide, EventLog, LoggedEvent, PlacedChain, PlacementController,
    PlacementEvent, PlacementSession, PointerEventKind, PointerInputRouter,
    PointerInputRouterBuilder, PointerListener, PointerSample, SessionState,
};
pub use core::{
    compute_tiling, ConfigurationError, HorizontalSurface, PieceId, PieceMetrics, PiecePool,
    PieceRole, PieceSlot, PlaceableCatalog, PlaceableDefinition, PlaceablePiece, PointerRay,
    PrototypeKey, SurfaceProjector, TilingLayout,
};
pub use scene::{HeadlessScene, SceneHost};
pub use shared::{DragCancelPolicy, PlacementOptions};
