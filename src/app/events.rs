//! Pointer-Events und Listener-Schnittstellen.

use glam::Vec3;

use crate::core::{PieceId, PointerRay};

/// Art eines Pointer-Events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Taste gedrückt
    Down,
    /// Taste losgelassen
    Up,
    /// Bewegung mit gedrückter Taste
    Drag,
    /// Bewegung ohne gedrückte Taste
    Hover,
}

/// Rohes Pointer-Sample vom Host (vor der Projektion).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Event-Art
    pub kind: PointerEventKind,
    /// Welt-Strahl durch den Cursor
    pub ray: PointerRay,
}

impl PointerSample {
    /// Erstellt ein Sample.
    pub fn new(kind: PointerEventKind, ray: PointerRay) -> Self {
        Self { kind, ray }
    }
}

/// Listener für projizierte Pointer-Events.
pub trait PointerListener {
    /// Taste gedrückt an `position`.
    fn on_down(&mut self, position: Vec3);
    /// Taste losgelassen an `position`.
    fn on_up(&mut self, position: Vec3);
    /// Drag-Bewegung nach `position`.
    fn on_drag(&mut self, position: Vec3);
    /// Hover-Bewegung nach `position`.
    fn on_hover(&mut self, position: Vec3);
}

/// Listener für Drag-Handles fixierter Endpunkte (Nachbearbeitung).
pub trait EndpointDragListener {
    /// Drag auf dem Handle von `piece` beginnt.
    fn on_drag_start(&mut self, piece: PieceId, position: Vec3);
    /// Handle von `piece` wird nach `position` gezogen.
    fn on_drag_move(&mut self, piece: PieceId, position: Vec3);
    /// Drag auf dem Handle von `piece` endet.
    fn on_drag_end(&mut self, piece: PieceId, position: Vec3);
}

/// Verarbeitetes Event, wie es im `EventLog` landet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementEvent {
    /// Pointer-Event an projizierter Position
    Pointer {
        /// Event-Art
        kind: PointerEventKind,
        /// Position auf der Fläche
        position: Vec3,
    },
    /// Handle-Event eines Endpunkts
    Handle {
        /// Event-Art (Down = Start, Drag = Bewegung, Up = Ende)
        kind: PointerEventKind,
        /// Gezogenes Bauteil
        piece: PieceId,
        /// Position auf der Fläche
        position: Vec3,
    },
    /// Drag-Abbruch angefordert
    CancelRequested,
}
