//! Platzierbares Bauteil: Instanz-Wrapper mit Rolle, Maßen und Darstellungs-Flag.

use std::fmt;

use glam::{Quat, Vec3};

use super::{PieceMetrics, PiecePool, PieceSlot, PrototypeKey};
use crate::scene::SceneHost;

/// Identität einer Bauteil-Instanz im Host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u64);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identität eines Szenen-Knotens (Eltern für Instanzen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneNodeId(pub u64);

/// Rolle eines Bauteils innerhalb einer Kette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceRole {
    /// Anker-Ende aus dem Primary-Slot
    Primary,
    /// End-Kappe aus dem Secondary-Slot
    Secondary,
    /// Volles Zwischensegment mit Index
    Tertiary(usize),
    /// Rest-Segment mit Index
    Filler(usize),
}

impl PieceRole {
    /// Endpunkte (Primary/Secondary) bekommen einen Drag-Handle, Zwischensegmente nie.
    pub fn is_endpoint(&self) -> bool {
        matches!(self, PieceRole::Primary | PieceRole::Secondary)
    }
}

/// Handle zum nachträglichen Verschieben eines fixierten Endpunkts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragHandle {
    /// Erst nach `Placed` aktiv
    pub enabled: bool,
}

/// Eine aktive Bauteil-Instanz.
///
/// Nicht `Clone`: eine Instanz gehört genau einer Rollen-Position
/// einer Session oder liegt frei im Pool.
#[derive(Debug, PartialEq)]
pub struct PlaceablePiece {
    id: PieceId,
    prototype: PrototypeKey,
    role: PieceRole,
    metrics: PieceMetrics,
    position: Vec3,
    rotation: Quat,
    placed: bool,
    handle: Option<DragHandle>,
}

impl PlaceablePiece {
    pub(crate) fn new(id: PieceId, slot: &PieceSlot, role: PieceRole) -> Self {
        Self {
            id,
            prototype: slot.prototype.clone(),
            role,
            metrics: slot.metrics,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            placed: false,
            handle: role.is_endpoint().then(DragHandle::default),
        }
    }

    /// Übernimmt eine außerhalb des Pools erzeugte Host-Instanz.
    ///
    /// Der Pool kennt solche Instanzen nicht und zerstört sie beim Release.
    /// Für IDs aus dem Pool (frei oder aktiv) gibt es `None`, sonst
    /// existierten zwei Besitzer derselben Instanz.
    pub fn external(
        pool: &PiecePool,
        id: PieceId,
        slot: &PieceSlot,
        role: PieceRole,
    ) -> Option<Self> {
        if pool.is_known(id) {
            log::warn!("Instanz {} gehört dem Pool und kann nicht übernommen werden", id);
            return None;
        }
        Some(Self::new(id, slot, role))
    }

    /// Instanz-ID im Host.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Prototyp, aus dem die Instanz stammt.
    pub fn prototype(&self) -> &PrototypeKey {
        &self.prototype
    }

    /// Rolle in der Kette.
    pub fn role(&self) -> PieceRole {
        self.role
    }

    /// Autorisierte Maße.
    pub fn metrics(&self) -> &PieceMetrics {
        &self.metrics
    }

    /// Aktuelle Welt-Position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Aktuelle Welt-Rotation.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// `true` = platziert, `false` = Vorschau.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Optionaler Drag-Handle (nur Endpunkte).
    pub fn handle(&self) -> Option<&DragHandle> {
        self.handle.as_ref()
    }

    /// Ist ein aktivierter Drag-Handle vorhanden?
    pub fn has_enabled_handle(&self) -> bool {
        self.handle.is_some_and(|h| h.enabled)
    }

    /// Setzt Position und Rotation und überträgt sie an den Host.
    pub fn set_transform(&mut self, host: &mut dyn SceneHost, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
        host.set_transform(self.id, position, rotation);
    }

    /// Setzt nur die Position (Rotation bleibt erhalten).
    pub fn set_position(&mut self, host: &mut dyn SceneHost, position: Vec3) {
        let rotation = self.rotation;
        self.set_transform(host, position, rotation);
    }

    /// Schaltet die Darstellung zwischen Vorschau und platziert um.
    ///
    /// Beim Wechsel auf platziert wird ein vorhandener Handle aktiviert,
    /// beim Wechsel zurück auf Vorschau wieder deaktiviert.
    pub fn set_placed(&mut self, host: &mut dyn SceneHost, placed: bool) {
        self.placed = placed;
        if let Some(handle) = self.handle.as_mut() {
            handle.enabled = placed;
        }
        host.apply_presentation(self.id, placed);
    }
}
