//! Szenen-Anbindung: Instanziierung, Parenting, Transform und Darstellung.
//!
//! Der eigentliche Editor-Host (Rendering, Asset-Layer) implementiert
//! `SceneHost`. `HeadlessScene` ist eine In-Memory-Implementierung für Tests,
//! Benchmarks und den Replay-Modus der Binary.

mod headless;

pub use headless::{HeadlessScene, SceneObject};

use glam::{Quat, Vec3};

use crate::core::{PieceId, PrototypeKey, SceneNodeId};

/// Schnittstelle zum Szenen-Host.
///
/// Alle Aufrufe sind synchron und werden innerhalb eines Pointer-Events ausgeführt.
pub trait SceneHost {
    /// Erzeugt eine neue Instanz aus einem Prototyp.
    fn instantiate(&mut self, prototype: &PrototypeKey) -> PieceId;

    /// Zerstört eine Instanz endgültig.
    fn destroy(&mut self, id: PieceId);

    /// Aktiviert oder deaktiviert eine Instanz.
    fn set_active(&mut self, id: PieceId, active: bool);

    /// Hängt eine Instanz unter einen Szenen-Knoten.
    fn set_parent(&mut self, id: PieceId, parent: SceneNodeId);

    /// Überträgt Position und Rotation.
    fn set_transform(&mut self, id: PieceId, position: Vec3, rotation: Quat);

    /// Schaltet zwischen Vorschau- und Platziert-Darstellung um.
    fn apply_presentation(&mut self, id: PieceId, placed: bool);
}
