//! In-Memory-Szene ohne Rendering.

use glam::{Quat, Vec3};
use indexmap::IndexMap;

use super::SceneHost;
use crate::core::{PieceId, PrototypeKey, SceneNodeId};

/// Zustand einer Instanz in der Headless-Szene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Prototyp der Instanz
    pub prototype: PrototypeKey,
    /// Aktiv (sichtbar) oder im Pool geparkt
    pub active: bool,
    /// Aktueller Eltern-Knoten
    pub parent: Option<SceneNodeId>,
    /// Welt-Position
    pub position: Vec3,
    /// Welt-Rotation
    pub rotation: Quat,
    /// Platziert-Darstellung aktiv
    pub placed: bool,
}

/// Headless-Implementierung von `SceneHost`.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    objects: IndexMap<PieceId, SceneObject>,
    next_id: u64,
    instantiated: usize,
    destroyed: usize,
}

impl HeadlessScene {
    /// Erstellt eine leere Szene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gibt eine lebende Instanz zurück.
    pub fn object(&self, id: PieceId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Iteriert über alle lebenden Instanzen in Erzeugungs-Reihenfolge.
    pub fn objects(&self) -> impl Iterator<Item = (PieceId, &SceneObject)> {
        self.objects.iter().map(|(id, obj)| (*id, obj))
    }

    /// Anzahl lebender Instanzen.
    pub fn live_count(&self) -> usize {
        self.objects.len()
    }

    /// Anzahl aktiver Instanzen.
    pub fn active_count(&self) -> usize {
        self.objects.values().filter(|o| o.active).count()
    }

    /// Anzahl bisher erzeugter Instanzen.
    pub fn instantiated_count(&self) -> usize {
        self.instantiated
    }

    /// Anzahl bisher zerstörter Instanzen.
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    fn object_mut(&mut self, id: PieceId) -> Option<&mut SceneObject> {
        let obj = self.objects.get_mut(&id);
        if obj.is_none() {
            log::warn!("Headless-Szene: unbekannte Instanz {}", id);
        }
        obj
    }
}

impl SceneHost for HeadlessScene {
    fn instantiate(&mut self, prototype: &PrototypeKey) -> PieceId {
        self.next_id += 1;
        self.instantiated += 1;
        let id = PieceId(self.next_id);
        self.objects.insert(
            id,
            SceneObject {
                prototype: prototype.clone(),
                active: true,
                parent: None,
                position: Vec3::ZERO,
                rotation: Quat::IDENTITY,
                placed: false,
            },
        );
        id
    }

    fn destroy(&mut self, id: PieceId) {
        if self.objects.shift_remove(&id).is_some() {
            self.destroyed += 1;
        } else {
            log::warn!("Headless-Szene: Zerstörung unbekannter Instanz {}", id);
        }
    }

    fn set_active(&mut self, id: PieceId, active: bool) {
        if let Some(obj) = self.object_mut(id) {
            obj.active = active;
        }
    }

    fn set_parent(&mut self, id: PieceId, parent: SceneNodeId) {
        if let Some(obj) = self.object_mut(id) {
            obj.parent = Some(parent);
        }
    }

    fn set_transform(&mut self, id: PieceId, position: Vec3, rotation: Quat) {
        if let Some(obj) = self.object_mut(id) {
            obj.position = position;
            obj.rotation = rotation;
        }
    }

    fn apply_presentation(&mut self, id: PieceId, placed: bool) {
        if let Some(obj) = self.object_mut(id) {
            obj.placed = placed;
        }
    }
}
