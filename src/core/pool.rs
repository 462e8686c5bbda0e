//! Objekt-Pool für Bauteil-Instanzen, getrennt nach Prototyp.
//!
//! Freie Instanzen liegen deaktiviert unter einem Halte-Knoten. Der Pool
//! merkt sich für jede selbst erzeugte Instanz den Prototyp; fremde
//! Instanzen werden beim Release sofort zerstört.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::{PieceId, PieceRole, PieceSlot, PlaceablePiece, PrototypeKey, SceneNodeId};
use crate::scene::SceneHost;

/// Was beim Release mit einer Instanz passiert ist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Zurück in den freien Stapel ihres Prototyps
    Pooled,
    /// Unbekannte Instanz, wurde zerstört
    Destroyed,
}

/// Pool freier Instanzen je Prototyp.
#[derive(Debug)]
pub struct PiecePool {
    free: IndexMap<PrototypeKey, Vec<PieceId>>,
    origins: HashMap<PieceId, PrototypeKey>,
    holding_area: SceneNodeId,
}

impl PiecePool {
    /// Erstellt einen leeren Pool mit Halte-Knoten für freie Instanzen.
    pub fn new(holding_area: SceneNodeId) -> Self {
        Self {
            free: IndexMap::new(),
            origins: HashMap::new(),
            holding_area,
        }
    }

    /// Erzeugt `count` inaktive Instanzen auf Vorrat.
    pub fn prewarm(&mut self, host: &mut dyn SceneHost, prototype: &PrototypeKey, count: usize) {
        for _ in 0..count {
            let id = host.instantiate(prototype);
            self.origins.insert(id, prototype.clone());
            self.park(host, id);
            self.free.entry(prototype.clone()).or_default().push(id);
        }
        log::debug!("Pool '{}': {} Instanz(en) vorgewärmt", prototype, count);
    }

    /// Holt eine freie Instanz des Slot-Prototyps oder erzeugt eine neue.
    pub fn acquire(
        &mut self,
        host: &mut dyn SceneHost,
        slot: &PieceSlot,
        role: PieceRole,
        parent: SceneNodeId,
    ) -> PlaceablePiece {
        let reused = self
            .free
            .get_mut(&slot.prototype)
            .and_then(|stack| stack.pop());

        let id = match reused {
            Some(id) => id,
            None => {
                let id = host.instantiate(&slot.prototype);
                self.origins.insert(id, slot.prototype.clone());
                log::trace!("Pool '{}': neue Instanz {}", slot.prototype, id);
                id
            }
        };

        host.set_parent(id, parent);
        host.apply_presentation(id, false);
        host.set_active(id, true);
        PlaceablePiece::new(id, slot, role)
    }

    /// Gibt eine Instanz zurück.
    ///
    /// Bekannte Instanzen werden deaktiviert und geparkt, unbekannte zerstört.
    pub fn release(&mut self, host: &mut dyn SceneHost, piece: PlaceablePiece) -> ReleaseOutcome {
        let id = piece.id();
        let Some(prototype) = self.origins.get(&id) else {
            log::warn!("Pool: unbekannte Instanz {} wird zerstört", id);
            host.destroy(id);
            return ReleaseOutcome::Destroyed;
        };

        let stack = self.free.entry(prototype.clone()).or_default();
        if stack.contains(&id) {
            log::warn!("Pool: Instanz {} ist bereits frei", id);
            return ReleaseOutcome::Pooled;
        }
        stack.push(id);
        self.park(host, id);
        ReleaseOutcome::Pooled
    }

    /// Passt eine Rollen-Liste per Differenz an die Ziel-Anzahl an.
    ///
    /// Überzählige Instanzen werden vom Ende her freigegeben, fehlende
    /// angehängt. Bestehende Instanzen bleiben erhalten und werden vom
    /// Aufrufer neu positioniert.
    pub fn resize_role_list(
        &mut self,
        host: &mut dyn SceneHost,
        list: &mut Vec<PlaceablePiece>,
        target: usize,
        slot: &PieceSlot,
        role: fn(usize) -> PieceRole,
        parent: SceneNodeId,
    ) {
        let current = list.len();
        if target < current {
            for piece in list.drain(target..) {
                self.release(host, piece);
            }
            log::debug!("'{}': {} → {} (verkleinert)", slot.prototype, current, target);
        } else if target > current {
            list.reserve(target - current);
            for index in current..target {
                list.push(self.acquire(host, slot, role(index), parent));
            }
            log::debug!("'{}': {} → {} (vergrößert)", slot.prototype, current, target);
        }
    }

    /// Anzahl freier Instanzen eines Prototyps.
    pub fn free_count(&self, prototype: &PrototypeKey) -> usize {
        self.free.get(prototype).map_or(0, Vec::len)
    }

    /// Hat der Pool diese Instanz erzeugt?
    pub fn is_known(&self, id: PieceId) -> bool {
        self.origins.contains_key(&id)
    }

    /// Zerstört alle freien Instanzen.
    ///
    /// Aktive Instanzen bleiben bekannt und können weiterhin zurückgegeben werden.
    pub fn teardown(&mut self, host: &mut dyn SceneHost) {
        let mut destroyed = 0usize;
        for (_, stack) in self.free.drain(..) {
            for id in stack {
                self.origins.remove(&id);
                host.destroy(id);
                destroyed += 1;
            }
        }
        log::info!("Pool abgebaut: {} Instanz(en) zerstört", destroyed);
    }

    fn park(&self, host: &mut dyn SceneHost, id: PieceId) {
        host.set_active(id, false);
        host.set_parent(id, self.holding_area);
    }
}

#[cfg(test)]
mod tests;
