//! Ringpuffer der vom Controller verarbeiteten Events.
//!
//! Jeder Eintrag hält neben dem Event fest, ob die Session es angewendet
//! hat. Ignorierte Events (falsche Phase, fremder Handle) bleiben so für
//! Diagnose und Tests sichtbar.

use std::collections::VecDeque;

use super::PlacementEvent;

/// Ein protokolliertes Event mit Ergebnis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoggedEvent {
    /// Das verarbeitete Event
    pub event: PlacementEvent,
    /// Hat die Session eine Transition ausgeführt?
    pub applied: bool,
}

/// Begrenztes Event-Protokoll; bei voller Kapazität fällt der älteste Eintrag heraus.
#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<LoggedEvent>,
    capacity: usize,
    ignored_total: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl EventLog {
    /// Standard-Kapazität des Controllers
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Erstellt ein leeres Protokoll mit Standard-Kapazität.
    pub fn new() -> Self {
        Self::default()
    }

    /// Erstellt ein leeres Protokoll mit eigener Kapazität (mindestens 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            ignored_total: 0,
        }
    }

    /// Hängt ein Event samt Ergebnis an.
    pub fn record(&mut self, event: PlacementEvent, applied: bool) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        if !applied {
            self.ignored_total += 1;
        }
        self.entries.push_back(LoggedEvent { event, applied });
    }

    /// Anzahl gehaltener Einträge.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Keine Einträge vorhanden?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Einträge vom ältesten zum neuesten.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LoggedEvent> + '_ {
        self.entries.iter()
    }

    /// Jüngster Eintrag.
    pub fn last(&self) -> Option<&LoggedEvent> {
        self.entries.back()
    }

    /// Eintrag an Position `index` (0 = ältester gehaltener).
    pub fn get(&self, index: usize) -> Option<&LoggedEvent> {
        self.entries.get(index)
    }

    /// Ignorierte Events seit Erstellung, auch bereits verdrängte.
    pub fn ignored_count(&self) -> usize {
        self.ignored_total
    }
}
