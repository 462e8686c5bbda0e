//! Zustand einer Platzierungs-Session.

use glam::Vec3;

use crate::core::{
    PieceId, PiecePool, PieceRole, PlaceableDefinition, PlaceablePiece, SceneNodeId, SlotKind,
    TilingLayout, TilingMetrics, TilingParams,
};
use crate::scene::SceneHost;

/// Lebenszyklus-Phase einer Session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nur das Primary-Bauteil existiert und folgt dem Cursor
    #[default]
    Idle,
    /// Ein Ende folgt der Eingabe, die Kette wird laufend neu gekachelt
    Dragging,
    /// Kette ist fixiert, Endpunkt-Handles sind aktiv
    Placed,
}

/// Eines der beiden Kettenenden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSide {
    /// Ende mit dem Primary-Bauteil
    Primary,
    /// Ende mit der End-Kappe
    Secondary,
}

impl EndpointSide {
    /// Das gegenüberliegende Ende.
    pub fn opposite(self) -> Self {
        match self {
            EndpointSide::Primary => EndpointSide::Secondary,
            EndpointSide::Secondary => EndpointSide::Primary,
        }
    }

    /// Slot-Art des Bauteils an diesem Ende.
    pub fn slot_kind(self) -> SlotKind {
        match self {
            EndpointSide::Primary => SlotKind::Primary,
            EndpointSide::Secondary => SlotKind::Secondary,
        }
    }
}

/// Woher der laufende Drag stammt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum DragOrigin {
    /// Erster Drag per Pointer aus `Idle`
    Pointer,
    /// Nachbearbeitung über den Handle eines Endpunkts
    Handle {
        /// Gezogenes Bauteil
        piece: PieceId,
        /// Anker-Oberflächenpunkt vor der Nachbearbeitung
        previous_anchor: Vec3,
        /// Mobil-Oberflächenpunkt vor der Nachbearbeitung
        previous_mobile: Vec3,
        /// Mobiles Ende vor der Nachbearbeitung
        previous_mobile_side: EndpointSide,
    },
}

/// Kollaborateure, die jede Transition benötigt.
pub struct PlacementContext<'a> {
    /// Szenen-Host
    pub host: &'a mut dyn SceneHost,
    /// Instanz-Pool
    pub pool: &'a mut PiecePool,
}

/// Eine Platzierungs-Kette mit ihren Bauteilen, partitioniert nach Rolle.
#[derive(Debug)]
pub struct PlacementSession {
    pub(super) definition: PlaceableDefinition,
    pub(super) params: TilingParams,
    pub(super) chain_root: SceneNodeId,
    pub(super) state: SessionState,
    /// Oberflächenpunkt des Anker-Endes (ohne Unterkanten-Versatz)
    pub(super) anchor_surface: Vec3,
    /// Oberflächenpunkt des mobilen Endes (ohne Unterkanten-Versatz)
    pub(super) mobile_surface: Vec3,
    pub(super) mobile_side: EndpointSide,
    pub(super) primary: PlaceablePiece,
    pub(super) secondary: Option<PlaceablePiece>,
    pub(super) tertiary: Vec<PlaceablePiece>,
    pub(super) filler: Vec<PlaceablePiece>,
    pub(super) drag_origin: Option<DragOrigin>,
    /// Wiederverwendeter Puffer der letzten Kachelung
    pub(super) layout: TilingLayout,
}

/// Eine abgeschlossene Kette, deren Bauteile nicht mehr von der Session verwaltet werden.
#[derive(Debug)]
pub struct PlacedChain {
    /// Name der Definition
    pub definition: String,
    /// Alle Bauteile (Primary, Secondary, Tertiary…, Filler…)
    pub pieces: Vec<PlaceablePiece>,
}

impl PlacementSession {
    /// Erstellt eine Session in `Idle` um ein vorhandenes Primary-Bauteil.
    pub fn new(
        definition: PlaceableDefinition,
        primary: PlaceablePiece,
        chain_root: SceneNodeId,
        params: TilingParams,
    ) -> Self {
        Self {
            definition,
            params,
            chain_root,
            state: SessionState::Idle,
            anchor_surface: primary.position(),
            mobile_surface: primary.position(),
            mobile_side: EndpointSide::Secondary,
            primary,
            secondary: None,
            tertiary: Vec::new(),
            filler: Vec::new(),
            drag_origin: None,
            layout: TilingLayout::default(),
        }
    }

    /// Aktuelle Phase.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Definition der Kette.
    pub fn definition(&self) -> &PlaceableDefinition {
        &self.definition
    }

    /// Oberflächenpunkt des Ankers.
    pub fn anchor_position(&self) -> Vec3 {
        self.anchor_surface
    }

    /// Oberflächenpunkt des mobilen Endes.
    pub fn mobile_position(&self) -> Vec3 {
        self.mobile_surface
    }

    /// Welches Ende gerade (bzw. zuletzt) der Eingabe folgt.
    pub fn mobile_side(&self) -> EndpointSide {
        self.mobile_side
    }

    /// Letztes Kachelungs-Ergebnis.
    pub fn layout(&self) -> &TilingLayout {
        &self.layout
    }

    /// Bauteil an einem Ende (Secondary existiert erst ab dem ersten Drag).
    pub fn endpoint(&self, side: EndpointSide) -> Option<&PlaceablePiece> {
        match side {
            EndpointSide::Primary => Some(&self.primary),
            EndpointSide::Secondary => self.secondary.as_ref(),
        }
    }

    pub(super) fn endpoint_mut(&mut self, side: EndpointSide) -> Option<&mut PlaceablePiece> {
        match side {
            EndpointSide::Primary => Some(&mut self.primary),
            EndpointSide::Secondary => self.secondary.as_mut(),
        }
    }

    /// Ende, zu dem ein Bauteil gehört.
    pub fn side_of(&self, piece: PieceId) -> Option<EndpointSide> {
        if self.primary.id() == piece {
            Some(EndpointSide::Primary)
        } else if self.secondary.as_ref().is_some_and(|s| s.id() == piece) {
            Some(EndpointSide::Secondary)
        } else {
            None
        }
    }

    /// Tertiary-Bauteile in Reihenfolge ab Anker.
    pub fn tertiary(&self) -> &[PlaceablePiece] {
        &self.tertiary
    }

    /// Filler-Bauteile.
    pub fn filler(&self) -> &[PlaceablePiece] {
        &self.filler
    }

    /// Alle Bauteile der Kette.
    pub fn pieces(&self) -> impl Iterator<Item = &PlaceablePiece> {
        std::iter::once(&self.primary)
            .chain(self.secondary.iter())
            .chain(self.tertiary.iter())
            .chain(self.filler.iter())
    }

    /// Sucht ein Bauteil über seine Rolle.
    pub fn piece(&self, role: PieceRole) -> Option<&PlaceablePiece> {
        match role {
            PieceRole::Primary => Some(&self.primary),
            PieceRole::Secondary => self.secondary.as_ref(),
            PieceRole::Tertiary(i) => self.tertiary.get(i),
            PieceRole::Filler(i) => self.filler.get(i),
        }
    }

    /// Oberflächenpunkt eines Endes, unabhängig davon, welches gerade mobil ist.
    pub fn surface_of(&self, side: EndpointSide) -> Vec3 {
        if side == self.mobile_side {
            self.mobile_surface
        } else {
            self.anchor_surface
        }
    }

    /// Maße für die Kachelung mit der aktuellen Anker/Mobil-Zuordnung.
    pub(super) fn tiling_metrics(&self) -> TilingMetrics {
        let def = &self.definition;
        TilingMetrics {
            primary_x_size: def.primary.metrics.x_size,
            anchor: def.slot(self.mobile_side.opposite().slot_kind()).metrics,
            mobile: def.slot(self.mobile_side.slot_kind()).metrics,
            tertiary: def.tertiary.metrics,
            filler: def.filler.metrics,
        }
    }
}
