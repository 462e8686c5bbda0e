//! Lifecycle-Transitionen der Session (Idle → Dragging → Placed → Nachbearbeitung).
//!
//! Jede Transition gibt `true` zurück, wenn sie angewendet wurde. Events, die
//! in der aktuellen Phase keine Bedeutung haben, werden ignoriert.

use glam::Vec3;

use super::state::{
    DragOrigin, EndpointSide, PlacedChain, PlacementContext, PlacementSession, SessionState,
};
use crate::core::{PieceId, PieceRole, PlaceablePiece, TilingLayout};

impl PlacementSession {
    /// Down-Event: startet aus `Idle` einen Drag mit dem Primary als Anker.
    pub fn begin(&mut self, ctx: &mut PlacementContext<'_>, position: Vec3) -> bool {
        if self.state != SessionState::Idle {
            log::debug!("Down ignoriert: Session ist {:?}", self.state);
            return false;
        }

        self.anchor_surface = position;
        self.mobile_surface = position;
        self.mobile_side = EndpointSide::Secondary;
        if self.secondary.is_none() {
            let secondary = ctx.pool.acquire(
                ctx.host,
                &self.definition.secondary,
                PieceRole::Secondary,
                self.chain_root,
            );
            self.secondary = Some(secondary);
        }
        self.drag_origin = Some(DragOrigin::Pointer);
        self.state = SessionState::Dragging;
        self.retile(ctx);

        log::info!(
            "Platzierung '{}' gestartet bei ({:.2}, {:.2})",
            self.definition.name,
            position.x,
            position.z
        );
        true
    }

    /// Hover-Event: in `Idle` folgt das Primary dem Cursor, beim Pointer-Drag
    /// wird neu gekachelt.
    pub fn hover(&mut self, ctx: &mut PlacementContext<'_>, position: Vec3) -> bool {
        match self.state {
            SessionState::Idle => {
                self.anchor_surface = position;
                self.mobile_surface = position;
                let offset = self.definition.primary.metrics.bottom_y_offset;
                self.primary
                    .set_position(ctx.host, position + Vec3::Y * offset);
                true
            }
            SessionState::Dragging => self.update(ctx, position),
            SessionState::Placed => false,
        }
    }

    /// Drag-Event: mobiles Ende folgt dem Pointer.
    pub fn update(&mut self, ctx: &mut PlacementContext<'_>, position: Vec3) -> bool {
        if !self.is_pointer_drag() {
            return false;
        }
        self.mobile_surface = position;
        self.retile(ctx);
        true
    }

    /// Up-Event: beendet den Pointer-Drag und fixiert die Kette.
    pub fn finish(&mut self, ctx: &mut PlacementContext<'_>, position: Vec3) -> bool {
        if !self.is_pointer_drag() {
            log::debug!("Up ignoriert: kein Pointer-Drag aktiv");
            return false;
        }
        self.mobile_surface = position;
        self.retile(ctx);
        self.settle(ctx);
        true
    }

    /// Handle-Start: ein fixierter Endpunkt wird zum mobilen Ende, das
    /// gegenüberliegende zum Anker.
    pub fn begin_reedit(
        &mut self,
        ctx: &mut PlacementContext<'_>,
        piece: PieceId,
        position: Vec3,
    ) -> bool {
        if self.state != SessionState::Placed {
            log::debug!("Handle-Start ignoriert: Session ist {:?}", self.state);
            return false;
        }
        let Some(side) = self.side_of(piece) else {
            log::debug!("Handle-Start ignoriert: {} ist kein Endpunkt", piece);
            return false;
        };
        if !self.endpoint(side).is_some_and(PlaceablePiece::has_enabled_handle) {
            log::debug!("Handle-Start ignoriert: Handle von {} ist inaktiv", piece);
            return false;
        }

        let origin = DragOrigin::Handle {
            piece,
            previous_anchor: self.anchor_surface,
            previous_mobile: self.mobile_surface,
            previous_mobile_side: self.mobile_side,
        };
        let anchor = self.surface_of(side.opposite());
        self.mobile_side = side;
        self.anchor_surface = anchor;
        self.mobile_surface = position;
        self.drag_origin = Some(origin);
        self.state = SessionState::Dragging;

        self.mark_placed(ctx, false);
        self.retile(ctx);
        log::info!("Nachbearbeitung: Ende {:?} wird gezogen", side);
        true
    }

    /// Handle-Bewegung des gerade gezogenen Endpunkts.
    pub fn update_reedit(
        &mut self,
        ctx: &mut PlacementContext<'_>,
        piece: PieceId,
        position: Vec3,
    ) -> bool {
        if !self.is_handle_drag_of(piece) {
            return false;
        }
        self.mobile_surface = position;
        self.retile(ctx);
        true
    }

    /// Handle-Ende: fixiert die nachbearbeitete Kette.
    pub fn finish_reedit(
        &mut self,
        ctx: &mut PlacementContext<'_>,
        piece: PieceId,
        position: Vec3,
    ) -> bool {
        if !self.is_handle_drag_of(piece) {
            log::debug!("Handle-Ende ignoriert: {} wird nicht gezogen", piece);
            return false;
        }
        self.mobile_surface = position;
        self.retile(ctx);
        self.settle(ctx);
        true
    }

    /// Bricht einen laufenden Drag ab.
    ///
    /// Pointer-Drag → zurück nach `Idle` (End-Kappe und Zwischensegmente
    /// gehen in den Pool). Nachbearbeitung → vorherige Endpunkte, `Placed`.
    pub fn cancel(&mut self, ctx: &mut PlacementContext<'_>) -> bool {
        if self.state != SessionState::Dragging {
            return false;
        }
        match self.drag_origin.take() {
            Some(DragOrigin::Pointer) | None => {
                if let Some(secondary) = self.secondary.take() {
                    ctx.pool.release(ctx.host, secondary);
                }
                for piece in self.tertiary.drain(..).chain(self.filler.drain(..)) {
                    ctx.pool.release(ctx.host, piece);
                }
                self.mobile_surface = self.anchor_surface;
                self.mobile_side = EndpointSide::Secondary;
                self.layout = TilingLayout::default();
                self.state = SessionState::Idle;
                log::info!("Platzierung abgebrochen");
            }
            Some(DragOrigin::Handle {
                previous_anchor,
                previous_mobile,
                previous_mobile_side,
                ..
            }) => {
                self.anchor_surface = previous_anchor;
                self.mobile_surface = previous_mobile;
                self.mobile_side = previous_mobile_side;
                self.retile(ctx);
                self.settle(ctx);
                log::info!("Nachbearbeitung abgebrochen");
            }
        }
        true
    }

    /// Gibt alle Bauteile an den Pool zurück.
    pub fn release_all(self, ctx: &mut PlacementContext<'_>) {
        for piece in self.into_pieces() {
            ctx.pool.release(ctx.host, piece);
        }
    }

    /// Übergibt eine fixierte Kette; in jeder anderen Phase kommt die Session zurück.
    pub fn into_placed_chain(self) -> Result<PlacedChain, Self> {
        if self.state != SessionState::Placed {
            return Err(self);
        }
        let definition = self.definition.name.clone();
        Ok(PlacedChain {
            definition,
            pieces: self.into_pieces(),
        })
    }

    fn into_pieces(self) -> Vec<PlaceablePiece> {
        let mut pieces = Vec::with_capacity(2 + self.tertiary.len() + self.filler.len());
        pieces.push(self.primary);
        pieces.extend(self.secondary);
        pieces.extend(self.tertiary);
        pieces.extend(self.filler);
        pieces
    }

    /// Übergang nach `Placed`: degenerierte Kette kollabiert, alles wird platziert.
    fn settle(&mut self, ctx: &mut PlacementContext<'_>) {
        if self.layout.is_degenerate() {
            self.mobile_surface = self.anchor_surface;
        }
        self.mark_placed(ctx, true);
        self.state = SessionState::Placed;
        self.drag_origin = None;
        log::info!(
            "Kette '{}' platziert: {} Tertiary, {} Filler",
            self.definition.name,
            self.tertiary.len(),
            self.filler.len()
        );
    }

    fn is_pointer_drag(&self) -> bool {
        self.state == SessionState::Dragging
            && matches!(self.drag_origin, Some(DragOrigin::Pointer))
    }

    fn is_handle_drag_of(&self, piece: PieceId) -> bool {
        self.state == SessionState::Dragging
            && matches!(self.drag_origin, Some(DragOrigin::Handle { piece: p, .. }) if p == piece)
    }
}
