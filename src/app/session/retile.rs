//! Anwendung der Kachelung auf die Bauteile einer Session.

use glam::{Quat, Vec3};

use super::state::{PlacementContext, PlacementSession};
use crate::core::{compute_tiling_into, PieceRole, PlaceablePiece};
use crate::scene::SceneHost;

impl PlacementSession {
    /// Kachelt die Kette neu und überträgt das Ergebnis auf alle Bauteile.
    ///
    /// Rollen-Listen werden per Differenz angepasst, vorhandene Instanzen
    /// nur neu positioniert.
    pub(super) fn retile(&mut self, ctx: &mut PlacementContext<'_>) {
        let metrics = self.tiling_metrics();
        compute_tiling_into(
            &mut self.layout,
            self.anchor_surface,
            self.mobile_surface,
            &metrics,
            &self.params,
        );

        let def = &self.definition;
        ctx.pool.resize_role_list(
            ctx.host,
            &mut self.tertiary,
            self.layout.tertiary.len(),
            &def.tertiary,
            PieceRole::Tertiary,
            self.chain_root,
        );
        ctx.pool.resize_role_list(
            ctx.host,
            &mut self.filler,
            self.layout.filler.len(),
            &def.filler,
            PieceRole::Filler,
            self.chain_root,
        );

        let mobile_side = self.mobile_side;
        let anchor = (self.layout.anchor_position, self.layout.anchor_rotation);
        let mobile = (self.layout.mobile_position, self.layout.mobile_rotation);
        apply_endpoint(self.endpoint_mut(mobile_side.opposite()), ctx.host, anchor);
        apply_endpoint(self.endpoint_mut(mobile_side), ctx.host, mobile);

        for (piece, placement) in self.tertiary.iter_mut().zip(&self.layout.tertiary) {
            piece.set_transform(ctx.host, placement.position, placement.rotation);
        }
        for (piece, placement) in self.filler.iter_mut().zip(&self.layout.filler) {
            piece.set_transform(ctx.host, placement.position, placement.rotation);
        }

        log::trace!(
            "Kachelung: d = {:.3}, {} Tertiary, {} Filler",
            self.layout.planar_distance,
            self.layout.tertiary.len(),
            self.layout.filler.len()
        );
    }

    /// Schaltet alle Bauteile auf platziert bzw. Vorschau.
    pub(super) fn mark_placed(&mut self, ctx: &mut PlacementContext<'_>, placed: bool) {
        self.primary.set_placed(ctx.host, placed);
        if let Some(secondary) = self.secondary.as_mut() {
            secondary.set_placed(ctx.host, placed);
        }
        for piece in self.tertiary.iter_mut().chain(self.filler.iter_mut()) {
            piece.set_placed(ctx.host, placed);
        }
    }
}

/// Degenerierte Kachelung liefert keine Rotation: bisherige bleibt erhalten.
fn apply_endpoint(
    piece: Option<&mut PlaceablePiece>,
    host: &mut dyn SceneHost,
    (position, rotation): (Vec3, Option<Quat>),
) {
    let Some(piece) = piece else {
        return;
    };
    match rotation {
        Some(rotation) => piece.set_transform(host, position, rotation),
        None => piece.set_position(host, position),
    }
}
