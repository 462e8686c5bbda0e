//! Platzierungs-Controller: Listener des Routers und Besitzer aller Kollaborateure.
//!
//! Der Controller hält Szenen-Host, Pool, Optionen und die (einzige) Session.
//! Jedes Pointer- oder Handle-Event geht an die passende Session-Transition
//! und landet samt Ergebnis im `EventLog`.

use glam::Vec3;

use super::session::{EndpointSide, PlacedChain, PlacementContext, PlacementSession, SessionState};
use super::{
    EndpointDragListener, EventLog, PlacementEvent, PointerEventKind, PointerListener,
};
use crate::core::{ConfigurationError, PieceId, PiecePool, PieceRole, PlaceableDefinition};
use crate::scene::SceneHost;
use crate::shared::{DragCancelPolicy, PlacementOptions};

/// Orchestriert Pointer-Events auf die Platzierungs-Session.
pub struct PlacementController<H: SceneHost> {
    host: H,
    pool: PiecePool,
    options: PlacementOptions,
    session: PlacementSession,
    event_log: EventLog,
}

impl<H: SceneHost> PlacementController<H> {
    /// Einmaliger Init-Schritt: validiert Optionen und Definition, wärmt den
    /// Pool vor und erzeugt das Primary-Bauteil der ersten Kette.
    pub fn new(
        mut host: H,
        definition: PlaceableDefinition,
        options: PlacementOptions,
    ) -> Result<Self, ConfigurationError> {
        options.validate()?;
        definition.validate()?;

        let mut pool = PiecePool::new(options.holding_area());
        pool.prewarm(&mut host, &definition.secondary.prototype, options.prewarm_secondary);
        pool.prewarm(&mut host, &definition.tertiary.prototype, options.prewarm_tertiary);
        pool.prewarm(&mut host, &definition.filler.prototype, options.prewarm_filler);

        let primary = pool.acquire(
            &mut host,
            &definition.primary,
            PieceRole::Primary,
            options.chain_root(),
        );
        log::info!("Controller für '{}' initialisiert", definition.name);
        let session = PlacementSession::new(
            definition,
            primary,
            options.chain_root(),
            options.tiling_params(),
        );

        Ok(Self {
            host,
            pool,
            options,
            session,
            event_log: EventLog::new(),
        })
    }

    /// Aktuelle Session.
    pub fn session(&self) -> &PlacementSession {
        &self.session
    }

    /// Phase der aktuellen Session.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Szenen-Host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Instanz-Pool.
    pub fn pool(&self) -> &PiecePool {
        &self.pool
    }

    /// Aktive Optionen.
    pub fn options(&self) -> &PlacementOptions {
        &self.options
    }

    /// Verarbeitete Events.
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Abbruch-Anforderung (z.B. Escape) für einen laufenden Drag.
    ///
    /// Wirkt nur mit `DragCancelPolicy::Revert`.
    pub fn cancel_drag(&mut self) -> bool {
        match self.options.drag_cancel_policy {
            DragCancelPolicy::Disabled => {
                self.event_log.record(PlacementEvent::CancelRequested, false);
                log::debug!("Abbruch ignoriert: deaktiviert");
                false
            }
            DragCancelPolicy::Revert => {
                self.apply(PlacementEvent::CancelRequested, |session, ctx| {
                    session.cancel(ctx)
                })
            }
        }
    }

    /// Übergibt eine fixierte Kette und startet eine neue Session.
    ///
    /// Das neue Primary-Bauteil steht am Secondary-Ende der abgegebenen Kette,
    /// auch wenn zuletzt das Primary-Ende nachbearbeitet wurde.
    /// Außerhalb von `Placed` passiert nichts.
    pub fn finish_chain(&mut self) -> Option<PlacedChain> {
        if self.session.state() != SessionState::Placed {
            log::debug!("Kette nicht abgeschlossen: Session ist {:?}", self.session.state());
            return None;
        }

        let definition = self.session.definition().clone();
        let start = self.session.surface_of(EndpointSide::Secondary);
        let primary = self.pool.acquire(
            &mut self.host,
            &definition.primary,
            PieceRole::Primary,
            self.options.chain_root(),
        );
        let next = PlacementSession::new(
            definition,
            primary,
            self.options.chain_root(),
            self.options.tiling_params(),
        );
        let previous = std::mem::replace(&mut self.session, next);

        let mut ctx = PlacementContext {
            host: &mut self.host,
            pool: &mut self.pool,
        };
        self.session.hover(&mut ctx, start);

        match previous.into_placed_chain() {
            Ok(chain) => {
                log::info!(
                    "Kette '{}' übergeben ({} Bauteile)",
                    chain.definition,
                    chain.pieces.len()
                );
                Some(chain)
            }
            Err(previous) => {
                log::warn!("Kette in Phase {:?} nicht übergeben", previous.state());
                previous.release_all(&mut ctx);
                None
            }
        }
    }

    /// Gibt alle Bauteile frei, zerstört alle Pool-Instanzen und liefert den Host zurück.
    pub fn teardown(self) -> H {
        let Self {
            mut host,
            mut pool,
            session,
            ..
        } = self;
        session.release_all(&mut PlacementContext {
            host: &mut host,
            pool: &mut pool,
        });
        pool.teardown(&mut host);
        host
    }

    fn apply(
        &mut self,
        event: PlacementEvent,
        transition: impl FnOnce(&mut PlacementSession, &mut PlacementContext<'_>) -> bool,
    ) -> bool {
        let mut ctx = PlacementContext {
            host: &mut self.host,
            pool: &mut self.pool,
        };
        let applied = transition(&mut self.session, &mut ctx);
        self.event_log.record(event, applied);
        if !applied {
            log::debug!(
                "{:?} ohne Wirkung in Phase {:?}",
                event,
                self.session.state()
            );
        }
        applied
    }
}

impl<H: SceneHost> PointerListener for PlacementController<H> {
    fn on_down(&mut self, position: Vec3) {
        let event = PlacementEvent::Pointer {
            kind: PointerEventKind::Down,
            position,
        };
        self.apply(event, |session, ctx| session.begin(ctx, position));
    }

    fn on_up(&mut self, position: Vec3) {
        let event = PlacementEvent::Pointer {
            kind: PointerEventKind::Up,
            position,
        };
        self.apply(event, |session, ctx| session.finish(ctx, position));
    }

    fn on_drag(&mut self, position: Vec3) {
        let event = PlacementEvent::Pointer {
            kind: PointerEventKind::Drag,
            position,
        };
        self.apply(event, |session, ctx| session.update(ctx, position));
    }

    fn on_hover(&mut self, position: Vec3) {
        let event = PlacementEvent::Pointer {
            kind: PointerEventKind::Hover,
            position,
        };
        self.apply(event, |session, ctx| session.hover(ctx, position));
    }
}

impl<H: SceneHost> EndpointDragListener for PlacementController<H> {
    fn on_drag_start(&mut self, piece: PieceId, position: Vec3) {
        let event = PlacementEvent::Handle {
            kind: PointerEventKind::Down,
            piece,
            position,
        };
        self.apply(event, |session, ctx| session.begin_reedit(ctx, piece, position));
    }

    fn on_drag_move(&mut self, piece: PieceId, position: Vec3) {
        let event = PlacementEvent::Handle {
            kind: PointerEventKind::Drag,
            piece,
            position,
        };
        self.apply(event, |session, ctx| session.update_reedit(ctx, piece, position));
    }

    fn on_drag_end(&mut self, piece: PieceId, position: Vec3) {
        let event = PlacementEvent::Handle {
            kind: PointerEventKind::Up,
            piece,
            position,
        };
        self.apply(event, |session, ctx| session.finish_reedit(ctx, piece, position));
    }
}

#[cfg(test)]
mod tests;
