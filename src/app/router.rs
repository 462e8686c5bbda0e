//! Pointer-Router: projiziert Samples und verteilt sie an genau einen Listener.
//!
//! Der Listener wird beim Bau explizit injiziert. Fehlt er, schlägt
//! `build()` mit `ConfigurationError::MissingListener` fehl; beim Dispatch
//! kann dieser Fehler nicht mehr auftreten.

use glam::Vec3;

use super::{EndpointDragListener, PointerEventKind, PointerListener, PointerSample};
use crate::core::{ConfigurationError, HorizontalSurface, PieceId, SurfaceProjector};

/// Verteilt projizierte Pointer-Samples an den registrierten Listener.
pub struct PointerInputRouter<L, S = HorizontalSurface> {
    surface: S,
    listener: L,
    dispatched: u64,
    dropped: u64,
}

/// Builder für `PointerInputRouter`.
pub struct PointerInputRouterBuilder<L, S = HorizontalSurface> {
    surface: S,
    listener: Option<L>,
}

impl<L, S: SurfaceProjector> PointerInputRouterBuilder<L, S> {
    /// Startet einen Builder mit der Platzierungsfläche.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            listener: None,
        }
    }

    /// Registriert den (einzigen) Listener.
    pub fn listener(mut self, listener: L) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Baut den Router. Ohne Listener: fataler Konfigurationsfehler.
    pub fn build(self) -> Result<PointerInputRouter<L, S>, ConfigurationError> {
        let listener = self.listener.ok_or(ConfigurationError::MissingListener)?;
        Ok(PointerInputRouter {
            surface: self.surface,
            listener,
            dispatched: 0,
            dropped: 0,
        })
    }
}

impl<L: PointerListener, S: SurfaceProjector> PointerInputRouter<L, S> {
    /// Verarbeitet ein Pointer-Sample.
    ///
    /// Gibt `true` zurück, wenn das Sample an den Listener ging. Ohne
    /// Schnittpunkt mit der Fläche wird das Sample verworfen.
    pub fn dispatch(&mut self, sample: PointerSample) -> bool {
        let Some(position) = self.project(&sample) else {
            return false;
        };
        match sample.kind {
            PointerEventKind::Down => self.listener.on_down(position),
            PointerEventKind::Up => self.listener.on_up(position),
            PointerEventKind::Drag => self.listener.on_drag(position),
            PointerEventKind::Hover => self.listener.on_hover(position),
        }
        true
    }
}

impl<L: EndpointDragListener, S: SurfaceProjector> PointerInputRouter<L, S> {
    /// Verarbeitet ein Sample auf dem Drag-Handle eines Endpunkts.
    ///
    /// Down startet, Drag/Hover bewegt, Up beendet die Nachbearbeitung.
    pub fn dispatch_handle(&mut self, piece: PieceId, sample: PointerSample) -> bool {
        let Some(position) = self.project(&sample) else {
            return false;
        };
        match sample.kind {
            PointerEventKind::Down => self.listener.on_drag_start(piece, position),
            PointerEventKind::Drag | PointerEventKind::Hover => {
                self.listener.on_drag_move(piece, position)
            }
            PointerEventKind::Up => self.listener.on_drag_end(piece, position),
        }
        true
    }
}

impl<L, S: SurfaceProjector> PointerInputRouter<L, S> {
    fn project(&mut self, sample: &PointerSample) -> Option<Vec3> {
        match self.surface.project(&sample.ray) {
            Some(position) => {
                self.dispatched += 1;
                Some(position)
            }
            None => {
                self.dropped += 1;
                log::trace!("Pointer-Sample {:?} ohne Schnittpunkt verworfen", sample.kind);
                None
            }
        }
    }

    /// Registrierter Listener.
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Registrierter Listener (mutable).
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Gibt den Listener zurück und verwirft den Router.
    pub fn into_listener(self) -> L {
        self.listener
    }

    /// Anzahl zugestellter Samples.
    pub fn dispatched_count(&self) -> u64 {
        self.dispatched
    }

    /// Anzahl verworfener Samples (kein Schnittpunkt).
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }
}
