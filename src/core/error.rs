//! Fehlertypen für Setup-Fehler (fatal, werden nie wiederholt).

use thiserror::Error;

use super::SlotKind;

/// Konfigurationsfehler beim Initialisieren der Platzierung.
///
/// Wird ausschließlich beim Setup zurückgegeben, niemals beim Dispatch
/// einzelner Pointer-Samples.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Router wurde ohne registrierten Listener gebaut
    #[error("kein Pointer-Listener registriert")]
    MissingListener,
    /// Bauteil-Metadaten fehlen oder sind ungültig
    #[error("Definition '{definition}': Slot {slot:?} ungültig ({reason})")]
    InvalidPieceMetadata {
        /// Name der betroffenen Definition
        definition: String,
        /// Betroffener Slot
        slot: SlotKind,
        /// Grund
        reason: &'static str,
    },
    /// Definition ohne Namen
    #[error("Definition ohne Namen")]
    UnnamedDefinition,
    /// Katalog enthält keine Definition mit diesem Namen
    #[error("Definition '{0}' nicht im Katalog gefunden")]
    UnknownDefinition(String),
    /// Optionen außerhalb des gültigen Bereichs
    #[error("Option '{option}' ungültig: {reason}")]
    InvalidOption {
        /// Feldname der Option
        option: &'static str,
        /// Grund
        reason: &'static str,
    },
}
