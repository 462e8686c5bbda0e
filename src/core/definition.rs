//! Platzierbare Definitionen: vier Bauteil-Slots mit autorisierten Metadaten.
//!
//! Eine `PlaceableDefinition` beschreibt eine Kette (z.B. eine Brücke) über
//! vier Slots: Primary (Anker-Ende), Secondary (End-Kappe), Tertiary
//! (volle Zwischensegmente) und Filler (Rest-Auffüllung).

use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::ConfigurationError;

/// Identität eines Prototyps (Asset), aus dem der Host Instanzen erzeugt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrototypeKey(String);

impl PrototypeKey {
    /// Erstellt einen Schlüssel aus einem Asset-Namen.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Gibt den Asset-Namen zurück.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrototypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Art eines Bauteil-Slots in einer Definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Anker-Bauteil (existiert bereits vor dem ersten Klick)
    Primary,
    /// End-Kappe (mobiles Ende beim ersten Drag)
    Secondary,
    /// Volles, wiederholtes Zwischensegment
    Tertiary,
    /// Teilsegment für die Restdistanz
    Filler,
}

/// Autorisierte Maße eines Bauteils.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieceMetrics {
    /// Ausdehnung entlang der Linie (Welteinheiten)
    pub x_size: f32,
    /// Versatz der Unterkante, damit das Bauteil auf der Fläche aufliegt
    #[serde(default)]
    pub bottom_y_offset: f32,
    /// Yaw-Korrektur in Grad, nach der Blickrotation angewendet
    #[serde(default)]
    pub yaw_offset_deg: f32,
}

impl PieceMetrics {
    /// Erstellt Maße ohne Versatz.
    pub fn new(x_size: f32) -> Self {
        Self {
            x_size,
            bottom_y_offset: 0.0,
            yaw_offset_deg: 0.0,
        }
    }

    /// Setzt den Unterkanten-Versatz.
    pub fn with_bottom_y_offset(mut self, offset: f32) -> Self {
        self.bottom_y_offset = offset;
        self
    }

    /// Setzt die Yaw-Korrektur in Grad.
    pub fn with_yaw_offset_deg(mut self, yaw_deg: f32) -> Self {
        self.yaw_offset_deg = yaw_deg;
        self
    }

    /// Yaw-Korrektur in Radiant.
    pub fn yaw_offset_rad(&self) -> f32 {
        self.yaw_offset_deg.to_radians()
    }
}

/// Ein Slot: Prototyp plus Maße.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceSlot {
    /// Prototyp, aus dem der Host die Instanzen erzeugt
    pub prototype: PrototypeKey,
    /// Autorisierte Maße
    #[serde(flatten)]
    pub metrics: PieceMetrics,
}

impl PieceSlot {
    /// Erstellt einen Slot.
    pub fn new(prototype: impl Into<String>, metrics: PieceMetrics) -> Self {
        Self {
            prototype: PrototypeKey::new(prototype),
            metrics,
        }
    }
}

/// Vollständige Definition einer platzierbaren Kette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceableDefinition {
    /// Anzeigename
    pub name: String,
    /// Anker-Bauteil
    pub primary: PieceSlot,
    /// End-Kappe
    pub secondary: PieceSlot,
    /// Volles Zwischensegment
    pub tertiary: PieceSlot,
    /// Rest-Segment
    pub filler: PieceSlot,
}

impl PlaceableDefinition {
    /// Gibt den Slot für eine Slot-Art zurück.
    pub fn slot(&self, kind: SlotKind) -> &PieceSlot {
        match kind {
            SlotKind::Primary => &self.primary,
            SlotKind::Secondary => &self.secondary,
            SlotKind::Tertiary => &self.tertiary,
            SlotKind::Filler => &self.filler,
        }
    }

    /// Prüft alle Slots auf vollständige, endliche Metadaten.
    ///
    /// Tertiary- und Filler-Größen müssen echt positiv sein, sonst wäre
    /// die Anzahl der Zwischensegmente unbestimmt.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigurationError::UnnamedDefinition);
        }
        for kind in [
            SlotKind::Primary,
            SlotKind::Secondary,
            SlotKind::Tertiary,
            SlotKind::Filler,
        ] {
            let slot = self.slot(kind);
            let invalid = |reason| ConfigurationError::InvalidPieceMetadata {
                definition: self.name.clone(),
                slot: kind,
                reason,
            };
            if slot.prototype.as_str().is_empty() {
                return Err(invalid("Prototyp fehlt"));
            }
            let m = &slot.metrics;
            if !m.x_size.is_finite()
                || !m.bottom_y_offset.is_finite()
                || !m.yaw_offset_deg.is_finite()
            {
                return Err(invalid("nicht-endlicher Wert"));
            }
            let needs_positive = matches!(kind, SlotKind::Tertiary | SlotKind::Filler);
            if needs_positive && m.x_size <= 0.0 {
                return Err(invalid("x_size muss > 0 sein"));
            }
            if m.x_size < 0.0 {
                return Err(invalid("x_size darf nicht negativ sein"));
            }
        }
        Ok(())
    }
}

/// Sammlung von Definitionen, z.B. aus einer TOML-Datei.
///
/// ```toml
/// [[placeable]]
/// name = "Holzbrücke"
/// primary = { prototype = "bridge/ramp", x_size = 1.0 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceableCatalog {
    /// Alle Definitionen in Datei-Reihenfolge
    #[serde(default, rename = "placeable")]
    pub definitions: Vec<PlaceableDefinition>,
}

impl PlaceableCatalog {
    /// Parst einen Katalog aus TOML und validiert jede Definition.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let catalog: Self = toml::from_str(content).context("Katalog-TOML fehlerhaft")?;
        for definition in &catalog.definitions {
            definition.validate()?;
        }
        log::info!("{} Definition(en) geladen", catalog.definitions.len());
        Ok(catalog)
    }

    /// Lädt einen Katalog aus einer TOML-Datei.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Katalog nicht lesbar: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Sucht eine Definition per Name.
    pub fn get(&self, name: &str) -> Result<&PlaceableDefinition, ConfigurationError> {
        self.definitions
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| ConfigurationError::UnknownDefinition(name.to_string()))
    }
}
