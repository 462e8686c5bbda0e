//! Zentrale Konfiguration für das Linien-Platzierungswerkzeug.
//!
//! `PlacementOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::core::{ConfigurationError, SceneNodeId, TilingParams};

// ── Kachelung ───────────────────────────────────────────────────────

/// Minimale planare Distanz Anker → Mobil, darunter wird die Kette kollabiert.
pub const MIN_DRAG_DISTANCE: f32 = 0.01;
/// Yaw-Korrektur nach der Blickrotation (Grad). Bauteile sind entlang lokal +X modelliert.
pub const LOOK_CORRECTION_YAW_DEG: f32 = -90.0;

// ── Fläche ──────────────────────────────────────────────────────────

/// Höhe der horizontalen Platzierungsfläche.
pub const SURFACE_HEIGHT: f32 = 0.0;

// ── Pool ────────────────────────────────────────────────────────────

/// Vorgewärmte End-Kappen.
pub const PREWARM_SECONDARY: usize = 1;
/// Vorgewärmte Tertiary-Segmente.
pub const PREWARM_TERTIARY: usize = 8;
/// Vorgewärmte Filler-Segmente.
pub const PREWARM_FILLER: usize = 8;

// ── Szene ───────────────────────────────────────────────────────────

/// Standard-Knoten, unter dem die Bauteile einer Kette hängen.
pub const CHAIN_ROOT_NODE: u64 = 1;
/// Standard-Halte-Knoten für freie Pool-Instanzen.
pub const HOLDING_AREA_NODE: u64 = 0;

/// Verhalten bei Abbruch eines laufenden Drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragCancelPolicy {
    /// Abbruch wird ignoriert, jeder Drag endet in `Placed`
    #[default]
    Disabled,
    /// Neuer Drag → zurück nach `Idle`, Nachbearbeitung → vorherige Endpunkte
    Revert,
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `bridge_line_placer.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementOptions {
    // ── Kachelung ───────────────────────────────────────────────
    /// Minimale planare Drag-Distanz
    pub min_drag_distance: f32,
    /// Yaw-Korrektur nach der Blickrotation in Grad
    pub look_correction_yaw_deg: f32,

    // ── Fläche ──────────────────────────────────────────────────
    /// Höhe der Platzierungsfläche
    pub surface_height: f32,

    // ── Pool ────────────────────────────────────────────────────
    /// Vorgewärmte End-Kappen
    #[serde(default = "default_prewarm_secondary")]
    pub prewarm_secondary: usize,
    /// Vorgewärmte Tertiary-Segmente
    #[serde(default = "default_prewarm_tertiary")]
    pub prewarm_tertiary: usize,
    /// Vorgewärmte Filler-Segmente
    #[serde(default = "default_prewarm_filler")]
    pub prewarm_filler: usize,

    // ── Szene ───────────────────────────────────────────────────
    /// Knoten, unter dem aktive Bauteile hängen
    #[serde(default = "default_chain_root_node")]
    pub chain_root_node: u64,
    /// Halte-Knoten für freie Pool-Instanzen
    #[serde(default)]
    pub holding_area_node: u64,

    // ── Abbruch ─────────────────────────────────────────────────
    /// Verhalten bei Drag-Abbruch (Escape)
    #[serde(default)]
    pub drag_cancel_policy: DragCancelPolicy,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            min_drag_distance: MIN_DRAG_DISTANCE,
            look_correction_yaw_deg: LOOK_CORRECTION_YAW_DEG,
            surface_height: SURFACE_HEIGHT,
            prewarm_secondary: PREWARM_SECONDARY,
            prewarm_tertiary: PREWARM_TERTIARY,
            prewarm_filler: PREWARM_FILLER,
            chain_root_node: CHAIN_ROOT_NODE,
            holding_area_node: HOLDING_AREA_NODE,
            drag_cancel_policy: DragCancelPolicy::Disabled,
        }
    }
}

/// Serde-Defaults (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_prewarm_secondary() -> usize {
    PREWARM_SECONDARY
}

fn default_prewarm_tertiary() -> usize {
    PREWARM_TERTIARY
}

fn default_prewarm_filler() -> usize {
    PREWARM_FILLER
}

fn default_chain_root_node() -> u64 {
    CHAIN_ROOT_NODE
}

impl PlacementOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("bridge_line_placer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("bridge_line_placer.toml")
    }

    /// Prüft die Werte auf Plausibilität.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.min_drag_distance.is_finite() || self.min_drag_distance <= 0.0 {
            return Err(ConfigurationError::InvalidOption {
                option: "min_drag_distance",
                reason: "muss endlich und > 0 sein",
            });
        }
        if !self.look_correction_yaw_deg.is_finite() {
            return Err(ConfigurationError::InvalidOption {
                option: "look_correction_yaw_deg",
                reason: "muss endlich sein",
            });
        }
        if !self.surface_height.is_finite() {
            return Err(ConfigurationError::InvalidOption {
                option: "surface_height",
                reason: "muss endlich sein",
            });
        }
        if self.chain_root_node == self.holding_area_node {
            return Err(ConfigurationError::InvalidOption {
                option: "holding_area_node",
                reason: "muss sich vom Ketten-Knoten unterscheiden",
            });
        }
        Ok(())
    }

    /// Konstanten für die Kachelung.
    pub fn tiling_params(&self) -> TilingParams {
        TilingParams {
            min_drag_distance: self.min_drag_distance,
            look_correction_yaw: self.look_correction_yaw_deg.to_radians(),
        }
    }

    /// Knoten für aktive Bauteile.
    pub fn chain_root(&self) -> SceneNodeId {
        SceneNodeId(self.chain_root_node)
    }

    /// Halte-Knoten für den Pool.
    pub fn holding_area(&self) -> SceneNodeId {
        SceneNodeId(self.holding_area_node)
    }
}
