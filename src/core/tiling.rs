//! Linien-Kachelung: berechnet Anzahl, Position und Ausrichtung der
//! Zwischensegmente zwischen zwei Endpunkten.
//!
//! Reine Funktion ohne Seiteneffekte. Läuft bei jedem Pointer-Sample, daher
//! gibt es mit `compute_tiling_into` eine Variante, die die Puffer eines
//! bestehenden Layouts wiederverwendet.

use glam::{Quat, Vec3};

use super::PieceMetrics;

/// Toleranz für floor/ceil, damit exakte Vielfache nicht durch
/// Float-Rauschen ein Segment verlieren oder gewinnen.
pub const TILING_EPSILON: f32 = 1e-4;

/// Maße aller an der Kachelung beteiligten Bauteile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilingMetrics {
    /// Gesamtbreite der beiden Endpunkt-Hälften
    pub primary_x_size: f32,
    /// Versätze des Anker-Bauteils
    pub anchor: PieceMetrics,
    /// Versätze des mobilen Bauteils
    pub mobile: PieceMetrics,
    /// Volles Zwischensegment
    pub tertiary: PieceMetrics,
    /// Rest-Segment
    pub filler: PieceMetrics,
}

/// Konstanten der Kachelung (aus `PlacementOptions`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilingParams {
    /// Unterhalb dieser planaren Distanz wird die Kette kollabiert
    pub min_drag_distance: f32,
    /// Yaw-Korrektur nach der Blickrotation (Radiant)
    pub look_correction_yaw: f32,
}

/// Position und Rotation eines Bauteils.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiecePlacement {
    /// Welt-Position inkl. Unterkanten-Versatz
    pub position: Vec3,
    /// Welt-Rotation
    pub rotation: Quat,
}

/// Zwischenwerte der Anzahl-Berechnung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilingCounts {
    /// Zu füllende Länge zwischen den Innenkanten der Endpunkte
    pub area_to_fill: f32,
    /// Anzahl voller Zwischensegmente
    pub tertiary_count: usize,
    /// Von Tertiary-Segmenten belegte Länge
    pub used_by_tertiary: f32,
    /// Verbleibende Länge für Filler
    pub filler_area: f32,
    /// Anzahl Filler (immer gerade)
    pub filler_count: usize,
}

/// Ergebnis einer Kachelung.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TilingLayout {
    /// Normalisierte planare Richtung Anker → Mobil (`None` = degeneriert)
    pub forward: Option<Vec3>,
    /// Planare Distanz zwischen Anker und Mobil
    pub planar_distance: f32,
    /// Position des Anker-Bauteils
    pub anchor_position: Vec3,
    /// Position des mobilen Bauteils (degeneriert: gleich Anker)
    pub mobile_position: Vec3,
    /// Rotation des Ankers (`None` = bisherige Rotation beibehalten)
    pub anchor_rotation: Option<Quat>,
    /// Rotation des mobilen Endes (`None` = bisherige Rotation beibehalten)
    pub mobile_rotation: Option<Quat>,
    /// Tertiary-Platzierungen in Reihenfolge ab Anker
    pub tertiary: Vec<PiecePlacement>,
    /// Filler-Platzierungen (erste Hälfte vor, zweite Hälfte hinter dem Tertiary-Block)
    pub filler: Vec<PiecePlacement>,
}

impl TilingLayout {
    /// Ist die Kette kollabiert (Anker ≈ Mobil)?
    pub fn is_degenerate(&self) -> bool {
        self.forward.is_none()
    }

    /// Anzahl Tertiary-Segmente.
    pub fn tertiary_count(&self) -> usize {
        self.tertiary.len()
    }

    /// Anzahl Filler-Segmente.
    pub fn filler_count(&self) -> usize {
        self.filler.len()
    }
}

/// Projiziert einen Vektor auf die horizontale Ebene (Y = 0).
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Blickrotation entlang `direction` (lokal +Z → direction) plus Yaw-Korrektur.
///
/// Die Korrektur gleicht Bauteile aus, die entlang einer anderen lokalen
/// Achse modelliert wurden.
pub fn look_along(direction: Vec3, correction_yaw: f32) -> Quat {
    let base = Quat::from_rotation_y(direction.x.atan2(direction.z));
    base * Quat::from_rotation_y(correction_yaw)
}

/// Berechnet die Segment-Anzahlen für eine planare Distanz.
///
/// Segmentgrößen ≤ 0 oder nicht endlich (von `PlaceableDefinition::validate`
/// abgelehnt) ergeben für diese Rolle keine Segmente.
pub fn tiling_counts(
    planar_distance: f32,
    primary_x_size: f32,
    tertiary_x_size: f32,
    filler_x_size: f32,
) -> TilingCounts {
    let area_to_fill = (planar_distance - primary_x_size).max(0.0);
    let tertiary_count = if is_usable_size(tertiary_x_size) {
        (area_to_fill / tertiary_x_size + TILING_EPSILON).floor() as usize
    } else {
        0
    };
    let used_by_tertiary = tertiary_count as f32 * tertiary_x_size;
    let filler_area = (area_to_fill - used_by_tertiary).max(0.0);

    let filler_count = if is_usable_size(filler_x_size) {
        let base = (filler_area / filler_x_size - TILING_EPSILON).ceil().max(0.0) as usize;
        let extra = if tertiary_count > 0 { 2 } else { 1 };
        round_up_to_even(base + extra)
    } else {
        0
    };

    TilingCounts {
        area_to_fill,
        tertiary_count,
        used_by_tertiary,
        filler_area,
        filler_count,
    }
}

fn is_usable_size(size: f32) -> bool {
    size.is_finite() && size > 0.0
}

fn round_up_to_even(n: usize) -> usize {
    n + (n & 1)
}

/// Berechnet eine vollständige Kachelung zwischen zwei Oberflächen-Punkten.
pub fn compute_tiling(
    anchor: Vec3,
    mobile: Vec3,
    metrics: &TilingMetrics,
    params: &TilingParams,
) -> TilingLayout {
    let mut layout = TilingLayout::default();
    compute_tiling_into(&mut layout, anchor, mobile, metrics, params);
    layout
}

/// Wie `compute_tiling`, schreibt aber in ein bestehendes Layout.
///
/// Die Listen werden geleert und neu befüllt; ihre Kapazität bleibt erhalten.
pub fn compute_tiling_into(
    layout: &mut TilingLayout,
    anchor: Vec3,
    mobile: Vec3,
    metrics: &TilingMetrics,
    params: &TilingParams,
) {
    layout.tertiary.clear();
    layout.filler.clear();

    let anchor_position = anchor + Vec3::Y * metrics.anchor.bottom_y_offset;
    layout.anchor_position = anchor_position;

    let direction = planar(mobile - anchor);
    let distance = direction.length();
    layout.planar_distance = distance;

    if distance < params.min_drag_distance {
        layout.forward = None;
        layout.mobile_position = anchor_position;
        layout.anchor_rotation = None;
        layout.mobile_rotation = None;
        return;
    }

    let forward = direction / distance;
    let correction = params.look_correction_yaw;
    let facing = look_along(forward, correction);
    layout.forward = Some(forward);
    layout.mobile_position = mobile + Vec3::Y * metrics.mobile.bottom_y_offset;
    layout.anchor_rotation = Some(facing * Quat::from_rotation_y(metrics.anchor.yaw_offset_rad()));
    layout.mobile_rotation = Some(
        look_along(-forward, correction) * Quat::from_rotation_y(metrics.mobile.yaw_offset_rad()),
    );

    let primary = metrics.primary_x_size;
    let tertiary_size = metrics.tertiary.x_size;
    let filler_size = metrics.filler.x_size;
    let counts = tiling_counts(distance, primary, tertiary_size, filler_size);

    let interior = |offset: f32, piece: &PieceMetrics| PiecePlacement {
        position: anchor + forward * offset + Vec3::Y * piece.bottom_y_offset,
        rotation: facing * Quat::from_rotation_y(piece.yaw_offset_rad()),
    };

    let tertiary_start = tertiary_size * 0.5 + counts.filler_area * 0.5 + primary * 0.5;
    layout.tertiary.extend(
        (0..counts.tertiary_count)
            .map(|i| interior(tertiary_start + i as f32 * tertiary_size, &metrics.tertiary)),
    );

    let filler_start = filler_size * 0.25 + primary * 0.5;
    let second_half_shift = counts.used_by_tertiary - filler_size * 1.75;
    let half = counts.filler_count / 2;
    layout.filler.extend((0..counts.filler_count).map(|i| {
        let mut offset = filler_start + i as f32 * filler_size;
        if i >= half {
            offset += second_half_shift;
        }
        interior(offset, &metrics.filler)
    }));
}
