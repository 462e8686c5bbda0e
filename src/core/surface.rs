//! Projektion eines Pointer-Strahls auf die horizontale Platzierungsfläche.

use glam::Vec3;

/// Unterhalb dieses Betrags gilt der Strahl als parallel zur Fläche.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Welt-Strahl eines Pointer-Samples (Kamera → Cursor).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRay {
    /// Ursprung in Weltkoordinaten
    pub origin: Vec3,
    /// Richtung (muss nicht normalisiert sein)
    pub direction: Vec3,
}

impl PointerRay {
    /// Erstellt einen Strahl.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Senkrechter Strahl von oben auf einen Punkt (praktisch für Tests und Replays).
    pub fn straight_down(target: Vec3) -> Self {
        Self {
            origin: target + Vec3::Y * 100.0,
            direction: Vec3::NEG_Y,
        }
    }
}

/// Projiziert Pointer-Strahlen auf eine Fläche.
///
/// `None` bedeutet "kein Schnittpunkt" und ist kein Fehler: das Sample
/// wird ohne Update verworfen.
pub trait SurfaceProjector {
    /// Schnittpunkt des Strahls mit der Fläche.
    fn project(&self, ray: &PointerRay) -> Option<Vec3>;
}

/// Horizontale Ebene auf fester Höhe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalSurface {
    /// Y-Koordinate der Ebene
    pub height: f32,
}

impl HorizontalSurface {
    /// Erstellt eine Ebene auf der gegebenen Höhe.
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl SurfaceProjector for HorizontalSurface {
    fn project(&self, ray: &PointerRay) -> Option<Vec3> {
        let denom = ray.direction.y;
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.height - ray.origin.y) / denom;
        if t < 0.0 {
            // Fläche liegt hinter dem Strahl-Ursprung
            return None;
        }
        let hit = ray.origin + ray.direction * t;
        Some(Vec3::new(hit.x, self.height, hit.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_oblique_ray_hits_plane() {
        let surface = HorizontalSurface::new(2.0);
        let ray = PointerRay::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let hit = surface.project(&ray).expect("Schnittpunkt erwartet");
        assert_relative_eq!(hit.x, 8.0);
        assert_relative_eq!(hit.y, 2.0);
        assert_relative_eq!(hit.z, 0.0);
    }

    #[test]
    fn test_parallel_ray_has_no_intersection() {
        let surface = HorizontalSurface::new(0.0);
        let ray = PointerRay::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(surface.project(&ray).is_none());
    }

    #[test]
    fn test_ray_pointing_away_has_no_intersection() {
        let surface = HorizontalSurface::new(0.0);
        let ray = PointerRay::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(surface.project(&ray).is_none());
    }

    #[test]
    fn test_straight_down_lands_on_target() {
        let surface = HorizontalSurface::new(0.0);
        let hit = surface
            .project(&PointerRay::straight_down(Vec3::new(4.0, 0.0, -3.0)))
            .expect("Schnittpunkt erwartet");
        assert_eq!(hit, Vec3::new(4.0, 0.0, -3.0));
    }
}
