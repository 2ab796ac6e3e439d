//! Guide line geometry
//!
//! The rocket and the obstacles live in "guide space":
//! - pos: progress along a diagonal from bottom-left (0) to top-right (1)
//! - offset: perpendicular distance above the line, as a fraction of the
//!   canvas's minor dimension
//!
//! Everything that needs screen coordinates (collisions, drawing, drag
//! projection) goes through [`GuideLine`] so they agree on the mapping.

use glam::Vec2;

use crate::consts::GUIDE_MARGIN;

/// Canvas size in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether the canvas has been laid out with a drawable area
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Shorter side of the canvas
    #[inline]
    pub fn min_dim(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// The diagonal guide segment for a given viewport
#[derive(Debug, Clone, Copy)]
pub struct GuideLine {
    /// Bottom-left end (pos = 0)
    pub start: Vec2,
    /// Top-right end (pos = 1)
    pub end: Vec2,
    /// Unit normal pointing visually "up" from the line
    pub normal: Vec2,
    /// Minor canvas dimension, used to scale offsets to pixels
    pub min_dim: f32,
}

impl GuideLine {
    pub fn new(viewport: Viewport) -> Self {
        let min_dim = viewport.min_dim();
        let margin = min_dim * GUIDE_MARGIN;
        let start = Vec2::new(margin, viewport.height - margin);
        let end = Vec2::new(viewport.width - margin, margin);

        let d = end - start;
        let len = match d.length() {
            l if l > 0.0 => l,
            _ => 1.0,
        };
        let normal = Vec2::new(d.y / len, -d.x / len);

        Self {
            start,
            end,
            normal,
            min_dim,
        }
    }

    /// Direction vector from start to end (not normalized)
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// Length of the segment in pixels
    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Angle of the segment (radians, screen space)
    #[inline]
    pub fn angle(&self) -> f32 {
        let d = self.direction();
        d.y.atan2(d.x)
    }

    /// Screen position for a guide-space coordinate
    #[inline]
    pub fn point_at(&self, pos: f32, offset: f32) -> Vec2 {
        self.start + self.direction() * pos + self.normal * (self.min_dim * offset)
    }

    /// Offset fraction to pixels
    #[inline]
    pub fn offset_to_pixels(&self, offset: f32) -> f32 {
        offset * self.min_dim
    }

    /// Pixels to offset fraction
    #[inline]
    pub fn pixels_to_offset(&self, pixels: f32) -> f32 {
        if self.min_dim > 0.0 {
            pixels / self.min_dim
        } else {
            0.0
        }
    }

    /// Component of a screen-space displacement along the normal
    #[inline]
    pub fn project_on_normal(&self, delta: Vec2) -> f32 {
        delta.dot(self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> GuideLine {
        GuideLine::new(Viewport::new(500.0, 500.0))
    }

    #[test]
    fn test_endpoints_inset_by_margin() {
        let g = square();
        assert!((g.start - Vec2::new(40.0, 460.0)).length() < 1e-4);
        assert!((g.end - Vec2::new(460.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn test_normal_is_unit_and_points_up() {
        let g = square();
        assert!((g.normal.length() - 1.0).abs() < 1e-5);
        // Screen y grows downward, so "up" has negative y
        assert!(g.normal.y < 0.0);
        assert!(g.normal.dot(g.direction()).abs() < 1e-3);
    }

    #[test]
    fn test_point_at_offset() {
        let g = square();
        let on_line = g.point_at(0.5, 0.0);
        assert!((on_line - Vec2::new(250.0, 250.0)).length() < 1e-3);

        let above = g.point_at(0.5, 0.1);
        assert!(((above - on_line).length() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_parallel_motion_projects_to_zero() {
        let g = square();
        let along = g.direction().normalize() * 30.0;
        assert!(g.project_on_normal(along).abs() < 1e-3);
        assert!((g.project_on_normal(g.normal * 12.0) - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_viewport() {
        let g = GuideLine::new(Viewport::default());
        assert!(g.normal.is_finite());
        assert_eq!(g.pixels_to_offset(10.0), 0.0);
        assert!(!Viewport::default().is_drawable());
    }
}
