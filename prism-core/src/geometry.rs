//! Geometry primitives shared by the whole pipeline.

use nalgebra::{Point2, Vector3};

/// 3D vector used for positions, rotations (radians) and per-axis scales.
pub type Vec3 = Vector3<f32>;

/// Screen-space point produced by projection. A vertex that cannot be
/// represented on screen (behind the camera plane) projects to `None`.
pub type ScreenPoint = Point2<f32>;

/// A triangle in world or object space. Vertices are held by value; no
/// orientation is implied and both faces render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
}

impl Triangle {
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self { v1, v2, v3 }
    }

    /// Average of the three vertices, used by shaders to treat the whole
    /// triangle as a single point.
    pub fn centroid(&self) -> Vec3 {
        (self.v1 + self.v2 + self.v3) / 3.0
    }

    /// Painter's-algorithm sort key: mean squared distance of the vertices
    /// from `from`. Squared on purpose, the ordering does not need the root.
    pub fn avg_sq_distance(&self, from: &Vec3) -> f32 {
        let d1 = (self.v1 - from).norm_squared();
        let d2 = (self.v2 - from).norm_squared();
        let d3 = (self.v3 - from).norm_squared();
        (d1 + d2 + d3) / 3.0
    }

    /// Per-axis (non-uniform) scale about the origin.
    pub fn scaled(&self, scale: &Vec3) -> Self {
        Self {
            v1: self.v1.component_mul(scale),
            v2: self.v2.component_mul(scale),
            v3: self.v3.component_mul(scale),
        }
    }

    pub fn translated(&self, offset: &Vec3) -> Self {
        Self {
            v1: self.v1 + offset,
            v2: self.v2 + offset,
            v3: self.v3 + offset,
        }
    }
}

/// A projected triangle. Exists only when all three vertices projected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle2D {
    pub v1: ScreenPoint,
    pub v2: ScreenPoint,
    pub v3: ScreenPoint,
}

impl Triangle2D {
    pub fn new(v1: ScreenPoint, v2: ScreenPoint, v3: ScreenPoint) -> Self {
        Self { v1, v2, v3 }
    }

    pub fn x_values(&self) -> [f32; 3] {
        [self.v1.x, self.v2.x, self.v3.x]
    }

    pub fn y_values(&self) -> [f32; 3] {
        [self.v1.y, self.v2.y, self.v3.y]
    }
}
