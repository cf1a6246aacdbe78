//! Camera projection: world space to normalized screen space.

use crate::geometry::{ScreenPoint, Triangle, Triangle2D, Vec3};

/// The virtual screen the perspective divide projects onto: an offset in
/// the camera plane plus the eye-to-screen distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPlane {
    pub offset_x: f32,
    pub offset_y: f32,
    pub distance: f32,
}

impl Default for ScreenPlane {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            distance: 3.8,
        }
    }
}

/// Sine and cosine of each camera rotation axis, computed once per frame
/// and shared across every vertex.
#[derive(Debug, Clone, Copy)]
pub struct RotationTrig {
    sin: Vec3,
    cos: Vec3,
}

impl RotationTrig {
    pub fn new(rotation: &Vec3) -> Self {
        Self {
            sin: Vec3::new(rotation.x.sin(), rotation.y.sin(), rotation.z.sin()),
            cos: Vec3::new(rotation.x.cos(), rotation.y.cos(), rotation.z.cos()),
        }
    }
}

/// Projects a single vertex. `None` means the vertex sits on or behind the
/// camera plane and cannot be represented; this is the only clipping the
/// pipeline performs.
pub fn project_vertex(
    vertex: &Vec3,
    cam_pos: &Vec3,
    trig: &RotationTrig,
    screen: &ScreenPlane,
) -> Option<ScreenPoint> {
    let d = vertex - cam_pos;
    let (x, y, z) = (d.x, d.y, d.z);
    let (s, c) = (&trig.sin, &trig.cos);

    // Intrinsic yaw-then-pitch composition; the nesting is load-bearing,
    // any other order changes on-screen orientation.
    let dx = c.y * (s.z * y + c.z * x) - s.y * z;
    let dy = s.x * (c.y * z + s.y * (s.z * y + c.z * x)) + c.x * (c.z * y - s.z * x);
    let dz = c.x * (c.y * z + s.y * (s.z * y + c.z * x)) - s.x * (c.z * y - s.z * x);

    if dz <= 0.0 {
        return None;
    }

    let bx = (screen.distance / dz) * dx + screen.offset_x;
    let by = (screen.distance / dz) * dy + screen.offset_y;
    Some(ScreenPoint::new(bx, by))
}

/// Projects a triangle; succeeds only when all three vertices project.
/// A partially-behind triangle is dropped whole for the frame.
pub fn project_triangle(
    triangle: &Triangle,
    cam_pos: &Vec3,
    trig: &RotationTrig,
    screen: &ScreenPlane,
) -> Option<Triangle2D> {
    let v1 = project_vertex(&triangle.v1, cam_pos, trig, screen)?;
    let v2 = project_vertex(&triangle.v2, cam_pos, trig, screen)?;
    let v3 = project_vertex(&triangle.v3, cam_pos, trig, screen)?;
    Some(Triangle2D::new(v1, v2, v3))
}
