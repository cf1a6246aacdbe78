//! Prism3D core: a software (non-accelerated) 3D rendering pipeline.
//!
//! Meshes are loaded from a simple text format, placed in a [`Scene`] with
//! a movable camera, projected to 2D, depth-sorted furthest-first and
//! shaded. The ordered result is handed to an output flavor: the
//! [`frame::FramePainter`] for polygon surfaces, or the character-cell
//! rasterizer in the terminal crate.

pub mod event;
pub mod frame;
pub mod geometry;
pub mod mesh;
pub mod object;
pub mod projection;
pub mod scene;
pub mod shader;

// Re-export the types a driver touches every frame.
pub use event::{CameraEvent, Clock, MonotonicClock};
pub use geometry::{ScreenPoint, Triangle, Triangle2D, Vec3};
pub use mesh::{load_mesh, Mesh, MeshError};
pub use object::RenderObject;
pub use scene::{ObjectId, RenderedTriangle, Scene};
pub use shader::{Rgb, ShadeContext, Shader};
