//! A positioned, scaled, shaded instance of a mesh.

use std::path::Path;

use crate::geometry::{Triangle, Vec3};
use crate::mesh::{load_mesh, Mesh, MeshError};
use crate::shader::Shader;

/// An object placed in the scene. Game logic moves and scales it between
/// frames; the world-space geometry is recomputed on every access so it is
/// never stale after a mutation.
#[derive(Debug, Clone)]
pub struct RenderObject {
    name: String,
    mesh: Mesh,
    position: Vec3,
    scale: Vec3,
    shader: Shader,
}

impl RenderObject {
    pub fn new(name: impl Into<String>, mesh: Mesh, position: Vec3, shader: Shader) -> Self {
        Self {
            name: name.into(),
            mesh,
            position,
            scale: Vec3::new(1.0, 1.0, 1.0),
            shader,
        }
    }

    /// Loads the mesh from `path` and wraps it in an object at `position`.
    pub fn from_path(
        path: impl AsRef<Path>,
        name: impl Into<String>,
        position: Vec3,
        shader: Shader,
    ) -> Result<Self, MeshError> {
        Ok(Self::new(name, load_mesh(path)?, position, shader))
    }

    /// World-space triangles: mesh geometry scaled per axis, then moved to
    /// the current position.
    pub fn adjusted_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.mesh
            .triangles
            .iter()
            .map(|t| t.scaled(&self.scale).translated(&self.position))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Moves the object by a delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    pub fn set_uniform_scale(&mut self, factor: f32) {
        self.scale = Vec3::new(factor, factor, factor);
    }

    pub fn shader(&self) -> &Shader {
        &self.shader
    }

    pub fn set_shader(&mut self, shader: Shader) {
        self.shader = shader;
    }
}
