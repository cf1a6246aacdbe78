//! Scene orchestration: one call to [`Scene::render_scene`] is one frame.
//!
//! Per frame the scene advances the head camera event, gathers every
//! object's world-space triangles, sorts them furthest-first (painter's
//! algorithm), projects them through the camera, and shades the survivors
//! in sorted order. Nothing is drawn here; the caller hands the ordered
//! result to a rasterizer.

use std::collections::VecDeque;

use crate::event::{CameraEvent, Clock, MonotonicClock};
use crate::geometry::{Triangle, Triangle2D, Vec3};
use crate::object::RenderObject;
use crate::projection::{project_triangle, RotationTrig, ScreenPlane};
use crate::shader::{Rgb, ShadeContext};

/// Handle to an object in the scene's arena. Stable for the lifetime of
/// the scene; objects are never removed mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectId(usize);

/// One projected, shaded triangle. `render_scene` returns these
/// furthest-first; painting them in order gives correct-enough occlusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedTriangle {
    pub screen: Triangle2D,
    pub colour: Rgb,
}

pub struct Scene {
    objects: Vec<RenderObject>,
    cam_pos: Vec3,
    cam_rot: Vec3,
    screen: ScreenPlane,
    events: VecDeque<CameraEvent>,
    clock: Box<dyn Clock>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_clock(Box::new(MonotonicClock::new()))
    }

    /// Builds a scene around an explicit time source, for deterministic
    /// animation tests.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            objects: Vec::new(),
            cam_pos: Vec3::zeros(),
            cam_rot: Vec3::zeros(),
            screen: ScreenPlane::default(),
            events: VecDeque::new(),
            clock,
        }
    }

    pub fn add_object(&mut self, object: RenderObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn set_objects(&mut self, objects: Vec<RenderObject>) {
        self.objects = objects;
    }

    pub fn object(&self, id: ObjectId) -> Option<&RenderObject> {
        self.objects.get(id.0)
    }

    /// Mutable access for game logic moving objects between frames.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut RenderObject> {
        self.objects.get_mut(id.0)
    }

    pub fn objects(&self) -> &[RenderObject] {
        &self.objects
    }

    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.triangle_count()).sum()
    }

    pub fn cam_pos(&self) -> Vec3 {
        self.cam_pos
    }

    pub fn set_cam_pos(&mut self, pos: Vec3) {
        self.cam_pos = pos;
    }

    pub fn cam_rot(&self) -> Vec3 {
        self.cam_rot
    }

    pub fn set_cam_rot(&mut self, rot: Vec3) {
        self.cam_rot = rot;
    }

    /// Queues a camera event behind any already pending. Events run one at
    /// a time, strictly FIFO.
    pub fn add_camera_event(&mut self, event: CameraEvent) {
        self.events.push_back(event);
    }

    pub fn clear_camera_events(&mut self) {
        self.events.clear();
    }

    pub fn pending_camera_events(&self) -> usize {
        self.events.len()
    }

    /// Renders one frame: ordered (furthest first) shaded screen triangles.
    /// Triangles with any vertex behind the camera are dropped. An empty
    /// scene yields an empty frame.
    pub fn render_scene(&mut self) -> Vec<RenderedTriangle> {
        self.follow_camera_events();

        let cam_pos = self.cam_pos;

        // (world triangle, owning object, sort key) in draw-candidate order.
        let mut candidates: Vec<(Triangle, usize, f32)> =
            Vec::with_capacity(self.triangle_count());
        for (index, object) in self.objects.iter().enumerate() {
            candidates.extend(
                object
                    .adjusted_triangles()
                    .map(|t| (t, index, t.avg_sq_distance(&cam_pos))),
            );
        }
        candidates.sort_by(|a, b| b.2.total_cmp(&a.2));

        let trig = RotationTrig::new(&self.cam_rot);
        let ctx = ShadeContext { cam_pos };
        let mut rendered = Vec::with_capacity(candidates.len());
        for (triangle, index, _) in candidates {
            if let Some(screen) = project_triangle(&triangle, &cam_pos, &trig, &self.screen) {
                let colour = self.objects[index].shader().shade(&triangle, &ctx);
                rendered.push(RenderedTriangle { screen, colour });
            }
        }
        rendered
    }

    /// Advances the head camera event, if any. A finished event is popped
    /// so the next one starts on the next frame, from the pose this one
    /// converged to.
    fn follow_camera_events(&mut self) {
        let Some(event) = self.events.front_mut() else {
            return;
        };
        let now = self.clock.now();
        let (pos, rot) = event.advance(now, self.cam_pos, self.cam_rot);
        self.cam_pos = pos;
        self.cam_rot = rot;
        if event.is_done() {
            self.events.pop_front();
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
