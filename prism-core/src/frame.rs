//! Polygon-flavor output: turns an ordered frame of shaded screen
//! triangles into draw commands for an external graphics surface. The
//! surface itself (a window, an image buffer) is out of scope; it only has
//! to honour filled-polygon and polygon-outline calls in order.

use crate::scene::RenderedTriangle;
use crate::shader::Rgb;

/// One drawing call against the output surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Fill {
        points: [[i32; 2]; 3],
        colour: Rgb,
    },
    Stroke {
        points: [[i32; 2]; 3],
        colour: Rgb,
    },
}

/// Maps normalized screen triangles to surface pixels and emits, per
/// triangle, a fill followed by an outline stroke. The outline comes
/// second so the fill never swallows it.
#[derive(Debug, Clone, Copy)]
pub struct FramePainter {
    width: u32,
    height: u32,
    ratio: f32,
    outline: Rgb,
}

impl FramePainter {
    /// Reference scale: geometry occupies half the smaller surface axis.
    const DEFAULT_RATIO: f32 = 0.5;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ratio: Self::DEFAULT_RATIO,
            outline: Rgb::BLACK,
        }
    }

    pub fn with_outline(mut self, outline: Rgb) -> Self {
        self.outline = outline;
        self
    }

    /// Paints one frame. `frame` must already be in painter order
    /// (furthest first), as produced by `Scene::render_scene`.
    pub fn paint(&self, frame: &[RenderedTriangle]) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(frame.len() * 2);
        for rendered in frame {
            let points = self.fit_points(rendered);
            commands.push(DrawCommand::Fill {
                points,
                colour: rendered.colour,
            });
            commands.push(DrawCommand::Stroke {
                points,
                colour: self.outline,
            });
        }
        commands
    }

    fn fit_points(&self, rendered: &RenderedTriangle) -> [[i32; 2]; 3] {
        let xs = rendered.screen.x_values();
        let ys = rendered.screen.y_values();
        let mut points = [[0i32; 2]; 3];
        for i in 0..3 {
            points[i] = [
                self.fit_value(xs[i], self.ratio),
                // Projected "up" is surface-down, so the vertical ratio flips.
                self.fit_value(ys[i], -self.ratio),
            ];
        }
        points
    }

    fn fit_value(&self, value: f32, ratio: f32) -> i32 {
        let edge = self.width.min(self.height) as f32;
        ((value / 2.0) * ratio * edge + edge / 2.0) as i32
    }
}
