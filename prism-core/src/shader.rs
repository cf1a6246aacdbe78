//! Triangle shading.
//!
//! A shader is a pure function from a world-space triangle plus scene
//! context to a colour. Variants are a tagged enum rather than trait
//! objects so the dispatch stays exhaustive and allocation free.

use crate::geometry::{Triangle, Vec3};

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Scene state a shader is allowed to see.
#[derive(Debug, Clone, Copy)]
pub struct ShadeContext {
    pub cam_pos: Vec3,
}

const DEFAULT_SHADER_FACTOR: f32 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shader {
    /// The configured colour, unconditionally.
    Flat(Rgb),
    /// Intensity falls off with the centroid's horizontal distance from
    /// x = 0, giving a gradient across the scene.
    Horizontal(Rgb),
    /// Distance attenuation: intensity is the inverse square of the
    /// centroid's distance from the camera, scaled by `factor`.
    InverseSquareShadow { colour: Rgb, factor: f32 },
}

impl Shader {
    /// Inverse-square shadow with the reference attenuation factor.
    pub fn inverse_square_shadow(colour: Rgb) -> Self {
        Shader::InverseSquareShadow {
            colour,
            factor: DEFAULT_SHADER_FACTOR,
        }
    }

    pub fn shade(&self, triangle: &Triangle, ctx: &ShadeContext) -> Rgb {
        match *self {
            Shader::Flat(colour) => colour,
            Shader::Horizontal(colour) => {
                let intensity = sigmoid(triangle.centroid().x);
                attenuate(colour, intensity)
            }
            Shader::InverseSquareShadow { colour, factor } => {
                let distance = (triangle.centroid() - ctx.cam_pos).norm();
                let intensity = inverse_square(distance * factor);
                attenuate(colour, intensity)
            }
        }
    }
}

/// `1 / ((|x| + 1)^2)`: light falls off with the square of distance.
pub fn inverse_square(x: f32) -> f32 {
    let x = x.abs();
    1.0 / ((x + 1.0) * (x + 1.0))
}

/// Bell-shaped falloff: 1 at x = 0, approaching 0 as |x| grows.
pub fn sigmoid(x: f32) -> f32 {
    let x = x.abs();
    (1.0 / (1.0 + (-x).exp())) * -2.0 + 2.0
}

/// Clamps a computed channel into the valid 0..=255 range.
pub fn cap_rgb(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

fn attenuate(colour: Rgb, intensity: f32) -> Rgb {
    Rgb::new(
        cap_rgb((intensity * colour.r as f32).round() as i32),
        cap_rgb((intensity * colour.g as f32).round() as i32),
        cap_rgb((intensity * colour.b as f32).round() as i32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_at(center: Vec3) -> Triangle {
        Triangle::new(center, center, center)
    }

    fn origin_ctx() -> ShadeContext {
        ShadeContext {
            cam_pos: Vec3::zeros(),
        }
    }

    #[test]
    fn flat_ignores_geometry() {
        let shader = Shader::Flat(Rgb::new(10, 20, 30));
        let far = triangle_at(Vec3::new(100.0, 100.0, 100.0));
        assert_eq!(shader.shade(&far, &origin_ctx()), Rgb::new(10, 20, 30));
    }

    #[test]
    fn cap_rgb_clamps_both_ends() {
        assert_eq!(cap_rgb(300), 255);
        assert_eq!(cap_rgb(-5), 0);
        assert_eq!(cap_rgb(128), 128);
    }

    #[test]
    fn shadow_at_zero_distance_keeps_full_colour() {
        let shader = Shader::inverse_square_shadow(Rgb::new(0, 238, 238));
        let t = triangle_at(Vec3::zeros());
        assert_eq!(shader.shade(&t, &origin_ctx()), Rgb::new(0, 238, 238));
    }

    #[test]
    fn shadow_darkens_with_distance() {
        let shader = Shader::inverse_square_shadow(Rgb::WHITE);
        let near = shader.shade(&triangle_at(Vec3::new(0.0, 0.0, 10.0)), &origin_ctx());
        let far = shader.shade(&triangle_at(Vec3::new(0.0, 0.0, 100.0)), &origin_ctx());
        assert!(near.r > far.r);
        assert!(far.r < 255);
    }

    #[test]
    fn shadow_channels_stay_in_range_for_extreme_factors() {
        let shader = Shader::InverseSquareShadow {
            colour: Rgb::WHITE,
            factor: 10_000.0,
        };
        let t = triangle_at(Vec3::new(50.0, 0.0, 0.0));
        // Attenuation collapses to black instead of wrapping or inverting.
        assert_eq!(shader.shade(&t, &origin_ctx()), Rgb::BLACK);
    }

    #[test]
    fn horizontal_is_brightest_at_centre() {
        let shader = Shader::Horizontal(Rgb::new(200, 100, 50));
        let centre = shader.shade(&triangle_at(Vec3::zeros()), &origin_ctx());
        let side = shader.shade(&triangle_at(Vec3::new(8.0, 0.0, 0.0)), &origin_ctx());
        assert_eq!(centre, Rgb::new(200, 100, 50));
        assert!(side.r < centre.r);
    }

    #[test]
    fn sigmoid_and_inverse_square_shapes() {
        assert!((sigmoid(0.0) - 1.0).abs() < 1e-6);
        assert!(sigmoid(10.0) < 0.01);
        assert!((inverse_square(0.0) - 1.0).abs() < 1e-6);
        assert!((inverse_square(1.0) - 0.25).abs() < 1e-6);
        assert_eq!(inverse_square(-1.0), inverse_square(1.0));
    }
}
