//! Example: render one frame and print the polygon-flavor draw commands.
//!
//! This is the whole contract an external graphics surface has to honour:
//! execute the fills and strokes in order and occlusion comes out right.
//!
//! Usage: cargo run --example frame_dump [path/to/file.mesh]

use prism_core::frame::FramePainter;
use prism_core::{Mesh, RenderObject, Rgb, Scene, Shader, Vec3};

fn main() {
    let mesh = match std::env::args().nth(1) {
        Some(path) => match prism_core::load_mesh(&path) {
            Ok(mesh) => mesh,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => Mesh::cube(2.0),
    };

    let mut scene = Scene::new();
    scene.add_object(RenderObject::new(
        "subject",
        mesh,
        Vec3::zeros(),
        Shader::Horizontal(Rgb::new(255, 80, 80)),
    ));
    scene.set_cam_pos(Vec3::new(0.0, 0.5, -6.0));

    let frame = scene.render_scene();
    let painter = FramePainter::new(700, 700);
    for command in painter.paint(&frame) {
        println!("{command:?}");
    }
}
