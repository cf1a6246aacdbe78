//! Prism3D terminal demo.
//!
//! Renders a mesh (a file passed on the command line, or a built-in cube)
//! above a ground plane, with an opening camera sweep.
//!
//! Controls: WASD to move, arrow keys to look, Q/Esc to quit.

use std::env;

use anyhow::Context;
use prism_core::{CameraEvent, Mesh, RenderObject, Rgb, Scene, Shader, Vec3};
use prism_terminal::TerminalApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mesh = match env::args().nth(1) {
        Some(path) => {
            prism_core::load_mesh(&path).with_context(|| format!("loading mesh {path}"))?
        }
        None => Mesh::cube(2.0),
    };

    let mut scene = Scene::new();
    scene.add_object(RenderObject::new(
        "subject",
        mesh,
        Vec3::new(0.0, 1.5, 0.0),
        Shader::inverse_square_shadow(Rgb::new(0, 238, 238)),
    ));

    let mut ground = RenderObject::new(
        "ground",
        Mesh::plane(1.0),
        Vec3::zeros(),
        Shader::inverse_square_shadow(Rgb::new(255, 0, 0)),
    );
    ground.set_uniform_scale(20.0);
    scene.add_object(ground);

    scene.set_cam_pos(Vec3::new(0.0, 2.0, -8.0));
    // Opening sweep down to eye level, looking at the subject.
    scene.add_camera_event(CameraEvent::new(
        Some(Vec3::new(0.0, 10.0, -14.0)),
        Some(Vec3::new(0.0, 2.0, -8.0)),
        None,
        Some(Vec3::zeros()),
        2.0,
    ));

    let mut app = TerminalApp::new(scene);
    app.run()?;
    Ok(())
}
