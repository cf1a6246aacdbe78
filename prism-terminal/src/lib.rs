//! Interactive terminal driver for the Prism3D pipeline.
//!
//! Owns the scene and the character rasterizer and runs the frame loop:
//! sample input into a move/look vector, integrate the camera, render one
//! frame, present it. Raw input capture stays here; the core only ever
//! sees the sampled vectors.

use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use prism_core::{Scene, Vec3};

pub mod renderer;

pub use renderer::{AsciiRasterizer, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Camera translation speed, world units per second.
const MOVE_SPEED: f32 = 4.0;
/// Look step per arrow-key press, radians.
const ROTATION_SPEED: f32 = 0.05;
const FILL_CHAR: char = '#';
const OUTLINE_CHAR: char = '*';
const TARGET_FPS: u64 = 30;

/// Main application struct for terminal 3D rendering.
pub struct TerminalApp {
    scene: Scene,
    rasterizer: AsciiRasterizer,
    move_dir: Vec3,
    running: bool,
    last_tick: Instant,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            rasterizer: AsciiRasterizer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            move_dir: Vec3::zeros(),
            running: true,
            last_tick: Instant::now(),
        }
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / TARGET_FPS);
        self.last_tick = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.tick();
            self.render()?;

            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }
        }

        Ok(())
    }

    /// Turns key events into this frame's move vector and an immediate
    /// look adjustment. WASD moves on the x/z plane; arrows look around.
    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('w') => self.move_dir.z += 1.0,
                KeyCode::Char('s') => self.move_dir.z -= 1.0,
                KeyCode::Char('a') => self.move_dir.x -= 1.0,
                KeyCode::Char('d') => self.move_dir.x += 1.0,
                KeyCode::Up => self.look(Vec3::new(ROTATION_SPEED, 0.0, 0.0)),
                KeyCode::Down => self.look(Vec3::new(-ROTATION_SPEED, 0.0, 0.0)),
                KeyCode::Left => self.look(Vec3::new(0.0, -ROTATION_SPEED, 0.0)),
                KeyCode::Right => self.look(Vec3::new(0.0, ROTATION_SPEED, 0.0)),
                _ => {}
            }
        }
        Ok(())
    }

    fn look(&mut self, delta: Vec3) {
        let rot = self.scene.cam_rot();
        self.scene.set_cam_rot(rot + delta);
    }

    /// Integrates the sampled move vector over the elapsed wall time. The
    /// vector is normalized first so diagonals are no faster.
    fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_tick).as_secs_f32();
        self.last_tick = now;

        if self.move_dir.norm_squared() > 0.0 {
            let dir = self.move_dir.normalize();
            let pos = self.scene.cam_pos() + dir * MOVE_SPEED * dt;
            self.scene.set_cam_pos(pos);
            self.move_dir = Vec3::zeros();
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.scene.render_scene();

        self.rasterizer.clear();
        for rendered in &frame {
            // Fill first so the outline stays visible on top of it.
            self.rasterizer.fill_triangle(&rendered.screen, FILL_CHAR);
            self.rasterizer
                .outline_triangle(&rendered.screen, OUTLINE_CHAR);
        }

        let mut stdout = stdout();
        self.rasterizer.present(&mut stdout)?;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Prism3D | {} triangles | WASD=Move Arrows=Look Q=Quit",
                frame.len()
            )),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }
}
