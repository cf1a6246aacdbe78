//! Time-driven camera animation.
//!
//! A [`CameraEvent`] linearly interpolates the camera pose over a fixed
//! duration. Events are queued on the scene and run strictly one at a
//! time, in FIFO order. The machine itself is pure in time: it is advanced
//! with an explicit `now`, and the scene supplies that from its clock, so
//! tests can drive it deterministically.

use std::time::{Duration, Instant};

use crate::geometry::Vec3;

/// Monotonic time source injected into the scene.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Default clock: elapsed wall time since construction.
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Queued, not yet evaluated.
    Pending,
    /// Interpolating from the captured start pose.
    Active {
        started_at: f32,
        start_pos: Vec3,
        start_rot: Vec3,
    },
    /// Reached the end pose exactly; ready to be popped.
    Done,
}

/// A queued linear camera move. Bounds left as `None` are captured from
/// the live camera pose on first evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraEvent {
    start_pos: Option<Vec3>,
    end_pos: Option<Vec3>,
    start_rot: Option<Vec3>,
    end_rot: Option<Vec3>,
    duration: f32,
    state: State,
    resolved_end_pos: Vec3,
    resolved_end_rot: Vec3,
}

impl CameraEvent {
    pub fn new(
        start_pos: Option<Vec3>,
        end_pos: Option<Vec3>,
        start_rot: Option<Vec3>,
        end_rot: Option<Vec3>,
        duration_secs: f32,
    ) -> Self {
        Self {
            start_pos,
            end_pos,
            start_rot,
            end_rot,
            duration: duration_secs,
            state: State::Pending,
            resolved_end_pos: Vec3::zeros(),
            resolved_end_rot: Vec3::zeros(),
        }
    }

    /// Moves the camera to look at `target` from `distance` times its
    /// direction, pitching and yawing to face it.
    pub fn pan_to(target: Vec3, distance: f32, duration_secs: f32) -> Self {
        let destination = target * distance;
        let flat = (target.x * target.x + target.z * target.z).sqrt();
        let pitch = target.y.atan2(flat);
        let yaw = target.x.atan2(target.z);
        Self::new(
            None,
            Some(destination),
            None,
            Some(Vec3::new(-pitch, yaw, 0.0)),
            duration_secs,
        )
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Advances the event to `now` and returns the camera pose it dictates.
    /// The first call captures `(cam_pos, cam_rot)` as the start for any
    /// unset bound. At and after `t = 1` the end pose is returned exactly.
    pub fn advance(&mut self, now: Duration, cam_pos: Vec3, cam_rot: Vec3) -> (Vec3, Vec3) {
        let now = now.as_secs_f32();
        if let State::Pending = self.state {
            let start_pos = self.start_pos.unwrap_or(cam_pos);
            let start_rot = self.start_rot.unwrap_or(cam_rot);
            self.resolved_end_pos = self.end_pos.unwrap_or(cam_pos);
            self.resolved_end_rot = self.end_rot.unwrap_or(cam_rot);
            self.state = State::Active {
                started_at: now,
                start_pos,
                start_rot,
            };
            tracing::debug!(duration = self.duration, "camera event started");
        }

        match self.state {
            State::Active {
                started_at,
                start_pos,
                start_rot,
            } => {
                let t = if self.duration > 0.0 {
                    ((now - started_at) / self.duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let pos = start_pos.lerp(&self.resolved_end_pos, t);
                let rot = start_rot.lerp(&self.resolved_end_rot, t);
                if t >= 1.0 {
                    self.state = State::Done;
                    tracing::debug!("camera event finished");
                    // Converge exactly, no residual interpolation error.
                    return (self.resolved_end_pos, self.resolved_end_rot);
                }
                (pos, rot)
            }
            State::Done => (self.resolved_end_pos, self.resolved_end_rot),
            State::Pending => unreachable!("event was just started"),
        }
    }
}
