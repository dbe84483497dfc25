use std::f32::consts::PI;

use bevy::prelude::{KeyCode, Resource, Vec3};

use crate::grid::{ElevationGrid, SCALE_XY};

/// Angular step applied by every rotate, turn, and tilt command.
pub const ANGLE_STEP: f32 = 2.0 * PI / 180.0;
/// Height the eye keeps above the ground it stands on.
pub const EYE_CLEARANCE: f32 = 0.05;

/// One discrete navigation command, decoded from a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Forward,
    Backward,
    RotateLeft,
    RotateRight,
    TurnLeft,
    TurnRight,
    TiltUp,
    TiltDown,
    Reset,
}

impl Command {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        Some(match key {
            KeyCode::I => Self::Forward,
            KeyCode::K => Self::Backward,
            KeyCode::J => Self::RotateLeft,
            KeyCode::L => Self::RotateRight,
            KeyCode::A => Self::TurnLeft,
            KeyCode::D => Self::TurnRight,
            KeyCode::W => Self::TiltUp,
            KeyCode::S => Self::TiltDown,
            KeyCode::Space => Self::Reset,
            _ => return None,
        })
    }
}

/// First-person camera state walking the terrain surface.
///
/// `theta` is the look-direction angle and `phi` the opposite-facing angle;
/// `phi = theta + PI` holds after every command except tilt, which only
/// writes `tilt` straight into `at.z`.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct Walker {
    pub eye: Vec3,
    pub at: Vec3,
    pub up: Vec3,
    theta: f32,
    phi: f32,
    tilt: f32,
}

impl Walker {
    /// Starts out in the reset pose for a terrain of the given width.
    pub fn new(grid_width: usize) -> Self {
        let mut walker = Self {
            eye: Vec3::ZERO,
            at: Vec3::ZERO,
            up: Vec3::Z,
            theta: 0.0,
            phi: 0.0,
            tilt: 0.0,
        };
        walker.reset(grid_width);
        walker
    }

    /// Restores the fixed starting pose; a pure function of grid width.
    pub fn reset(&mut self, grid_width: usize) {
        self.theta = PI / 4.0;
        self.phi = self.theta + PI;
        self.tilt = 0.0;

        let edge = grid_width as f32 / SCALE_XY;
        self.at = Vec3::new(edge - 0.5, edge - 0.5, 0.0);
        self.eye = Vec3::new(edge, edge, EYE_CLEARANCE);
        self.up = Vec3::Z;
    }

    /// Applies one command, then unconditionally re-snaps the eye to the
    /// ground beneath it.
    pub fn apply(&mut self, command: Command, window: (f32, f32), grid: &ElevationGrid) {
        match command {
            Command::Forward => self.advance(1.0, window),
            Command::Backward => self.advance(-1.0, window),
            Command::RotateLeft => {
                self.theta -= ANGLE_STEP;
                self.phi = self.theta + PI;
                self.at = rotate_about(self.eye, self.at, self.theta);
            }
            Command::RotateRight => {
                self.theta += ANGLE_STEP;
                self.phi = self.theta + PI;
                self.at = rotate_about(self.eye, self.at, self.theta);
            }
            Command::TurnLeft => {
                self.phi += ANGLE_STEP;
                self.theta = self.phi - PI;
                self.eye = rotate_about(self.at, self.eye, self.phi);
            }
            Command::TurnRight => {
                self.phi -= ANGLE_STEP;
                self.theta = self.phi - PI;
                self.eye = rotate_about(self.at, self.eye, self.phi);
            }
            Command::TiltUp => {
                self.tilt += ANGLE_STEP;
                self.at.z = self.tilt;
            }
            Command::TiltDown => {
                self.tilt -= ANGLE_STEP;
                self.at.z = self.tilt;
            }
            Command::Reset => self.reset(grid.width()),
        }

        self.snap_to_ground(grid);
    }

    /// Walks eye and look target together along the look direction. The
    /// per-axis step is tied to the window dimensions, so movement is not
    /// physically uniform across axes.
    fn advance(&mut self, sign: f32, (win_w, win_h): (f32, f32)) {
        let dir = direction(self.eye, self.at);
        let dx = sign * (4.0 / win_w) * dir.x;
        let dy = sign * (4.0 / win_h) * dir.y;

        self.eye.x += dx;
        self.eye.y += dy;
        self.at.x += dx;
        self.at.y += dy;
    }

    /// Pins the eye a fixed clearance above the ground under its footprint;
    /// off the grid the eye floats at the clearance height alone.
    pub fn snap_to_ground(&mut self, grid: &ElevationGrid) {
        self.eye.z = match grid.surface_height(self.eye.x, self.eye.y) {
            Some(ground) => ground + EYE_CLEARANCE,
            None => EYE_CLEARANCE,
        };
    }
}

/// Unit direction from `start` toward `end`.
fn direction(start: Vec3, end: Vec3) -> Vec3 {
    (end - start) / start.distance(end)
}

/// Revolves `point` around `pivot` to `angle` in the x,y plane, keeping both
/// the planar distance between the two points and the original z offset.
pub fn rotate_about(pivot: Vec3, point: Vec3, angle: f32) -> Vec3 {
    let offset = direction(pivot, point) * pivot.distance(point);
    let planar = (point.truncate() - pivot.truncate()).length();

    pivot + Vec3::new(planar * angle.cos(), planar * angle.sin(), offset.z)
}
