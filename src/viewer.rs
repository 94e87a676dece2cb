use std::f32::consts::TAU;

use tracing::trace;

use crate::error::{RaycastError, Result};
use crate::world::GridMap;

/// Heading wraps after this many full turns in either direction.
pub const TURN_WRAP: f32 = 100.0;

/// Turn step in full turns per command
pub const DEFAULT_TURN_STEP: f32 = 0.01;

/// Grid units moved per forward/backward command
pub const DEFAULT_MOVE_STEP: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
}

/// Position and orientation of the single viewer.
///
/// The position always lies in an open cell of the map it was created
/// against; moves that would leave open space are dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    x: f32,
    y: f32,
    heading: f32, // radians
    fov: f32,     // radians
    turn_step: f32,
    move_step: f32,
}

impl Viewer {
    pub fn new(x: f32, y: f32, heading: f32, fov: f32, map: &GridMap) -> Result<Self> {
        if !map.is_open_at(x, y) {
            return Err(RaycastError::BlockedStart { x, y });
        }
        Ok(Self {
            x,
            y,
            heading,
            fov,
            turn_step: DEFAULT_TURN_STEP,
            move_step: DEFAULT_MOVE_STEP,
        })
    }

    pub fn with_turn_step(mut self, turns: f32) -> Self {
        self.turn_step = turns;
        self
    }

    pub fn with_move_step(mut self, units: f32) -> Self {
        self.move_step = units;
        self
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn handle_command(&mut self, command: Command, map: &GridMap) {
        match command {
            Command::Forward => self.move_forward(map),
            Command::Backward => self.move_backward(map),
            Command::TurnLeft => self.turn_left(),
            Command::TurnRight => self.turn_right(),
        }
    }

    pub fn move_forward(&mut self, map: &GridMap) {
        self.try_move(self.move_step, map);
    }

    pub fn move_backward(&mut self, map: &GridMap) {
        self.try_move(-self.move_step, map);
    }

    fn try_move(&mut self, distance: f32, map: &GridMap) {
        let nx = self.x + distance * self.heading.cos();
        let ny = self.y + distance * self.heading.sin();
        if map.is_open_at(nx, ny) {
            self.x = nx;
            self.y = ny;
        } else {
            trace!(x = nx, y = ny, "move blocked");
        }
    }

    // Heading is stepped as a counter of full turns so both directions share
    // the same wrap bound.
    pub fn turn_right(&mut self) {
        let mut turns = self.heading / TAU + self.turn_step;
        if turns > TURN_WRAP {
            turns -= TURN_WRAP;
        }
        self.heading = turns * TAU;
    }

    pub fn turn_left(&mut self) {
        let mut turns = self.heading / TAU - self.turn_step;
        if turns < 0.0 {
            turns = TURN_WRAP - turns.abs();
        }
        self.heading = turns * TAU;
    }
}
