use crate::viewer::{Command, Viewer};
use crate::world::GridMap;

/// Everything that changes between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    pub viewer: Viewer,
}

impl GameState {
    pub fn new(viewer: Viewer) -> Self {
        Self { viewer }
    }
}

/// Apply one tick's commands in order and return the next state.
pub fn tick(state: &GameState, commands: &[Command], map: &GridMap) -> GameState {
    let mut next = *state;
    for &command in commands {
        next.viewer.handle_command(command, map);
    }
    next
}
