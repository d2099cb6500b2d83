/// GameWorld: one agent on a square grid, walking toward a fixed goal.
///
/// ## State
///
///   - `size`   — grid is `size × size`, fixed at construction
///   - `x, y`   — agent position, always inside the grid
///   - `goal`   — target cell, fixed at construction
///   - `status` — running until the first win / crash / error
///   - `path`   — every cell the agent has occupied, starting with (0, 0)
///
/// ## Invariants
///
///   - `path[0] == (0, 0)` and the last entry is always `(x, y)`.
///   - Consecutive path entries differ by one orthogonal unit step.
///   - Once status is terminal, position and path are frozen.
///   - `status == Win` iff the agent's last legal move landed on `goal`.
///
/// All position/status changes go through `sim::step`. The world never
/// fails: illegal moves are a `Crash` status, script faults are recorded
/// via `fail()`.

use log::debug;

use crate::domain::direction::Direction;
use crate::domain::status::Status;
use crate::sim::event::MoveEvent;
use crate::sim::snapshot::Snapshot;
use crate::sim::step;

pub const DEFAULT_SIZE: usize = 5;
pub const DEFAULT_GOAL: (usize, usize) = (4, 4);
pub const START: (usize, usize) = (0, 0);

#[derive(Clone, Debug)]
pub struct GameWorld {
    pub(super) size: usize,
    pub(super) x: usize,
    pub(super) y: usize,
    pub(super) goal: (usize, usize),
    pub(super) status: Status,
    pub(super) path: Vec<(usize, usize)>,
}

// ── Construction ──

impl GameWorld {
    /// Fresh world with the agent on (0, 0).
    ///
    /// `size` must be at least 1 and `goal` must lie inside the grid;
    /// `GameConfig` validates both before a world is ever built.
    pub fn new(size: usize, goal: (usize, usize)) -> Self {
        debug_assert!(size >= 1);
        debug_assert!(goal.0 < size && goal.1 < size);
        GameWorld {
            size,
            x: START.0,
            y: START.1,
            goal,
            status: Status::Running,
            path: vec![START],
        }
    }
}

impl Default for GameWorld {
    fn default() -> Self {
        GameWorld::new(DEFAULT_SIZE, DEFAULT_GOAL)
    }
}

// ── Mutators ──

impl GameWorld {
    pub fn move_up(&mut self) {
        self.apply(Direction::Up);
    }

    pub fn move_down(&mut self) {
        self.apply(Direction::Down);
    }

    pub fn move_left(&mut self) {
        self.apply(Direction::Left);
    }

    pub fn move_right(&mut self) {
        self.apply(Direction::Right);
    }

    /// The named mutator a script entry point is bound to.
    pub fn mutator(dir: Direction) -> fn(&mut GameWorld) {
        match dir {
            Direction::Up => GameWorld::move_up,
            Direction::Down => GameWorld::move_down,
            Direction::Left => GameWorld::move_left,
            Direction::Right => GameWorld::move_right,
        }
    }
}

impl GameWorld {
    /// Apply one directional command and report what happened.
    pub fn apply(&mut self, dir: Direction) -> MoveEvent {
        let event = step::step(self, dir);
        debug!("{} -> {:?}", dir.entry_point(), event);
        event
    }

    /// Record a script fault. Ignored if the world is already terminal,
    /// so the first terminal status is the one that sticks.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status.is_terminal() {
            debug!("fault after terminal status {} ignored", self.status);
            return;
        }
        self.status = Status::Error(message.into());
    }
}

// ── Queries ──

#[allow(dead_code)]
impl GameWorld {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn goal(&self) -> (usize, usize) {
        self.goal
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn path(&self) -> &[(usize, usize)] {
        &self.path
    }

    /// Owned copy of the current state. Safe to call at any point.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            x: self.x,
            y: self.y,
            goal: self.goal,
            path: self.path.clone(),
            status: self.status.clone(),
        }
    }
}
