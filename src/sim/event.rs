/// Events emitted by a single move call.
/// The executor logs these; tests use them to observe transitions.

use crate::domain::direction::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(dead_code)]
pub enum MoveEvent {
    /// Legal move onto a non-goal cell.
    Moved { dir: Direction, x: usize, y: usize },
    /// Legal move onto the goal cell. The world is now won.
    ReachedGoal { dir: Direction, x: usize, y: usize },
    /// Move would leave the grid. The agent stays at (x, y).
    Crashed { dir: Direction, x: usize, y: usize },
    /// World was already terminal; nothing happened.
    Ignored { dir: Direction },
}
