/// Single-move transition: the one place world position and status change
/// in response to a directional command.
///
/// Order of checks:
///   1. Terminal status          → ignored, nothing changes
///   2. Target cell off the grid → crash, position and path untouched
///   3. Otherwise                → move, append to path, then goal check
///
/// Crash and win can never fire on the same call: crash only happens when
/// the agent does not move, win only after it has moved.

use crate::domain::direction::Direction;
use crate::domain::status::Status;
use crate::sim::event::MoveEvent;
use crate::sim::world::GameWorld;

pub fn step(world: &mut GameWorld, dir: Direction) -> MoveEvent {
    if world.status.is_terminal() {
        return MoveEvent::Ignored { dir };
    }

    let Some((x, y)) = dir.apply((world.x, world.y), world.size) else {
        world.status = Status::Crash;
        return MoveEvent::Crashed { dir, x: world.x, y: world.y };
    };

    world.x = x;
    world.y = y;
    world.path.push((x, y));

    if (x, y) == world.goal {
        world.status = Status::Win;
        MoveEvent::ReachedGoal { dir, x, y }
    } else {
        MoveEvent::Moved { dir, x, y }
    }
}
