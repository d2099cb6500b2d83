/// Serializable view of a world, handed to whoever replays the run.
///
/// JSON shape:
///   ```json
///   {"x":4,"y":4,"goal":[4,4],"path":[[0,0],[1,0],...],"status":"win"}
///   ```
/// Coordinate pairs are arrays; status is a plain string (see `Status`).

use serde::Serialize;

use crate::domain::status::Status;

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Snapshot {
    pub x: usize,
    pub y: usize,
    pub goal: (usize, usize),
    pub path: Vec<(usize, usize)>,
    pub status: Status,
}

impl Snapshot {
    pub fn at_goal(&self) -> bool {
        (self.x, self.y) == self.goal
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
