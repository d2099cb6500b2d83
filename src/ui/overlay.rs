/// Status overlay text shown after a replay finishes.

use crate::domain::status::Status;
use crate::sim::snapshot::Snapshot;

pub fn overlay_message(snap: &Snapshot) -> Option<String> {
    match &snap.status {
        Status::Win => Some("You win!".to_string()),
        Status::Crash => Some("You hit a wall!".to_string()),
        Status::Error(msg) => Some(format!("Error: {msg}")),
        Status::Running if !snap.at_goal() => Some("You failed! Please try again.".to_string()),
        Status::Running => None,
    }
}
