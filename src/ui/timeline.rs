/// Replay schedule: when each path cell should be shown.
///
/// Playback waits one `step_delay` before every cell, including the first,
/// so cell `i` appears at `(i + 1) * step_delay` from the start.

use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Frame {
    pub cell: (usize, usize),
    pub at: Duration,
}

pub fn timeline(path: &[(usize, usize)], step_delay: Duration) -> Vec<Frame> {
    path.iter()
        .enumerate()
        .map(|(i, &cell)| {
            let n = u32::try_from(i + 1).unwrap_or(u32::MAX);
            Frame { cell, at: step_delay.saturating_mul(n) }
        })
        .collect()
}
