/// Movement directions and the script entry points bound to them.
/// Grid coordinates grow right (+x) and down (+y); (0, 0) is the top-left cell.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step as (dx, dy).
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Name of the function a script calls to move this way.
    pub fn entry_point(self) -> &'static str {
        match self {
            Direction::Up => "move_up",
            Direction::Down => "move_down",
            Direction::Left => "move_left",
            Direction::Right => "move_right",
        }
    }

    /// Cell one step away from `(x, y)`, or `None` if it lies off a
    /// `size × size` grid.
    pub fn apply(self, (x, y): (usize, usize), size: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.delta();
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        let limit = size as i64;
        if nx < 0 || ny < 0 || nx >= limit || ny >= limit {
            None
        } else {
            Some((nx as usize, ny as usize))
        }
    }
}
