/// Run status of a world.
///
/// `Running` is the only non-terminal state. The other three are
/// absorbing: once entered, nothing moves the world again.
///
/// On the wire a status is a plain string: `"running"`, `"win"`,
/// `"crash"`, or `"error: <diagnostic>"`.

use std::fmt;

use serde::{Serialize, Serializer};

pub const ERROR_PREFIX: &str = "error: ";

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum Status {
    #[default]
    Running,
    Win,
    Crash,
    Error(String),
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Running)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Running => f.write_str("running"),
            Status::Win => f.write_str("win"),
            Status::Crash => f.write_str("crash"),
            Status::Error(msg) => write!(f, "{ERROR_PREFIX}{msg}"),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_running_is_non_terminal() {
        assert!(!Status::Running.is_terminal());
        assert!(Status::Win.is_terminal());
        assert!(Status::Crash.is_terminal());
        assert!(Status::Error("x".into()).is_terminal());
    }

    #[test]
    fn error_carries_prefix_on_the_wire() {
        let s = Status::Error("Function not found: jump ()".into());
        assert_eq!(s.to_string(), "error: Function not found: jump ()");
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            "\"error: Function not found: jump ()\""
        );
    }
}
