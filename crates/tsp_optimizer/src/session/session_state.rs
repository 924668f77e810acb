use std::fmt;

use serde::Serialize;

/// Lifecycle of a session. Only moves forward, terminal states are final.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SessionState {
    Initialized,
    Running,
    Finished,
    StoppedByUser,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Finished | SessionState::StoppedByUser)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Initialized => write!(f, "initialized"),
            SessionState::Running => write!(f, "running"),
            SessionState::Finished => write!(f, "finished"),
            SessionState::StoppedByUser => write!(f, "stopped by user"),
        }
    }
}
