use serde::Serialize;
use std::fmt;

/// Lifecycle of one runner invocation
///
/// `Built -> Submitted -> Pending -> Confirmed`, with `Failed` reachable
/// from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    Built,
    Submitted,
    Pending,
    Confirmed,
    Failed,
}

impl TransactionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }

    pub fn can_transition_to(&self, next: TransactionState) -> bool {
        use TransactionState::*;
        matches!(
            (self, next),
            (Built, Submitted)
                | (Submitted, Pending)
                | (Pending, Confirmed)
                | (Built | Submitted | Pending, Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Built => "built",
            Self::Submitted => "submitted",
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::TransactionState::*;

    #[test]
    fn test_happy_path_transitions() {
        assert!(Built.can_transition_to(Submitted));
        assert!(Submitted.can_transition_to(Pending));
        assert!(Pending.can_transition_to(Confirmed));
    }

    #[test]
    fn test_no_skipping_or_leaving_terminal_states() {
        assert!(!Built.can_transition_to(Pending));
        assert!(!Built.can_transition_to(Confirmed));
        assert!(!Submitted.can_transition_to(Confirmed));
        assert!(!Confirmed.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Built));
        for state in [Built, Submitted, Pending] {
            assert!(state.can_transition_to(Failed));
            assert!(!state.is_terminal());
        }
    }
}
