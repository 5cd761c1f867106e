use std::fmt::{self};

#[derive(Debug, PartialEq, Eq)]
pub enum AutomatonError {
    UnknownStartState,
    UnknownAcceptState,
    UnknownTransitionState,
    UnknownTransitionSymbol,
    UnknownEpsilonState,
    ConflictingTransition,
}

impl fmt::Display for AutomatonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomatonError::UnknownStartState => {
                write!(f, "The start state is not among the declared states.")
            }
            AutomatonError::UnknownAcceptState => {
                write!(f, "An accept state is not among the declared states.")
            }
            AutomatonError::UnknownTransitionState => {
                write!(f, "A transition refers to a state that is not declared.")
            }
            AutomatonError::UnknownTransitionSymbol => {
                write!(f, "A transition uses a symbol that is not in the alphabet.")
            }
            AutomatonError::UnknownEpsilonState => {
                write!(f, "An epsilon edge refers to a state that is not declared.")
            }
            AutomatonError::ConflictingTransition => {
                write!(
                    f,
                    "Two transitions from the same state on the same symbol lead to different states."
                )
            }
        }
    }
}

impl std::error::Error for AutomatonError {}
