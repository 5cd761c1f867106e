pub mod dfa;
pub mod equivalence;
pub mod error;
pub mod nfa;
pub mod state_set;

pub use dfa::Dfa;
pub use error::AutomatonError;
pub use nfa::Nfa;
pub use state_set::StateSet;
