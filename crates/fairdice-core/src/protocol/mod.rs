//! Commit-reveal fair random protocol.

mod coordinator;
mod messages;
mod types;

pub use coordinator::{FairRandomCoordinator, ProtocolError};
pub use messages::{combine, CommitMessage, FairRandomResult, RevealMessage};
pub use types::{Actor, Outcome, ProtocolPhase, RunId};
