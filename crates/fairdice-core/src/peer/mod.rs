//! Peer contribution capability and a scripted implementation.

mod mock;
mod traits;

pub use mock::ScriptedPeer;
pub use traits::{PeerContributionProvider, PeerError};
