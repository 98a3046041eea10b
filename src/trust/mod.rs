//! Trust anchor set and pinned chain verification
//!
//! Middle layer of the pinning pipeline: a one-element anchor set built
//! from the loaded CA, and a chain verifier that answers accept/reject
//! for presented peer chains using that set as its only roots.

mod anchors;
mod verifier;

pub use anchors::TrustAnchorSet;
pub use verifier::PinnedChainVerifier;
