//! TLS certificate pinning for outbound client connections
//!
//! Restricts server-certificate validation to a single, caller-supplied
//! certificate authority instead of the platform trust store. The
//! pipeline is build-once, use-many-times: raw certificate bytes become a
//! [`Certificate`], which becomes an immutable [`PinnedTlsConfig`] whose
//! handshakes trust only chains rooted at that CA.
//!
//! Every value in the pipeline is immutable after construction and safe
//! to share across threads without locking. Failures are typed and fail
//! closed: there is no code path that substitutes default trust when
//! pinned construction fails.
//!
//! ```no_run
//! use pinned_tls::{Certificate, PinnedTlsConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let ca_bytes: &[u8] = &[];
//! let ca = Certificate::from_bytes(ca_bytes)?;
//! let config = PinnedTlsConfig::build(ca)?;
//! let connector = config.connector();
//! # Ok(())
//! # }
//! ```

pub mod certificate;
pub mod config;
pub mod errors;
pub mod probe;
pub mod trust;

pub use certificate::{Certificate, CertificateSummary};
pub use config::PinnedTlsConfig;
pub use errors::{CertError, ProbeError, TrustBuildError};
pub use probe::fetch;
pub use trust::{PinnedChainVerifier, TrustAnchorSet};
