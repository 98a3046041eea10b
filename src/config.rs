//! Pinned TLS client configuration
//!
//! Assembles the anchor set, chain verifier, and rustls client context
//! into one immutable artifact. Construction fails closed: any error
//! leaves the caller with no configuration rather than a permissive one.

use std::fmt;
use std::sync::Arc;

use rustls::ClientConfig;
use tokio_rustls::TlsConnector;

use crate::certificate::Certificate;
use crate::errors::TrustBuildError;
use crate::trust::{PinnedChainVerifier, TrustAnchorSet};

/// An immutable TLS client configuration that trusts exactly one CA.
///
/// Cheap to clone and safe to share across tasks; every connection opened
/// through it validates the peer chain against the pinned CA alone.
/// Cipher suites and key exchange stay at rustls defaults — pinning
/// restricts trust, not cryptographic parameter selection.
#[derive(Clone)]
pub struct PinnedTlsConfig {
    config: Arc<ClientConfig>,
}

impl PinnedTlsConfig {
    /// Build a pinned configuration around `ca`.
    ///
    /// Anchors, verifier, and client context are constructed in that
    /// order, with early exit on the first failure.
    ///
    /// # Errors
    ///
    /// One of the [`TrustBuildError`] variants naming the step that
    /// failed. No variant leaves a usable configuration behind.
    pub fn build(ca: Certificate) -> Result<Self, TrustBuildError> {
        let subject = ca.summary().subject_cn().map(str::to_owned);

        let anchors = TrustAnchorSet::single(&ca)?;
        let verifier = PinnedChainVerifier::new(&anchors)?;

        // rustls gates custom verifiers behind dangerous(); the verifier
        // installed here replaces the default trust store with the pinned
        // anchor set, it is never merged with it.
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let config = ClientConfig::builder_with_provider(provider)
            .with_protocol_versions(rustls::ALL_VERSIONS)
            .map_err(|e| TrustBuildError::ContextInitFailure(e.to_string()))?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(verifier))
            .with_no_client_auth();

        tracing::info!(ca = ?subject, "pinned TLS client configuration built");

        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Shared rustls configuration, for callers integrating with rustls
    /// directly.
    #[must_use]
    pub fn client_config(&self) -> Arc<ClientConfig> {
        Arc::clone(&self.config)
    }

    /// Session negotiator for outbound connections.
    #[must_use]
    pub fn connector(&self) -> TlsConnector {
        TlsConnector::from(Arc::clone(&self.config))
    }
}

impl fmt::Debug for PinnedTlsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinnedTlsConfig").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ca() -> Certificate {
        let mut params = rcgen::CertificateParams::new(Vec::new()).expect("ca params");
        params.is_ca = rcgen::IsCa::Ca(rcgen::BasicConstraints::Unconstrained);
        let key = rcgen::KeyPair::generate().expect("ca key");
        let cert = params.self_signed(&key).expect("self-signed ca");
        Certificate::from_bytes(cert.pem().as_bytes()).expect("load ca")
    }

    #[test]
    fn builds_from_valid_ca() {
        let config = PinnedTlsConfig::build(test_ca()).expect("build pinned config");
        let _ = config.connector();
    }

    #[test]
    fn clones_share_the_same_context() {
        let config = PinnedTlsConfig::build(test_ca()).expect("build pinned config");
        let clone = config.clone();
        assert!(Arc::ptr_eq(&config.client_config(), &clone.client_config()));
    }
}
