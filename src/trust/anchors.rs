//! Trust anchor construction
//!
//! A pinned configuration trusts exactly one CA. The anchor set is built
//! once from that certificate and shared read-only by every verifier that
//! references it. rustls converts the certificate into a webpki trust
//! anchor at insertion time, which is where incompatible certificates are
//! rejected.

use std::sync::Arc;

use rustls::RootCertStore;

use crate::certificate::Certificate;
use crate::errors::TrustBuildError;

/// An immutable set of trust anchors containing exactly one CA.
#[derive(Debug, Clone)]
pub struct TrustAnchorSet {
    roots: Arc<RootCertStore>,
}

impl TrustAnchorSet {
    /// Build an anchor set whose only root of trust is `ca`.
    ///
    /// # Errors
    ///
    /// [`TrustBuildError::AnchorSetFailure`] when the certificate cannot
    /// be converted into a trust-anchor entry.
    pub fn single(ca: &Certificate) -> Result<Self, TrustBuildError> {
        let mut roots = RootCertStore::empty();
        roots
            .add(ca.der().clone())
            .map_err(|e| TrustBuildError::AnchorSetFailure(e.to_string()))?;

        Ok(Self {
            roots: Arc::new(roots),
        })
    }

    /// Shared handle to the underlying root store.
    pub(crate) fn roots(&self) -> Arc<RootCertStore> {
        Arc::clone(&self.roots)
    }

    /// Number of anchors in the set; always 1 for pinned configurations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether the set is empty; never true for a constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
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
    fn holds_exactly_one_anchor() {
        let anchors = TrustAnchorSet::single(&test_ca()).expect("anchor set");
        assert_eq!(anchors.len(), 1);
        assert!(!anchors.is_empty());
    }

    #[test]
    fn clones_share_the_same_store() {
        let anchors = TrustAnchorSet::single(&test_ca()).expect("anchor set");
        let clone = anchors.clone();
        assert!(Arc::ptr_eq(&anchors.roots(), &clone.roots()));
    }
}
