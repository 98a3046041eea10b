//! Pinned certificate-chain verification
//!
//! Wraps the webpki-backed rustls verifier so that chain validation runs
//! against the pinned anchor set and nothing else. The wrapper never
//! consults `webpki-roots` or the platform store, and there is no fallback
//! path: a chain that does not terminate at the pinned CA is rejected.

use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::client::WebPkiServerVerifier;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, SignatureScheme};

use crate::errors::TrustBuildError;

use super::anchors::TrustAnchorSet;

/// Server certificate verifier scoped to a single pinned CA.
///
/// Stateless across handshakes; the same verifier gives the same decision
/// for the same presented chain every time.
#[derive(Debug)]
pub struct PinnedChainVerifier {
    inner: Arc<WebPkiServerVerifier>,
}

impl PinnedChainVerifier {
    /// Build a verifier whose only roots are the given anchor set.
    ///
    /// # Errors
    ///
    /// [`TrustBuildError::ValidatorInitFailure`] when the webpki verifier
    /// cannot be initialized against the anchors.
    pub fn new(anchors: &TrustAnchorSet) -> Result<Self, TrustBuildError> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let inner = WebPkiServerVerifier::builder_with_provider(anchors.roots(), provider)
            .build()
            .map_err(|e| TrustBuildError::ValidatorInitFailure(e.to_string()))?;

        Ok(Self { inner })
    }
}

impl ServerCertVerifier for PinnedChainVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        match self.inner.verify_server_cert(
            end_entity,
            intermediates,
            server_name,
            ocsp_response,
            now,
        ) {
            Ok(verified) => {
                tracing::debug!(server = ?server_name, "peer chain verified against pinned CA");
                Ok(verified)
            }
            Err(e) => {
                tracing::warn!(server = ?server_name, error = %e, "peer chain rejected by pinned CA");
                Err(e)
            }
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls12_signature(message, cert, dss)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls13_signature(message, cert, dss)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::Certificate;

    fn test_anchors() -> TrustAnchorSet {
        let mut params = rcgen::CertificateParams::new(Vec::new()).expect("ca params");
        params.is_ca = rcgen::IsCa::Ca(rcgen::BasicConstraints::Unconstrained);
        let key = rcgen::KeyPair::generate().expect("ca key");
        let cert = params.self_signed(&key).expect("self-signed ca");
        let ca = Certificate::from_bytes(cert.pem().as_bytes()).expect("load ca");
        TrustAnchorSet::single(&ca).expect("anchor set")
    }

    #[test]
    fn builds_against_single_anchor() {
        let verifier = PinnedChainVerifier::new(&test_anchors()).expect("verifier");
        assert!(!verifier.supported_verify_schemes().is_empty());
    }
}
