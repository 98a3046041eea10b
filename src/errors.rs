//! Typed failures for certificate loading and pinned-context construction

/// Errors raised while loading a CA certificate from raw bytes.
#[derive(Debug, thiserror::Error)]
pub enum CertError {
    /// The input did not contain exactly one well-formed X.509 certificate.
    #[error("malformed certificate: {0}")]
    Malformed(String),
    /// The certificate source could not be read.
    #[error("certificate read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while building a pinned TLS client configuration.
///
/// Each variant names the construction step that failed. None of them
/// leaves a usable configuration behind; there is no fallback to default
/// trust on any of these paths.
#[derive(Debug, thiserror::Error)]
pub enum TrustBuildError {
    /// The certificate could not be converted into a trust-anchor entry.
    #[error("trust anchor set rejected certificate: {0}")]
    AnchorSetFailure(String),
    /// The chain-validation engine could not be initialized against the
    /// anchor set.
    #[error("chain verifier initialization failed: {0}")]
    ValidatorInitFailure(String),
    /// The TLS client context could not be initialized with the verifier.
    #[error("TLS client context initialization failed: {0}")]
    ContextInitFailure(String),
}

/// Errors raised by [`fetch`](crate::probe::fetch) connection attempts.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The target could not be parsed as a URL with host and port.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// The URL scheme is neither `http` nor `https`.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    /// The unpinned fallback TLS configuration could not be built.
    #[error("TLS configuration failed: {0}")]
    Tls(String),
    /// The response could not be parsed as HTTP.
    #[error("malformed HTTP response: {0}")]
    Protocol(String),
    /// The server answered with a non-success status code.
    #[error("server returned status {0}")]
    Status(u16),
    /// Connecting, handshaking, or transferring failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
