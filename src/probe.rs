//! Connection probing with optional pinning
//!
//! Minimal HTTP/1.0 GET used to exercise a pinned configuration against a
//! live endpoint. Pinning applies only to `https` targets: a plain `http`
//! fetch behaves identically whether or not a pinned configuration is
//! supplied, and other schemes are refused before any connection opens.

use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use url::Url;

use crate::config::PinnedTlsConfig;
use crate::errors::ProbeError;

/// Fetch `target` and return the response body.
///
/// For `https` targets the handshake validates the peer chain against
/// `pinned` when one is supplied, or against the bundled webpki roots
/// otherwise. For `http` targets `pinned` is ignored entirely.
///
/// # Errors
///
/// [`ProbeError::InvalidUrl`] or [`ProbeError::UnsupportedScheme`] for a
/// bad target, [`ProbeError::Status`] on a non-success response,
/// [`ProbeError::Io`] when connecting, handshaking, or transferring
/// fails. A rejected handshake never delivers a payload.
pub async fn fetch(target: &str, pinned: Option<&PinnedTlsConfig>) -> Result<Vec<u8>, ProbeError> {
    let url = Url::parse(target).map_err(|e| ProbeError::InvalidUrl(format!("{target}: {e}")))?;

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ProbeError::UnsupportedScheme(scheme.to_string()));
    }

    let host = url
        .host_str()
        .ok_or_else(|| ProbeError::InvalidUrl(format!("{target}: missing host")))?
        .to_owned();
    let port = url
        .port_or_known_default()
        .ok_or_else(|| ProbeError::InvalidUrl(format!("{target}: missing port")))?;

    let request = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nConnection: close\r\n\r\n",
        url.path(),
        host
    );

    let stream = TcpStream::connect((host.as_str(), port)).await?;

    let response = if scheme == "https" {
        let connector = match pinned {
            Some(config) => config.connector(),
            None => default_connector()?,
        };
        let server_name = ServerName::try_from(host.clone())
            .map_err(|e| ProbeError::InvalidUrl(format!("{target}: {e}")))?;
        let tls = connector.connect(server_name, stream).await?;
        tracing::debug!(%host, port, pinned = pinned.is_some(), "TLS session established");
        exchange(tls, &request).await?
    } else {
        exchange(stream, &request).await?
    };

    split_body(&response)
}

/// Unpinned fallback trusting the bundled webpki roots.
fn default_connector() -> Result<TlsConnector, ProbeError> {
    let roots: RootCertStore = webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ClientConfig::builder_with_provider(provider)
        .with_protocol_versions(rustls::ALL_VERSIONS)
        .map_err(|e| ProbeError::Tls(e.to_string()))?
        .with_root_certificates(roots)
        .with_no_client_auth();

    Ok(TlsConnector::from(Arc::new(config)))
}

async fn exchange<S>(mut stream: S, request: &str) -> Result<Vec<u8>, ProbeError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(request.as_bytes()).await?;
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await?;
    Ok(response)
}

/// Strip the status line and headers, checking for a success status.
fn split_body(response: &[u8]) -> Result<Vec<u8>, ProbeError> {
    let header_end = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or_else(|| ProbeError::Protocol("missing header terminator".to_string()))?;

    let head = &response[..header_end];
    let status_line = head.split(|&b| b == b'\r').next().unwrap_or(head);
    let status = std::str::from_utf8(status_line)
        .ok()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| ProbeError::Protocol("malformed status line".to_string()))?;

    if !(200..300).contains(&status) {
        return Err(ProbeError::Status(status));
    }

    Ok(response[header_end + 4..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_unsupported_scheme() {
        let result = fetch("ftp://example.com/file", None).await;
        assert!(matches!(result, Err(ProbeError::UnsupportedScheme(_))));
    }

    #[tokio::test]
    async fn rejects_unparseable_target() {
        let result = fetch("not a url at all", None).await;
        assert!(matches!(result, Err(ProbeError::InvalidUrl(_))));
    }

    #[test]
    fn split_body_returns_payload_on_success() {
        let response = b"HTTP/1.0 200 OK\r\nContent-Length: 5\r\n\r\nhello";
        let body = split_body(response).expect("body");
        assert_eq!(body, b"hello");
    }

    #[test]
    fn split_body_surfaces_error_status() {
        let response = b"HTTP/1.0 404 Not Found\r\n\r\n";
        assert!(matches!(split_body(response), Err(ProbeError::Status(404))));
    }

    #[test]
    fn split_body_rejects_non_http() {
        assert!(matches!(
            split_body(b"random bytes"),
            Err(ProbeError::Protocol(_))
        ));
    }
}
