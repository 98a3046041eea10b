//! Subject and validity extraction from parsed certificates
//!
//! Pulls distinguished-name attributes and the validity window out of an
//! `x509-cert` structure. Chain validation never consults these fields;
//! they exist so callers and logs can identify which CA is pinned.

use std::collections::HashMap;
use std::time::SystemTime;

use der::asn1::{Ia5StringRef, PrintableStringRef, Utf8StringRef};
use x509_cert::Certificate as X509Certificate;

/// Read-only summary of a parsed certificate.
#[derive(Debug, Clone)]
pub struct CertificateSummary {
    /// Subject DN attributes keyed by short name (CN, O, OU, C, ST, L).
    pub subject: HashMap<String, String>,
    /// Issuer DN attributes keyed by short name.
    pub issuer: HashMap<String, String>,
    /// Serial number as lowercase hex.
    pub serial_number: String,
    /// Start of the validity period.
    pub not_before: SystemTime,
    /// End of the validity period.
    pub not_after: SystemTime,
}

impl CertificateSummary {
    pub(crate) fn from_x509(cert: &X509Certificate) -> Self {
        let mut subject = HashMap::new();
        extract_name_attributes(&cert.tbs_certificate.subject, &mut subject);

        let mut issuer = HashMap::new();
        extract_name_attributes(&cert.tbs_certificate.issuer, &mut issuer);

        let validity = &cert.tbs_certificate.validity;

        Self {
            subject,
            issuer,
            serial_number: hex::encode(cert.tbs_certificate.serial_number.as_bytes()),
            not_before: validity.not_before.to_system_time(),
            not_after: validity.not_after.to_system_time(),
        }
    }

    /// Subject common name, when the certificate carries one.
    #[must_use]
    pub fn subject_cn(&self) -> Option<&str> {
        self.subject.get("CN").map(String::as_str)
    }

    /// Issuer common name, when the certificate carries one.
    #[must_use]
    pub fn issuer_cn(&self) -> Option<&str> {
        self.issuer.get("CN").map(String::as_str)
    }
}

/// Extract DN attributes from an `x509-cert` Name structure.
fn extract_name_attributes(name: &x509_cert::name::Name, attrs: &mut HashMap<String, String>) {
    const OID_CN: &str = "2.5.4.3"; // commonName
    const OID_O: &str = "2.5.4.10"; // organizationName
    const OID_OU: &str = "2.5.4.11"; // organizationalUnitName
    const OID_C: &str = "2.5.4.6"; // countryName
    const OID_ST: &str = "2.5.4.8"; // stateOrProvinceName
    const OID_L: &str = "2.5.4.7"; // localityName

    for rdn in &name.0 {
        for atv in rdn.0.iter() {
            // DN values come in several ASN.1 string flavors; try each.
            let string_value = if let Ok(ps) = PrintableStringRef::try_from(&atv.value) {
                Some(ps.to_string())
            } else if let Ok(utf8s) = Utf8StringRef::try_from(&atv.value) {
                Some(utf8s.to_string())
            } else if let Ok(ia5s) = Ia5StringRef::try_from(&atv.value) {
                Some(ia5s.to_string())
            } else {
                None
            };

            let Some(value) = string_value else { continue };

            let key = match atv.oid.to_string().as_str() {
                OID_CN => "CN",
                OID_O => "O",
                OID_OU => "OU",
                OID_C => "C",
                OID_ST => "ST",
                OID_L => "L",
                _ => continue,
            };
            attrs.insert(key.to_string(), value);
        }
    }
}
