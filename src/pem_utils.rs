use crate::error::NormalizeError;

/// Header carrying the legacy (RFC 1421) encryption marker.
const PROC_TYPE_HEADER: &str = "Proc-Type";
/// Value of [`PROC_TYPE_HEADER`] on an encrypted block.
const PROC_TYPE_ENCRYPTED: &str = "4,ENCRYPTED";
/// Label of a PKCS#8 `EncryptedPrivateKeyInfo` block.
pub const ENCRYPTED_PKCS8_LABEL: &str = "ENCRYPTED PRIVATE KEY";

/// A labeled binary block extracted from PEM armor.
///
/// The payload stays opaque until the label and headers have decided whether
/// it is eligible for parsing.
pub struct PemContainer {
    inner: pem::Pem,
}

impl PemContainer {
    /// Decodes the first PEM block found in `input`.
    ///
    /// Text before the first `-----BEGIN` line and any block after the first
    /// one are ignored.
    pub fn decode(input: &[u8]) -> Result<Self, NormalizeError> {
        let inner = pem::parse(input)?;
        Ok(Self { inner })
    }

    /// The block label, e.g. `RSA PRIVATE KEY`.
    pub fn label(&self) -> &str {
        self.inner.tag()
    }

    /// Looks up a header field by its exact (case-sensitive) name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.inner.headers().get(key)
    }

    /// Returns `true` when the block is encrypted, either via the legacy
    /// `Proc-Type: 4,ENCRYPTED` header or as a PKCS#8 `ENCRYPTED PRIVATE KEY`.
    pub fn is_encrypted(&self) -> bool {
        self.header(PROC_TYPE_HEADER) == Some(PROC_TYPE_ENCRYPTED)
            || self.label() == ENCRYPTED_PKCS8_LABEL
    }

    /// The raw DER payload.
    pub fn payload(&self) -> &[u8] {
        self.inner.contents()
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.inner.into_contents()
    }
}

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(&pem, pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF))
}
