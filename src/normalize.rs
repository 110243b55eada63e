use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha1::{Digest, Sha1};

use crate::error::NormalizeError;
use crate::key::{KeyFormat, PrivateKeyMaterial};
use crate::pem_utils::{self, PemContainer};
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// PEM label used when re-armoring a [`Pkcs8Output`].
pub const PKCS8_PEM_LABEL: &str = "PRIVATE KEY";

/// An unencrypted PKCS#8 `PrivateKeyInfo`, DER-encoded.
///
/// The bytes are secret key material; the `Debug` impl only reports the length.
#[derive(Clone, PartialEq, Eq)]
pub struct Pkcs8Output(Vec<u8>);

impl Pkcs8Output {
    /// The DER bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Standard, padded base64 of the DER bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Wraps the DER bytes in a `PRIVATE KEY` PEM block.
    pub fn to_pem(&self) -> String {
        pem_utils::der_to_pem(&self.0, PKCS8_PEM_LABEL)
    }
}

impl AsRef<[u8]> for Pkcs8Output {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Pkcs8Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pkcs8Output({} bytes)", self.0.len())
    }
}

/// Converts a PEM-encoded private key into unencrypted PKCS#8 DER.
///
/// Only the first PEM block of `pem_text` is considered. Accepted labels are
/// `RSA PRIVATE KEY` (PKCS#1), `EC PRIVATE KEY` (SEC1) and `PRIVATE KEY`
/// (PKCS#8). PKCS#8 input wrapping an RSA or EC key is returned unchanged.
///
/// # Errors
/// * `InvalidPem` - no decodable PEM block.
/// * `EncryptedKeyUnsupported` - the block is encrypted. Checked before the
///   payload is looked at.
/// * `UnsupportedPemLabel` - any label outside the accepted set.
/// * `MalformedKey` - the payload does not parse under the label's format.
/// * `UnsupportedKeyType` - a PKCS#8 key that is neither RSA nor EC.
/// * `EncodingFailure` - a parsed key could not be re-encoded.
pub fn convert(pem_text: &[u8]) -> Result<Pkcs8Output> {
    let container = PemContainer::decode(pem_text).inspect_err(|e| {
        tracing::debug!(error = %e, "no PEM block found");
    })?;

    if container.is_encrypted() {
        tracing::warn!(label = container.label(), "rejecting encrypted private key");
        return Err(NormalizeError::EncryptedKeyUnsupported);
    }

    let Some(format) = KeyFormat::from_label(container.label()) else {
        return Err(NormalizeError::UnsupportedPemLabel(
            container.label().to_string(),
        ));
    };
    tracing::debug!(%format, "decoded PEM private key");

    let der = match format {
        KeyFormat::Pkcs1Rsa => {
            PrivateKeyMaterial::from_pkcs1_der(container.payload())?.to_pkcs8_der()?
        }
        KeyFormat::Sec1Ec => {
            PrivateKeyMaterial::from_sec1_der(container.payload())?.to_pkcs8_der()?
        }
        KeyFormat::Pkcs8 => {
            let key = PrivateKeyMaterial::from_pkcs8_der(container.payload())?;
            tracing::debug!(algorithm = key.algorithm(), "PKCS#8 key passed through");
            container.into_payload()
        }
    };

    Ok(Pkcs8Output(der))
}

/// Derives a stable identifier from PEM source text.
///
/// The identifier is the lowercase hex SHA-1 of the trimmed text, or the empty
/// string when the trimmed text is empty. It fingerprints the text, not the
/// key: two encodings of the same key get different identifiers.
pub fn derive_identifier(source_text: &str) -> String {
    let trimmed = source_text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    format!("{:x}", Sha1::digest(trimmed.as_bytes()))
}
