//! Error types returned by the normalizer.

use thiserror::Error;

use crate::key::KeyFormat;

/// Represents errors that can occur while normalizing a private key.
///
/// Every variant except [`NormalizeError::EncodingFailure`] describes a problem
/// with the caller's input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// No decodable PEM block was found.
    #[error("failed to parse PEM private key: {0}")]
    InvalidPem(String),

    /// The PEM block is encrypted, either through the legacy
    /// `Proc-Type: 4,ENCRYPTED` header or as an `ENCRYPTED PRIVATE KEY` block.
    #[error("encrypted private keys are not supported; please provide an unencrypted key")]
    EncryptedKeyUnsupported,

    /// The PEM framing is valid but the inner DER does not parse under the
    /// format implied by the label.
    #[error("failed to parse {format} private key: {reason}")]
    MalformedKey { format: KeyFormat, reason: String },

    /// The PKCS#8 document wraps an algorithm other than RSA or EC.
    #[error("unsupported private key type: {0}")]
    UnsupportedKeyType(String),

    /// The PEM label is not one of the accepted labels.
    #[error(
        "unsupported private key format: {0} (expected RSA PRIVATE KEY, EC PRIVATE KEY, or PRIVATE KEY)"
    )]
    UnsupportedPemLabel(String),

    /// A key that parsed successfully could not be re-encoded as PKCS#8.
    #[error("failed to marshal {algorithm} key to PKCS#8: {reason}")]
    EncodingFailure {
        algorithm: &'static str,
        reason: String,
    },
}

impl NormalizeError {
    /// Returns `true` when the error is caused by the input rather than by a
    /// defect in this crate.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, NormalizeError::EncodingFailure { .. })
    }

    pub(crate) fn malformed(format: KeyFormat, reason: impl ToString) -> Self {
        NormalizeError::MalformedKey {
            format,
            reason: reason.to_string(),
        }
    }
}

impl From<pem::PemError> for NormalizeError {
    /// Converts a `pem::PemError` into a `NormalizeError`.
    fn from(err: pem::PemError) -> Self {
        NormalizeError::InvalidPem(err.to_string())
    }
}
