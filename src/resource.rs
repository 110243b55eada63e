use std::fmt;

use bon::Builder;

use crate::error::NormalizeError;
use crate::normalize::{self, Pkcs8Output};
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Text rendering of the PKCS#8 output stored in a [`FromPemState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Standard padded base64 of the DER bytes.
    #[default]
    Base64,
    /// A `PRIVATE KEY` PEM block.
    Pem,
}

impl OutputEncoding {
    fn render(self, output: &Pkcs8Output) -> String {
        match self {
            OutputEncoding::Base64 => output.to_base64(),
            OutputEncoding::Pem => output.to_pem(),
        }
    }
}

/// A PEM private key to be normalized into PKCS#8.
///
/// The record is immutable: a different key means a new record.
///
/// # Fields
/// * `private_key_pem` - PEM-encoded private key (RSA or EC). Sensitive.
/// * `encoding` - rendering of the computed PKCS#8 key, base64 by default.
#[derive(Clone, Builder)]
pub struct FromPem {
    private_key_pem: String,
    #[builder(default)]
    encoding: OutputEncoding,
}

/// Computed fields of a [`FromPem`] record.
#[derive(Clone, PartialEq, Eq)]
pub struct FromPemState {
    /// Identifier derived from the PEM text.
    pub id: String,
    /// The unencrypted PKCS#8 key, rendered per [`OutputEncoding`]. Sensitive.
    pub private_key_pkcs8: String,
}

impl FromPem {
    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }

    pub fn encoding(&self) -> OutputEncoding {
        self.encoding
    }

    /// Converts the key and derives the record identifier.
    ///
    /// Nothing is produced on failure: the identifier is only derived once the
    /// conversion has succeeded.
    pub fn create(&self) -> Result<FromPemState> {
        let output = normalize::convert(self.private_key_pem.as_bytes())?;
        let id = normalize::derive_identifier(&self.private_key_pem);
        tracing::debug!(%id, "created PKCS#8 record");

        Ok(FromPemState {
            id,
            private_key_pkcs8: self.encoding.render(&output),
        })
    }
}

impl fmt::Debug for FromPem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromPem")
            .field("private_key_pem", &"<sensitive>")
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl fmt::Debug for FromPemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromPemState")
            .field("id", &self.id)
            .field("private_key_pkcs8", &"<sensitive>")
            .finish()
    }
}
