use std::fmt;

use const_oid::ObjectIdentifier;
use const_oid::db::rfc5912::{
    ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_224_R_1, SECP_256_R_1, SECP_384_R_1, SECP_521_R_1,
};
use der::Decode;
use pkcs8::{DecodePrivateKey, EncodePrivateKey, PrivateKeyInfo};
use rsa::RsaPrivateKey;
use rsa::pkcs1::{self, DecodeRsaPrivateKey};
use sec1::EcPrivateKey;

use crate::error::NormalizeError;
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Source encodings accepted by the normalizer, keyed by their PEM label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFormat {
    /// PKCS#1 `RSAPrivateKey` (`RSA PRIVATE KEY`).
    Pkcs1Rsa,
    /// SEC1 `ECPrivateKey` (`EC PRIVATE KEY`).
    Sec1Ec,
    /// Unencrypted PKCS#8 `PrivateKeyInfo` (`PRIVATE KEY`).
    Pkcs8,
}

impl KeyFormat {
    /// All accepted formats.
    pub const ACCEPTED: [KeyFormat; 3] =
        [KeyFormat::Pkcs1Rsa, KeyFormat::Sec1Ec, KeyFormat::Pkcs8];

    /// Maps an exact PEM label to its format.
    ///
    /// # Returns
    /// `None` for any label outside the accepted set.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "RSA PRIVATE KEY" => Some(KeyFormat::Pkcs1Rsa),
            "EC PRIVATE KEY" => Some(KeyFormat::Sec1Ec),
            "PRIVATE KEY" => Some(KeyFormat::Pkcs8),
            _ => None,
        }
    }

    /// The PEM label for this format.
    pub fn label(self) -> &'static str {
        match self {
            KeyFormat::Pkcs1Rsa => "RSA PRIVATE KEY",
            KeyFormat::Sec1Ec => "EC PRIVATE KEY",
            KeyFormat::Pkcs8 => "PRIVATE KEY",
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyFormat::Pkcs1Rsa => "RSA",
            KeyFormat::Sec1Ec => "EC",
            KeyFormat::Pkcs8 => "PKCS#8",
        };
        f.write_str(name)
    }
}

/// Named curves supported for EC keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EcCurve {
    P224,
    P256,
    P384,
    P521,
}

impl EcCurve {
    fn from_oid(oid: ObjectIdentifier) -> Option<Self> {
        if oid == SECP_224_R_1 {
            Some(EcCurve::P224)
        } else if oid == SECP_256_R_1 {
            Some(EcCurve::P256)
        } else if oid == SECP_384_R_1 {
            Some(EcCurve::P384)
        } else if oid == SECP_521_R_1 {
            Some(EcCurve::P521)
        } else {
            None
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            EcCurve::P224 => "P-224",
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        }
    }

    /// Resolves a curve OID, rejecting curves outside the supported set.
    fn resolve(oid: ObjectIdentifier, format: KeyFormat) -> Result<Self> {
        Self::from_oid(oid).ok_or_else(|| {
            NormalizeError::malformed(
                format,
                format!("unsupported elliptic curve {}", describe_oid(oid)),
            )
        })
    }
}

/// An EC secret scalar on one of the supported curves.
pub(crate) enum EcSecretKey {
    P224(p224::SecretKey),
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

impl EcSecretKey {
    fn from_sec1_der(curve: EcCurve, der: &[u8]) -> Result<Self> {
        let key = match curve {
            EcCurve::P224 => p224::SecretKey::from_sec1_der(der).map(EcSecretKey::P224),
            EcCurve::P256 => p256::SecretKey::from_sec1_der(der).map(EcSecretKey::P256),
            EcCurve::P384 => p384::SecretKey::from_sec1_der(der).map(EcSecretKey::P384),
            EcCurve::P521 => p521::SecretKey::from_sec1_der(der).map(EcSecretKey::P521),
        };
        key.map_err(|e| {
            let reason = format!("invalid {} key: {e}", curve.name());
            NormalizeError::malformed(KeyFormat::Sec1Ec, reason)
        })
    }

    fn from_pkcs8_der(curve: EcCurve, der: &[u8]) -> Result<Self> {
        let key = match curve {
            EcCurve::P224 => p224::SecretKey::from_pkcs8_der(der).map(EcSecretKey::P224),
            EcCurve::P256 => p256::SecretKey::from_pkcs8_der(der).map(EcSecretKey::P256),
            EcCurve::P384 => p384::SecretKey::from_pkcs8_der(der).map(EcSecretKey::P384),
            EcCurve::P521 => p521::SecretKey::from_pkcs8_der(der).map(EcSecretKey::P521),
        };
        key.map_err(|e| {
            let reason = format!("invalid {} key: {e}", curve.name());
            NormalizeError::malformed(KeyFormat::Pkcs8, reason)
        })
    }

    fn to_pkcs8_der(&self) -> pkcs8::Result<pkcs8::SecretDocument> {
        match self {
            EcSecretKey::P224(key) => key.to_pkcs8_der(),
            EcSecretKey::P256(key) => key.to_pkcs8_der(),
            EcSecretKey::P384(key) => key.to_pkcs8_der(),
            EcSecretKey::P521(key) => key.to_pkcs8_der(),
        }
    }
}

/// Transient, algorithm-tagged private key.
///
/// Lives only between parsing the source encoding and serializing to PKCS#8.
pub(crate) enum PrivateKeyMaterial {
    Rsa(Box<RsaPrivateKey>),
    Ec(EcSecretKey),
}

impl PrivateKeyMaterial {
    /// Parses a PKCS#1 `RSAPrivateKey` structure. Only two-prime (version 0)
    /// keys are accepted.
    pub(crate) fn from_pkcs1_der(der: &[u8]) -> Result<Self> {
        let structure = pkcs1::RsaPrivateKey::from_der(der)
            .map_err(|e| NormalizeError::malformed(KeyFormat::Pkcs1Rsa, e))?;
        if structure.version() == pkcs1::Version::Multi {
            return Err(NormalizeError::malformed(
                KeyFormat::Pkcs1Rsa,
                "multi-prime keys (version 1) are not supported",
            ));
        }
        let key = RsaPrivateKey::from_pkcs1_der(der)
            .map_err(|e| NormalizeError::malformed(KeyFormat::Pkcs1Rsa, e))?;
        Ok(PrivateKeyMaterial::Rsa(Box::new(key)))
    }

    /// Parses a SEC1 `ECPrivateKey` structure. The curve is taken from the
    /// embedded named-curve parameters, which must be present.
    pub(crate) fn from_sec1_der(der: &[u8]) -> Result<Self> {
        let ec_key = EcPrivateKey::from_der(der)
            .map_err(|e| NormalizeError::malformed(KeyFormat::Sec1Ec, e))?;
        let oid = ec_key
            .parameters
            .and_then(|params| params.named_curve())
            .ok_or_else(|| {
                NormalizeError::malformed(KeyFormat::Sec1Ec, "missing named curve parameters")
            })?;
        let curve = EcCurve::resolve(oid, KeyFormat::Sec1Ec)?;
        tracing::debug!(curve = curve.name(), "parsed SEC1 curve parameters");

        Ok(PrivateKeyMaterial::Ec(EcSecretKey::from_sec1_der(curve, der)?))
    }

    /// Parses a PKCS#8 `PrivateKeyInfo` and checks that it wraps a supported
    /// algorithm.
    ///
    /// # Returns
    /// `UnsupportedKeyType` when the document is well formed but wraps an
    /// algorithm other than RSA or EC.
    pub(crate) fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let info = PrivateKeyInfo::try_from(der)
            .map_err(|e| NormalizeError::malformed(KeyFormat::Pkcs8, e))?;
        let algorithm = info.algorithm.oid;
        tracing::debug!(algorithm = %algorithm, "parsed PKCS#8 algorithm identifier");

        if algorithm == RSA_ENCRYPTION {
            let key = RsaPrivateKey::try_from(info)
                .map_err(|e| NormalizeError::malformed(KeyFormat::Pkcs8, e))?;
            Ok(PrivateKeyMaterial::Rsa(Box::new(key)))
        } else if algorithm == ID_EC_PUBLIC_KEY {
            let oid = info
                .algorithm
                .parameters_oid()
                .map_err(|e| NormalizeError::malformed(KeyFormat::Pkcs8, e))?;
            let curve = EcCurve::resolve(oid, KeyFormat::Pkcs8)?;
            Ok(PrivateKeyMaterial::Ec(EcSecretKey::from_pkcs8_der(curve, der)?))
        } else {
            Err(NormalizeError::UnsupportedKeyType(describe_oid(algorithm)))
        }
    }

    /// Short algorithm name used in diagnostics.
    pub(crate) fn algorithm(&self) -> &'static str {
        match self {
            PrivateKeyMaterial::Rsa(_) => "RSA",
            PrivateKeyMaterial::Ec(_) => "EC",
        }
    }

    /// Serializes the key as unencrypted PKCS#8 DER.
    pub(crate) fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        let document = match self {
            PrivateKeyMaterial::Rsa(key) => key.to_pkcs8_der(),
            PrivateKeyMaterial::Ec(key) => key.to_pkcs8_der(),
        };
        let document = document.map_err(|e| {
            tracing::error!(algorithm = self.algorithm(), "parsed key failed to re-encode");
            NormalizeError::EncodingFailure {
                algorithm: self.algorithm(),
                reason: e.to_string(),
            }
        })?;
        Ok(document.as_bytes().to_vec())
    }
}

/// Renders an OID with its registered name when one is known.
fn describe_oid(oid: ObjectIdentifier) -> String {
    match const_oid::db::DB.by_oid(&oid) {
        Some(name) => format!("{name} ({oid})"),
        None => oid.to_string(),
    }
}
