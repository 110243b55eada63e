#![allow(dead_code)]

use std::path::PathBuf;

/// Reads a PEM fixture from `tests/data`.
///
/// The fixtures were generated with the OpenSSL CLI (`genrsa -traditional`,
/// `ecparam -genkey`, `pkcs8 -topk8 -nocrypt`, `genpkey -algorithm ed25519`).
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// The DER payload of the first PEM block in `pem_text`.
pub fn payload(pem_text: &str) -> Vec<u8> {
    pem::parse(pem_text).unwrap().into_contents()
}

/// Wraps `der` in a PEM block with the given label.
pub fn wrap(label: &str, der: &[u8]) -> String {
    pem::encode(&pem::Pem::new(label, der))
}

/// Builds a `Proc-Type: 4,ENCRYPTED` block whose payload is not a key at all.
pub fn encrypted_garbage(label: &str) -> String {
    format!(
        "-----BEGIN {label}-----\n\
         Proc-Type: 4,ENCRYPTED\n\
         DEK-Info: AES-128-CBC,000102030405060708090A0B0C0D0E0F\n\
         \n\
         AAECAwQFBgcICQoLDA0ODw==\n\
         -----END {label}-----\n"
    )
}
