//! # pkcs8-normalizer - PEM Private Keys to PKCS#8
//!
//! pkcs8-normalizer converts PEM-encoded private keys into unencrypted PKCS#8 DER,
//! built entirely with rustcrypto libraries and without ring or openssl (except
//! for testing).
//!
//! ## Supported Inputs
//!
//! - **`RSA PRIVATE KEY`**: PKCS#1 RSA keys, re-encoded as PKCS#8
//! - **`EC PRIVATE KEY`**: SEC1 EC keys on P-224, P-256, P-384 and P-521, re-encoded as PKCS#8
//! - **`PRIVATE KEY`**: unencrypted PKCS#8 RSA or EC keys, returned unchanged
//!
//! Encrypted keys (`Proc-Type: 4,ENCRYPTED` or `ENCRYPTED PRIVATE KEY`) and any
//! other label are rejected.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pkcs8_normalizer::{convert, derive_identifier};
//!
//! # fn main() -> Result<(), pkcs8_normalizer::error::NormalizeError> {
//! let pem = std::fs::read_to_string("key.pem").expect("readable key");
//!
//! let pkcs8 = convert(pem.as_bytes())?;
//! println!("{}", pkcs8.to_base64());
//! println!("id: {}", derive_identifier(&pem));
//! # Ok(())
//! # }
//! ```
//!
//! ### Building a Record
//!
//! ```rust,no_run
//! use pkcs8_normalizer::resource::{FromPem, OutputEncoding};
//!
//! # fn main() -> Result<(), pkcs8_normalizer::error::NormalizeError> {
//! let pem = std::fs::read_to_string("key.pem").expect("readable key");
//!
//! let record = FromPem::builder()
//!     .private_key_pem(pem)
//!     .encoding(OutputEncoding::Pem)
//!     .build();
//!
//! let state = record.create()?;
//! println!("{}\n{}", state.id, state.private_key_pkcs8);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure names the stage that rejected the input:
//!
//! ```rust
//! use pkcs8_normalizer::{convert, error::NormalizeError};
//!
//! match convert(b"not a valid pem block") {
//!     Ok(_) => println!("Key converted"),
//!     Err(NormalizeError::InvalidPem(msg)) => println!("Not PEM: {}", msg),
//!     Err(e) if e.is_input_error() => println!("Bad key: {}", e),
//!     Err(e) => println!("Internal error: {}", e),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`normalize`]: the conversion routine and identifier derivation
//! - [`key`]: accepted source formats and per-format parsing
//! - [`pem_utils`]: PEM container decoding and encoding
//! - [`resource`]: record adapter producing the identifier and encoded key
//! - [`error`]: error types

pub mod error;
pub mod key;
pub mod normalize;
pub mod pem_utils;
pub mod resource;

pub use normalize::{Pkcs8Output, convert, derive_identifier};
