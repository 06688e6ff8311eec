use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256, Sha512};

use crate::{AccountingError, Result};

/// Elliptic curves a [`Signer`](super::Signer) can work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    /// secp256r1, the curve NeoFS and Neo N3 accounts use.
    P256,
    Secp256k1,
}

impl Curve {
    /// Size in bytes of a scalar, and so of each of `r` and `s`.
    pub fn field_size(self) -> usize {
        32
    }
}

impl FromStr for Curve {
    type Err = AccountingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "p-256" | "p256" | "secp256r1" | "prime256v1" => Ok(Curve::P256),
            "secp256k1" => Ok(Curve::Secp256k1),
            other => Err(AccountingError::Signing(format!("unknown curve `{}'", other))),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::P256 => f.write_str("P-256"),
            Curve::Secp256k1 => f.write_str("secp256k1"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub fn digest(self, message: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => Sha256::digest(message).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(message).to_vec(),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = AccountingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(AccountingError::Signing(format!("unknown hash `{}'", other))),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha256 => f.write_str("SHA-256"),
            HashAlgorithm::Sha512 => f.write_str("SHA-512"),
        }
    }
}

/// SEC1 encoding of the public key placed in every signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFormat {
    Compressed,
    Uncompressed,
}

impl FromStr for PointFormat {
    type Err = AccountingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "compressed" => Ok(PointFormat::Compressed),
            "uncompressed" => Ok(PointFormat::Uncompressed),
            other => Err(AccountingError::Signing(format!("unknown key format `{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureScheme {
    pub curve: Curve,
    pub hash: HashAlgorithm,
    pub key_format: PointFormat,
}

impl SignatureScheme {
    pub fn parse(curve: &str, hash: &str, key_format: &str) -> Result<Self> {
        Ok(SignatureScheme {
            curve: curve.parse()?,
            hash: hash.parse()?,
            key_format: key_format.parse()?,
        })
    }
}

impl Default for SignatureScheme {
    fn default() -> Self {
        SignatureScheme {
            curve: Curve::P256,
            hash: HashAlgorithm::Sha512,
            key_format: PointFormat::Uncompressed,
        }
    }
}
