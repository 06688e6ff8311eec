use std::fmt;

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::elliptic_curve::sec1::ToEncodedPoint;

use super::scheme::{Curve, PointFormat};
use crate::{AccountingError, Result};

/// ECDSA private key on one of the supported curves.
#[derive(Clone)]
pub enum PrivateKey {
    P256(p256::ecdsa::SigningKey),
    Secp256k1(k256::ecdsa::SigningKey),
}

impl PrivateKey {
    pub fn from_bytes(curve: Curve, bytes: &[u8]) -> Result<Self> {
        match curve {
            Curve::P256 => p256::ecdsa::SigningKey::from_slice(bytes)
                .map(PrivateKey::P256)
                .map_err(|e| AccountingError::Signing(format!("invalid {} private key: {}", curve, e))),
            Curve::Secp256k1 => k256::ecdsa::SigningKey::from_slice(bytes)
                .map(PrivateKey::Secp256k1)
                .map_err(|e| AccountingError::Signing(format!("invalid {} private key: {}", curve, e))),
        }
    }

    pub fn from_hex(curve: Curve, hex_key: &str) -> Result<Self> {
        let bytes = hex::decode(hex_key.trim().trim_start_matches("0x"))
            .map_err(|e| AccountingError::Signing(format!("private key is not hex: {}", e)))?;
        Self::from_bytes(curve, &bytes)
    }

    pub fn curve(&self) -> Curve {
        match self {
            PrivateKey::P256(_) => Curve::P256,
            PrivateKey::Secp256k1(_) => Curve::Secp256k1,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::P256(key) => PublicKey::P256(*key.verifying_key()),
            PrivateKey::Secp256k1(key) => PublicKey::Secp256k1(*key.verifying_key()),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            PrivateKey::P256(key) => key.to_bytes().to_vec(),
            PrivateKey::Secp256k1(key) => key.to_bytes().to_vec(),
        }
    }

    /// Signs an already computed digest, returning `r || s`.
    pub(crate) fn sign_prehash(&self, digest: &[u8]) -> Result<Vec<u8>> {
        match self {
            PrivateKey::P256(key) => {
                let signature: p256::ecdsa::Signature = key
                    .sign_prehash(digest)
                    .map_err(|e| AccountingError::Signing(e.to_string()))?;
                Ok(signature.to_bytes().to_vec())
            }
            PrivateKey::Secp256k1(key) => {
                let signature: k256::ecdsa::Signature = key
                    .sign_prehash(digest)
                    .map_err(|e| AccountingError::Signing(e.to_string()))?;
                Ok(signature.to_bytes().to_vec())
            }
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.curve())
            .field("public_key", &hex::encode(self.public_key().to_bytes(PointFormat::Compressed)))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKey {
    P256(p256::ecdsa::VerifyingKey),
    Secp256k1(k256::ecdsa::VerifyingKey),
}

impl PublicKey {
    /// Parses a compressed or uncompressed SEC1 point.
    pub fn from_sec1_bytes(curve: Curve, bytes: &[u8]) -> Result<Self> {
        match curve {
            Curve::P256 => p256::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
                .map(PublicKey::P256)
                .map_err(|_| AccountingError::Verification(format!("invalid {} public key", curve))),
            Curve::Secp256k1 => k256::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
                .map(PublicKey::Secp256k1)
                .map_err(|_| AccountingError::Verification(format!("invalid {} public key", curve))),
        }
    }

    pub fn curve(&self) -> Curve {
        match self {
            PublicKey::P256(_) => Curve::P256,
            PublicKey::Secp256k1(_) => Curve::Secp256k1,
        }
    }

    pub fn to_bytes(&self, format: PointFormat) -> Vec<u8> {
        let compress = format == PointFormat::Compressed;
        match self {
            PublicKey::P256(key) => p256::PublicKey::from(key)
                .to_encoded_point(compress)
                .as_bytes()
                .to_vec(),
            PublicKey::Secp256k1(key) => k256::PublicKey::from(key)
                .to_encoded_point(compress)
                .as_bytes()
                .to_vec(),
        }
    }

    /// Checks `r || s` against a digest. Out of range scalars are a mismatch.
    pub(crate) fn verify_prehash(&self, digest: &[u8], signature: &[u8]) -> bool {
        match self {
            PublicKey::P256(key) => match p256::ecdsa::Signature::from_slice(signature) {
                Ok(signature) => key.verify_prehash(digest, &signature).is_ok(),
                Err(_) => false,
            },
            PublicKey::Secp256k1(key) => match k256::ecdsa::Signature::from_slice(signature) {
                Ok(signature) => key.verify_prehash(digest, &signature).is_ok(),
                Err(_) => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "1dd37fba80fec4e6a6f13fd708d8dcb3b29def768017052f6c930fa1c5d90bbb";

    #[test]
    fn public_key_encodings() {
        let key = PrivateKey::from_hex(Curve::P256, KEY).unwrap();
        let public = key.public_key();

        let uncompressed = public.to_bytes(PointFormat::Uncompressed);
        assert_eq!(uncompressed.len(), 65);
        assert_eq!(uncompressed[0], 0x04);

        let compressed = public.to_bytes(PointFormat::Compressed);
        assert_eq!(compressed.len(), 33);
        assert!(compressed[0] == 0x02 || compressed[0] == 0x03);

        assert_eq!(PublicKey::from_sec1_bytes(Curve::P256, &compressed).unwrap(), public);
        assert_eq!(PublicKey::from_sec1_bytes(Curve::P256, &uncompressed).unwrap(), public);
    }

    #[test]
    fn hex_round_trip() {
        let key = PrivateKey::from_hex(Curve::Secp256k1, &format!("0x{}", KEY)).unwrap();
        assert_eq!(hex::encode(key.to_bytes()), KEY);
        assert_eq!(key.curve(), Curve::Secp256k1);
    }

    #[test]
    fn rejects_bad_private_keys() {
        assert!(PrivateKey::from_hex(Curve::P256, "zz").is_err());
        assert!(PrivateKey::from_bytes(Curve::P256, &[0u8; 32]).is_err());
        assert!(PrivateKey::from_bytes(Curve::P256, &[1u8; 33]).is_err());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let key = PrivateKey::from_hex(Curve::P256, KEY).unwrap();
        assert!(!format!("{:?}", key).contains(KEY));
    }
}
