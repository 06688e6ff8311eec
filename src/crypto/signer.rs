use log::debug;

use super::keys::{PrivateKey, PublicKey};
use super::scheme::{HashAlgorithm, SignatureScheme};
use crate::proto::refs;
use crate::{AccountingError, Result};

/// Format byte in front of `r || s`, as in an uncompressed point encoding.
pub const SIGNATURE_PREFIX: u8 = 0x04;

/// Signs message parts with one account key under a fixed scheme.
#[derive(Debug, Clone)]
pub struct Signer {
    key: PrivateKey,
    public_key: Vec<u8>,
    scheme: SignatureScheme,
}

impl Signer {
    pub fn new(key: PrivateKey, scheme: SignatureScheme) -> Result<Self> {
        if key.curve() != scheme.curve {
            return Err(AccountingError::Signing(format!(
                "key is on {} but the scheme expects {}",
                key.curve(),
                scheme.curve
            )));
        }
        let public_key = key.public_key().to_bytes(scheme.key_format);
        Ok(Signer {
            key,
            public_key,
            scheme,
        })
    }

    pub fn scheme(&self) -> &SignatureScheme {
        &self.scheme
    }

    /// Encoded public key as it appears in every produced signature.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn sign(&self, message: &[u8]) -> Result<refs::Signature> {
        let digest = self.scheme.hash.digest(message);
        let rs = self.key.sign_prehash(&digest)?;

        let mut sign = Vec::with_capacity(1 + rs.len());
        sign.push(SIGNATURE_PREFIX);
        sign.extend_from_slice(&rs);

        debug!("Signed {} bytes with {}/{}", message.len(), self.scheme.curve, self.scheme.hash);
        Ok(refs::Signature {
            key: self.public_key.clone(),
            sign,
        })
    }
}

/// Checks a `0x04 || r || s` signature over `message`.
///
/// A mismatch of any kind is `Ok(false)`; only a signature of the wrong
/// length is an error.
pub fn verify(public_key: &PublicKey, hash: HashAlgorithm, message: &[u8], sign: &[u8]) -> Result<bool> {
    let expected = 1 + 2 * public_key.curve().field_size();
    if sign.len() != expected {
        return Err(AccountingError::Verification(format!(
            "signature is {} bytes, expected {}",
            sign.len(),
            expected
        )));
    }
    if sign[0] != SIGNATURE_PREFIX {
        return Ok(false);
    }
    let digest = hash.digest(message);
    Ok(public_key.verify_prehash(&digest, &sign[1..]))
}

/// Like [`verify`], reading the public key from the signature message itself.
pub fn verify_signature(scheme: &SignatureScheme, signature: &refs::Signature, message: &[u8]) -> Result<bool> {
    let public_key = PublicKey::from_sec1_bytes(scheme.curve, &signature.key)?;
    verify(&public_key, scheme.hash, message, &signature.sign)
}
