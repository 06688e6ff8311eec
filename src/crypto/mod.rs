//! ECDSA signing of NeoFS message parts.
//!
//! A part is hashed with the scheme's digest (SHA-512 by default) and the
//! digest is signed as a prehash. Signatures travel as `0x04 || r || s`
//! together with the signer's SEC1 public key.

mod keys;
mod scheme;
mod signer;

pub use self::keys::{PrivateKey, PublicKey};
pub use self::scheme::{Curve, HashAlgorithm, PointFormat, SignatureScheme};
pub use self::signer::{verify, verify_signature, Signer, SIGNATURE_PREFIX};
