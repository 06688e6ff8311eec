use std::fmt;
use std::str::FromStr;

use ripemd::{Digest, Ripemd160};
use sha2::Sha256;

use crate::proto::refs;
use crate::{AccountingError, Result};

/// Address version byte of Neo N3 accounts.
pub const NEO3_ADDRESS_VERSION: u8 = 0x35;

/// Version byte, 20 byte script hash and 4 byte checksum.
pub const OWNER_ID_SIZE: usize = 25;

const PUSHDATA1: u8 = 0x0c;
const SYSCALL: u8 = 0x41;
// System.Crypto.CheckSig interop hash
const CHECK_SIG: [u8; 4] = [0x56, 0xe7, 0xb3, 0x27];

/// Account identifier as NeoFS sees it: the raw bytes behind a Neo N3 address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(Vec<u8>);

impl OwnerId {
    pub fn from_address(address: &str) -> Result<Self> {
        let raw = bs58::decode(address)
            .into_vec()
            .map_err(|e| AccountingError::Decode(format!("`{}': {}", address, e)))?;
        Self::from_bytes(raw).map_err(|e| match e {
            AccountingError::Decode(reason) => AccountingError::Decode(format!("`{}': {}", address, reason)),
            other => other,
        })
    }

    /// Validates length, address version and checksum of a raw owner id.
    pub fn from_bytes(raw: Vec<u8>) -> Result<Self> {
        if raw.len() != OWNER_ID_SIZE {
            return Err(AccountingError::Decode(format!(
                "owner id is {} bytes, expected {}",
                raw.len(),
                OWNER_ID_SIZE
            )));
        }
        if raw[0] != NEO3_ADDRESS_VERSION {
            return Err(AccountingError::Decode(format!("unexpected address version {:#04x}", raw[0])));
        }
        if raw[21..] != checksum(&raw[..21]) {
            return Err(AccountingError::Decode(String::from("invalid checksum")));
        }
        Ok(OwnerId(raw))
    }

    /// Owner of the single-signature account of `public_key` (compressed SEC1).
    pub fn from_public_key(public_key: &[u8]) -> Self {
        let mut payload = Vec::with_capacity(OWNER_ID_SIZE);
        payload.push(NEO3_ADDRESS_VERSION);
        payload.extend_from_slice(&script_hash(public_key));
        let checksum = checksum(&payload);
        payload.extend_from_slice(&checksum);
        OwnerId(payload)
    }

    pub fn to_address(&self) -> String {
        bs58::encode(&self.0).into_string()
    }

    pub fn script_hash(&self) -> &[u8] {
        &self.0[1..21]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for OwnerId {
    type Err = AccountingError;

    fn from_str(s: &str) -> Result<Self> {
        OwnerId::from_address(s)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_address())
    }
}

impl From<OwnerId> for refs::OwnerId {
    fn from(owner: OwnerId) -> Self {
        refs::OwnerId { value: owner.0 }
    }
}

impl From<&OwnerId> for refs::OwnerId {
    fn from(owner: &OwnerId) -> Self {
        refs::OwnerId {
            value: owner.0.clone(),
        }
    }
}

fn checksum(payload: &[u8]) -> [u8; 4] {
    let hash = Sha256::digest(Sha256::digest(payload));
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Verification script of a single-signature account.
pub fn verification_script(public_key: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(public_key.len() + 7);
    script.push(PUSHDATA1);
    script.push(public_key.len() as u8);
    script.extend_from_slice(public_key);
    script.push(SYSCALL);
    script.extend_from_slice(&CHECK_SIG);
    script
}

pub fn script_hash(public_key: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(verification_script(public_key));
    Ripemd160::digest(sha).into()
}
