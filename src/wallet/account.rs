use crate::crypto::{Curve, PointFormat, PrivateKey, PublicKey, SignatureScheme, Signer};
use crate::wallet::address::OwnerId;
use crate::{AccountingError, Result};

const WIF_VERSION: u8 = 0x80;
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Key material of one account together with its address.
#[derive(Debug, Clone)]
pub struct Account {
    private_key: PrivateKey,
    public_key: PublicKey,
    owner: OwnerId,
}

impl Account {
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        let owner = OwnerId::from_public_key(&public_key.to_bytes(PointFormat::Compressed));
        Account {
            private_key,
            public_key,
            owner,
        }
    }

    pub fn from_hex(curve: Curve, hex_key: &str) -> Result<Self> {
        Ok(Self::from_private_key(PrivateKey::from_hex(curve, hex_key)?))
    }

    /// Imports a compressed-key WIF string, the form Neo wallets export.
    pub fn from_wif(curve: Curve, wif: &str) -> Result<Self> {
        let payload = bs58::decode(wif.trim())
            .with_check(Some(WIF_VERSION))
            .into_vec()
            .map_err(|e| AccountingError::Decode(format!("invalid WIF: {}", e)))?;
        if payload.len() != 34 || payload[33] != WIF_COMPRESSED_FLAG {
            return Err(AccountingError::Decode(String::from("invalid WIF: unexpected payload")));
        }
        Ok(Self::from_private_key(PrivateKey::from_bytes(curve, &payload[1..33])?))
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner
    }

    pub fn address(&self) -> String {
        self.owner.to_address()
    }

    pub fn signer(&self, scheme: SignatureScheme) -> Result<Signer> {
        Signer::new(self.private_key.clone(), scheme)
    }
}
