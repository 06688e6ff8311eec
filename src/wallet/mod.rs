//! Neo N3 accounts: key import, address derivation and owner ids.

mod account;
mod address;

pub use self::account::Account;
pub use self::address::{script_hash, verification_script, OwnerId, NEO3_ADDRESS_VERSION, OWNER_ID_SIZE};
