use crate::proto::accounting::{balance_request, BalanceRequest};
use crate::proto::refs::Version;
use crate::proto::session::RequestMetaHeader;
use crate::wallet::OwnerId;
use crate::Result;

pub const API_VERSION_MAJOR: u32 = 2;
pub const API_VERSION_MINOR: u32 = 11;

/// Hop count the NeoFS SDK puts on direct requests.
pub const DEFAULT_TTL: u32 = 2;

pub fn api_version() -> Version {
    Version {
        major: API_VERSION_MAJOR,
        minor: API_VERSION_MINOR,
    }
}

/// Unsigned balance request for the account behind `owner_address`.
pub fn build_balance_request(owner_address: &str, ttl: u32) -> Result<BalanceRequest> {
    let owner = OwnerId::from_address(owner_address)?;
    Ok(build_balance_request_for(&owner, ttl))
}

pub fn build_balance_request_for(owner: &OwnerId, ttl: u32) -> BalanceRequest {
    BalanceRequest {
        body: Some(balance_request::Body {
            owner_id: Some(owner.into()),
        }),
        meta_header: Some(RequestMetaHeader {
            version: Some(api_version()),
            epoch: 0,
            ttl,
            ..Default::default()
        }),
        verify_header: None,
    }
}
