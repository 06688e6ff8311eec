//! Balance requests against the NeoFS accounting service.

mod amount;
mod client;
mod request;
mod service;
mod transport;

pub use self::amount::{Amount, MAX_PRECISION};
pub use self::client::BalanceClient;
pub use self::request::{
    api_version, build_balance_request, build_balance_request_for, API_VERSION_MAJOR, API_VERSION_MINOR,
    DEFAULT_TTL,
};
pub use self::service::{StaticAccountingService, DEFAULT_PRECISION};
pub use self::transport::{parse_endpoint, AccountingTransport, CallOptions, GrpcTransport};
