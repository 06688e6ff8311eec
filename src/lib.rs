pub mod balance;
pub mod common;
pub mod crypto;
pub mod proto;
pub mod session;
pub mod wallet;

use thiserror::Error as DeriveError;

pub type Result<T> = std::result::Result<T, AccountingError>;

#[derive(DeriveError, Debug)]
pub enum AccountingError {
    #[error("Something went wrong while decoding an address. '{0}'")]
    Decode(String),
    #[error("Something went wrong while signing. '{0}'")]
    Signing(String),
    #[error("Malformed signature input. '{0}'")]
    Verification(String),
    #[error("The accounting service call failed ({code:?}). '{message}'")]
    Transport { code: tonic::Code, message: String },
    #[error("The accounting service sent an unusable response. '{0}'")]
    InvalidResponse(String),
    #[error("Something went wrong with the endpoint `{0}'")]
    InvalidEndpoint(String),
    #[error("Something went wrong while connecting. '{0}'")]
    TonicError(#[from] tonic::transport::Error),
    #[error("Something went wrong while parsing configs. `{0}'")]
    Config(#[from] config::ConfigError),
}

impl From<tonic::Status> for AccountingError {
    fn from(status: tonic::Status) -> Self {
        AccountingError::Transport {
            code: status.code(),
            message: status.message().to_owned(),
        }
    }
}
