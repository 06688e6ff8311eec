use std::time::Duration;

use log::debug;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tonic::Status;

use crate::proto::accounting::accounting_service_client::AccountingServiceClient;
use crate::proto::accounting::{BalanceRequest, BalanceResponse};
use crate::session::Signed;
use crate::{AccountingError, Result};

/// Per-call settings handed to the transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Deadline sent along with the call as `grpc-timeout`.
    pub timeout: Option<Duration>,
}

/// The remote accounting service.
#[tonic::async_trait]
pub trait AccountingTransport: Send + Sync {
    async fn balance(
        &self,
        request: Signed<BalanceRequest>,
        options: CallOptions,
    ) -> std::result::Result<BalanceResponse, Status>;
}

/// [`AccountingTransport`] over a tonic channel.
#[derive(Debug, Clone)]
pub struct GrpcTransport {
    client: AccountingServiceClient<Channel>,
}

impl GrpcTransport {
    pub fn new(channel: Channel) -> Self {
        GrpcTransport {
            client: AccountingServiceClient::new(channel),
        }
    }

    /// Connects to a `grpc://` or `grpcs://` endpoint.
    ///
    /// `ca` replaces the system roots for `grpcs://` endpoints.
    pub async fn connect(endpoint: &str, ca: Option<Vec<u8>>, connect_timeout: Option<Duration>) -> Result<Self> {
        let (uri, tls) = parse_endpoint(endpoint)?;
        let mut channel = Endpoint::from_shared(uri.clone())
            .map_err(|e| AccountingError::InvalidEndpoint(format!("{}: {}", uri, e)))?;
        if tls {
            let mut tls_config = ClientTlsConfig::new();
            if let Some(ca) = ca {
                tls_config = tls_config.ca_certificate(Certificate::from_pem(ca));
            }
            channel = channel.tls_config(tls_config)?;
        }
        if let Some(timeout) = connect_timeout {
            channel = channel.connect_timeout(timeout);
        }
        debug!("Connecting to {} (tls: {})", uri, tls);
        Ok(Self::new(channel.connect().await?))
    }
}

#[tonic::async_trait]
impl AccountingTransport for GrpcTransport {
    async fn balance(
        &self,
        request: Signed<BalanceRequest>,
        options: CallOptions,
    ) -> std::result::Result<BalanceResponse, Status> {
        let mut request = tonic::Request::new(request.into_inner());
        if let Some(timeout) = options.timeout {
            request.set_timeout(timeout);
        }
        let mut client = self.client.clone();
        let response = client.balance(request).await?;
        Ok(response.into_inner())
    }
}

/// Maps a NeoFS style endpoint to a URI tonic understands and whether it needs TLS.
pub fn parse_endpoint(endpoint: &str) -> Result<(String, bool)> {
    let endpoint = endpoint.trim();
    if let Some(rest) = endpoint.strip_prefix("grpcs://") {
        Ok((format!("https://{}", rest), true))
    } else if let Some(rest) = endpoint.strip_prefix("grpc://") {
        Ok((format!("http://{}", rest), false))
    } else if endpoint.starts_with("https://") {
        Ok((endpoint.to_owned(), true))
    } else if endpoint.starts_with("http://") {
        Ok((endpoint.to_owned(), false))
    } else if !endpoint.is_empty() && !endpoint.contains("://") {
        Ok((format!("http://{}", endpoint), false))
    } else {
        Err(AccountingError::InvalidEndpoint(endpoint.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_schemes() {
        assert_eq!(
            parse_endpoint("grpcs://st01.testnet.fs.neo.org:8082").unwrap(),
            (String::from("https://st01.testnet.fs.neo.org:8082"), true)
        );
        assert_eq!(
            parse_endpoint("grpc://localhost:8080").unwrap(),
            (String::from("http://localhost:8080"), false)
        );
        assert_eq!(
            parse_endpoint("localhost:8080").unwrap(),
            (String::from("http://localhost:8080"), false)
        );
        assert!(parse_endpoint("https://example.org").unwrap().1);
    }

    #[test]
    fn rejects_unknown_schemes() {
        assert!(matches!(
            parse_endpoint("ws://localhost:8080"),
            Err(AccountingError::InvalidEndpoint(_))
        ));
        assert!(parse_endpoint("").is_err());
    }
}
