use std::time::Duration;

use log::{debug, info, warn};

use super::amount::Amount;
use super::request::{build_balance_request, build_balance_request_for, DEFAULT_TTL};
use super::transport::{AccountingTransport, CallOptions};
use crate::crypto::{SignatureScheme, Signer};
use crate::proto::accounting::BalanceRequest;
use crate::session::{sign_message, verify_message};
use crate::wallet::Account;
use crate::{AccountingError, Result};

/// Queries NeoFS balances with requests signed by one account.
pub struct BalanceClient<T> {
    account: Account,
    signer: Signer,
    transport: T,
    ttl: u32,
    options: CallOptions,
    verify_responses: bool,
}

impl<T: AccountingTransport> BalanceClient<T> {
    pub fn new(account: Account, scheme: SignatureScheme, transport: T) -> Result<Self> {
        let signer = account.signer(scheme)?;
        Ok(BalanceClient {
            account,
            signer,
            transport,
            ttl: DEFAULT_TTL,
            options: CallOptions::default(),
            verify_responses: true,
        })
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Whether responses must carry a valid verification chain. On by default.
    ///
    /// Signatures are checked over the re-encoded headers, so only fields
    /// known to `proto/` survive decoding. Meta headers carrying session or
    /// bearer tokens will not verify.
    pub fn with_response_verification(mut self, enabled: bool) -> Self {
        self.verify_responses = enabled;
        self
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get_balance(&self, owner_address: &str) -> Result<f64> {
        Ok(self.get_amount(owner_address).await?.as_f64())
    }

    pub async fn get_amount(&self, owner_address: &str) -> Result<Amount> {
        let request = build_balance_request(owner_address, self.ttl)?;
        self.send(request).await
    }

    /// Balance of the account the client signs with.
    pub async fn own_amount(&self) -> Result<Amount> {
        let request = build_balance_request_for(self.account.owner_id(), self.ttl);
        self.send(request).await
    }

    async fn send(&self, request: BalanceRequest) -> Result<Amount> {
        let signed = sign_message(request, &self.signer)?;
        debug!("Sending signed balance request: {:?}", signed.get_ref().body);

        let response = self
            .transport
            .balance(signed, self.options)
            .await
            .map_err(|status| {
                warn!("Balance request failed: {}", status);
                AccountingError::from(status)
            })?;

        if self.verify_responses {
            let valid = verify_message(&response, self.signer.scheme())
                .map_err(|e| AccountingError::InvalidResponse(e.to_string()))?;
            if !valid {
                return Err(AccountingError::InvalidResponse(String::from(
                    "response verification header does not match its content",
                )));
            }
        }

        let balance = response
            .body
            .and_then(|body| body.balance)
            .ok_or_else(|| AccountingError::InvalidResponse(String::from("response carries no balance")))?;
        let amount = Amount::from(balance);
        if !amount.is_valid() {
            return Err(AccountingError::InvalidResponse(format!(
                "balance precision {} is out of range",
                amount.precision
            )));
        }
        info!("Received balance {}", amount);
        Ok(amount)
    }
}
