use std::collections::HashMap;

use log::{debug, info, warn};
use tonic::{Request, Response, Status};

use super::amount::Amount;
use super::request::api_version;
use crate::crypto::{SignatureScheme, Signer};
use crate::proto::accounting::accounting_service_server::AccountingService;
use crate::proto::accounting::{balance_response, BalanceRequest, BalanceResponse};
use crate::proto::session::ResponseMetaHeader;
use crate::session::{chain_depth, sign_message, verify_message};
use crate::wallet::OwnerId;

/// Decimals of the NeoFS balance contract, used for owners without an entry.
pub const DEFAULT_PRECISION: u32 = 12;

/// Accounting service answering from a fixed balance table.
///
/// Requests must carry a valid verification chain; responses are signed with
/// the service's own key.
#[derive(Debug)]
pub struct StaticAccountingService {
    signer: Signer,
    scheme: SignatureScheme,
    epoch: u64,
    balances: HashMap<OwnerId, Amount>,
}

impl StaticAccountingService {
    pub fn new(signer: Signer, epoch: u64, balances: HashMap<OwnerId, Amount>) -> Self {
        let scheme = *signer.scheme();
        StaticAccountingService {
            signer,
            scheme,
            epoch,
            balances,
        }
    }

    fn lookup(&self, request: &BalanceRequest) -> Result<Amount, Status> {
        let raw = request
            .body
            .as_ref()
            .and_then(|body| body.owner_id.as_ref())
            .ok_or_else(|| Status::invalid_argument("Request carries no owner id."))?;
        let owner = OwnerId::from_bytes(raw.value.clone())
            .map_err(|e| Status::invalid_argument(e.to_string()))?;
        let amount = self.balances.get(&owner).copied().unwrap_or(Amount {
            value: 0,
            precision: DEFAULT_PRECISION,
        });
        info!("Balance of {} is {}", owner, amount);
        Ok(amount)
    }
}

#[tonic::async_trait]
impl AccountingService for StaticAccountingService {
    async fn balance(
        &self,
        request: Request<BalanceRequest>,
    ) -> Result<Response<BalanceResponse>, Status> {

        debug!("Got Request: {:?}", request);

        let r = request.get_ref();
        match verify_message(r, &self.scheme) {
            Ok(true) => {}
            Ok(false) => {
                warn!("Request signatures do not verify!");
                return Err(Status::unauthenticated("Request verification header does not match its content."));
            }
            Err(e) => {
                warn!("Request signatures are malformed: {}", e);
                return Err(Status::invalid_argument(e.to_string()));
            }
        }
        if let Some(verify) = &r.verify_header {
            debug!("Verified chain of {} header(s)", chain_depth(verify));
        }

        let amount = self.lookup(r)?;
        let response = BalanceResponse {
            body: Some(balance_response::Body {
                balance: Some(amount.into()),
            }),
            meta_header: Some(ResponseMetaHeader {
                version: Some(api_version()),
                epoch: self.epoch,
                ttl: 1,
                ..Default::default()
            }),
            verify_header: None,
        };

        let signed = sign_message(response, &self.signer)
            .map_err(|e| Status::internal(e.to_string()))?;
        Ok(Response::new(signed.into_inner()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::request::build_balance_request_for;
    use crate::wallet::Account;
    use crate::crypto::Curve;

    const SERVER_KEY: &str = "c28a9f80738f770d527803a566cf6fc3edf6cea586c4fc4a5223a5ad797e1ac3";
    const CLIENT_KEY: &str = "1dd37fba80fec4e6a6f13fd708d8dcb3b29def768017052f6c930fa1c5d90bbb";

    fn service(balances: HashMap<OwnerId, Amount>) -> StaticAccountingService {
        let account = Account::from_hex(Curve::P256, SERVER_KEY).unwrap();
        StaticAccountingService::new(account.signer(SignatureScheme::default()).unwrap(), 7, balances)
    }

    fn client() -> (Account, Signer) {
        let account = Account::from_hex(Curve::P256, CLIENT_KEY).unwrap();
        let signer = account.signer(SignatureScheme::default()).unwrap();
        (account, signer)
    }

    #[tokio::test]
    async fn answers_signed_requests_with_signed_responses() {
        let (account, signer) = client();
        let mut balances = HashMap::new();
        balances.insert(account.owner_id().clone(), Amount { value: 12345, precision: 2 });
        let service = service(balances);

        let request = build_balance_request_for(account.owner_id(), 2);
        let signed = sign_message(request, &signer).unwrap().into_inner();
        let response = service.balance(Request::new(signed)).await.unwrap().into_inner();

        assert!(verify_message(&response, &SignatureScheme::default()).unwrap());
        let balance = response.body.unwrap().balance.unwrap();
        assert_eq!((balance.value, balance.precision), (12345, 2));
        assert_eq!(response.meta_header.unwrap().epoch, 7);
    }

    #[tokio::test]
    async fn unknown_owner_has_zero_balance() {
        let (account, signer) = client();
        let request = build_balance_request_for(account.owner_id(), 2);
        let signed = sign_message(request, &signer).unwrap().into_inner();
        let response = service(HashMap::new())
            .balance(Request::new(signed))
            .await
            .unwrap()
            .into_inner();
        let balance = response.body.unwrap().balance.unwrap();
        assert_eq!((balance.value, balance.precision), (0, DEFAULT_PRECISION));
    }

    #[tokio::test]
    async fn rejects_unsigned_and_tampered_requests() {
        let (account, signer) = client();
        let service = service(HashMap::new());

        let unsigned = build_balance_request_for(account.owner_id(), 2);
        let status = service.balance(Request::new(unsigned.clone())).await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);

        let mut tampered = sign_message(unsigned, &signer).unwrap().into_inner();
        tampered.meta_header.as_mut().unwrap().ttl = 9;
        let status = service.balance(Request::new(tampered)).await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }
}
