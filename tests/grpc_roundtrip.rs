use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use neofs_accounting::balance::{Amount, BalanceClient, GrpcTransport, StaticAccountingService};
use neofs_accounting::crypto::{Curve, SignatureScheme};
use neofs_accounting::proto::accounting::accounting_service_server::AccountingServiceServer;
use neofs_accounting::wallet::Account;
use tonic::transport::Server;

const CLIENT_KEY: &str = "1dd37fba80fec4e6a6f13fd708d8dcb3b29def768017052f6c930fa1c5d90bbb";
const SERVER_KEY: &str = "c28a9f80738f770d527803a566cf6fc3edf6cea586c4fc4a5223a5ad797e1ac3";

fn free_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

async fn connect(addr: SocketAddr) -> GrpcTransport {
    let endpoint = format!("grpc://{}", addr);
    for _ in 0..50 {
        if let Ok(transport) = GrpcTransport::connect(&endpoint, None, Some(Duration::from_secs(1))).await {
            return transport;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("accounting server at {} never came up", addr);
}

#[tokio::test]
async fn balance_over_grpc() {
    let client_account = Account::from_hex(Curve::P256, CLIENT_KEY).unwrap();
    let server_account = Account::from_hex(Curve::P256, SERVER_KEY).unwrap();

    let mut balances = HashMap::new();
    balances.insert(client_account.owner_id().clone(), Amount { value: 12345, precision: 2 });
    let service = StaticAccountingService::new(
        server_account.signer(SignatureScheme::default()).unwrap(),
        1,
        balances,
    );

    let addr = free_addr();
    tokio::spawn(
        Server::builder()
            .add_service(AccountingServiceServer::new(service))
            .serve(addr),
    );

    let transport = connect(addr).await;
    let client = BalanceClient::new(client_account.clone(), SignatureScheme::default(), transport)
        .unwrap()
        .with_timeout(Some(Duration::from_secs(5)));

    assert_eq!(client.get_balance(&client_account.address()).await.unwrap(), 123.45);
    assert_eq!(
        client.get_amount(&server_account.address()).await.unwrap(),
        Amount { value: 0, precision: 12 }
    );
}
