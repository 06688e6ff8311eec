use tonic::transport::{Identity, Server, ServerTlsConfig};

use neofs_accounting::balance::StaticAccountingService;
use neofs_accounting::common::config;
use neofs_accounting::proto::accounting::accounting_service_server::AccountingServiceServer;

use clap::{App, Arg};

use simple_logger::SimpleLogger;
#[macro_use] extern crate log;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::from_env().init()?;
    let config_arg = App::new("NeoFS Accounting Server")
        .arg(Arg::with_name("config")
             .short("c")
             .long("config")
             .takes_value(true)
             .value_name("FILE")
             .default_value("server_config.json")
             .help("Accounting server .json configuration file")
        ).get_matches();

    let conf_path = config_arg.value_of("config").unwrap_or("server_config.json");
    info!("Parsing configuration file `{}`.", conf_path);
    let (config, account, scheme, balances) = config::parse_server(conf_path)?;
    debug!("Parsed configuration file: {:?}", config);
    let addr = config.bind_addr.parse()?;

    let mut server = Server::builder();
    if let Some(tls) = &config.tls {
        let server_cert = tokio::fs::read(&tls.cert).await?;
        let server_key = tokio::fs::read(&tls.key).await?;
        let server_identity = Identity::from_pem(server_cert, server_key);
        server = server.tls_config(ServerTlsConfig::new().identity(server_identity))?;
    }

    info!("Serving {} balance(s) as {}", balances.len(), account.address());
    let service = StaticAccountingService::new(account.signer(scheme)?, config.epoch, balances);
    debug!("Initialized accounting service: {:?}", service);

    info!("Serving on {}...", addr);

    server
        .add_service(AccountingServiceServer::new(service))
        .serve_with_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Can't listen for shutdown signal: {}", e);
                futures::future::pending::<()>().await;
            }
            info!("Shutting down.");
        })
        .await?;

    Ok(())
}
