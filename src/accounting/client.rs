use neofs_accounting::balance::{Amount, BalanceClient, GrpcTransport};
use neofs_accounting::common::config;

use clap::{App, Arg};
use futures::future;
use itertools::Itertools;

use simple_logger::SimpleLogger;
#[macro_use] extern crate log;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::from_env().init()?;
    let args = App::new("NeoFS Balance")
        .arg(Arg::with_name("config")
             .short("c")
             .long("config")
             .takes_value(true)
             .value_name("FILE")
             .default_value("client_config.json")
             .help("Client .json configuration file")
        )
        .arg(Arg::with_name("address")
             .short("a")
             .long("address")
             .takes_value(true)
             .multiple(true)
             .number_of_values(1)
             .value_name("ADDRESS")
             .help("Account address to query, the configured account when omitted")
        ).get_matches();

    let conf_path = args.value_of("config").unwrap_or("client_config.json");
    info!("Parsing configuration file `{}`.", conf_path);
    let (config, account, scheme) = config::parse_client(conf_path)?;
    debug!("Parsed configuration file: {:?}", config);

    let ca = match &config.tlsauth {
        Some(tlsauth) => Some(tokio::fs::read(&tlsauth.ca).await?),
        None => None,
    };
    let transport = GrpcTransport::connect(&config.endpoint, ca, config.timeout()).await?;
    info!("Connected to {}", config.endpoint);

    let client = BalanceClient::new(account, scheme, transport)?
        .with_ttl(config.ttl)
        .with_timeout(config.timeout())
        .with_response_verification(config.verify_responses);

    let addresses: Vec<String> = match args.values_of("address") {
        Some(values) => values.unique().map(String::from).collect(),
        None => vec![client.account().address()],
    };

    let balances = future::join_all(
        addresses.iter().map(|address| client.get_amount(address))
    ).await;

    for (address, balance) in addresses.iter().zip(balances) {
        match balance {
            Ok(Amount { value, precision }) => {
                println!("address: {}", address);
                println!("value: {}", value);
                println!("precision: {}", precision);
                println!("balance: {}", Amount { value, precision });
            }
            Err(e) => {
                error!("Can't get NeoFS balance of {}: {}", address, e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
