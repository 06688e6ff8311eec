use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::balance::{Amount, DEFAULT_TTL};
use crate::crypto::SignatureScheme;
use crate::wallet::{Account, OwnerId};
use crate::Result;

/// Prefix of environment variables overriding file settings, e.g. `NEOFS_ENDPOINT`.
pub const ENV_PREFIX: &str = "NEOFS";

#[derive(Deserialize, Clone, Debug)]
pub struct ClientConfig {
    pub endpoint: String,
    #[serde(default)]
    pub private_key: Option<SecretString>,
    #[serde(default)]
    pub wif: Option<SecretString>,
    /// Expected address of the configured key.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default = "default_verify_responses")]
    pub verify_responses: bool,
    #[serde(default)]
    pub scheme: SchemeConfig,
    #[serde(default)]
    pub tlsauth: Option<ClientTlsAuth>,
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ClientTlsAuth {
    pub ca: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub private_key: SecretString,
    #[serde(default)]
    pub epoch: u64,
    #[serde(default)]
    pub scheme: SchemeConfig,
    #[serde(default)]
    pub balances: Vec<BalanceEntry>,
    #[serde(default)]
    pub tls: Option<ServerTlsAuth>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerTlsAuth {
    pub cert: String,
    pub key: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct BalanceEntry {
    pub address: String,
    pub value: i64,
    pub precision: u32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SchemeConfig {
    #[serde(default = "default_curve")]
    pub curve: String,
    #[serde(default = "default_hash")]
    pub hash: String,
    #[serde(default = "default_key_format")]
    pub key_format: String,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        SchemeConfig {
            curve: default_curve(),
            hash: default_hash(),
            key_format: default_key_format(),
        }
    }
}

/// Private key text (hex or WIF) as written in a config file. Never printed.
#[derive(Deserialize, Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(..)")
    }
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

fn default_verify_responses() -> bool {
    true
}

fn default_curve() -> String {
    String::from("P-256")
}

fn default_hash() -> String {
    String::from("SHA-512")
}

fn default_key_format() -> String {
    String::from("uncompressed")
}

fn invalid(message: String) -> config::ConfigError {
    config::ConfigError::Message(message)
}

fn validate_scheme(scheme: &SchemeConfig) -> Result<SignatureScheme> {
    SignatureScheme::parse(&scheme.curve, &scheme.hash, &scheme.key_format)
        .map_err(|e| invalid(format!("The configured signature scheme is invalid. {}", e)).into())
}

fn validate_client_account(conf: &ClientConfig, scheme: &SignatureScheme) -> Result<Account> {
    let account = match (&conf.private_key, &conf.wif) {
        (Some(key), None) => Account::from_hex(scheme.curve, key.expose()),
        (None, Some(wif)) => Account::from_wif(scheme.curve, wif.expose()),
        _ => {
            return Err(invalid(String::from(
                "Exactly one of `private_key' and `wif' must be configured.",
            ))
            .into())
        }
    }
    .map_err(|e| invalid(format!("The configured private key is invalid. {}", e)))?;

    if let Some(address) = &conf.address {
        if address != &account.address() {
            return Err(invalid(format!(
                "The configured address `{}' does not belong to the configured key.",
                address
            ))
            .into());
        }
    }
    Ok(account)
}

fn validate_balances(entries: &[BalanceEntry]) -> Result<HashMap<OwnerId, Amount>> {
    entries
        .iter()
        .map(|entry| -> Result<(OwnerId, Amount)> {
            let owner = OwnerId::from_address(&entry.address)
                .map_err(|e| invalid(format!("At least one of the configured balance addresses is invalid. {}", e)))?;
            let amount = Amount {
                value: entry.value,
                precision: entry.precision,
            };
            if !amount.is_valid() {
                return Err(invalid(format!("Balance precision of {} is out of range.", entry.address)).into());
            }
            Ok((owner, amount))
        })
        .collect()
}

fn load<T: DeserializeOwned>(path: &str) -> Result<T> {
    let conf_file = config::File::new(path, config::FileFormat::Json);
    let mut conf = config::Config::default();
    conf.merge(conf_file)?;
    conf.merge(config::Environment::with_prefix(ENV_PREFIX).separator("__"))?;
    Ok(conf.try_into::<T>()?)
}

fn load_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    let mut conf = config::Config::default();
    conf.merge(config::File::from_str(json, config::FileFormat::Json))?;
    Ok(conf.try_into::<T>()?)
}

fn resolve_client(conf: ClientConfig) -> Result<(ClientConfig, Account, SignatureScheme)> {
    let scheme = validate_scheme(&conf.scheme)?;
    let account = validate_client_account(&conf, &scheme)?;
    Ok((conf, account, scheme))
}

fn resolve_server(
    conf: ServerConfig,
) -> Result<(ServerConfig, Account, SignatureScheme, HashMap<OwnerId, Amount>)> {
    let scheme = validate_scheme(&conf.scheme)?;
    let account = Account::from_hex(scheme.curve, conf.private_key.expose())
        .map_err(|e| invalid(format!("The configured private key is invalid. {}", e)))?;
    let balances = validate_balances(&conf.balances)?;
    Ok((conf, account, scheme, balances))
}

/// Reads and validates a client configuration file.
pub fn parse_client(path: &str) -> Result<(ClientConfig, Account, SignatureScheme)> {
    resolve_client(load(path)?)
}

/// Like [`parse_client`], from JSON text and without environment overrides.
pub fn client_from_json(json: &str) -> Result<(ClientConfig, Account, SignatureScheme)> {
    resolve_client(load_str(json)?)
}

/// Reads and validates an accounting server configuration file.
pub fn parse_server(
    path: &str,
) -> Result<(ServerConfig, Account, SignatureScheme, HashMap<OwnerId, Amount>)> {
    resolve_server(load(path)?)
}

pub fn server_from_json(
    json: &str,
) -> Result<(ServerConfig, Account, SignatureScheme, HashMap<OwnerId, Amount>)> {
    resolve_server(load_str(json)?)
}
