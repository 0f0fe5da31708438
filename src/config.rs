use std::env;

/// Public endpoint used when no RPC_URL is configured.
pub const DEFAULT_RPC_URL: &str = "https://eth.llamarpc.com";

pub struct Config {
    pub rpc_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let rpc_url = env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("Invalid PORT value"))?;

        Ok(Config { rpc_url, port })
    }
}
