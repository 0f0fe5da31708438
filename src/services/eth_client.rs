use crate::error::EthClientError;
use crate::models::UserAccountData;
use alloy_primitives::{hex, Address, U256};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

/// ERC-20 `balanceOf(address)`
const BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];
/// ERC-20 `decimals()`
const DECIMALS_SELECTOR: [u8; 4] = [0x31, 0x3c, 0xe5, 0x67];
/// Aave LendingPool `getUserAccountData(address)`
const GET_USER_ACCOUNT_DATA_SELECTOR: [u8; 4] = [0xbf, 0x92, 0x85, 0x7c];

/// Read-only view of the chain. The aggregator takes this as an injected
/// dependency so tests can stand in for the node endpoint.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn native_balance(&self, address: Address) -> Result<U256, EthClientError>;

    async fn token_balance(&self, token: Address, owner: Address)
        -> Result<U256, EthClientError>;

    async fn token_decimals(&self, token: Address) -> Result<u32, EthClientError>;

    async fn user_account_data(
        &self,
        pool: Address,
        user: Address,
    ) -> Result<UserAccountData, EthClientError>;
}

/// JSON-RPC 2.0 client over HTTP. No retry or backoff layer; transport
/// timeouts are whatever reqwest defaults to.
pub struct EthClient {
    http: reqwest::Client,
    rpc_url: String,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl EthClient {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            rpc_url: rpc_url.into(),
        }
    }

    async fn request(&self, method: &str, params: Value) -> Result<String, EthClientError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response: RpcResponse = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(EthClientError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        response
            .result
            .ok_or_else(|| EthClientError::Decode("response carries neither result nor error".into()))
    }

    async fn call(&self, to: Address, data: String) -> Result<String, EthClientError> {
        self.request("eth_call", json!([{ "to": format!("{to}"), "data": data }, "latest"]))
            .await
    }
}

#[async_trait]
impl ChainReader for EthClient {
    async fn native_balance(&self, address: Address) -> Result<U256, EthClientError> {
        let result = self
            .request("eth_getBalance", json!([format!("{address}"), "latest"]))
            .await?;
        decode_quantity(&result)
    }

    async fn token_balance(
        &self,
        token: Address,
        owner: Address,
    ) -> Result<U256, EthClientError> {
        let result = self
            .call(token, encode_call(BALANCE_OF_SELECTOR, &[owner]))
            .await?;
        Ok(decode_words(&result, 1)?[0])
    }

    async fn token_decimals(&self, token: Address) -> Result<u32, EthClientError> {
        let result = self.call(token, encode_call(DECIMALS_SELECTOR, &[])).await?;
        let word = decode_words(&result, 1)?[0];
        if word > U256::from(u32::MAX) {
            return Err(EthClientError::Decode(format!("decimals out of range: {word}")));
        }
        Ok(word.to::<u32>())
    }

    async fn user_account_data(
        &self,
        pool: Address,
        user: Address,
    ) -> Result<UserAccountData, EthClientError> {
        let result = self
            .call(pool, encode_call(GET_USER_ACCOUNT_DATA_SELECTOR, &[user]))
            .await?;
        let words = decode_words(&result, 6)?;
        Ok(UserAccountData {
            total_collateral_eth: words[0],
            total_debt_eth: words[1],
            available_borrows_eth: words[2],
            current_liquidation_threshold: words[3],
            ltv: words[4],
            health_factor: words[5],
        })
    }
}

/// ABI-encode a call with address arguments, each left-padded to 32 bytes.
fn encode_call(selector: [u8; 4], args: &[Address]) -> String {
    let mut data = Vec::with_capacity(4 + 32 * args.len());
    data.extend_from_slice(&selector);
    for arg in args {
        data.extend_from_slice(&[0u8; 12]);
        data.extend_from_slice(arg.as_slice());
    }
    format!("0x{}", hex::encode(data))
}

/// Decode a quantity result such as `eth_getBalance`'s, hex with no padding.
fn decode_quantity(data: &str) -> Result<U256, EthClientError> {
    U256::from_str_radix(data.trim_start_matches("0x"), 16)
        .map_err(|e| EthClientError::Decode(e.to_string()))
}

/// Decode `count` leading 32-byte words of ABI return data.
fn decode_words(data: &str, count: usize) -> Result<Vec<U256>, EthClientError> {
    let raw = hex::decode(data).map_err(|e| EthClientError::Decode(e.to_string()))?;
    if raw.len() < count * 32 {
        return Err(EthClientError::Decode(format!(
            "return data too short: {} bytes, expected {}",
            raw.len(),
            count * 32
        )));
    }
    Ok(raw
        .chunks_exact(32)
        .take(count)
        .map(U256::from_be_slice)
        .collect())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// In-memory stand-in for the node endpoint.
    #[derive(Default)]
    pub struct MockChain {
        pub native: U256,
        pub balances: HashMap<Address, U256>,
        pub decimals: HashMap<Address, u32>,
        pub account_data: Option<UserAccountData>,
        pub fail_balance_of: Option<Address>,
    }

    fn unavailable(what: &str) -> EthClientError {
        EthClientError::Rpc {
            code: -32000,
            message: format!("{what} unavailable"),
        }
    }

    #[async_trait]
    impl ChainReader for MockChain {
        async fn native_balance(&self, _address: Address) -> Result<U256, EthClientError> {
            Ok(self.native)
        }

        async fn token_balance(
            &self,
            token: Address,
            _owner: Address,
        ) -> Result<U256, EthClientError> {
            if self.fail_balance_of == Some(token) {
                return Err(unavailable("token balance"));
            }
            Ok(self.balances.get(&token).copied().unwrap_or(U256::ZERO))
        }

        async fn token_decimals(&self, token: Address) -> Result<u32, EthClientError> {
            Ok(self.decimals.get(&token).copied().unwrap_or(18))
        }

        async fn user_account_data(
            &self,
            _pool: Address,
            _user: Address,
        ) -> Result<UserAccountData, EthClientError> {
            self.account_data
                .clone()
                .ok_or_else(|| unavailable("account data"))
        }
    }
}
