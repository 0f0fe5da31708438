use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One fungible token holding. `balance` is the exact decimal-adjusted string
/// form of the on-chain smallest-unit integer; chain balances routinely exceed
/// the safe float integer range, so it is never carried as a float.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBalance {
    pub symbol: String,
    pub balance: String,
    pub decimals: u32,
    #[serde(rename = "valueUSD", with = "rust_decimal::serde::float")]
    pub value_usd: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AavePosition {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deposited: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_borrowed: Decimal,
    /// Below 1.0 the position is eligible for liquidation.
    #[serde(with = "rust_decimal::serde::float")]
    pub health_factor: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundPosition {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_supplied: Decimal,
}

/// Absent positions are omitted from the JSON body entirely; absence covers
/// both "no exposure" and "read failed".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolPositions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aave: Option<AavePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound: Option<CompoundPosition>,
}

/// Aggregate result of one portfolio query. Built fresh per request and
/// discarded once serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_balance: Decimal,
    pub tokens: Vec<TokenBalance>,
    pub protocols: ProtocolPositions,
}

/// Raw result of the Aave pool's `getUserAccountData`, six words in return
/// order. Only collateral, debt and health factor are projected into the
/// response; the rest are out of scope for this surface.
#[derive(Debug, Clone)]
pub struct UserAccountData {
    pub total_collateral_eth: U256,
    pub total_debt_eth: U256,
    pub available_borrows_eth: U256,
    pub current_liquidation_threshold: U256,
    pub ltv: U256,
    pub health_factor: U256,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
