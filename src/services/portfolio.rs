use crate::error::PortfolioError;
use crate::models::{AavePosition, Portfolio, ProtocolPositions, TokenBalance};
use crate::services::eth_client::ChainReader;
use crate::services::prices::PriceSource;
use crate::utils::{format_units, wad_to_decimal, NATIVE_DECIMALS};
use alloy_primitives::Address;
use rust_decimal::Decimal;
use std::str::FromStr;

// Contract addresses (mainnet)
pub const USDC_ADDRESS: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
pub const USDT_ADDRESS: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
pub const DAI_ADDRESS: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
pub const AAVE_LENDING_POOL: &str = "0x7d2768dE32b0b80b7a3454c06BdAc94A69DDc7A9";

/// Build the portfolio record for one address: native balance, the tracked
/// stablecoins, and the Aave position, all against a single node endpoint.
///
/// The five reads share no dependency and are issued concurrently. A failed
/// token read fails the whole aggregation; a failed Aave read only drops the
/// position from the result.
pub async fn fetch_portfolio(
    chain: &dyn ChainReader,
    prices: &dyn PriceSource,
    address: &str,
) -> Result<Portfolio, PortfolioError> {
    let owner = Address::from_str(address)?;

    let (eth, usdc, usdt, dai, aave) = tokio::join!(
        native_token(chain, prices, owner),
        erc20_token(chain, prices, "USDC", USDC_ADDRESS, owner),
        erc20_token(chain, prices, "USDT", USDT_ADDRESS, owner),
        erc20_token(chain, prices, "DAI", DAI_ADDRESS, owner),
        aave_position(chain, prices, owner),
    );

    let tokens = vec![eth?, usdc?, usdt?, dai?];

    let aave = match aave {
        Ok(position) => Some(position),
        Err(e) => {
            tracing::error!("Error fetching Aave data: {e}");
            None
        }
    };

    let mut total_balance = tokens
        .iter()
        .fold(Decimal::ZERO, |sum, token| sum + token.value_usd);

    // Deposited collateral is added as-is; the borrowed amount is not netted
    // out, matching what the dashboard has always reported.
    if let Some(position) = &aave {
        total_balance += position.total_deposited;
    }

    Ok(Portfolio {
        total_balance,
        tokens,
        // Compound is part of the response surface but no read is issued
        // for it yet, so the position is always absent.
        protocols: ProtocolPositions {
            aave,
            compound: None,
        },
    })
}

async fn native_token(
    chain: &dyn ChainReader,
    prices: &dyn PriceSource,
    owner: Address,
) -> Result<TokenBalance, PortfolioError> {
    let raw = chain.native_balance(owner).await?;
    let balance = format_units(raw, NATIVE_DECIMALS);
    let value_usd = usd_value(&balance, prices.usd_price("ETH"))?;

    Ok(TokenBalance {
        symbol: "ETH".to_string(),
        balance,
        decimals: NATIVE_DECIMALS,
        value_usd,
    })
}

async fn erc20_token(
    chain: &dyn ChainReader,
    prices: &dyn PriceSource,
    symbol: &str,
    token_address: &str,
    owner: Address,
) -> Result<TokenBalance, PortfolioError> {
    let token = Address::from_str(token_address)?;
    let raw = chain.token_balance(token, owner).await?;
    // Decimals are read per deployment, never assumed.
    let decimals = chain.token_decimals(token).await?;
    let balance = format_units(raw, decimals);
    let value_usd = usd_value(&balance, prices.usd_price(symbol))?;

    Ok(TokenBalance {
        symbol: symbol.to_string(),
        balance,
        decimals,
        value_usd,
    })
}

async fn aave_position(
    chain: &dyn ChainReader,
    prices: &dyn PriceSource,
    owner: Address,
) -> Result<AavePosition, PortfolioError> {
    let pool = Address::from_str(AAVE_LENDING_POOL)?;
    let data = chain.user_account_data(pool, owner).await?;

    // The V2 pool reports collateral and debt in ETH-denominated wei.
    let eth_usd = prices.usd_price("ETH");
    let total_deposited = usd_value(&format_units(data.total_collateral_eth, NATIVE_DECIMALS), eth_usd)?;
    let total_borrowed = usd_value(&format_units(data.total_debt_eth, NATIVE_DECIMALS), eth_usd)?;

    Ok(AavePosition {
        total_deposited,
        total_borrowed,
        health_factor: wad_to_decimal(data.health_factor),
    })
}

fn usd_value(balance: &str, price: Decimal) -> Result<Decimal, PortfolioError> {
    let quantity = Decimal::from_str(balance)
        .map_err(|_| PortfolioError::ValueOutOfRange(balance.to_string()))?;
    quantity
        .checked_mul(price)
        .ok_or_else(|| PortfolioError::ValueOutOfRange(balance.to_string()))
}
