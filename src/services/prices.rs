use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// USD price per whole unit of an asset, keyed by symbol. Injected into the
/// aggregator so a live oracle can replace the fixed prices without touching
/// aggregation logic.
pub trait PriceSource: Send + Sync {
    fn usd_price(&self, symbol: &str) -> Decimal;
}

/// Fixed reference prices: a constant for the native asset, 1:1 peg for the
/// tracked stablecoins.
pub struct FixedPrices {
    pub eth_usd: Decimal,
}

impl Default for FixedPrices {
    fn default() -> Self {
        Self {
            eth_usd: dec!(2000),
        }
    }
}

impl PriceSource for FixedPrices {
    fn usd_price(&self, symbol: &str) -> Decimal {
        match symbol {
            "ETH" => self.eth_usd,
            _ => Decimal::ONE,
        }
    }
}
