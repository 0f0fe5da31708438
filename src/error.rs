use thiserror::Error;

/// Failures talking to the node endpoint.
#[derive(Debug, Error)]
pub enum EthClientError {
    #[error("rpc transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid response data: {0}")]
    Decode(String),
}

/// Failures while aggregating a portfolio. Callers only ever see these as a
/// generic server error; the detail stays in the logs.
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] alloy_primitives::hex::FromHexError),

    #[error(transparent)]
    Chain(#[from] EthClientError),

    #[error("balance exceeds representable range: {0}")]
    ValueOutOfRange(String),
}
