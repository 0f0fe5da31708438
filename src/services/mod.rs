pub mod eth_client;
pub mod portfolio;
pub mod prices;
