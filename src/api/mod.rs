pub mod oracle;
pub mod utils;
pub mod yahoo;
pub mod yahoo_dto;

pub use oracle::{PriceOracle, YahooOracle};
pub use yahoo::YahooApi;
