pub mod asset;
pub mod managed_asset;
pub mod stats;
pub mod transaction;

pub use asset::AssetType;
pub use managed_asset::ManagedAsset;
pub use stats::{PortfolioLine, PortfolioStats};
pub use transaction::Transaction;
