pub mod import;
pub mod portfolio_service;
pub mod transaction_store;

pub use portfolio_service::PortfolioService;
pub use transaction_store::TransactionStore;
