use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tracing_subscriber::EnvFilter;

use investment_tracker::api::YahooOracle;
use investment_tracker::db::{SqliteProvider, sqlite};
use investment_tracker::models::{AssetType, PortfolioStats, Transaction};
use investment_tracker::services::{PortfolioService, TransactionStore, import};

#[derive(Parser)]
#[command(
    name = "investment-tracker",
    about = "Personal investment tracking dashboard"
)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, env = "INVESTMENTS_DB", default_value = "data/investments.db")]
    database: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Portfolio performance against live market prices
    Dashboard,
    /// Record a buy transaction
    Add {
        date: NaiveDate,
        asset_type: AssetType,
        ticker: String,
        amount: Decimal,
        quantity: Decimal,
    },
    /// List all transactions, newest first
    History,
    /// Replace every field of an existing transaction
    Update {
        id: i64,
        date: NaiveDate,
        asset_type: AssetType,
        ticker: String,
        amount: Decimal,
        quantity: Decimal,
    },
    /// Delete a transaction
    Delete { id: i64 },
    /// Manage the curated ticker list
    #[command(subcommand)]
    Assets(AssetCommand),
    /// Import transactions from a CSV file (date,asset_type,ticker,amount,quantity)
    Import { path: String },
}

#[derive(Subcommand)]
enum AssetCommand {
    /// List managed tickers, optionally filtered by type
    List { asset_type: Option<AssetType> },
    /// Register a ticker for quick selection
    Add {
        ticker: String,
        asset_type: AssetType,
    },
    /// Remove a managed ticker by id
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let database_path = shellexpand::tilde(&cli.database).into_owned();
    if let Some(parent) = Path::new(&database_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(&database_path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;
    sqlite::init(&pool).await?;

    let provider = Arc::new(SqliteProvider::new(pool));
    let store = Arc::new(TransactionStore::new(provider));

    match cli.command {
        Command::Dashboard => {
            let oracle = Arc::new(YahooOracle::new());
            let service = PortfolioService::new(store.clone(), oracle);

            match service.portfolio_stats().await {
                Some(stats) => print_stats(&stats),
                None => println!("No investments found. Use 'add' to start tracking."),
            }
        }
        Command::Add {
            date,
            asset_type,
            ticker,
            amount,
            quantity,
        } => {
            store
                .add_transaction(date, asset_type, &ticker, amount, quantity)
                .await?;
            println!(
                "Saved: {} {} for ${} on {}",
                quantity,
                ticker.to_uppercase(),
                amount,
                date
            );
        }
        Command::History => print_history(&store.list_transactions().await),
        Command::Update {
            id,
            date,
            asset_type,
            ticker,
            amount,
            quantity,
        } => {
            store
                .update_transaction(id, date, asset_type, &ticker, amount, quantity)
                .await?;
            println!("Updated transaction {}", id);
        }
        Command::Delete { id } => {
            store.delete_transaction(id).await?;
            println!("Deleted transaction {}", id);
        }
        Command::Assets(command) => run_asset_command(&store, command).await?,
        Command::Import { path } => {
            let path = shellexpand::tilde(&path).into_owned();
            let imported = import::import_transactions(&store, &path).await?;
            println!("Imported {} transactions", imported);
        }
    }

    Ok(())
}

async fn run_asset_command(store: &TransactionStore, command: AssetCommand) -> Result<()> {
    match command {
        AssetCommand::List { asset_type } => {
            let assets = store.list_managed_assets(asset_type).await?;
            if assets.is_empty() {
                println!("No managed assets found.");
                return Ok(());
            }

            println!("{:<6} {:<10} {:<8}", "ID", "TICKER", "TYPE");
            for asset in assets {
                println!(
                    "{:<6} {:<10} {:<8}",
                    asset.id(),
                    asset.ticker(),
                    asset.asset_type().to_string()
                );
            }
        }
        AssetCommand::Add { ticker, asset_type } => {
            if store.add_managed_asset(&ticker, asset_type).await? {
                println!("Added {} to managed assets.", ticker.to_uppercase());
            } else {
                println!("Asset {} already exists.", ticker.to_uppercase());
            }
        }
        AssetCommand::Delete { id } => {
            store.delete_managed_asset(id).await?;
            println!("Deleted managed asset {}", id);
        }
    }

    Ok(())
}

fn print_stats(stats: &PortfolioStats) {
    println!(
        "Total invested:    {:>14}",
        format_money(stats.total_invested())
    );
    println!(
        "Current value:     {:>14}",
        format_money(stats.total_current_value())
    );
    println!(
        "Total profit/loss: {:>14} ({:.2}%)",
        format_money(&stats.total_profit_loss()),
        stats.total_return_pct()
    );
    println!();
    println!(
        "{:<10} {:<8} {:>14} {:>16} {:>14} {:>14} {:>14} {:>10}",
        "TICKER", "TYPE", "INVESTED", "QUANTITY", "PRICE", "VALUE", "P/L", "RETURN %"
    );

    for line in stats.lines() {
        println!(
            "{:<10} {:<8} {:>14} {:>16} {:>14} {:>14} {:>14} {:>10}",
            line.ticker(),
            line.asset_type().to_string(),
            format_money(line.invested()),
            line.quantity().to_string(),
            line.current_price()
                .as_ref()
                .map_or(String::from("n/a"), format_money),
            format_money(line.current_value()),
            format_money(line.profit_loss()),
            format!("{:.2}", line.return_pct())
        );
    }
}

fn print_history(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No history available.");
        return;
    }

    println!(
        "{:<6} {:<12} {:<10} {:<8} {:>14} {:>16} {:>14}",
        "ID", "DATE", "TICKER", "TYPE", "AMOUNT", "QUANTITY", "PRICE/UNIT"
    );

    for transaction in transactions {
        println!(
            "{:<6} {:<12} {:<10} {:<8} {:>14} {:>16} {:>14}",
            transaction.id(),
            transaction.date().to_string(),
            transaction.ticker(),
            transaction.asset_type().to_string(),
            format_money(transaction.amount()),
            transaction.quantity().to_string(),
            format_money(&transaction.price_per_unit())
        );
    }
}

fn format_money(value: &Decimal) -> String {
    format!("${:.2}", value)
}
