use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use super::AssetType;

/// Per-ticker aggregate, recomputed on every stats request.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct PortfolioLine {
    ticker: String,
    asset_type: AssetType,
    invested: Decimal,
    quantity: Decimal,
    current_price: Option<Decimal>,
    current_value: Decimal,
    profit_loss: Decimal,
    return_pct: Decimal,
}

#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct PortfolioStats {
    total_invested: Decimal,
    total_current_value: Decimal,
    lines: Vec<PortfolioLine>,
}

impl PortfolioStats {
    pub fn total_profit_loss(&self) -> Decimal {
        self.total_current_value - self.total_invested
    }

    pub fn total_return_pct(&self) -> Decimal {
        if self.total_invested > Decimal::ZERO {
            self.total_profit_loss() / self.total_invested * Decimal::from(100)
        } else {
            Decimal::ZERO
        }
    }
}
