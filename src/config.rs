//! Settings that control how the pages present money and activity.

use crate::format::CurrencyFormat;

/// The default number of transactions shown under "Recent Activity" on the dashboard.
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 5;

/// The config that controls how pages display balances and transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// The currency symbol and digit grouping for amounts.
    pub currency: CurrencyFormat,
    /// The maximum number of transactions to show on the dashboard.
    pub recent_activity_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyFormat::default(),
            recent_activity_limit: DEFAULT_RECENT_ACTIVITY_LIMIT,
        }
    }
}
