//! Pure formatting helpers used by the page views.
//!
//! Amounts arrive here as integer minor units and are only converted to major
//! units for display.

mod currency;
mod provider;
mod status;
mod timestamp;

pub use currency::{CurrencyFormat, Grouping};
pub use provider::provider_icon;
pub use status::{StatusBucket, transaction_icon};
pub use timestamp::{format_long_date, format_relative_time, format_transaction_time};
