//! Dashboard module
//!
//! Provides an overview page showing the wallet balance, quick stats and the
//! most recent transactions.

mod handlers;
mod view;

pub use handlers::get_dashboard_page;
