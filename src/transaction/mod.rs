//! Top-ups and peer transfers, and the unified transaction history built from them.

mod feed;
mod peer_transfer;
mod top_up;
mod transactions_page;
mod unified;
mod view;

pub use feed::{TransactionFeed, fetch_transaction_feed};
pub use peer_transfer::{NewPeerTransfer, create_peer_transfer, create_peer_transfer_table};
pub use top_up::{NewTopUp, create_top_up, create_top_up_table};
pub use transactions_page::get_transactions_page;
pub use unified::{Direction, UnifiedTransaction};
