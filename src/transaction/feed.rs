//! The merged, newest-first list of a user's transactions and its summary
//! figures.

use std::cmp::Reverse;

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    format::StatusBucket,
    transaction::{
        peer_transfer::{PeerTransferRecord, get_peer_transfers},
        top_up::{TopUpRecord, get_top_ups},
        unified::{Direction, SourceRecord, UnifiedTransaction, normalize},
    },
    user::UserID,
};

/// All of a user's top-ups and peer transfers, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFeed {
    /// The transactions sorted by time, newest first.
    pub transactions: Vec<UnifiedTransaction>,
    /// The sum of the amounts of settled transactions.
    pub total_settled: i64,
    /// The number of transactions that are still pending.
    pub pending_count: usize,
}

impl TransactionFeed {
    /// Normalize and merge the records from both sources for `viewer`.
    ///
    /// Transactions are sorted by time, newest first. Transactions with the
    /// same time list top-ups before peer transfers, and then the most
    /// recently inserted row first.
    pub fn merge(
        top_ups: Vec<TopUpRecord>,
        transfers: Vec<PeerTransferRecord>,
        viewer: UserID,
    ) -> Self {
        let mut transactions: Vec<UnifiedTransaction> = top_ups
            .into_iter()
            .map(SourceRecord::TopUp)
            .chain(transfers.into_iter().map(SourceRecord::PeerTransfer))
            .map(|record| normalize(record, viewer))
            .collect();

        transactions.sort_by_key(|transaction| {
            (Reverse(transaction.time), transaction.origin.tie_break_key())
        });

        let mut total_settled: i64 = 0;
        let mut pending_count = 0;

        for transaction in &transactions {
            match transaction.status_bucket() {
                StatusBucket::Settled => {
                    total_settled = total_settled.saturating_add(transaction.amount)
                }
                StatusBucket::Pending => pending_count += 1,
                StatusBucket::Failed | StatusBucket::Unknown => {}
            }
        }

        Self {
            transactions,
            total_settled,
            pending_count,
        }
    }

    /// Whether the user has no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// The `count` most recent transactions.
    pub fn recent(&self, count: usize) -> &[UnifiedTransaction] {
        &self.transactions[..count.min(self.transactions.len())]
    }

    /// The sum of settled money coming into the wallet at or after `since`.
    pub fn settled_credits_since(&self, since: OffsetDateTime) -> i64 {
        self.transactions
            .iter()
            .filter(|transaction| {
                transaction.direction == Direction::Credit
                    && transaction.time >= since
                    && transaction.status_bucket() == StatusBucket::Settled
            })
            .fold(0i64, |total, transaction| {
                total.saturating_add(transaction.amount)
            })
    }
}

/// Read both transaction sources for `current_user` and merge them into one
/// feed.
///
/// No queries are run when there is no signed in user, and the feed is empty.
///
/// # Errors
/// Returns an [Error::SqlError] if either source could not be read.
pub fn fetch_transaction_feed(
    current_user: Option<UserID>,
    connection: &Connection,
) -> Result<TransactionFeed, Error> {
    let Some(user_id) = current_user else {
        return Ok(TransactionFeed::default());
    };

    let top_ups = get_top_ups(user_id, connection)?;
    let transfers = get_peer_transfers(user_id, connection)?;

    tracing::debug!(
        "fetched {} top-ups and {} peer transfers for user {user_id}",
        top_ups.len(),
        transfers.len()
    );

    Ok(TransactionFeed::merge(top_ups, transfers, user_id))
}
