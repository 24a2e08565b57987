//! Maps top-ups and peer transfers onto one transaction shape.

use time::OffsetDateTime;

use crate::{
    database_id::DatabaseId,
    format::StatusBucket,
    transaction::{peer_transfer::PeerTransferRecord, top_up::TopUpRecord},
    user::UserID,
};

/// The label for top-ups that do not say where the money came from.
pub const DEFAULT_PROVIDER_LABEL: &str = "UPI";
/// The status of every peer transfer, transfers are only recorded once they succeed.
pub const PEER_TRANSFER_STATUS: &str = "success";

const TOP_UP_LABEL: &str = "Money Added";
const RECEIVED_LABEL: &str = "Received from";
const SENT_LABEL: &str = "Sent to";

/// Which way money moved relative to the viewing user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Money came into the user's wallet.
    Credit,
    /// Money left the user's wallet.
    Debit,
}

/// A transaction as read from one of the transaction sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRecord {
    TopUp(TopUpRecord),
    PeerTransfer(PeerTransferRecord),
}

/// The source row a [UnifiedTransaction] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    TopUp(DatabaseId),
    PeerTransfer(DatabaseId),
}

impl Origin {
    /// Sort key for transactions with the same time: top-ups come before peer
    /// transfers, then newer rows (higher IDs) come first.
    pub(super) fn tie_break_key(self) -> (u8, std::cmp::Reverse<DatabaseId>) {
        match self {
            Origin::TopUp(id) => (0, std::cmp::Reverse(id)),
            Origin::PeerTransfer(id) => (1, std::cmp::Reverse(id)),
        }
    }
}

/// A top-up or peer transfer from the point of view of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedTransaction {
    /// The source row.
    pub origin: Origin,
    /// When the transaction happened.
    pub time: OffsetDateTime,
    /// The amount in minor units, never negative.
    pub amount: i64,
    /// Whether money came in or went out.
    pub direction: Direction,
    /// The status as stored, e.g. "Processing".
    pub status: String,
    /// Where the money came from or went to: a provider or the other user.
    pub counterparty_label: String,
    /// What happened, e.g. "Sent to".
    pub activity_label: &'static str,
}

impl UnifiedTransaction {
    /// How the status should be shown and counted.
    pub fn status_bucket(&self) -> StatusBucket {
        StatusBucket::classify(&self.status)
    }

    /// A one line summary, e.g. "Money Added via HDFC Bank" or "Sent to Ravi".
    pub fn description(&self) -> String {
        match self.origin {
            Origin::TopUp(_) => format!("{} via {}", self.activity_label, self.counterparty_label),
            Origin::PeerTransfer(_) => {
                format!("{} {}", self.activity_label, self.counterparty_label)
            }
        }
    }
}

/// Convert a transaction from either source into a [UnifiedTransaction] as
/// seen by `viewer`.
pub fn normalize(record: SourceRecord, viewer: UserID) -> UnifiedTransaction {
    match record {
        SourceRecord::TopUp(top_up) => normalize_top_up(top_up),
        SourceRecord::PeerTransfer(transfer) => normalize_peer_transfer(transfer, viewer),
    }
}

fn normalize_top_up(top_up: TopUpRecord) -> UnifiedTransaction {
    let counterparty_label = top_up
        .provider
        .filter(|provider| !provider.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROVIDER_LABEL.to_owned());

    UnifiedTransaction {
        origin: Origin::TopUp(top_up.id),
        time: top_up.start_time,
        amount: top_up.amount,
        direction: Direction::Credit,
        status: top_up.status,
        counterparty_label,
        activity_label: TOP_UP_LABEL,
    }
}

fn normalize_peer_transfer(transfer: PeerTransferRecord, viewer: UserID) -> UnifiedTransaction {
    let (direction, counterparty, activity_label) = if transfer.to.id == viewer {
        (Direction::Credit, &transfer.from, RECEIVED_LABEL)
    } else {
        (Direction::Debit, &transfer.to, SENT_LABEL)
    };

    UnifiedTransaction {
        origin: Origin::PeerTransfer(transfer.id),
        time: transfer.timestamp,
        amount: transfer.amount,
        direction,
        status: PEER_TRANSFER_STATUS.to_owned(),
        counterparty_label: counterparty.display_name(),
        activity_label,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        transaction::{
            peer_transfer::{Party, PeerTransferRecord},
            top_up::TopUpRecord,
        },
        user::UserID,
    };

    use super::{Direction, Origin, SourceRecord, normalize};

    const VIEWER: UserID = UserID::new(1);

    fn top_up(status: &str, provider: Option<&str>) -> SourceRecord {
        SourceRecord::TopUp(TopUpRecord {
            id: 3,
            start_time: datetime!(2026-10-14 10:00 UTC),
            amount: 25000,
            status: status.to_owned(),
            provider: provider.map(str::to_owned),
        })
    }

    fn transfer(from: Party, to: Party) -> SourceRecord {
        SourceRecord::PeerTransfer(PeerTransferRecord {
            id: 8,
            timestamp: datetime!(2026-10-14 11:00 UTC),
            amount: 10000,
            from,
            to,
        })
    }

    fn party(id: i64, name: Option<&str>) -> Party {
        Party {
            id: UserID::new(id),
            name: name.map(str::to_owned),
        }
    }

    #[test]
    fn top_up_is_always_credit() {
        for status in ["Success", "Processing", "Failure", "whatever"] {
            let got = normalize(top_up(status, Some("HDFC Bank")), VIEWER);

            assert_eq!(got.direction, Direction::Credit, "status {status}");
        }
    }

    #[test]
    fn top_up_keeps_status_and_provider() {
        let got = normalize(top_up("Processing", Some("HDFC Bank")), VIEWER);

        assert_eq!(got.origin, Origin::TopUp(3));
        assert_eq!(got.time, datetime!(2026-10-14 10:00 UTC));
        assert_eq!(got.amount, 25000);
        assert_eq!(got.status, "Processing");
        assert_eq!(got.counterparty_label, "HDFC Bank");
        assert_eq!(got.activity_label, "Money Added");
        assert_eq!(got.description(), "Money Added via HDFC Bank");
    }

    #[test]
    fn top_up_without_provider_uses_default_label() {
        assert_eq!(
            normalize(top_up("Success", None), VIEWER).counterparty_label,
            "UPI"
        );
        assert_eq!(
            normalize(top_up("Success", Some(" ")), VIEWER).counterparty_label,
            "UPI"
        );
    }

    #[test]
    fn received_transfer_is_credit_from_sender() {
        let got = normalize(
            transfer(party(2, Some("Ravi Kumar")), party(1, Some("Asha"))),
            VIEWER,
        );

        assert_eq!(got.origin, Origin::PeerTransfer(8));
        assert_eq!(got.direction, Direction::Credit);
        assert_eq!(got.activity_label, "Received from");
        assert_eq!(got.counterparty_label, "Ravi Kumar");
        assert_eq!(got.status, "success");
        assert_eq!(got.description(), "Received from Ravi Kumar");
    }

    #[test]
    fn sent_transfer_is_debit_to_recipient() {
        let got = normalize(
            transfer(party(1, Some("Asha")), party(2, Some("Ravi Kumar"))),
            VIEWER,
        );

        assert_eq!(got.direction, Direction::Debit);
        assert_eq!(got.activity_label, "Sent to");
        assert_eq!(got.counterparty_label, "Ravi Kumar");
        assert_eq!(got.status, "success");
    }

    #[test]
    fn counterparty_without_name_shows_id() {
        let got = normalize(transfer(party(1, Some("Asha")), party(42, None)), VIEWER);

        assert_eq!(got.counterparty_label, "42");
    }

    #[test]
    fn transfer_to_self_is_credit() {
        let got = normalize(
            transfer(party(1, Some("Asha")), party(1, Some("Asha"))),
            VIEWER,
        );

        assert_eq!(got.direction, Direction::Credit);
        assert_eq!(got.counterparty_label, "Asha");
    }
}
