//! Classifies free-form transaction statuses into display buckets.

use crate::transaction::Direction;

const SETTLED_STATUSES: [&str; 2] = ["success", "completed"];
const PENDING_STATUSES: [&str; 2] = ["processing", "pending"];
const FAILED_STATUSES: [&str; 2] = ["failed", "declined"];

/// The display bucket for a transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBucket {
    /// The money has moved.
    Settled,
    /// The transaction is still being processed.
    Pending,
    /// The transaction did not go through.
    Failed,
    /// A status this app does not recognise.
    Unknown,
}

impl StatusBucket {
    /// Classify a status string, ignoring case.
    ///
    /// Unrecognised statuses are [StatusBucket::Unknown] rather than an error.
    pub fn classify(status: &str) -> Self {
        let matches = |statuses: &[&str]| {
            statuses
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(status))
        };

        if matches(&SETTLED_STATUSES) {
            StatusBucket::Settled
        } else if matches(&PENDING_STATUSES) {
            StatusBucket::Pending
        } else if matches(&FAILED_STATUSES) {
            StatusBucket::Failed
        } else {
            StatusBucket::Unknown
        }
    }

    /// The symbol shown in the status badge.
    pub fn glyph(self) -> &'static str {
        match self {
            StatusBucket::Settled => "✓",
            StatusBucket::Pending => "⏱",
            StatusBucket::Failed => "✕",
            StatusBucket::Unknown => "!",
        }
    }

    /// The colour tag used to style the status.
    pub fn color(self) -> &'static str {
        match self {
            StatusBucket::Settled => "green",
            StatusBucket::Pending => "amber",
            StatusBucket::Failed => "red",
            StatusBucket::Unknown => "slate",
        }
    }

    /// CSS classes for a status badge.
    pub fn badge_style(self) -> &'static str {
        match self {
            StatusBucket::Settled => {
                "inline-flex items-center px-3 py-1 text-xs font-medium rounded-full \
                capitalize bg-green-50 text-green-700 border border-green-200"
            }
            StatusBucket::Pending => {
                "inline-flex items-center px-3 py-1 text-xs font-medium rounded-full \
                capitalize bg-amber-50 text-amber-700 border border-amber-200"
            }
            StatusBucket::Failed => {
                "inline-flex items-center px-3 py-1 text-xs font-medium rounded-full \
                capitalize bg-red-50 text-red-700 border border-red-200"
            }
            StatusBucket::Unknown => {
                "inline-flex items-center px-3 py-1 text-xs font-medium rounded-full \
                capitalize bg-slate-50 text-slate-600 border border-slate-200"
            }
        }
    }
}

/// The small icon shown next to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionIcon {
    /// The symbol to display.
    pub glyph: &'static str,
    /// CSS classes for the icon's circle.
    pub style: &'static str,
}

/// Pick the icon for a transaction.
///
/// Pending and failed transactions show their status, everything else shows
/// which way the money moved.
pub fn transaction_icon(direction: Direction, status: &str) -> TransactionIcon {
    match (StatusBucket::classify(status), direction) {
        (StatusBucket::Pending, _) => TransactionIcon {
            glyph: StatusBucket::Pending.glyph(),
            style: "text-amber-500",
        },
        (StatusBucket::Failed, _) => TransactionIcon {
            glyph: StatusBucket::Failed.glyph(),
            style: "text-red-500",
        },
        (_, Direction::Credit) => TransactionIcon {
            glyph: "↙",
            style: "text-green-500",
        },
        (_, Direction::Debit) => TransactionIcon {
            glyph: "↗",
            style: "text-red-500",
        },
    }
}
