//! HTML rendering for the transaction history page.

use maud::{Markup, html};
use time::{OffsetDateTime, UtcOffset};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    format::{CurrencyFormat, format_transaction_time, provider_icon, transaction_icon},
    html::{CARD_STYLE, LIST_ROW_STYLE, PAGE_CONTAINER_STYLE, base, link, stat_card, status_badge},
    navigation::NavBar,
};

use super::{
    feed::TransactionFeed,
    unified::{Origin, UnifiedTransaction},
};

/// The max number of graphemes to display for a counterparty before
/// truncating and displaying ellipses.
const MAX_LABEL_GRAPHEMES: usize = 32;

/// Shown instead of a provider icon for transfers between users.
const PEER_ICON: &str = "👤";

pub(crate) fn transactions_view(
    feed: &TransactionFeed,
    now: OffsetDateTime,
    local_offset: UtcOffset,
    currency: &CurrencyFormat,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-3xl space-y-4"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Transaction History" }
                }

                @if feed.is_empty() {
                    (empty_state())
                } @else {
                    (summary_cards(feed, currency))

                    ul id="transactions" class=(CARD_STYLE)
                    {
                        @for transaction in &feed.transactions {
                            (transaction_row(transaction, now, local_offset, currency))
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &content)
}

fn summary_cards(feed: &TransactionFeed, currency: &CurrencyFormat) -> Markup {
    html! {
        section id="summary" class="grid grid-cols-1 sm:grid-cols-3 gap-4"
        {
            (stat_card("Total Processed", &currency.format_minor_units(feed.total_settled), "total-processed"))
            (stat_card("Total Transactions", &feed.len().to_string(), "total-transactions"))
            (stat_card("Pending", &feed.pending_count.to_string(), "pending-count"))
        }
    }
}

fn empty_state() -> Markup {
    html! {
        div id="empty-state" class={ (CARD_STYLE) " text-center" }
        {
            p class="text-lg font-semibold" { "No transactions yet" }
            p class="text-gray-500 dark:text-gray-400"
            {
                "Your top-ups and transfers will show up here. "
                (link(endpoints::TOP_UP_VIEW, "Add money"))
                " to get started."
            }
        }
    }
}

fn transaction_row(
    transaction: &UnifiedTransaction,
    now: OffsetDateTime,
    local_offset: UtcOffset,
    currency: &CurrencyFormat,
) -> Markup {
    let source_icon = match transaction.origin {
        Origin::TopUp(_) => provider_icon(&transaction.counterparty_label),
        Origin::PeerTransfer(_) => PEER_ICON,
    };
    let icon = transaction_icon(transaction.direction, &transaction.status);
    let (label, full_label) = truncate_label(&transaction.counterparty_label);

    html! {
        li class=(LIST_ROW_STYLE)
        {
            span aria-hidden="true" class="text-2xl" { (source_icon) }
            span aria-hidden="true" class={ "text-lg " (icon.style) } { (icon.glyph) }

            div class="flex-1 min-w-0"
            {
                div class="flex items-center gap-2"
                {
                    p class="counterparty font-medium truncate" title=[full_label] { (label) }
                    (status_badge(&transaction.status, transaction.status_bucket()))
                }

                p class="text-xs text-gray-500 dark:text-gray-400"
                {
                    span class="activity" { (transaction.activity_label) }
                    " · "
                    span class="time"
                    {
                        (format_transaction_time(transaction.time, now, local_offset))
                    }
                }
            }

            p class="amount font-semibold whitespace-nowrap"
            {
                (currency.format_signed(transaction.amount, transaction.direction, &transaction.status))
            }
        }
    }
}

/// Returns the label to display and, if it was truncated, the full label for
/// a tooltip.
fn truncate_label(label: &str) -> (String, Option<&str>) {
    let label_length = label.graphemes(true).count();

    if label_length <= MAX_LABEL_GRAPHEMES {
        (label.to_owned(), None)
    } else {
        let truncated: String = label.graphemes(true).take(MAX_LABEL_GRAPHEMES - 3).collect();
        (truncated + "...", Some(label))
    }
}
