//! HTML rendering for the dashboard page.

use maud::{Markup, html};
use time::{Date, OffsetDateTime};

use crate::{
    balance::Balance,
    endpoints,
    format::{CurrencyFormat, format_long_date, format_relative_time, transaction_icon},
    html::{
        ACTION_BUTTON_STYLE, CARD_LABEL_STYLE, CARD_STYLE, LINK_STYLE, LIST_ROW_STYLE,
        PAGE_CONTAINER_STYLE, base, link, stat_card, status_badge,
    },
    navigation::NavBar,
    transaction::UnifiedTransaction,
};

/// The greeting name for visitors whose name is unknown.
const FALLBACK_NAME: &str = "User";

/// The data shown on the dashboard.
pub(super) struct DashboardView<'a> {
    pub first_name: Option<&'a str>,
    pub today: Date,
    pub now: OffsetDateTime,
    pub balance: Balance,
    /// Settled money received since the start of the local month.
    pub this_month: i64,
    pub recent: &'a [UnifiedTransaction],
    pub currency: &'a CurrencyFormat,
}

pub(super) fn dashboard_view(view: DashboardView) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let name = view.first_name.unwrap_or(FALLBACK_NAME);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-6"
            {
                header
                {
                    h1 id="greeting" class="text-2xl font-bold" { "Welcome back, " (name) "!" }
                    p class=(CARD_LABEL_STYLE) { (format_long_date(view.today)) }
                }

                (balance_card(view.balance, view.currency))

                (quick_stats(view.balance, view.this_month, view.currency))

                (quick_actions())

                (recent_activity(view.recent, view.now, view.currency))
            }
        }
    );

    base("Dashboard", &content)
}

fn balance_card(balance: Balance, currency: &CurrencyFormat) -> Markup {
    let available_percentage = balance.available_percentage();

    html! {
        section class=(CARD_STYLE)
        {
            p class=(CARD_LABEL_STYLE) { "Total Balance" }

            p id="total-balance" class="text-4xl font-bold"
            {
                (currency.format_minor_units(balance.amount))
            }

            @if balance.locked > 0 {
                p id="locked-balance" class="text-sm text-amber-600 dark:text-amber-400"
                {
                    (currency.format_minor_units(balance.locked)) " locked"
                }
            }

            div
                class="w-full h-2 mt-4 rounded-full bg-gray-200 dark:bg-gray-700"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=(format!("{available_percentage:.1}"))
            {
                div
                    class="h-2 rounded-full bg-green-500"
                    style=(format!("width: {available_percentage:.1}%"))
                {}
            }

            p id="available-percentage" class="mt-2 text-sm text-gray-500 dark:text-gray-400"
            {
                (format!("{available_percentage:.1}% available for transactions"))
            }
        }
    }
}

fn quick_stats(balance: Balance, this_month: i64, currency: &CurrencyFormat) -> Markup {
    html! {
        section class="grid grid-cols-1 sm:grid-cols-3 gap-4"
        {
            (stat_card("Available", &currency.format_minor_units(balance.amount), "available-stat"))

            @if balance.locked > 0 {
                (stat_card("Locked", &currency.format_minor_units(balance.locked), "locked-stat"))
            }

            (stat_card("This Month", &currency.format_minor_units(this_month), "this-month-stat"))
        }
    }
}

fn quick_actions() -> Markup {
    let actions = [
        (endpoints::P2P_VIEW, "↗", "Send Money"),
        (endpoints::TOP_UP_VIEW, "+", "Add Money"),
        (endpoints::TRANSACTIONS_VIEW, "☰", "Transactions"),
    ];

    html! {
        section id="quick-actions" class="grid grid-cols-3 gap-4"
        {
            @for (url, glyph, label) in actions {
                a href=(url) class=(ACTION_BUTTON_STYLE)
                {
                    span aria-hidden="true" class="text-xl" { (glyph) }
                    span { (label) }
                }
            }
        }
    }
}

fn recent_activity(
    transactions: &[UnifiedTransaction],
    now: OffsetDateTime,
    currency: &CurrencyFormat,
) -> Markup {
    html! {
        section class=(CARD_STYLE)
        {
            div class="flex justify-between items-baseline mb-2"
            {
                h2 class="text-xl font-semibold" { "Recent Activity" }

                a id="view-all" href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE)
                {
                    "View All"
                }
            }

            @if transactions.is_empty() {
                p id="recent-activity-empty" class="text-gray-500 dark:text-gray-400"
                {
                    "No recent activity. "
                    (link(endpoints::TOP_UP_VIEW, "Add money"))
                    " to get started."
                }
            } @else {
                ul id="recent-activity"
                {
                    @for transaction in transactions {
                        (activity_row(transaction, now, currency))
                    }
                }
            }
        }
    }
}

fn activity_row(
    transaction: &UnifiedTransaction,
    now: OffsetDateTime,
    currency: &CurrencyFormat,
) -> Markup {
    let icon = transaction_icon(transaction.direction, &transaction.status);

    html! {
        li class=(LIST_ROW_STYLE)
        {
            span aria-hidden="true" class={ "text-xl " (icon.style) } { (icon.glyph) }

            div class="flex-1 min-w-0"
            {
                p class="font-medium truncate" { (transaction.description()) }
                p class="text-xs text-gray-500 dark:text-gray-400"
                {
                    (format_relative_time(transaction.time, now))
                }
            }

            div class="text-right"
            {
                p class="font-semibold"
                {
                    (currency.format_signed(transaction.amount, transaction.direction, &transaction.status))
                }
                (status_badge(&transaction.status, transaction.status_bucket()))
            }
        }
    }
}
