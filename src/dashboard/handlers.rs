//! Dashboard HTTP handler.
//!
//! Reads everything the page shows from one database snapshot and hands it to
//! [super::view] for rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use time::{Duration, OffsetDateTime, Time, UtcOffset};

use crate::{
    AppState, Error,
    balance::{Balance, get_balance},
    config::DisplayConfig,
    dashboard::view::{DashboardView, dashboard_view},
    session::CurrentUser,
    timezone::get_local_offset,
    transaction::{TransactionFeed, fetch_transaction_feed},
    user::{User, UserID, get_user_by_id},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading balances and transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
    /// How to display amounts and how much activity to show.
    pub display: DisplayConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            display: state.display.clone(),
        }
    }
}

/// Everything the dashboard shows, read in one go.
struct DashboardData {
    user: Option<User>,
    balance: Balance,
    feed: TransactionFeed,
}

/// Display a page with an overview of the user's wallet.
///
/// Requests without a session get the page for an empty wallet.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    CurrentUser(current_user): CurrentUser,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let data = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        load_dashboard_data(current_user, &connection)?
    };

    let now = OffsetDateTime::now_utc();
    let this_month = data
        .feed
        .settled_credits_since(start_of_local_month(now, local_offset));

    let view = DashboardView {
        first_name: data.user.as_ref().and_then(User::first_name),
        today: now.to_offset(local_offset).date(),
        now,
        balance: data.balance,
        this_month,
        recent: data.feed.recent(state.display.recent_activity_limit),
        currency: &state.display.currency,
    };

    Ok(dashboard_view(view).into_response())
}

/// Read the user, their balance and their transactions from one snapshot of
/// the database.
fn load_dashboard_data(
    current_user: Option<UserID>,
    connection: &Connection,
) -> Result<DashboardData, Error> {
    let snapshot = connection.unchecked_transaction()?;

    let (user, balance) = match current_user {
        Some(user_id) => (
            find_user(user_id, &snapshot)?,
            get_balance(user_id, &snapshot)
                .inspect_err(|error| tracing::error!("could not get balance: {error}"))?,
        ),
        None => (None, Balance::default()),
    };
    let feed = fetch_transaction_feed(current_user, &snapshot)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    snapshot.commit()?;

    Ok(DashboardData {
        user,
        balance,
        feed,
    })
}

/// The session may outlive the user's row, in which case the page falls back
/// to the generic greeting.
fn find_user(user_id: UserID, connection: &Connection) -> Result<Option<User>, Error> {
    match get_user_by_id(user_id, connection) {
        Ok(user) => Ok(Some(user)),
        Err(Error::NotFound) => {
            tracing::warn!("no user found for session user ID {user_id}");
            Ok(None)
        }
        Err(error) => {
            tracing::error!("could not get user {user_id}: {error}");
            Err(error)
        }
    }
}

/// Midnight on the first day of the month that `now` falls in, in local time.
fn start_of_local_month(now: OffsetDateTime, local_offset: UtcOffset) -> OffsetDateTime {
    let today = now.to_offset(local_offset).date();
    let first_of_month = today - Duration::days(i64::from(today.day()) - 1);

    first_of_month.with_time(Time::MIDNIGHT).assume_offset(local_offset)
}
