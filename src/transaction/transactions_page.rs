//! Defines the route handler for the page that displays the user's transaction history.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error, format::CurrencyFormat, session::CurrentUser, timezone::get_local_offset,
    user::UserID,
};

use super::{
    feed::{TransactionFeed, fetch_transaction_feed},
    view::transactions_view,
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for reading transactions.
    db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    local_timezone: String,
    /// How to display amounts.
    currency: CurrencyFormat,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            currency: state.display.currency.clone(),
        }
    }
}

/// Render the user's top-ups and peer transfers as one list, newest first.
///
/// Requests without a session get the empty state.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    CurrentUser(current_user): CurrentUser,
) -> Result<Response, Error> {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Err(Error::InvalidTimezoneError(state.local_timezone));
    };

    let feed = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        read_feed(current_user, &connection)?
    };

    Ok(transactions_view(
        &feed,
        OffsetDateTime::now_utc(),
        local_offset,
        &state.currency,
    )
    .into_response())
}

/// Read both transaction sources from the same snapshot of the database.
fn read_feed(current_user: Option<UserID>, connection: &Connection) -> Result<TransactionFeed, Error> {
    let snapshot = connection.unchecked_transaction()?;
    let feed = fetch_transaction_feed(current_user, &snapshot)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
    snapshot.commit()?;

    Ok(feed)
}
