//! Creates the application's database tables.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    balance::create_balance_table,
    transaction::{create_peer_transfer_table, create_top_up_table},
    user::create_user_table,
};

/// Create the tables for the domain models if they do not already exist.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created, in which case
/// none of the tables are created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_balance_table(&transaction)?;
    create_top_up_table(&transaction)?;
    create_peer_transfer_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
