//! Peer transfers: money sent directly from one wallet to another.

use rusqlite::{Connection, Row};
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, database_id::DatabaseId, user::UserID};

/// One side of a peer transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    /// The user's ID.
    pub id: UserID,
    /// The user's display name, if they have set one.
    pub name: Option<String>,
}

impl Party {
    /// The name to show for this user, falling back to their ID when they
    /// have no name.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => self.id.to_string(),
        }
    }
}

/// A transfer between two users.
///
/// Both the sender and the recipient see the same record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerTransferRecord {
    /// The ID of the transfer in the database.
    pub id: DatabaseId,
    /// When the transfer was made.
    pub timestamp: OffsetDateTime,
    /// The amount in minor units.
    pub amount: i64,
    /// The sender.
    pub from: Party,
    /// The recipient.
    pub to: Party,
}

/// The data for inserting a peer transfer, see [create_peer_transfer].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPeerTransfer {
    /// The sender.
    pub from_user_id: UserID,
    /// The recipient.
    pub to_user_id: UserID,
    /// When the transfer was made.
    pub timestamp: OffsetDateTime,
    /// The amount in minor units, must not be negative.
    pub amount: i64,
}

pub fn create_peer_transfer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS peer_transfer (
            id INTEGER PRIMARY KEY,
            from_user_id INTEGER NOT NULL,
            to_user_id INTEGER NOT NULL,
            timestamp TEXT NOT NULL,
            amount INTEGER NOT NULL CHECK (amount >= 0),
            FOREIGN KEY(from_user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(to_user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_peer_transfer_from ON peer_transfer(from_user_id)",
        (),
    )?;
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_peer_transfer_to ON peer_transfer(to_user_id)",
        (),
    )?;

    Ok(())
}

/// Insert a peer transfer into the database.
///
/// Transfers are executed by the payment service, this is only used to seed
/// databases for testing. Names are not returned, use [get_peer_transfers] to
/// read transfers with names.
///
/// # Errors
/// Returns [Error::SqlError] if the insert fails, e.g., the amount is negative.
pub fn create_peer_transfer(
    transfer: NewPeerTransfer,
    connection: &Connection,
) -> Result<DatabaseId, Error> {
    connection.execute(
        "INSERT INTO peer_transfer (from_user_id, to_user_id, timestamp, amount)
        VALUES (?1, ?2, ?3, ?4)",
        (
            transfer.from_user_id.as_i64(),
            transfer.to_user_id.as_i64(),
            transfer.timestamp.to_offset(UtcOffset::UTC),
            transfer.amount,
        ),
    )?;

    Ok(connection.last_insert_rowid())
}

/// Get all transfers that `user_id` sent or received, newest first.
///
/// The names of both parties are read in the same query.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_peer_transfers(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<PeerTransferRecord>, Error> {
    connection
        .prepare(
            "SELECT
                t.id,
                t.timestamp,
                t.amount,
                t.from_user_id,
                sender.name,
                t.to_user_id,
                recipient.name
            FROM peer_transfer t
            LEFT JOIN user sender ON sender.id = t.from_user_id
            LEFT JOIN user recipient ON recipient.id = t.to_user_id
            WHERE t.from_user_id = :user_id OR t.to_user_id = :user_id
            ORDER BY t.timestamp DESC, t.id DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_peer_transfer_row)?
        .collect::<Result<Vec<_>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

fn map_peer_transfer_row(row: &Row) -> Result<PeerTransferRecord, rusqlite::Error> {
    Ok(PeerTransferRecord {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        amount: row.get(2)?,
        from: Party {
            id: UserID::new(row.get(3)?),
            name: row.get(4)?,
        },
        to: Party {
            id: UserID::new(row.get(5)?),
            name: row.get(6)?,
        },
    })
}
