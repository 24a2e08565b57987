//! Top-ups: deposits into the wallet from a bank or payment app.

use rusqlite::{Connection, Row};
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, database_id::DatabaseId, user::UserID};

/// A request to add money to a user's wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopUpRecord {
    /// The ID of the top-up in the database.
    pub id: DatabaseId,
    /// When the top-up was started.
    pub start_time: OffsetDateTime,
    /// The amount in minor units.
    pub amount: i64,
    /// The status reported by the payment provider, e.g. "Processing".
    pub status: String,
    /// The bank or payment app the money came from.
    pub provider: Option<String>,
}

/// The data for inserting a top-up, see [create_top_up].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopUp {
    /// The user whose wallet receives the money.
    pub user_id: UserID,
    /// When the top-up was started.
    pub start_time: OffsetDateTime,
    /// The amount in minor units, must not be negative.
    pub amount: i64,
    /// The status reported by the payment provider.
    pub status: String,
    /// The bank or payment app the money came from.
    pub provider: Option<String>,
}

pub fn create_top_up_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS top_up (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            start_time TEXT NOT NULL,
            amount INTEGER NOT NULL CHECK (amount >= 0),
            status TEXT NOT NULL,
            provider TEXT,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_top_up_user_start_time ON top_up(user_id, start_time)",
        (),
    )?;

    Ok(())
}

/// Insert a top-up into the database.
///
/// Top-ups are recorded by the payment service, this is only used to seed
/// databases for testing.
///
/// # Errors
/// Returns [Error::SqlError] if the insert fails, e.g., the amount is negative.
pub fn create_top_up(top_up: NewTopUp, connection: &Connection) -> Result<TopUpRecord, Error> {
    let start_time = top_up.start_time.to_offset(UtcOffset::UTC);

    connection.execute(
        "INSERT INTO top_up (user_id, start_time, amount, status, provider)
        VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            top_up.user_id.as_i64(),
            start_time,
            top_up.amount,
            &top_up.status,
            &top_up.provider,
        ),
    )?;

    Ok(TopUpRecord {
        id: connection.last_insert_rowid(),
        start_time,
        amount: top_up.amount,
        status: top_up.status,
        provider: top_up.provider,
    })
}

/// Get all of `user_id`'s top-ups, newest first.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_top_ups(user_id: UserID, connection: &Connection) -> Result<Vec<TopUpRecord>, Error> {
    connection
        .prepare(
            "SELECT id, start_time, amount, status, provider
            FROM top_up
            WHERE user_id = :user_id
            ORDER BY start_time DESC, id DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_top_up_row)?
        .collect::<Result<Vec<_>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

fn map_top_up_row(row: &Row) -> Result<TopUpRecord, rusqlite::Error> {
    Ok(TopUpRecord {
        id: row.get(0)?,
        start_time: row.get(1)?,
        amount: row.get(2)?,
        status: row.get(3)?,
        provider: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{Error, db::initialize, user::create_user};

    use super::{NewTopUp, create_top_up, get_top_ups};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_top_up(user_id: crate::user::UserID, start_time: time::OffsetDateTime) -> NewTopUp {
        NewTopUp {
            user_id,
            start_time,
            amount: 50000,
            status: "Success".to_owned(),
            provider: Some("HDFC Bank".to_owned()),
        }
    }

    #[test]
    fn returns_empty_list_when_user_has_no_top_ups() {
        let conn = get_test_connection();
        let user = create_user(Some("Asha"), &conn).unwrap();

        assert_eq!(get_top_ups(user.id, &conn), Ok(vec![]));
    }

    #[test]
    fn returns_top_ups_newest_first() {
        let conn = get_test_connection();
        let user = create_user(Some("Asha"), &conn).unwrap();
        let oldest = create_top_up(new_top_up(user.id, datetime!(2026-01-01 09:00 UTC)), &conn)
            .unwrap();
        let newest = create_top_up(new_top_up(user.id, datetime!(2026-03-01 09:00 UTC)), &conn)
            .unwrap();
        let middle = create_top_up(new_top_up(user.id, datetime!(2026-02-01 09:00 UTC)), &conn)
            .unwrap();

        let got = get_top_ups(user.id, &conn).unwrap();

        assert_eq!(got, vec![newest, middle, oldest]);
    }

    #[test]
    fn only_returns_top_ups_for_user() {
        let conn = get_test_connection();
        let asha = create_user(Some("Asha"), &conn).unwrap();
        let ravi = create_user(Some("Ravi"), &conn).unwrap();
        let want = create_top_up(new_top_up(asha.id, datetime!(2026-01-01 09:00 UTC)), &conn)
            .unwrap();
        create_top_up(new_top_up(ravi.id, datetime!(2026-01-02 09:00 UTC)), &conn).unwrap();

        assert_eq!(get_top_ups(asha.id, &conn), Ok(vec![want]));
    }

    #[test]
    fn stores_missing_provider() {
        let conn = get_test_connection();
        let user = create_user(None, &conn).unwrap();
        let top_up = NewTopUp {
            provider: None,
            ..new_top_up(user.id, datetime!(2026-01-01 09:00 UTC))
        };
        create_top_up(top_up, &conn).unwrap();

        let got = get_top_ups(user.id, &conn).unwrap();

        assert_eq!(got[0].provider, None);
    }

    #[test]
    fn stores_start_time_in_utc() {
        let conn = get_test_connection();
        let user = create_user(None, &conn).unwrap();
        let top_up = new_top_up(user.id, datetime!(2026-01-01 09:00 +05:30));

        let created = create_top_up(top_up, &conn).unwrap();
        let fetched = get_top_ups(user.id, &conn).unwrap();

        assert_eq!(created.start_time, datetime!(2026-01-01 03:30 UTC));
        assert_eq!(fetched[0].start_time, created.start_time);
    }

    #[test]
    fn rejects_negative_amount() {
        let conn = get_test_connection();
        let user = create_user(None, &conn).unwrap();
        let top_up = NewTopUp {
            amount: -1,
            ..new_top_up(user.id, datetime!(2026-01-01 09:00 UTC))
        };

        let result = create_top_up(top_up, &conn);

        assert!(matches!(result, Err(Error::SqlError(_))), "got {result:?}");
    }
}
