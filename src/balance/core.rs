use rusqlite::{Connection, OptionalExtension};

use crate::{Error, user::UserID};

/// The money held in a user's wallet, in minor units (e.g., paise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Balance {
    /// The amount available for transactions.
    pub amount: i64,
    /// The amount reserved by in-flight transactions.
    pub locked: i64,
}

impl Balance {
    /// The sum of the available and locked amounts.
    pub fn total(&self) -> i64 {
        self.amount.saturating_add(self.locked)
    }

    /// The share of the total balance that is available, as a percentage in `[0, 100]`.
    ///
    /// An empty wallet has `0.0` available.
    pub fn available_percentage(&self) -> f64 {
        let total = self.total();

        if total <= 0 {
            return 0.0;
        }

        (self.amount as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

pub fn create_balance_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS balance (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL UNIQUE,
            amount INTEGER NOT NULL DEFAULT 0,
            locked INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

/// Get the wallet balance for `user_id`.
///
/// A user without a balance row has an empty wallet, so this returns a zero
/// balance instead of [Error::NotFound].
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query fails.
pub fn get_balance(user_id: UserID, connection: &Connection) -> Result<Balance, Error> {
    let balance = connection
        .prepare("SELECT amount, locked FROM balance WHERE user_id = :user_id")?
        .query_row(&[(":user_id", &user_id.as_i64())], |row| {
            Ok(Balance {
                amount: row.get(0)?,
                locked: row.get(1)?,
            })
        })
        .optional()?;

    Ok(balance.unwrap_or_default())
}

/// Insert or replace the wallet balance for `user_id`.
///
/// Balances are owned by the payment services, this is only used to seed
/// databases for testing.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query fails, e.g., `user_id` does not
/// refer to a user.
pub fn set_balance(user_id: UserID, balance: Balance, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO balance (user_id, amount, locked) VALUES (?1, ?2, ?3)
        ON CONFLICT(user_id) DO UPDATE SET amount = excluded.amount, locked = excluded.locked",
        (user_id.as_i64(), balance.amount, balance.locked),
    )?;

    Ok(())
}

#[cfg(test)]
mod get_balance_tests {
    use rusqlite::Connection;

    use crate::{db::initialize, user::create_user};

    use super::{Balance, get_balance, set_balance};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn returns_zero_when_no_balance_row() {
        let conn = get_test_connection();
        let user = create_user(Some("Asha"), &conn).unwrap();

        let balance = get_balance(user.id, &conn).unwrap();

        assert_eq!(
            balance,
            Balance {
                amount: 0,
                locked: 0
            }
        );
    }

    #[test]
    fn returns_stored_balance() {
        let conn = get_test_connection();
        let user = create_user(Some("Asha"), &conn).unwrap();
        let want = Balance {
            amount: 1_250_00,
            locked: 300_00,
        };
        set_balance(user.id, want, &conn).unwrap();

        let got = get_balance(user.id, &conn).unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn set_balance_replaces_existing_row() {
        let conn = get_test_connection();
        let user = create_user(Some("Asha"), &conn).unwrap();
        set_balance(user.id, Balance { amount: 1, locked: 2 }, &conn).unwrap();

        set_balance(user.id, Balance { amount: 3, locked: 4 }, &conn).unwrap();

        assert_eq!(
            get_balance(user.id, &conn).unwrap(),
            Balance { amount: 3, locked: 4 }
        );
    }

    #[test]
    fn does_not_read_other_users_balance() {
        let conn = get_test_connection();
        let asha = create_user(Some("Asha"), &conn).unwrap();
        let ravi = create_user(Some("Ravi"), &conn).unwrap();
        set_balance(asha.id, Balance { amount: 500, locked: 0 }, &conn).unwrap();

        assert_eq!(get_balance(ravi.id, &conn).unwrap(), Balance::default());
    }
}
