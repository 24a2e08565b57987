//! The wallet balance of a user.

mod core;

pub use core::{Balance, create_balance_table, get_balance, set_balance};
