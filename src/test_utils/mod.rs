#![allow(missing_docs)]

pub(crate) mod html;

use rusqlite::Connection;

use crate::{AppState, DisplayConfig};

pub(crate) use html::{assert_valid_html, parse_html_document};

/// The cookie secret used by [get_test_app_state].
pub(crate) const TEST_COOKIE_SECRET: &str = "nafstenoas";

/// An [AppState] backed by an initialized in-memory database.
pub(crate) fn get_test_app_state() -> AppState {
    AppState::new(
        Connection::open_in_memory().expect("Could not open in-memory database"),
        TEST_COOKIE_SECRET,
        "Asia/Kolkata",
        DisplayConfig::default(),
    )
    .expect("Could not create app state")
}
