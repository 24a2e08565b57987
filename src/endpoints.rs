//! The URIs of the pages this app serves or links to.
//!
//! [P2P_VIEW] and [TOP_UP_VIEW] are served by the payments service, this app
//! only links to them.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page for logged in users.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for displaying a user's transaction history.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for sending money to another user.
pub const P2P_VIEW: &str = "/p2p";
/// The page for adding money to the wallet from a bank.
pub const TOP_UP_VIEW: &str = "/transfer";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";
