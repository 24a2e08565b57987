//! Application router configuration.

use axum::{Router, response::Redirect, routing::get};
use tower_http::services::ServeDir;

use crate::{
    AppState, dashboard::get_dashboard_page, endpoints,
    internal_server_error::get_internal_server_error_page, not_found::get_404_not_found,
    transaction::get_transactions_page,
};

/// Return a router with all the app's routes.
///
/// The pages are readable without a session, visitors who are not signed in
/// see an empty wallet.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::{
        http::{StatusCode, header::SET_COOKIE},
        response::IntoResponse,
    };
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key},
    };
    use axum_test::TestServer;
    use time::{Duration, OffsetDateTime};

    use crate::{
        app_state::create_cookie_key,
        balance::{Balance, set_balance},
        endpoints,
        session::{COOKIE_TOKEN, DEFAULT_SESSION_DURATION, set_session_cookie},
        test_utils::{TEST_COOKIE_SECRET, get_test_app_state},
        transaction::{NewTopUp, create_top_up},
        user::{UserID, create_user},
    };

    use super::build_router;

    fn get_test_server() -> (TestServer, UserID) {
        let state = get_test_app_state();
        let user_id = {
            let connection = state.db_connection.lock().unwrap();
            let user = create_user(Some("Asha Rao"), &connection).unwrap();
            set_balance(
                user.id,
                Balance {
                    amount: 120000,
                    locked: 0,
                },
                &connection,
            )
            .unwrap();
            create_top_up(
                NewTopUp {
                    user_id: user.id,
                    start_time: OffsetDateTime::now_utc() - Duration::minutes(5),
                    amount: 120000,
                    status: "Success".to_owned(),
                    provider: Some("PhonePe".to_owned()),
                },
                &connection,
            )
            .unwrap();
            user.id
        };

        let server =
            TestServer::new(build_router(state)).expect("Could not create test server.");

        (server, user_id)
    }

    /// A session cookie for `user_id` encrypted with the test secret, as the
    /// authentication service would set it.
    fn session_cookie(user_id: UserID) -> Cookie<'static> {
        let key: Key = create_cookie_key(TEST_COOKIE_SECRET);
        let jar = set_session_cookie(PrivateCookieJar::new(key), user_id, DEFAULT_SESSION_DURATION)
            .unwrap();
        let response = jar.into_response();
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .expect("session cookie missing")
            .to_str()
            .unwrap()
            .to_owned();

        let cookie = Cookie::parse(set_cookie).unwrap();
        assert_eq!(cookie.name(), COOKIE_TOKEN);
        cookie
    }

    #[tokio::test]
    async fn pages_render_without_session() {
        let (server, _) = get_test_server();

        for endpoint in [endpoints::DASHBOARD_VIEW, endpoints::TRANSACTIONS_VIEW] {
            let response = server.get(endpoint).await;

            response.assert_status_ok();
            assert!(
                !response.text().contains("PhonePe"),
                "{endpoint} should not show another user's transactions"
            );
        }
    }

    #[tokio::test]
    async fn dashboard_uses_session() {
        let (server, user_id) = get_test_server();

        let response = server
            .get(endpoints::DASHBOARD_VIEW)
            .add_cookie(session_cookie(user_id))
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("Welcome back, Asha!"));
        assert!(text.contains("Money Added via PhonePe"));
    }

    #[tokio::test]
    async fn transactions_page_uses_session() {
        let (server, user_id) = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_cookie(session_cookie(user_id))
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("₹1,200.00"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (server, _) = get_test_server();

        server
            .get("/does/not/exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn error_page_is_served() {
        let (server, _) = get_test_server();

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
