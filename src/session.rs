//! Resolves the signed in user from the session cookie.
//!
//! Users sign in through the authentication service, which shares the cookie
//! secret with this app and stores a [Token] in an encrypted private cookie.
//! The pages here only read that cookie: a request without a valid session is
//! served as an anonymous viewer rather than rejected.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, Key, SameSite},
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, user::UserID};

/// The name of the cookie that holds the session token.
pub const COOKIE_TOKEN: &str = "token";
/// How long a new session lasts.
pub const DEFAULT_SESSION_DURATION: Duration = Duration::hours(1);

mod datetime_format {
    //! Serializes a [time::OffsetDateTime] with two digit hours.
    //!
    //! The default serializer writes midnight as "0:00:00.0", which the
    //! deserializer then rejects.
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{
        OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
    };

    /// Date time format for the session expiry, e.g. "2021-01-01 00:00:00.0 +00:00:00".
    const DATE_TIME_FORMAT: &[BorrowedFormatItem] = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond] [offset_hour \
             sign:mandatory]:[offset_minute]:[offset_second]"
    );

    pub fn serialize<S>(dt: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = dt
            .format(DATE_TIME_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&s, DATE_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// The contents of the session cookie.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Token {
    user_id: UserID,

    #[serde(
        serialize_with = "datetime_format::serialize",
        deserialize_with = "datetime_format::deserialize"
    )]
    expires_at: OffsetDateTime,
}

/// The user the request was made by, or `None` if there is no valid session.
///
/// Extracting this never fails. A missing, tampered, malformed or expired
/// session cookie all resolve to `CurrentUser(None)`.
///
/// **Note**: The app state must provide an `axum_extra::extract::cookie::Key`
/// for decrypting the cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Option<UserID>);

impl<S> FromRequestParts<S> for CurrentUser
where
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::from_headers(&parts.headers, Key::from_ref(state));

        Ok(CurrentUser(user_id_from_jar(&jar, OffsetDateTime::now_utc())))
    }
}

fn user_id_from_jar(jar: &PrivateCookieJar, now: OffsetDateTime) -> Option<UserID> {
    let cookie = jar.get(COOKIE_TOKEN)?;

    let token: Token = match serde_json::from_str(cookie.value()) {
        Ok(token) => token,
        Err(error) => {
            tracing::warn!("could not read session token: {error}");
            return None;
        }
    };

    if token.expires_at <= now {
        tracing::debug!("session for user {} expired", token.user_id);
        return None;
    }

    Some(token.user_id)
}

/// Add a session cookie for `user_id` to `jar` that expires after `duration`.
///
/// # Errors
/// Returns [Error::SessionCookieError] if the token could not be serialized.
pub fn set_session_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expires_at = OffsetDateTime::now_utc() + duration;
    let token = serde_json::to_string(&Token {
        user_id,
        expires_at,
    })
    .map_err(|error| Error::SessionCookieError(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((COOKIE_TOKEN, token))
            .path("/")
            .expires(expires_at)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Overwrite the session cookie with an expired one, which should delete the
/// cookie on the client side.
pub fn clear_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

#[cfg(test)]
mod token_tests {
    use time::{UtcOffset, macros::datetime};

    use crate::user::UserID;

    use super::Token;

    #[test]
    fn serialise_token() {
        let token = Token {
            user_id: UserID::new(1),
            expires_at: datetime!(2026-10-15 00:00:00).assume_offset(UtcOffset::UTC),
        };
        let expected = r#"{"user_id":1,"expires_at":"2026-10-15 00:00:00.0 +00:00:00"}"#;

        let actual = serde_json::to_string(&token).unwrap();

        assert_eq!(expected, actual);
    }

    #[test]
    fn deserialise_token() {
        let expected = Token {
            user_id: UserID::new(7),
            expires_at: datetime!(2026-10-15 00:00:00).assume_offset(UtcOffset::UTC),
        };

        let actual: Token =
            serde_json::from_str(r#"{"user_id":7,"expires_at":"2026-10-15 00:00:00.0 +00:00:00"}"#)
                .unwrap();

        assert_eq!(expected, actual);
    }
}
