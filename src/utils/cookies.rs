use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

pub const ACCESS_TOKEN_COOKIE: &str = "session_access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "session_refresh_token";
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

/// Subtracted from the upstream-reported lifetime so the cookie dies before
/// the token does.
const ACCESS_TOKEN_BUFFER_SECS: i64 = 30;
const REFRESH_TOKEN_MAX_AGE_DAYS: i64 = 30;
const STATE_MAX_AGE_MINUTES: i64 = 10;

pub fn access_token_max_age(expires_in: i64) -> Duration {
    Duration::seconds((expires_in - ACCESS_TOKEN_BUFFER_SECS).max(0))
}

pub fn access_cookie(token: &str, expires_in: i64) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(access_token_max_age(expires_in))
        .build()
}

pub fn refresh_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(REFRESH_TOKEN_MAX_AGE_DAYS))
        .build()
}

pub fn state_cookie(value: &str) -> Cookie<'static> {
    Cookie::build((OAUTH_STATE_COOKIE, value.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(STATE_MAX_AGE_MINUTES))
        .build()
}

/// Removal counterpart; path must match the cookie being cleared.
pub fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

/// Bearer credential for the current request, if the browser sent one.
pub fn access_token(jar: &CookieJar) -> Option<String> {
    jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string())
}

pub fn refresh_token(jar: &CookieJar) -> Option<String> {
    jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_cookie_max_age_has_buffer() {
        let cookie = access_cookie("A", 3600);
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3570)));
        assert!(cookie.http_only().unwrap());
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_access_cookie_max_age_never_negative() {
        let cookie = access_cookie("A", 5);
        assert_eq!(cookie.max_age(), Some(Duration::seconds(0)));
    }

    #[test]
    fn test_refresh_cookie_is_long_lived() {
        let cookie = refresh_cookie("R");
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
    }

    #[test]
    fn test_state_cookie_flags() {
        let cookie = state_cookie("xyz");
        assert_eq!(cookie.max_age(), Some(Duration::minutes(10)));
        assert!(cookie.secure().unwrap());
        assert!(cookie.http_only().unwrap());
    }
}
