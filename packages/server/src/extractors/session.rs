use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

pub const SESSION_COOKIE: &str = "session";

/// Identity carried by a valid session cookie.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: i32,
    pub username: String,
}

impl SessionUser {
    pub fn from_jar(jar: &CookieJar, secret: &str) -> Option<Self> {
        let token = jar.get(SESSION_COOKIE)?;
        let claims = jwt::verify(token.value(), secret).ok()?;
        Some(Self {
            user_id: claims.uid,
            username: claims.sub,
        })
    }
}

pub fn session_cookie(token: String, days: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(days))
        .build()
}

pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Issue a fresh session cookie for `user_id`/`username`.
pub fn start_session(
    jar: CookieJar,
    state: &AppState,
    user_id: i32,
    username: &str,
) -> Result<CookieJar, AppError> {
    let auth = &state.config.auth;
    let token = jwt::sign(user_id, username, &auth.session_secret, auth.session_days)
        .map_err(|e| AppError::Internal(format!("Session sign error: {e}")))?;
    Ok(jar.add(session_cookie(token, auth.session_days)))
}

/// Logged-in user. Anonymous visitors are redirected to the login page.
pub struct CurrentUser(pub SessionUser);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        SessionUser::from_jar(&jar, &state.config.auth.session_secret)
            .map(CurrentUser)
            .ok_or_else(|| AppError::LoginRequired {
                next: parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str().to_string())
                    .unwrap_or_else(|| "/".into()),
            })
    }
}
