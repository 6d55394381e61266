//! One-shot messages carried to the next rendered page in a cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: Level,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.level {
            Level::Success => "alert-success",
            Level::Error => "alert-danger",
        }
    }
}

/// Messages queued in `jar`. A tampered or stale cookie reads as empty.
pub fn read(jar: &CookieJar) -> Vec<FlashMessage> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| hex::decode(cookie.value()).ok())
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// Queue `message` behind any already waiting.
pub fn push(jar: CookieJar, message: FlashMessage) -> CookieJar {
    let mut queued = read(&jar);
    queued.push(message);
    let value = serde_json::to_vec(&queued)
        .map(hex::encode)
        .unwrap_or_default();

    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Drop the queue once it has been shown.
pub fn clear(jar: CookieJar) -> CookieJar {
    if jar.get(FLASH_COOKIE).is_none() {
        return jar;
    }
    jar.remove(Cookie::build(FLASH_COOKIE).path("/"))
}
