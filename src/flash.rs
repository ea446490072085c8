//! One-shot notices carried across a redirect in a signed cookie.

use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use sha2::{Digest, Sha512};

pub const COOKIE_NAME: &str = "_flash";

pub const INVALID_INPUT: &str = "Invalid input.";
pub const ITEM_CREATED: &str = "Item created.";
pub const ITEM_UPDATED: &str = "Item updated.";
pub const ITEM_DELETED: &str = "Item deleted.";

/// Cookie signing needs 64 bytes of key material; stretch the configured
/// secret with SHA-512 so any length works.
pub fn signing_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}

/// Queues a message for the next rendered page.
pub fn push(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    let mut messages = peek(&jar);
    messages.push(message.into());

    let cookie = Cookie::build((COOKIE_NAME, encode(&messages)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    jar.add(cookie)
}

/// Returns every queued message and clears the cookie.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<String>) {
    if jar.get(COOKIE_NAME).is_none() {
        return (jar, Vec::new());
    }
    let messages = peek(&jar);
    (jar.remove(Cookie::build(COOKIE_NAME).path("/")), messages)
}

fn peek(jar: &SignedCookieJar) -> Vec<String> {
    jar.get(COOKIE_NAME).map(|c| decode(c.value())).unwrap_or_default()
}

fn encode(messages: &[String]) -> String {
    let json = serde_json::to_string(messages).unwrap_or_else(|_| "[]".to_string());
    urlencoding::encode(&json).into_owned()
}

fn decode(raw: &str) -> Vec<String> {
    urlencoding::decode(raw)
        .ok()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}
