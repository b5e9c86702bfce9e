//! Signed tokens shaped like the ones the API issues.
//!
//! They are signed with a throwaway secret; the client never verifies them.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

/// HS256 token carrying exactly `claims`.
pub fn mint(claims: &Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("test token should encode")
}

fn exp_in(secs: i64) -> i64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs() as i64;
    now + secs
}

pub fn admin_token() -> String {
    mint(&json!({
        "userID": "admin-1",
        "role": "admin",
        "isAdmin": true,
        "exp": exp_in(24 * 60 * 60),
    }))
}

pub fn user_token() -> String {
    mint(&json!({
        "userID": "user-1",
        "role": "user",
        "isAdmin": false,
        "exp": exp_in(24 * 60 * 60),
    }))
}

/// A token the server would reject; the client cannot tell.
pub fn expired_user_token() -> String {
    mint(&json!({
        "userID": "user-1",
        "role": "user",
        "isAdmin": false,
        "exp": exp_in(-60),
    }))
}
