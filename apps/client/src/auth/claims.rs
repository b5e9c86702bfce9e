//! Claims decoded from a bearer token payload.

use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Claim carrying the elevated-privilege flag.
pub const ADMIN_CLAIM: &str = "isAdmin";
/// Claim carrying the server-side user id.
pub const USER_ID_CLAIM: &str = "userID";
pub const ROLE_CLAIM: &str = "role";
/// Expiry (seconds since epoch).
pub const EXPIRY_CLAIM: &str = "exp";

/// Read-only view over a decoded token payload.
///
/// Values are whatever the issuer put there; nothing is verified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims {
    values: Map<String, Value>,
}

impl Claims {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True only when the admin claim is the JSON boolean `true`.
    ///
    /// Strings such as `"true"` or numbers such as `1` do not count.
    pub fn is_admin(&self) -> bool {
        matches!(self.values.get(ADMIN_CLAIM), Some(Value::Bool(true)))
    }

    pub fn user_id(&self) -> Option<&str> {
        self.values.get(USER_ID_CLAIM).and_then(Value::as_str)
    }

    pub fn role(&self) -> Option<&str> {
        self.values.get(ROLE_CLAIM).and_then(Value::as_str)
    }

    /// Expiry in seconds since epoch, if the issuer set a numeric `exp`.
    pub fn exp(&self) -> Option<i64> {
        match self.values.get(EXPIRY_CLAIM)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        }
    }

    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.exp()
            .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
    }

    /// Advisory only: the server decides expiry by answering 401.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at().is_some_and(|at| at <= now)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}
