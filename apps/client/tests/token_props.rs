//! Property tests for token decoding and privilege checks.

mod common;

use client::auth::decode;
use client::{DecodeError, SessionStatus};
use client_test_support::tokens::mint;
use common::session_with;
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn wrong_segment_count_is_malformed(
        parts in prop::collection::vec("[A-Za-z0-9_-]{0,12}", 1..6)
            .prop_filter("three segments decode", |p| p.len() != 3)
    ) {
        let token = parts.join(".");
        let result = decode(&token);
        prop_assert!(
            matches!(result, Err(DecodeError::MalformedToken { .. })),
            "expected MalformedToken for {:?}, got {:?}",
            token,
            result
        );
    }

    #[test]
    fn decode_never_panics(token in ".{0,64}") {
        let _ = decode(&token);
    }

    #[test]
    fn only_literal_true_elevates(
        flag in prop_oneof![
            Just(json!(false)),
            Just(json!("true")),
            Just(json!(1)),
            Just(json!(null)),
            Just(json!([true])),
        ],
        user in "[a-z]{1,8}",
    ) {
        let session = session_with(&mint(&json!({"userID": user, "isAdmin": flag})));
        prop_assert!(!session.has_elevated_privilege());
        prop_assert_eq!(session.status(), SessionStatus::Standard);
    }

    #[test]
    fn admin_flag_round_trips(user in "[a-z]{1,8}", role in "[a-z]{0,8}") {
        let token = mint(&json!({"userID": user.clone(), "role": role, "isAdmin": true}));
        let claims = decode(&token).unwrap();
        prop_assert!(claims.is_admin());
        prop_assert_eq!(claims.user_id(), Some(user.as_str()));
        prop_assert_eq!(session_with(&token).status(), SessionStatus::Elevated);
    }
}
