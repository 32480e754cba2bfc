//! Property tests for token issuance and verification.
//!
//! Pure: no HTTP, no store. Increase cases locally with
//!   PROPTEST_CASES=500 cargo test -p devconnector --test token_props

mod common;

use std::time::{Duration, UNIX_EPOCH};

use common::proptest_prelude::proptest_prelude_config;
use devconnector::auth::{IdentityClaim, TokenError, TokenService};
use devconnector::state::SecurityConfig;
use proptest::prelude::*;

fn service_with_ttl(ttl_secs: u64) -> TokenService {
    TokenService::new(SecurityConfig::for_tests().with_token_ttl(Duration::from_secs(ttl_secs)))
}

/// Plausible user ids: hex object ids, UUIDs, and arbitrary printable text.
fn user_id() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9a-f]{24}",
        "[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}",
        "\\PC{0,64}",
    ]
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    #[test]
    fn verify_returns_issued_claim(id in user_id()) {
        let tokens = service_with_ttl(360_000);
        let claim = IdentityClaim::for_user(id);

        let token = tokens.issue(&claim).unwrap();

        prop_assert_eq!(tokens.verify(&token), Ok(claim));
    }

    #[test]
    fn expiry_is_exact(
        id in user_id(),
        issued in 1_000_000u64..4_000_000_000u64,
        ttl in 1u64..1_000_000u64,
        before in 0u64..1_000_000u64,
        after in 0u64..1_000_000u64,
    ) {
        let tokens = service_with_ttl(ttl);
        let claim = IdentityClaim::for_user(id);
        let token = tokens
            .issue_at(&claim, UNIX_EPOCH + Duration::from_secs(issued))
            .unwrap();

        // Any check time in [issued, issued + ttl) succeeds.
        let inside = issued + before % ttl;
        prop_assert_eq!(
            tokens.verify_at(&token, UNIX_EPOCH + Duration::from_secs(inside)),
            Ok(claim)
        );

        // Any check time at or after issued + ttl fails as expired.
        let outside = issued + ttl + after;
        prop_assert_eq!(
            tokens.verify_at(&token, UNIX_EPOCH + Duration::from_secs(outside)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn arbitrary_strings_are_not_tokens(candidate in "[A-Za-z0-9_.=-]{0,200}") {
        let tokens = service_with_ttl(360_000);
        prop_assert_eq!(tokens.verify(&candidate), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn tokens_from_other_secrets_are_rejected(
        id in user_id(),
        secret in "[A-Za-z0-9]{1,48}",
    ) {
        prop_assume!(secret.as_bytes() != SecurityConfig::for_tests().jwt_secret.as_slice());
        let ours = service_with_ttl(360_000);
        let theirs = TokenService::new(SecurityConfig::new(secret));

        let token = theirs.issue(&IdentityClaim::for_user(id)).unwrap();

        prop_assert_eq!(ours.verify(&token), Err(TokenError::InvalidSignature));
    }
}
