//! Property-based tests for sift-validator.

use proptest::prelude::*;
use serde_json::json;
use sift_validator::prelude::*;

// ============================================================================
// CHAIN LAWS: a chain without breaks fails iff any member fails
// ============================================================================

proptest! {
    #[test]
    fn chain_fails_iff_either_fails(s in ".{0,30}") {
        let value = json!(s);
        let a = StringLength::at_least(3);
        let b = StringLength::at_most(10);

        let a_ok = a.validate(&value, None).is_ok();
        let b_ok = b.validate(&value, None).is_ok();
        let chain = ValidatorChain::new().with(a).with(b);

        prop_assert_eq!(chain.check(&value, None).is_valid(), a_ok && b_ok);
    }

    #[test]
    fn check_is_idempotent(s in ".*") {
        let chain = ValidatorChain::new().with(EmailAddress::new()).with(Digits::new());
        let value = json!(s);
        prop_assert_eq!(chain.check(&value, None), chain.check(&value, None));
    }

    #[test]
    fn ensure_not_empty_adds_at_most_one(calls in 1usize..8) {
        let mut chain = ValidatorChain::new().with(Digits::new());
        for _ in 0..calls {
            chain.ensure_not_empty();
        }
        prop_assert_eq!(chain.len(), 2);
    }

    #[test]
    fn digits_accepts_every_non_negative_integer(n in 0u64..u64::MAX) {
        prop_assert!(Digits::new().validate(&json!(n), None).is_ok());
        prop_assert!(Digits::new().validate(&json!(n.to_string()), None).is_ok());
    }

    #[test]
    fn between_agrees_with_comparison(n in -1000i64..1000) {
        let ok = Between::new(-10.0, 10.0).validate(&json!(n), None).is_ok();
        prop_assert_eq!(ok, (-10..=10).contains(&n));
    }
}
