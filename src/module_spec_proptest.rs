//! Property-based tests for module specification parsing.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::module_spec::ModuleSpec;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_.-]{1,12}"
    }

    fn spec_string() -> impl Strategy<Value = String> {
        (
            segment(),
            segment(),
            proptest::option::of((segment(), proptest::option::of(segment()))),
            proptest::option::of(segment()),
        )
            .prop_map(|(name, stream, rest, profile)| {
                let mut text = format!("{}:{}", name, stream);
                if let Some((version, context)) = rest {
                    text.push(':');
                    text.push_str(&version);
                    if let Some(context) = context {
                        text.push(':');
                        text.push_str(&context);
                    }
                }
                if let Some(profile) = profile {
                    text.push('/');
                    text.push_str(&profile);
                }
                text
            })
    }

    proptest! {
        /// Property: parse then render with profile gives back the input
        #[test]
        fn parse_to_str_round_trips(text in spec_string()) {
            let spec: ModuleSpec = text.parse().unwrap();
            prop_assert_eq!(spec.to_str(true), text);
        }

        /// Property: rendering without profile only drops the `/profile` suffix
        #[test]
        fn to_str_without_profile_drops_suffix(text in spec_string()) {
            let spec: ModuleSpec = text.parse().unwrap();
            let expected = match text.rsplit_once('/') {
                Some((module, _)) => module.to_string(),
                None => text.clone(),
            };
            prop_assert_eq!(spec.to_str(false), expected);
        }

        /// Property: more than four colon segments never parse
        #[test]
        fn too_many_segments_rejected(pieces in proptest::collection::vec(segment(), 5..8)) {
            let text = pieces.join(":");
            prop_assert!(text.parse::<ModuleSpec>().is_err());
        }

        /// Property: an empty segment anywhere is rejected
        #[test]
        fn empty_segment_rejected(
            pieces in proptest::collection::vec(segment(), 2..4),
            hole in 0usize..4,
        ) {
            let mut pieces = pieces;
            let hole = hole % pieces.len();
            pieces[hole] = String::new();
            let text = pieces.join(":");
            prop_assert!(text.parse::<ModuleSpec>().is_err());
        }
    }
}
