//! Property tests for branch set evaluation

use lexmatch_core::{compile, Binding, BranchSpec, Strategy, TargetKind, Value, View};
use proptest::prelude::*;

fn two_part(pattern: &str, strategy: Strategy) -> lexmatch_core::CompiledSet {
    compile(
        strategy,
        TargetKind::Char,
        &[BranchSpec::TwoPart {
            pattern,
            rest: Binding::Named("rest".to_string()),
        }],
    )
    .unwrap()
}

proptest! {
    /// A two-part match always splits the input exactly: the consumed
    /// length plus the rest length equals the input length
    #[test]
    fn prop_two_part_splits_input(input in "[a-c]{0,12}") {
        let set = two_part(r#""[ab]*""#, Strategy::First);
        let outcome = set.eval(input.as_str());
        let result = outcome.matched().unwrap();
        let rest = result.rest.unwrap().as_str().unwrap();
        prop_assert_eq!(result.length + rest.chars().count(), input.chars().count());
        prop_assert!(input.ends_with(rest));
    }

    /// A bare branch matches exactly when the two-part form of the same
    /// pattern matches with an empty rest
    #[test]
    fn prop_bare_is_two_part_with_empty_rest(input in "[a-c]{0,12}") {
        let bare = compile(
            Strategy::First,
            TargetKind::Char,
            &[BranchSpec::Bare { pattern: r#""[ab]+c""# }],
        )
        .unwrap();
        let split = two_part(r#""[ab]+c""#, Strategy::First);

        let bare_matched = bare.eval(input.as_str()).matched().is_some();
        let split_exact = split
            .eval(input.as_str())
            .matched()
            .is_some_and(|r| r.rest == Some(View::Str("")));
        prop_assert_eq!(bare_matched, split_exact);
    }

    /// The longest-match winner never consumes fewer units than any other
    /// branch could
    #[test]
    fn prop_longest_dominates_each_branch(input in "[a-z]{1,10}") {
        let both = compile(
            Strategy::Longest,
            TargetKind::Char,
            &[
                BranchSpec::TwoPart {
                    pattern: r#""[a-m]+""#,
                    rest: Binding::Wildcard,
                },
                BranchSpec::TwoPart {
                    pattern: r#""[g-z]+""#,
                    rest: Binding::Wildcard,
                },
            ],
        )
        .unwrap();

        let winner = match both.eval(input.as_str()).matched() {
            Some(r) => r.length,
            None => return Ok(()),
        };
        for pattern in [r#""[a-m]+""#, r#""[g-z]+""#] {
            let single = two_part(pattern, Strategy::Longest);
            if let Some(r) = single.eval(input.as_str()).matched() {
                prop_assert!(winner >= r.length);
            }
        }
    }

    /// A catch-all set matches every input and binds the whole of it
    #[test]
    fn prop_catch_all_total(input in ".{0,20}") {
        let set = compile(
            Strategy::First,
            TargetKind::Char,
            &[
                BranchSpec::Bare { pattern: r#""[0-9]+""# },
                BranchSpec::CatchAll {
                    binding: Binding::Named("all".to_string()),
                },
            ],
        )
        .unwrap();
        let outcome = set.eval(input.as_str());
        let result = outcome.matched().unwrap();
        if result.branch == 1 {
            prop_assert_eq!(
                result.captures.get("all"),
                Some(&Value::View(View::Str(input.as_str())))
            );
        }
    }

    /// Evaluation is deterministic: the same set against the same input
    /// always produces the same result
    #[test]
    fn prop_eval_is_deterministic(input in "[a-d]{0,10}") {
        let set = two_part(r#"("[ab]*" as run) "c?""#, Strategy::First);
        let first = set.eval(input.as_str());
        let second = set.eval(input.as_str());
        prop_assert_eq!(first, second);
    }

    /// Reusing one compiled set across many inputs is observably identical
    /// to compiling the same branch specs fresh for every evaluation
    #[test]
    fn prop_reused_set_matches_fresh_compiles(
        inputs in proptest::collection::vec("[a-d]{0,10}", 1..8),
    ) {
        let specs = [
            BranchSpec::Bare { pattern: r#""[ab]+c""# },
            BranchSpec::TwoPart {
                pattern: r#"("[ab]*" as run) "c?""#,
                rest: Binding::Named("rest".to_string()),
            },
            BranchSpec::CatchAll {
                binding: Binding::Named("all".to_string()),
            },
        ];
        for strategy in [Strategy::First, Strategy::Longest] {
            let reused = compile(strategy, TargetKind::Char, &specs).unwrap();
            for input in &inputs {
                let fresh = compile(strategy, TargetKind::Char, &specs).unwrap();
                prop_assert_eq!(reused.eval(input.as_str()), fresh.eval(input.as_str()));
            }
        }
    }

    /// Byte and char addressing agree on pure-ASCII input
    #[test]
    fn prop_ascii_agrees_across_targets(input in "[a-z]{0,10}") {
        let chars = compile(
            Strategy::First,
            TargetKind::Char,
            &[BranchSpec::Bare { pattern: r#""[a-m]+""# }],
        )
        .unwrap();
        let bytes = compile(
            Strategy::First,
            TargetKind::Byte,
            &[BranchSpec::Bare { pattern: r#""[a-m]+""# }],
        )
        .unwrap();
        prop_assert_eq!(
            chars.eval(input.as_str()).matched().is_some(),
            bytes.eval(input.as_bytes()).matched().is_some()
        );
    }
}
