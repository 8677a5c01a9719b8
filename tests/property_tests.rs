//! Property-based tests for transition validation.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated definitions and transitions.

use proptest::prelude::*;
use statefield::core::{State, StateEnum};
use statefield::{state_enum, validate, StateDefinition};

state_enum! {
    enum TestState {
        Initial = ("initial", "Initial"),
        Processing = ("processing", "Processing"),
        Complete = ("complete", "Complete"),
        Failed = ("failed", "Failed"),
        Skipped = ("skipped", "Skipped"),
    }
}

prop_compose! {
    fn arbitrary_state()(variant in 0..5usize) -> TestState {
        TestState::members()[variant]
    }
}

prop_compose! {
    fn arbitrary_rule()(
        to in arbitrary_state(),
        origins in prop::collection::vec(arbitrary_state(), 0..4)
    ) -> (TestState, Vec<TestState>) {
        (to, origins)
    }
}

prop_compose! {
    fn arbitrary_definition()(
        rules in prop::collection::vec(arbitrary_rule(), 0..6),
        default in proptest::option::of(arbitrary_state())
    ) -> StateDefinition<TestState> {
        let mut builder = StateDefinition::<TestState>::of_enum();
        for (to, origins) in rules {
            builder = builder.allow(to, origins);
        }
        if let Some(default) = default {
            builder = builder.default_value(default);
        }
        builder.build().unwrap()
    }
}

proptest! {
    #[test]
    fn self_transition_is_always_legal(
        definition in arbitrary_definition(),
        state in arbitrary_state()
    ) {
        prop_assert!(definition.is_valid_transition(&state, &state));
    }

    #[test]
    fn empty_table_is_unrestricted(from in arbitrary_state(), to in arbitrary_state()) {
        let definition = StateDefinition::<TestState>::of_enum().build().unwrap();
        prop_assert!(definition.is_valid_transition(&from, &to));
        prop_assert!(definition.is_valid_origin(None, &to));
    }

    #[test]
    fn allow_list_semantics(
        definition in arbitrary_definition(),
        from in arbitrary_state(),
        to in arbitrary_state()
    ) {
        let expected = from == to
            || !definition.is_restricted(&to)
            || definition.allowed_origins(&to).contains(&from);
        prop_assert_eq!(definition.is_valid_transition(&from, &to), expected);
    }

    #[test]
    fn validate_agrees_with_definition(
        definition in arbitrary_definition(),
        from in arbitrary_state(),
        to in arbitrary_state()
    ) {
        let verdict = validate(&definition, Some(&from), Some(&to));
        prop_assert_eq!(verdict.is_ok(), definition.is_valid_transition(&from, &to));
        if let Err(err) = verdict {
            prop_assert!(err.is_invalid_transition());
        }
    }

    #[test]
    fn validation_is_idempotent(
        definition in arbitrary_definition(),
        from in proptest::option::of(arbitrary_state()),
        to in proptest::option::of(arbitrary_state())
    ) {
        let first = validate(&definition, from.as_ref(), to.as_ref());
        let second = validate(&definition, from.as_ref(), to.as_ref());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unknown_raw_value_is_rejected(raw in "[a-z]{1,12}") {
        let definition = TestState::definition();
        let known = definition.members().iter().any(|s| s.value() == raw || s.name() == raw);
        prop_assume!(!known);
        prop_assert!(definition.coerce(&raw).unwrap_err().is_unknown_state());
    }

    #[test]
    fn coerce_accepts_every_value_and_name(state in arbitrary_state()) {
        let definition = TestState::definition();
        prop_assert_eq!(definition.coerce(state.value()), Ok(state));
        prop_assert_eq!(definition.coerce(state.name()), Ok(state));
    }

    #[test]
    fn reachable_from_matches_forward_scan(
        definition in arbitrary_definition(),
        from in arbitrary_state()
    ) {
        for to in definition.members() {
            let reachable = definition.reachable_from(&from).contains(&to);
            prop_assert_eq!(reachable, definition.is_valid_transition(&from, to));
        }
    }

    #[test]
    fn config_round_trip_preserves_verdicts(
        definition in arbitrary_definition(),
        from in arbitrary_state(),
        to in arbitrary_state()
    ) {
        let restored = definition.to_config().resolve::<TestState>().unwrap();
        prop_assert_eq!(
            restored.is_valid_transition(&from, &to),
            definition.is_valid_transition(&from, &to)
        );
        prop_assert_eq!(restored.default_value(), definition.default_value());
    }
}
