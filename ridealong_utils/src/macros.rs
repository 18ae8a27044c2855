#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only used by the predicate")]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    #[derive(Debug)]
    enum Outcome {
        Sent(u16),
        Dropped,
    }

    #[test]
    fn matches_pattern() {
        assert_matches!(Outcome::Sent(200), Outcome::Sent(_));
        assert_matches!(Outcome::Sent(204), Outcome::Sent(code) if *code >= 200 && *code < 300);
    }

    #[test]
    #[should_panic(expected = "did not match pattern")]
    fn mismatch_panics() {
        assert_matches!(Outcome::Dropped, Outcome::Sent(_));
    }

    #[test]
    #[should_panic(expected = "does not match predicate")]
    fn predicate_mismatch_panics() {
        assert_matches!(Outcome::Sent(503), Outcome::Sent(code) if *code < 300);
    }
}
