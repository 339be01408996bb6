//! Comparison rules shared by the registry and the parser.
//!
//! Lookups (`Registry::get_argument`, `Registry::remove`) are deliberately loose
//! and also accept an argument's description or example. Parsing only ever
//! matches identifying forms, so descriptive text cannot be mistaken for a
//! typed token.

use crate::argument::Argument;

/// Loose match used by lookups: any form, the description or the example.
pub fn matches_identifier(arg: &Argument, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    arg.command == token
        || arg.short == token
        || arg.long == token
        || arg.description == token
        || arg.example == token
}

/// Strict match used while parsing: command, long or short form only.
pub fn matches_token(arg: &Argument, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    arg.command == token || arg.long == token || arg.short == token
}

/// Identity of two arguments, ignoring their actions and long descriptions.
pub fn structurally_equal(a: &Argument, b: &Argument) -> bool {
    a.command == b.command
        && a.short == b.short
        && a.long == b.long
        && a.description == b.description
        && a.example == b.example
        && a.flags == b.flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Argument {
        Argument::new()
            .short("-g")
            .long("--greet")
            .command("greet")
            .description("Say hello")
            .example("app greet bob")
    }

    #[test]
    fn identifier_match_includes_descriptive_text() {
        let arg = sample();
        for token in ["-g", "--greet", "greet", "Say hello", "app greet bob"] {
            assert!(matches_identifier(&arg, token), "{token} should match");
        }
        assert!(!matches_identifier(&arg, "hello"));
    }

    #[test]
    fn token_match_ignores_descriptive_text() {
        let arg = sample();
        assert!(matches_token(&arg, "-g"));
        assert!(matches_token(&arg, "--greet"));
        assert!(matches_token(&arg, "greet"));
        assert!(!matches_token(&arg, "Say hello"));
        assert!(!matches_token(&arg, "app greet bob"));
    }

    #[test]
    fn empty_token_never_matches_missing_forms() {
        let arg = Argument::new().command("only");
        assert!(!matches_token(&arg, ""));
        assert!(!matches_identifier(&arg, ""));
    }

    #[test]
    fn structural_equality_checks_flags() {
        let a = sample();
        let b = sample();
        assert!(structurally_equal(&a, &b));
        assert!(!structurally_equal(&a, &b.clone().optional()));
        assert!(!structurally_equal(&a, &b.example("other")));
    }
}
