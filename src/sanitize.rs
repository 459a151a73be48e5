//! Turns free-text vector descriptions into test function names.

/// Characters that may not appear in a generated test name, in replacement order.
pub const DISALLOWED_CHARACTERS: &str = " '-,()";

/// Replacement alphabet walked in step with [`DISALLOWED_CHARACTERS`].
pub const REPLACEMENT_CHARACTERS: &str = "_";

/// Character-class substitution used to derive test names.
///
/// The n-th disallowed character is replaced by the n-th replacement character;
/// once the replacement alphabet runs out its last character is reused for the
/// rest. Substitutions apply one after another to the running result, so a
/// replacement that is itself disallowed later in the sequence gets rewritten
/// again. An empty replacement alphabet deletes the disallowed characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitizer {
    disallowed: Vec<char>,
    replacements: Vec<char>,
}

impl Sanitizer {
    pub fn new(disallowed: &str, replacements: &str) -> Self {
        Self {
            disallowed: disallowed.chars().collect(),
            replacements: replacements.chars().collect(),
        }
    }

    pub fn apply(&self, target: &str) -> String {
        let mut result = target.to_string();
        let mut next = 0;
        for &old in &self.disallowed {
            result = match self.replacements.get(next) {
                Some(&new) => result.replace(old, new.encode_utf8(&mut [0; 4])),
                None => result.replace(old, ""),
            };
            if next + 1 < self.replacements.len() {
                next += 1;
            }
        }
        result
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DISALLOWED_CHARACTERS, REPLACEMENT_CHARACTERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_disallowed_character_with_underscore() {
        let sanitizer = Sanitizer::default();
        assert_eq!(sanitizer.apply("Valid host, no auth"), "Valid_host__no_auth");
        assert_eq!(
            sanitizer.apply("Missing delimiting slash between hosts and options (ipv4)"),
            "Missing_delimiting_slash_between_hosts_and_options__ipv4_"
        );
        assert_eq!(sanitizer.apply("User's ip-literal"), "User_s_ip_literal");
    }

    #[test]
    fn clean_descriptions_are_unchanged() {
        let sanitizer = Sanitizer::default();
        assert_eq!(sanitizer.apply("Empty_string"), "Empty_string");
        assert_eq!(sanitizer.apply(""), "");
    }

    #[test]
    fn sanitizing_is_idempotent() {
        let sanitizer = Sanitizer::default();
        let once = sanitizer.apply("Multiple hosts (mixed formats)");
        assert_eq!(sanitizer.apply(&once), once);
    }

    #[test]
    fn longer_alphabet_maps_positionally_and_clamps() {
        let sanitizer = Sanitizer::new("abcd", "xy");
        // a -> x, b -> y, then c and d reuse the last replacement.
        assert_eq!(sanitizer.apply("abcd-abcd"), "xyyy-xyyy");
    }

    #[test]
    fn substitutions_apply_to_the_running_result() {
        // '-' becomes ' ', which is then rewritten by the second rule.
        let sanitizer = Sanitizer::new("- ", " _");
        assert_eq!(sanitizer.apply("a-b c"), "a_b_c");
    }

    #[test]
    fn empty_alphabet_deletes() {
        let sanitizer = Sanitizer::new(" ()", "");
        assert_eq!(sanitizer.apply("f (x y)"), "fxy");
    }
}
