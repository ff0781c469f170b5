//! Ordered placeholder substitution over template bodies.
//!
//! Each rule replaces only the *first* occurrence of its pattern, and later
//! rules operate on the cumulative output of earlier ones. Both points are
//! load-bearing: templates carry exactly one instance of each placeholder, and
//! the conditional version pin must see the body the mandatory rules already
//! rewrote.

use regex::{NoExpand, Regex};

/// A single pattern-to-replacement substitution, applied once.
#[derive(Debug, Clone)]
pub struct TransformRule {
    pub pattern: Regex,
    pub replacement: String,
}

impl TransformRule {
    pub fn new(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            pattern,
            replacement: replacement.into(),
        }
    }

    /// Rule matching a literal token. Replacement is taken literally as well
    /// (no capture-group expansion), so resource names containing `$` survive.
    pub fn literal(token: &str, replacement: impl Into<String>) -> Self {
        // escape cannot produce an invalid pattern
        let pattern = Regex::new(&regex::escape(token)).expect("escaped literal is a valid regex");
        Self::new(pattern, replacement)
    }

    /// Replace the first occurrence of the pattern in `content`.
    fn apply(&self, content: &str) -> String {
        self.pattern
            .replace(content, NoExpand(&self.replacement))
            .into_owned()
    }
}

/// Ordered sequence of rules, built incrementally by the provisioner.
#[derive(Debug, Clone, Default)]
pub struct TransformRuleSet {
    rules: Vec<TransformRule>,
}

impl TransformRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: TransformRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply all rules in order to `content`.
    ///
    /// Pure and deterministic; a non-matching rule is a silent no-op. Not
    /// idempotent in general: a second pass may re-match text a first pass
    /// inserted.
    pub fn apply(&self, content: &str) -> String {
        self.rules
            .iter()
            .fold(content.to_owned(), |acc, rule| rule.apply(&acc))
    }
}

impl FromIterator<TransformRule> for TransformRuleSet {
    fn from_iter<I: IntoIterator<Item = TransformRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
