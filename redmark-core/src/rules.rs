//! Rule engine: an immutable registry of pattern rules scanned over the
//! full input text
//!
//! Rules are sentence-agnostic at match time; sentence attribution happens
//! downstream in the annotator by intersecting match spans with sentence
//! boundaries. The scan is deterministic: rules run in registry order and
//! every rule reports its matches in ascending position order.

use crate::error::{CoreError, Result};
use crate::profile::{RuleDef, RuleProfile};
use crate::types::{Category, Role, RuleMatch, Span, Stage};
use regex::Regex;

/// A pattern matcher pluggable into a [`Rule`].
///
/// `find_at` reports the first match at or after `at`, or `None` when the
/// rest of the text has no match. A matcher may fail; the engine isolates
/// the failure to the owning rule.
pub trait Matcher: Send + Sync {
    /// Find the first match starting at or after `at`
    fn find_at(&self, text: &str, at: usize) -> Result<Option<Span>>;
}

/// Regex-backed matcher
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile a matcher from a pattern
    pub fn new(pattern: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }
}

impl Matcher for RegexMatcher {
    fn find_at(&self, text: &str, at: usize) -> Result<Option<Span>> {
        // Zero-width matches are reported as-is; the scan loop in
        // `Rule::matches` skips them but still advances past them.
        Ok(self.regex.find_at(text, at).map(|m| Span {
            start: m.start(),
            end: m.end(),
        }))
    }
}

/// One registered rule: metadata plus its matcher
pub struct Rule {
    /// Unique rule identifier
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// School stage
    pub stage: Stage,
    /// Rule category
    pub category: Category,
    /// Grammatical role assigned to matches, for sentence-pattern rules
    pub role: Option<Role>,
    matcher: Box<dyn Matcher>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("stage", &self.stage)
            .field("category", &self.category)
            .field("role", &self.role)
            .finish()
    }
}

impl Rule {
    /// Create a rule backed by a regex pattern
    pub fn with_regex(
        id: impl Into<String>,
        label: impl Into<String>,
        stage: Stage,
        category: Category,
        role: Option<Role>,
        pattern: &str,
    ) -> Result<Self> {
        let id = id.into();
        let matcher = RegexMatcher::new(pattern).map_err(|source| CoreError::Rule {
            id: id.clone(),
            source,
        })?;
        Ok(Self {
            id,
            label: label.into(),
            stage,
            category,
            role,
            matcher: Box::new(matcher),
        })
    }

    /// Create a rule with a custom matcher
    pub fn with_matcher(
        id: impl Into<String>,
        label: impl Into<String>,
        stage: Stage,
        category: Category,
        role: Option<Role>,
        matcher: Box<dyn Matcher>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            stage,
            category,
            role,
            matcher,
        }
    }

    fn try_from_def(def: &RuleDef) -> Result<Self> {
        Self::with_regex(
            &def.id,
            &def.label,
            def.stage,
            def.category,
            def.role,
            &def.pattern,
        )
    }

    /// All matches of this rule over the full text, in ascending order.
    ///
    /// The scan position always advances, so a matcher reporting
    /// zero-width or non-advancing matches cannot loop forever.
    pub fn matches(&self, text: &str) -> Result<Vec<RuleMatch>> {
        let mut out = Vec::new();
        let mut at = 0usize;

        while at <= text.len() {
            let span = match self.matcher.find_at(text, at)? {
                Some(span) => span,
                None => break,
            };

            if !span.is_empty() && span.end <= text.len() {
                out.push(RuleMatch {
                    span,
                    rule_id: self.id.clone(),
                    label: self.label.clone(),
                    category: self.category,
                    stage: self.stage,
                    role: self.role,
                    matched_text: text[span.start..span.end].to_string(),
                });
            }

            let next = span.end.max(at);
            at = if next > at {
                next
            } else {
                // Zero-width guard: step to the next char boundary.
                match text[at..].chars().next() {
                    Some(c) => at + c.len_utf8(),
                    None => break,
                }
            };
        }

        Ok(out)
    }
}

/// Immutable rule registry.
///
/// Constructed once from a profile (or from explicit rules) and injected
/// into the annotator; never mutated afterwards.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set from explicit rules
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Compile a rule set from a profile.
    ///
    /// A definition whose pattern fails to compile is skipped with a
    /// warning; the remaining rules still load.
    pub fn from_profile(profile: &RuleProfile) -> Self {
        let rules = profile
            .rules
            .iter()
            .filter_map(|def| match Rule::try_from_def(def) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    log::warn!("skipping rule `{}`: {e}", def.id);
                    None
                }
            })
            .collect();
        Self { rules }
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the registered rules in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Scan the full text with every registered rule.
    ///
    /// A rule whose matcher fails contributes zero matches and is logged;
    /// it never aborts the batch.
    pub fn scan(&self, text: &str) -> Vec<RuleMatch> {
        self.scan_filtered(text, |_| true)
    }

    /// Scan the full text with the rules accepted by `keep`
    pub fn scan_filtered<F>(&self, text: &str, keep: F) -> Vec<RuleMatch>
    where
        F: Fn(&Rule) -> bool,
    {
        let mut out = Vec::new();
        for rule in &self.rules {
            if !keep(rule) {
                continue;
            }
            match rule.matches(text) {
                Ok(matches) => out.extend(matches),
                Err(e) => log::warn!("rule `{}` failed mid-scan, dropping its matches: {e}", rule.id),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_rule(id: &str, pattern: &str, role: Option<Role>) -> Rule {
        Rule::with_regex(id, id, Stage::Jh, Category::Pattern, role, pattern).unwrap()
    }

    #[test]
    fn global_scan_finds_all_occurrences() {
        let rule = toy_rule("cat", r"\bcat\b", Some(Role::Subject));
        let matches = rule.matches("cat scattered, cat sat").unwrap();
        let spans: Vec<_> = matches.iter().map(|m| (m.span.start, m.span.end)).collect();
        assert_eq!(spans, vec![(0, 3), (15, 18)]);
        assert!(matches.iter().all(|m| m.matched_text == "cat"));
    }

    #[test]
    fn scan_is_deterministic() {
        let rules = RuleSet::from_rules(vec![
            toy_rule("a", r"\bsat\b", Some(Role::Verb)),
            toy_rule("b", r"\bcat\b", Some(Role::Subject)),
        ]);
        let text = "The cat sat.";
        let first = rules.scan(text);
        let second = rules.scan(text);
        assert_eq!(first, second);
        // Registry order, then position order.
        assert_eq!(first[0].rule_id, "a");
        assert_eq!(first[1].rule_id, "b");
    }

    #[test]
    fn zero_width_pattern_terminates() {
        // `a*` matches the empty string at every position.
        let rule = toy_rule("zw", "a*", None);
        let matches = rule.matches("bbbab").unwrap();
        // Only the real occurrence survives; the scan must not hang.
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_text, "a");
    }

    struct FailingMatcher;

    impl Matcher for FailingMatcher {
        fn find_at(&self, _text: &str, _at: usize) -> crate::Result<Option<Span>> {
            Err(CoreError::Matcher("backend unavailable".into()))
        }
    }

    #[test]
    fn failing_rule_is_isolated() {
        let rules = RuleSet::from_rules(vec![
            Rule::with_matcher(
                "bad",
                "bad",
                Stage::Jh,
                Category::Pattern,
                None,
                Box::new(FailingMatcher),
            ),
            toy_rule("good", r"\bword\b", None),
        ]);
        let matches = rules.scan("a word here");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_id, "good");
    }

    #[test]
    fn invalid_pattern_skipped_at_profile_load() {
        let toml_str = r#"
            [metadata]
            code = "t"
            name = "t"

            [[rules]]
            id = "broken"
            label = "broken"
            stage = "JH"
            category = "pattern"
            pattern = "("

            [[rules]]
            id = "fine"
            label = "fine"
            stage = "JH"
            category = "pattern"
            pattern = "ok"
        "#;
        let profile = RuleProfile::from_toml_str(toml_str).unwrap();
        let rules = RuleSet::from_profile(&profile);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.iter().next().unwrap().id, "fine");
    }

    #[test]
    fn empty_text_yields_no_matches() {
        let rules = RuleSet::from_profile(&RuleProfile::builtin_english());
        assert!(rules.scan("").is_empty());
    }
}
