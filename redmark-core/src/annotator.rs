//! Span annotator: applies the rule set per sentence and builds
//! [`SentenceAnno`] values
//!
//! Rules scan the full collapsed text once; matches are then attributed
//! to sentences by intersecting their spans with the sentence offsets the
//! splitter reported. A match that crosses a sentence boundary is clipped
//! to each sentence it touches rather than dropped.

use crate::profile::RuleProfile;
use crate::rules::{Rule, RuleSet};
use crate::tokenizer::{collapse_whitespace, SentenceSplitter};
use crate::types::{Category, RoleSet, RoleSpan, Sentence, SentenceAnno, SentenceTag, Span, Stage};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Filters narrowing which rules the annotator applies.
///
/// Empty collections mean "no restriction". Filters are pass-through
/// configuration with no side effects; they never mutate the rule set.
#[derive(Debug, Clone, Default)]
pub struct HighlightFilters {
    /// School stages to include (empty = all)
    pub stages: Vec<Stage>,
    /// Rule categories to include (empty = all)
    pub categories: Vec<Category>,
    /// Suppress composed pieces that carry no role tags
    pub grammar_only: bool,
    /// Free-text filter matched case-insensitively against rule label and id
    pub query: Option<String>,
}

impl HighlightFilters {
    /// Whether a rule passes the filters
    pub fn accepts(&self, rule: &Rule) -> bool {
        if !self.stages.is_empty() && !self.stages.contains(&rule.stage) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&rule.category) {
            return false;
        }
        if let Some(query) = &self.query {
            let q = query.to_lowercase();
            if !q.is_empty()
                && !rule.label.to_lowercase().contains(&q)
                && !rule.id.to_lowercase().contains(&q)
            {
                return false;
            }
        }
        true
    }
}

/// Builder for [`Annotator`]
pub struct AnnotatorBuilder {
    profile: Option<RuleProfile>,
    rules: Option<RuleSet>,
    filters: HighlightFilters,
}

impl Default for AnnotatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotatorBuilder {
    /// Create a builder using the built-in English profile
    pub fn new() -> Self {
        Self {
            profile: None,
            rules: None,
            filters: HighlightFilters::default(),
        }
    }

    /// Use a specific rule profile
    pub fn profile(mut self, profile: RuleProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Use an explicit rule set instead of compiling one from the profile.
    ///
    /// The profile's abbreviation list (built-in English when no profile
    /// is set) still configures the sentence splitter.
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Set the highlight filters
    pub fn filters(mut self, filters: HighlightFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Build the annotator
    pub fn build(self) -> Annotator {
        let profile = self.profile.unwrap_or_else(RuleProfile::builtin_english);
        let rules = self
            .rules
            .unwrap_or_else(|| RuleSet::from_profile(&profile));
        Annotator {
            splitter: SentenceSplitter::new(profile.abbreviations),
            rules: Arc::new(rules),
            filters: self.filters,
        }
    }
}

/// Stateless text annotator.
///
/// Holds only immutable configuration (splitter, rule set, filters), so a
/// single annotator can serve concurrent requests without locking.
pub struct Annotator {
    splitter: SentenceSplitter,
    rules: Arc<RuleSet>,
    filters: HighlightFilters,
}

impl Default for Annotator {
    fn default() -> Self {
        AnnotatorBuilder::new().build()
    }
}

impl Annotator {
    /// Builder entry point
    pub fn builder() -> AnnotatorBuilder {
        AnnotatorBuilder::new()
    }

    /// The active highlight filters
    pub fn filters(&self) -> &HighlightFilters {
        &self.filters
    }

    /// The rule registry in use
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Split the input into sentences (offsets refer to the collapsed text)
    pub fn sentences(&self, text: &str) -> Vec<Sentence> {
        self.splitter.split(text)
    }

    /// Annotate text: one [`SentenceAnno`] per sentence, in order.
    ///
    /// Degenerate input (empty or whitespace-only) yields an empty vector.
    pub fn annotate(&self, text: &str) -> Vec<SentenceAnno> {
        let collapsed = collapse_whitespace(text);
        let sentences = self.splitter.split(&collapsed);
        if sentences.is_empty() {
            return Vec::new();
        }

        let matches = self
            .rules
            .scan_filtered(&collapsed, |rule| self.filters.accepts(rule));

        sentences
            .into_iter()
            .map(|sentence| {
                // Role spans grouped by their clipped sentence-relative span,
                // so rules tagging the same words stack instead of repeating.
                let mut role_spans: BTreeMap<(usize, usize), RoleSet> = BTreeMap::new();
                let mut tags: Vec<SentenceTag> = Vec::new();

                for m in matches
                    .iter()
                    .filter(|m| m.span.covers(sentence.start, sentence.end))
                {
                    let rel_start = m.span.start.max(sentence.start) - sentence.start;
                    let rel_end = m.span.end.min(sentence.end) - sentence.start;
                    if rel_start >= rel_end {
                        continue;
                    }

                    if let Some(role) = m.role {
                        let roles = role_spans.entry((rel_start, rel_end)).or_default();
                        if !roles.contains(&role) {
                            roles.push(role);
                        }
                    }

                    if !tags.iter().any(|t| t.rule_id == m.rule_id) {
                        tags.push(SentenceTag {
                            rule_id: m.rule_id.clone(),
                            label: m.label.clone(),
                            category: m.category,
                            stage: m.stage,
                        });
                    }
                }

                let spans = role_spans
                    .into_iter()
                    .map(|((start, end), roles)| RoleSpan {
                        span: Span::new(start, end),
                        roles,
                    })
                    .collect();

                SentenceAnno {
                    text: sentence.text,
                    start: sentence.start,
                    tags,
                    spans,
                }
            })
            .collect()
    }
}
