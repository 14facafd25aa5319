//! Rule profiles: the TOML schema for abbreviations and rule definitions
//!
//! A profile is the only configuration input of the engine. It is parsed
//! and validated once, then compiled into an immutable [`RuleSet`]
//! (see [`crate::rules`]); nothing in a profile is consulted at match time.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::types::{Category, Role, Stage};

/// Embedded default English profile
const ENGLISH_PROFILE: &str = include_str!("../profiles/en.toml");

/// Root rule profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleProfile {
    /// Profile metadata
    pub metadata: ProfileMetadata,
    /// Abbreviation tokens, matched case-sensitively against the trailing
    /// token at a period (entries include the trailing period, e.g. "Dr.")
    #[serde(default)]
    pub abbreviations: Vec<String>,
    /// Rule definitions, in scan order
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

/// Profile metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMetadata {
    /// Language or profile code
    pub code: String,
    /// Human-readable name
    pub name: String,
}

/// One rule definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDef {
    /// Unique rule identifier
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// School stage the rule belongs to
    pub stage: Stage,
    /// Rule category
    pub category: Category,
    /// Grammatical role assigned to matches, for sentence-pattern rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Regex pattern, scanned globally over the full input text
    pub pattern: String,
}

impl RuleProfile {
    /// The built-in English profile.
    ///
    /// The asset is embedded at compile time; a parse failure here is a
    /// packaging defect, not a runtime condition.
    pub fn builtin_english() -> Self {
        Self::from_toml_str(ENGLISH_PROFILE).expect("embedded English profile must be valid")
    }

    /// Parse and validate a profile from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let profile: RuleProfile = toml::from_str(toml_str)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load and validate a profile from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate the profile
    pub fn validate(&self) -> Result<()> {
        if self.metadata.code.is_empty() {
            return Err(CoreError::Profile("metadata.code must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.id.is_empty() {
                return Err(CoreError::Profile("rule id must not be empty".into()));
            }
            if rule.pattern.is_empty() {
                return Err(CoreError::Profile(format!(
                    "rule `{}` has an empty pattern",
                    rule.id
                )));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(CoreError::Profile(format!(
                    "duplicate rule id: `{}`",
                    rule.id
                )));
            }
        }

        for abbrev in &self.abbreviations {
            if !abbrev.ends_with('.') {
                return Err(CoreError::Profile(format!(
                    "abbreviation `{abbrev}` must end with a period"
                )));
            }
        }

        Ok(())
    }
}
