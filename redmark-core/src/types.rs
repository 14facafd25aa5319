//! Core value types shared across the annotation pipeline
//!
//! All offsets in this crate are UTF-8 byte offsets into the text they
//! were produced from. Spans are right-open half-intervals `[start, end)`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// A right-open half-interval `[start, end)` over a text, in byte offsets.
///
/// Invariant: `start < end` for every span produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "span must be non-empty: [{start}, {end})");
        Self { start, end }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty (never true for spans built via `new`)
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether two spans overlap
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether this span covers any part of the interval `[a, b)`
    pub fn covers(&self, a: usize, b: usize) -> bool {
        self.start < b && self.end > a
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// School stage a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Junior high school
    #[serde(rename = "JH")]
    Jh,
    /// Senior high school
    #[serde(rename = "SH")]
    Sh,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Jh => write!(f, "JH"),
            Stage::Sh => write!(f, "SH"),
        }
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JH" | "jh" => Ok(Stage::Jh),
            "SH" | "sh" => Ok(Stage::Sh),
            other => Err(format!("unknown stage: {other}")),
        }
    }
}

/// Rule category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Sentence-pattern rules (the S/V/O/C role taggers)
    Pattern,
    /// Tense constructions
    Tense,
    /// Infinitive constructions
    Infinitive,
    /// Gerund constructions
    Gerund,
    /// Relative clauses
    Relative,
    /// Comparative and superlative constructions
    Comparison,
    /// Passive voice
    Passive,
    /// Prepositional phrases
    Preposition,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Pattern => "pattern",
            Category::Tense => "tense",
            Category::Infinitive => "infinitive",
            Category::Gerund => "gerund",
            Category::Relative => "relative",
            Category::Comparison => "comparison",
            Category::Passive => "passive",
            Category::Preposition => "preposition",
        };
        write!(f, "{name}")
    }
}

/// Grammatical role marked by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Subject
    Subject,
    /// Verb
    Verb,
    /// Object
    Object,
    /// Complement
    Complement,
}

impl Role {
    /// Single-letter label used in pattern strings ("S", "V", "O", "C")
    pub fn letter(&self) -> &'static str {
        match self {
            Role::Subject => "S",
            Role::Verb => "V",
            Role::Object => "O",
            Role::Complement => "C",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Inline storage for the role sets attached to spans and pieces.
///
/// Almost every span carries one or two roles, so a spill to the heap is rare.
pub type RoleSet = SmallVec<[Role; 2]>;

/// One occurrence of a rule pattern in the full input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    /// Absolute span in the scanned text
    pub span: Span,
    /// Identifier of the rule that fired
    pub rule_id: String,
    /// Human-readable rule label
    pub label: String,
    /// Rule category
    pub category: Category,
    /// School stage of the rule
    pub stage: Stage,
    /// Grammatical role, for sentence-pattern rules
    pub role: Option<Role>,
    /// The matched substring
    pub matched_text: String,
}

/// One sentence produced by the splitter, with its offsets in the
/// whitespace-collapsed text it was cut from.
///
/// Offsets are tracked at split time so annotations can be mapped back
/// even when the same sentence text occurs more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence text
    pub text: String,
    /// Start offset in the collapsed text
    pub start: usize,
    /// End offset in the collapsed text (exclusive)
    pub end: usize,
}

impl Sentence {
    /// Length of the sentence in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the sentence is empty (never true for splitter output)
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A sentence-relative span carrying the grammatical roles that cover it.
///
/// Roles can legitimately stack: a word can be part of the subject and
/// inside a relative clause at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSpan {
    /// Sentence-relative span
    pub span: Span,
    /// Roles attached to the span
    pub roles: RoleSet,
}

/// A sentence-level tag derived from a rule that matched inside the sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceTag {
    /// Identifier of the rule that fired
    pub rule_id: String,
    /// Human-readable rule label
    pub label: String,
    /// Rule category
    pub category: Category,
    /// School stage of the rule
    pub stage: Stage,
}

/// The annotated representation of one sentence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceAnno {
    /// Sentence text
    pub text: String,
    /// Offset of the sentence in the collapsed input text
    pub start: usize,
    /// Sentence-level category tags, deduplicated by rule id
    pub tags: Vec<SentenceTag>,
    /// Role spans, sentence-relative, sorted by start offset
    pub spans: Vec<RoleSpan>,
}

impl SentenceAnno {
    /// Whether a given role is present in any span
    pub fn has_role(&self, role: Role) -> bool {
        self.spans.iter().any(|s| s.roles.contains(&role))
    }

    /// Classify the sentence pattern from the roles present.
    ///
    /// With both S and V present the pattern is `S+V+O`, `S+V+C`, or
    /// `S+V` depending on which further role exists. With a partial
    /// role set the present roles are concatenated in S, V, O, C order.
    /// Returns `None` when no role spans exist.
    pub fn pattern(&self) -> Option<String> {
        let s = self.has_role(Role::Subject);
        let v = self.has_role(Role::Verb);
        let o = self.has_role(Role::Object);
        let c = self.has_role(Role::Complement);

        if s && v {
            if o {
                return Some("S+V+O".to_string());
            }
            if c {
                return Some("S+V+C".to_string());
            }
            return Some("S+V".to_string());
        }

        let present: Vec<&str> = [
            (s, Role::Subject),
            (v, Role::Verb),
            (o, Role::Object),
            (c, Role::Complement),
        ]
        .into_iter()
        .filter(|(p, _)| *p)
        .map(|(_, r)| r.letter())
        .collect();

        if present.is_empty() {
            None
        } else {
            Some(present.join("+"))
        }
    }
}

/// An example usage attached to a vocabulary item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Example sentence
    pub text: String,
    /// Translation of the example, if available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

/// A vocabulary item supplied by the content-loading collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabItem {
    /// Headword, matched whole-word and case-insensitively
    pub word: String,
    /// Translation of the headword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Part of speech
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    /// Pronunciation hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    /// Example usages
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl VocabItem {
    /// Create a bare vocabulary item from a headword
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: None,
            pos: None,
            pronunciation: None,
            examples: Vec::new(),
        }
    }
}

/// A minimal non-overlapping slice of sentence text produced by the
/// span compositor, carrying the union of covering metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Piece {
    /// Start offset in the sentence
    pub start: usize,
    /// End offset in the sentence (exclusive)
    pub end: usize,
    /// Slice of the sentence text
    pub text: String,
    /// Union of roles from every role span covering this piece
    pub roles: RoleSet,
    /// First vocabulary item covering this piece, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocab: Option<VocabItem>,
}

/// An exercise item derived from annotated sentences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuizItem {
    /// Fill-in-the-blank over one role span
    Cloze {
        /// Sentence with the target span blanked out
        prompt: String,
        /// The blanked-out text
        answer: String,
    },
    /// Multiple-choice sentence-pattern identification
    Choice {
        /// Sentence to classify
        prompt: String,
        /// Pattern labels offered, answer included
        options: Vec<String>,
        /// Correct pattern label
        answer: String,
    },
    /// Read-aloud item with no answer key
    Read {
        /// Sentence to read
        prompt: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn span_overlap_is_symmetric() {
        let a = Span::new(0, 5);
        let b = Span::new(4, 8);
        let c = Span::new(5, 8);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn span_covers_half_open() {
        let s = Span::new(2, 6);
        assert!(s.covers(0, 3));
        assert!(s.covers(5, 9));
        assert!(!s.covers(6, 9));
        assert!(!s.covers(0, 2));
    }

    fn anno_with_roles(roles: &[&[Role]]) -> SentenceAnno {
        let spans = roles
            .iter()
            .enumerate()
            .map(|(i, rs)| RoleSpan {
                span: Span::new(i * 2, i * 2 + 1),
                roles: rs.iter().copied().collect(),
            })
            .collect();
        SentenceAnno {
            text: String::new(),
            start: 0,
            tags: Vec::new(),
            spans,
        }
    }

    #[test]
    fn pattern_prefers_object_over_complement() {
        let anno = anno_with_roles(&[
            &[Role::Subject],
            &[Role::Verb],
            &[Role::Object],
            &[Role::Complement],
        ]);
        assert_eq!(anno.pattern().as_deref(), Some("S+V+O"));
    }

    #[test]
    fn pattern_falls_back_to_concatenation() {
        let anno = anno_with_roles(&[&[Role::Verb], &[Role::Object]]);
        assert_eq!(anno.pattern().as_deref(), Some("V+O"));
    }

    #[test]
    fn pattern_none_without_roles() {
        let anno = SentenceAnno {
            text: "…".to_string(),
            start: 0,
            tags: Vec::new(),
            spans: Vec::new(),
        };
        assert_eq!(anno.pattern(), None);
    }

    #[test]
    fn stacked_roles_are_all_visible() {
        let anno = SentenceAnno {
            text: String::new(),
            start: 0,
            tags: Vec::new(),
            spans: vec![RoleSpan {
                span: Span::new(0, 3),
                roles: smallvec![Role::Subject, Role::Verb],
            }],
        };
        assert_eq!(anno.pattern().as_deref(), Some("S+V"));
    }
}
