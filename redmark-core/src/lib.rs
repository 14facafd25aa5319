//! Text annotation and span reconciliation for English-grammar
//! highlighting
//!
//! This crate reconciles three independent views of the same text into
//! render-ready, non-overlapping spans:
//!
//! - a sentence splitter with abbreviation handling ([`tokenizer`]),
//! - a deterministic regex rule engine tagging grammatical roles and
//!   constructions ([`rules`], [`annotator`]),
//! - a merger for external grammar-checker results ([`merge`]),
//! - a compositor that partitions a sentence by every span boundary and
//!   attaches the covering metadata to each slice ([`compose`]),
//! - a quiz generator deriving exercises from the annotations ([`quiz`]).
//!
//! Everything operates on UTF-8 byte offsets over the whitespace-collapsed
//! input text. The pipeline is pure and stateless per request; the only
//! process-wide state is the immutable rule registry built at startup.
//!
//! # Example
//!
//! ```
//! use redmark_core::{build_quizzes, Annotator};
//!
//! let annotator = Annotator::default();
//! let annos = annotator.annotate("The cat sat on the mat. Dr. Lee agreed.");
//! assert_eq!(annos.len(), 2);
//!
//! let quizzes = build_quizzes(&annos);
//! assert_eq!(quizzes.len(), 2);
//! ```

#![warn(missing_docs)]

pub mod annotator;
pub mod compose;
pub mod error;
pub mod merge;
pub mod profile;
pub mod quiz;
pub mod rules;
pub mod tokenizer;
pub mod types;

pub use annotator::{Annotator, AnnotatorBuilder, HighlightFilters};
pub use compose::{compose, find_vocab_spans, grammar_only_pieces, VocabSpan};
pub use error::{CoreError, Result};
pub use merge::{merge_matches, merge_matches_in, CheckerMatch, CheckerRule, MergedMatch, Replacement};
pub use profile::{ProfileMetadata, RuleDef, RuleProfile};
pub use quiz::{build_quizzes, BLANK, FALLBACK_PATTERNS};
pub use rules::{Matcher, RegexMatcher, Rule, RuleSet};
pub use tokenizer::{collapse_whitespace, SentenceSplitter};
pub use types::{
    Category, Example, Piece, QuizItem, Role, RoleSet, RoleSpan, RuleMatch, Sentence, SentenceAnno,
    SentenceTag, Span, Stage, VocabItem,
};
