//! Sentence splitting with abbreviation suppression
//!
//! The splitter collapses whitespace runs to single spaces, then scans for
//! terminal punctuation. A period whose trailing token is a configured
//! abbreviation ("Dr.", "e.g.") does not end a sentence, and neither does
//! punctuation followed directly by a non-space character ("3.14",
//! "U.S.A."). A maximal run of terminal punctuation ("?!", "...") is one
//! boundary, and closing quotes or brackets right after it stay with the
//! sentence.
//!
//! All offsets on the returned [`Sentence`] values refer to the collapsed
//! text, which is also the text the rule engine scans, so the two offset
//! spaces agree by construction.

use crate::types::Sentence;
use std::collections::HashSet;

/// Collapse every whitespace run to a single space and trim the ends.
///
/// This is the canonical text every downstream offset refers to.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn is_closer(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '\u{201d}' | '\u{2019}' | ')' | ']')
}

/// Sentence splitter with a configurable abbreviation exception list
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    abbreviations: HashSet<String>,
}

impl SentenceSplitter {
    /// Create a splitter with the given abbreviation tokens.
    ///
    /// Tokens are compared case-sensitively and include the trailing
    /// period, e.g. `"Mr."`.
    pub fn new<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            abbreviations: abbreviations.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a splitter with no abbreviation exceptions
    pub fn bare() -> Self {
        Self {
            abbreviations: HashSet::new(),
        }
    }

    /// Split text into sentences, with offsets into the collapsed text.
    ///
    /// Empty or whitespace-only input yields an empty vector. Input with
    /// no terminal punctuation is returned as a single sentence.
    pub fn split(&self, text: &str) -> Vec<Sentence> {
        let collapsed = collapse_whitespace(text);
        if collapsed.is_empty() {
            return Vec::new();
        }

        let chars: Vec<(usize, char)> = collapsed.char_indices().collect();
        let mut sentences = Vec::new();
        let mut sent_start = 0usize;
        let mut i = 0usize;

        while i < chars.len() {
            let ch = chars[i].1;
            if !is_terminator(ch) {
                i += 1;
                continue;
            }

            // Maximal run of terminal punctuation is a single candidate
            // boundary ("?!", "...").
            let mut run_end = i;
            while run_end + 1 < chars.len() && is_terminator(chars[run_end + 1].1) {
                run_end += 1;
            }

            // Closing quotes and brackets stay with the sentence.
            let mut close_end = run_end;
            while close_end + 1 < chars.len() && is_closer(chars[close_end + 1].1) {
                close_end += 1;
            }

            let end = chars[close_end].0 + chars[close_end].1.len_utf8();
            let at_eof = close_end + 1 == chars.len();
            let followed_by_space = chars.get(close_end + 1).map(|&(_, c)| c) == Some(' ');

            let is_boundary = (at_eof || followed_by_space)
                && !(run_end == i && ch == '.' && self.trailing_token_is_abbreviation(&collapsed, chars[i].0));

            if is_boundary {
                sentences.push(Sentence {
                    text: collapsed[sent_start..end].to_string(),
                    start: sent_start,
                    end,
                });
                // Step over the single separating space.
                sent_start = if at_eof { end } else { end + 1 };
                i = close_end + 2;
            } else {
                i = close_end + 1;
            }
        }

        // Trailing text without terminal punctuation is its own sentence.
        if sent_start < collapsed.len() {
            sentences.push(Sentence {
                text: collapsed[sent_start..].to_string(),
                start: sent_start,
                end: collapsed.len(),
            });
        }

        sentences
    }

    /// Split text and return only the sentence strings
    pub fn split_strings(&self, text: &str) -> Vec<String> {
        self.split(text).into_iter().map(|s| s.text).collect()
    }

    /// The maximal trailing non-whitespace token ending at the period at
    /// `dot_pos`, checked against the abbreviation set.
    fn trailing_token_is_abbreviation(&self, collapsed: &str, dot_pos: usize) -> bool {
        let token_start = collapsed[..dot_pos].rfind(' ').map_or(0, |p| p + 1);
        let token = &collapsed[token_start..dot_pos + 1];
        self.abbreviations.contains(token)
    }
}

impl Default for SentenceSplitter {
    /// Splitter configured with the built-in English abbreviation list
    fn default() -> Self {
        Self::new(crate::profile::RuleProfile::builtin_english().abbreviations)
    }
}
