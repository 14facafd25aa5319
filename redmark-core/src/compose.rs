//! Multi-source span compositor: partitions a sentence into disjoint
//! pieces carrying the union of covering metadata
//!
//! An interval-boundary sweep: every span start and end becomes a cut
//! point, and each slice between consecutive cut points is emitted with
//! the roles of every role span covering it plus the first covering
//! vocabulary item. Role tags may stack; vocabulary coverage is exclusive
//! because words are not expected to nest.

use crate::types::{Piece, RoleSet, RoleSpan, Span, VocabItem};
use std::collections::BTreeSet;

/// A vocabulary occurrence located in a sentence
#[derive(Debug, Clone, PartialEq)]
pub struct VocabSpan {
    /// Occurrence span, sentence-relative
    pub span: Span,
    /// The matched vocabulary item
    pub item: VocabItem,
}

/// Find all occurrences of the vocabulary words in `text`.
///
/// Matching is whole-word (boundary-respecting) and case-insensitive, and
/// every occurrence is found, not just the first. When one vocabulary word
/// contains another ("workbook" vs "work"), the longer word claims its
/// occurrences first so a shorter entry never splits a longer highlight.
pub fn find_vocab_spans(text: &str, vocab: &[VocabItem]) -> Vec<VocabSpan> {
    let mut order: Vec<usize> = (0..vocab.len()).collect();
    // Stable sort keeps the supplied order among same-length words.
    order.sort_by_key(|&i| std::cmp::Reverse(vocab[i].word.len()));

    let mut claimed: Vec<Span> = Vec::new();
    let mut found: Vec<VocabSpan> = Vec::new();

    for i in order {
        let item = &vocab[i];
        if item.word.is_empty() {
            continue;
        }
        let pattern = format!(r"(?i)\b{}\b", regex::escape(&item.word));
        let re = match regex::Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                log::warn!("skipping vocabulary word `{}`: {e}", item.word);
                continue;
            }
        };
        for m in re.find_iter(text) {
            let span = Span::new(m.start(), m.end());
            if claimed.iter().any(|c| c.overlaps(&span)) {
                continue;
            }
            claimed.push(span);
            found.push(VocabSpan {
                span,
                item: item.clone(),
            });
        }
    }

    found.sort_by_key(|v| (v.span.start, v.span.end));
    found
}

/// Partition `text` into disjoint pieces from the two span sources.
///
/// Concatenating the piece texts in order reconstructs `text` exactly.
/// Empty text yields zero pieces; with no spans at all, a single piece
/// covers the whole text with no tags.
pub fn compose(text: &str, role_spans: &[RoleSpan], vocab_spans: &[VocabSpan]) -> Vec<Piece> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut cuts: BTreeSet<usize> = BTreeSet::new();
    cuts.insert(0);
    cuts.insert(text.len());
    for span in role_spans.iter().map(|r| r.span).chain(vocab_spans.iter().map(|v| v.span)) {
        for p in [span.start, span.end] {
            // Out-of-range or mid-character cut points would make the
            // slices below panic; such spans cannot come from this crate's
            // own scans, so just ignore the stray boundary.
            if p <= text.len() && text.is_char_boundary(p) {
                cuts.insert(p);
            }
        }
    }

    let cuts: Vec<usize> = cuts.into_iter().collect();
    let mut pieces = Vec::with_capacity(cuts.len().saturating_sub(1));

    for window in cuts.windows(2) {
        let (a, b) = (window[0], window[1]);

        let mut roles = RoleSet::new();
        for rs in role_spans.iter().filter(|rs| rs.span.covers(a, b)) {
            for role in &rs.roles {
                if !roles.contains(role) {
                    roles.push(*role);
                }
            }
        }

        let vocab = vocab_spans
            .iter()
            .find(|vs| vs.span.covers(a, b))
            .map(|vs| vs.item.clone());

        pieces.push(Piece {
            start: a,
            end: b,
            text: text[a..b].to_string(),
            roles,
            vocab,
        });
    }

    pieces
}

/// Keep only pieces that carry at least one role tag.
///
/// This implements the `grammar_only` highlight filter at the rendering
/// boundary; it deliberately breaks the full-coverage property.
pub fn grammar_only_pieces(pieces: Vec<Piece>) -> Vec<Piece> {
    pieces.into_iter().filter(|p| !p.roles.is_empty()).collect()
}
