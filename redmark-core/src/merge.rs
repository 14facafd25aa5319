//! Checker-match merging: reconcile external grammar-checker results into
//! an ordered, non-overlapping index for rendering
//!
//! Checker results from independently-chunked requests arrive out of
//! order and may overlap at chunk boundaries or across providers. The
//! merger sorts by offset with shorter-first tie-breaking and keeps the
//! first match of every overlap group, so the earliest and most specific
//! error wins deterministically.

use serde::{Deserialize, Serialize};

/// A replacement suggestion attached to a checker match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Suggested replacement text
    pub value: String,
}

/// Rule information attached to a checker match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerRule {
    /// Checker-side rule identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Checker-side issue type
    #[serde(default, rename = "issueType", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
}

/// One error reported by an external grammar checker.
///
/// Offsets are 0-based byte offsets into the original, unchunked text;
/// the caller adds each chunk's origin offset back in before merging.
/// Fields are signed at this boundary so malformed records survive
/// deserialization and can be dropped per-item instead of failing the
/// whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerMatch {
    /// Start offset of the error span
    pub offset: i64,
    /// Length of the error span
    pub length: i64,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Replacement suggestions
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    /// Rule information, if the checker supplied any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<CheckerRule>,
}

impl CheckerMatch {
    /// Create a minimal match for a span
    pub fn new(offset: i64, length: i64, message: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            message: message.into(),
            replacements: Vec::new(),
            rule: None,
        }
    }

    /// Parse a JSON array of checker matches
    pub fn from_json(json: &str) -> crate::Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A merged, validated match with its assigned rendering index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedMatch {
    /// Sequential 0-based rendering index, reassigned by the merger
    pub index: usize,
    /// Start offset of the error span
    pub offset: usize,
    /// Length of the error span
    pub length: usize,
    /// Human-readable message
    pub message: String,
    /// Replacement suggestions, in checker order
    pub replacements: Vec<String>,
    /// Checker-side rule identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    /// Checker-side issue type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
}

impl MergedMatch {
    /// Exclusive end offset of the span
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

impl From<MergedMatch> for CheckerMatch {
    fn from(m: MergedMatch) -> Self {
        CheckerMatch {
            offset: m.offset as i64,
            length: m.length as i64,
            message: m.message,
            replacements: m.replacements.into_iter().map(|value| Replacement { value }).collect(),
            rule: match (m.rule_id, m.issue_type) {
                (None, None) => None,
                (id, issue_type) => Some(CheckerRule { id, issue_type }),
            },
        }
    }
}

/// Merge checker matches into an ordered, non-overlapping, reindexed list.
///
/// Equivalent to [`merge_matches_in`] without a text length bound.
pub fn merge_matches(matches: Vec<CheckerMatch>) -> Vec<MergedMatch> {
    merge_matches_in(matches, None)
}

/// Merge checker matches, validating spans against `text_len` when given.
///
/// Malformed items (negative offset, non-positive length, span past the
/// end of the text) are dropped per-item; a single bad record never blanks
/// the whole rendering. The output is sorted ascending by offset, pairwise
/// non-overlapping, and carries fresh contiguous indices. Empty input
/// yields empty output, and the operation is idempotent.
pub fn merge_matches_in(matches: Vec<CheckerMatch>, text_len: Option<usize>) -> Vec<MergedMatch> {
    let mut valid: Vec<(usize, usize, CheckerMatch)> = matches
        .into_iter()
        .filter_map(|m| {
            if m.offset < 0 || m.length <= 0 {
                log::debug!(
                    "dropping malformed checker match at offset {} (length {})",
                    m.offset,
                    m.length
                );
                return None;
            }
            let offset = m.offset as usize;
            let length = m.length as usize;
            if let Some(len) = text_len {
                if offset + length > len {
                    log::debug!(
                        "dropping out-of-bounds checker match [{}, {}) for text of length {len}",
                        offset,
                        offset + length
                    );
                    return None;
                }
            }
            Some((offset, length, m))
        })
        .collect();

    // Stable sort: ascending offset, shorter span first on ties.
    valid.sort_by_key(|(offset, length, _)| (*offset, *length));

    let mut merged = Vec::with_capacity(valid.len());
    let mut last_end = 0usize;
    for (offset, length, m) in valid {
        if offset < last_end {
            continue;
        }
        last_end = offset + length;
        let (rule_id, issue_type) = m
            .rule
            .map(|r| (r.id, r.issue_type))
            .unwrap_or((None, None));
        merged.push(MergedMatch {
            index: merged.len(),
            offset,
            length,
            message: m.message,
            replacements: m.replacements.into_iter().map(|r| r.value).collect(),
            rule_id,
            issue_type,
        });
    }

    merged
}
