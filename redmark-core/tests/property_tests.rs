//! Property-based tests for the algebraic invariants of the pipeline

use proptest::prelude::*;
use redmark_core::{
    collapse_whitespace, compose, merge_matches, CheckerMatch, Role, RoleSpan, SentenceSplitter,
    Span, VocabItem, VocabSpan,
};

fn arb_matches() -> impl Strategy<Value = Vec<CheckerMatch>> {
    prop::collection::vec(
        (0i64..200, 1i64..20).prop_map(|(offset, length)| CheckerMatch::new(offset, length, "m")),
        0..40,
    )
}

proptest! {
    #[test]
    fn merge_is_idempotent(matches in arb_matches()) {
        let once = merge_matches(matches);
        let twice = merge_matches(once.iter().cloned().map(CheckerMatch::from).collect());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_output_sorted_and_non_overlapping(matches in arb_matches()) {
        let merged = merge_matches(matches);
        for (i, m) in merged.iter().enumerate() {
            prop_assert_eq!(m.index, i);
        }
        for pair in merged.windows(2) {
            prop_assert!(pair[0].offset + pair[0].length <= pair[1].offset);
        }
    }

    #[test]
    fn merge_never_invents_matches(matches in arb_matches()) {
        let input_len = matches.len();
        prop_assert!(merge_matches(matches).len() <= input_len);
    }

    #[test]
    fn composition_covers_text_exactly(
        text in "[a-z ]{1,60}",
        raw_roles in prop::collection::vec((0usize..60, 1usize..20), 0..6),
        raw_vocab in prop::collection::vec((0usize..60, 1usize..20), 0..4),
    ) {
        let len = text.len();
        let clamp = |(start, width): (usize, usize)| {
            let start = start.min(len.saturating_sub(1));
            let end = (start + width).min(len);
            (start, end)
        };
        let role_spans: Vec<RoleSpan> = raw_roles
            .into_iter()
            .map(clamp)
            .filter(|(s, e)| s < e)
            .map(|(s, e)| RoleSpan {
                span: Span::new(s, e),
                roles: [Role::Subject].into_iter().collect(),
            })
            .collect();
        let vocab_spans: Vec<VocabSpan> = raw_vocab
            .into_iter()
            .map(clamp)
            .filter(|(s, e)| s < e)
            .map(|(s, e)| VocabSpan {
                span: Span::new(s, e),
                item: VocabItem::new("w"),
            })
            .collect();

        let pieces = compose(&text, &role_spans, &vocab_spans);
        let joined: String = pieces.iter().map(|p| p.text.as_str()).collect();
        prop_assert_eq!(joined, text);

        for pair in pieces.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn sentences_reconstruct_collapsed_text(
        words in prop::collection::vec("[A-Za-z]{1,8}[.!? ]?", 0..30),
    ) {
        let text = words.concat();
        let splitter = SentenceSplitter::bare();
        let collapsed = collapse_whitespace(&text);
        let sentences = splitter.split(&text);

        let joined = sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        prop_assert_eq!(collapse_whitespace(&joined), collapsed.clone());

        for sentence in &sentences {
            prop_assert_eq!(&collapsed[sentence.start..sentence.end], sentence.text.as_str());
        }
    }
}
