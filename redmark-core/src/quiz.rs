//! Quiz generation from annotated sentences
//!
//! Each sentence yields exactly one item, in input order. A cloze blank
//! is preferred, targeting the first role span tagged Object, then
//! Complement. Sentences without such a span fall back to
//! multiple-choice pattern identification; when the sentence is not
//! classifiable either, a Subject span is blanked as a last resort, and
//! sentences with no usable role spans become read-aloud items.

use crate::types::{QuizItem, Role, SentenceAnno};

/// Placeholder inserted for the blanked span of a cloze item
pub const BLANK: &str = "____";

/// Canonical sentence patterns used to pad the distractor pool
pub const FALLBACK_PATTERNS: [&str; 5] = ["S+V", "S+V+O", "S+V+C", "S+V+O+O", "S+V+O+C"];

/// Maximum number of options on a multiple-choice item, answer included
const MAX_OPTIONS: usize = 4;

/// Cloze target priority before pattern classification is attempted
const CLOZE_PRIORITY: [Role; 2] = [Role::Object, Role::Complement];

/// Cloze target tried only for sentences with no classifiable pattern
const CLOZE_LAST_RESORT: [Role; 1] = [Role::Subject];

/// Build one quiz item per sentence, in input order.
pub fn build_quizzes(sentences: &[SentenceAnno]) -> Vec<QuizItem> {
    // Distractors are drawn from the patterns observed across the whole
    // batch, in first-seen order for determinism.
    let mut observed: Vec<String> = Vec::new();
    for anno in sentences {
        if let Some(p) = anno.pattern() {
            if !observed.contains(&p) {
                observed.push(p);
            }
        }
    }

    sentences
        .iter()
        .map(|anno| build_item(anno, &observed))
        .collect()
}

fn build_item(anno: &SentenceAnno, observed: &[String]) -> QuizItem {
    if let Some(item) = cloze_item(anno, &CLOZE_PRIORITY) {
        return item;
    }
    if let Some(answer) = anno.pattern() {
        return choice_item(anno, answer, observed);
    }
    if let Some(item) = cloze_item(anno, &CLOZE_LAST_RESORT) {
        return item;
    }
    QuizItem::Read {
        prompt: anno.text.clone(),
    }
}

/// Blank the first role span matching the priority order.
fn cloze_item(anno: &SentenceAnno, priority: &[Role]) -> Option<QuizItem> {
    for &role in priority {
        if let Some(span) = anno.spans.iter().find(|s| s.roles.contains(&role)) {
            let (start, end) = (span.span.start, span.span.end);
            if end > anno.text.len() {
                continue;
            }
            let answer = anno.text[start..end].to_string();
            let prompt = format!("{}{}{}", &anno.text[..start], BLANK, &anno.text[end..]);
            return Some(QuizItem::Cloze { prompt, answer });
        }
    }
    None
}

fn choice_item(anno: &SentenceAnno, answer: String, observed: &[String]) -> QuizItem {
    let mut options = vec![answer.clone()];

    let distractors = observed
        .iter()
        .map(String::as_str)
        .chain(FALLBACK_PATTERNS.iter().copied())
        .filter(|p| *p != answer);
    for d in distractors {
        if options.len() >= MAX_OPTIONS {
            break;
        }
        if !options.iter().any(|o| o == d) {
            options.push(d.to_string());
        }
    }

    QuizItem::Choice {
        prompt: anno.text.clone(),
        options,
        answer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoleSpan, Span};

    fn anno(text: &str, spans: Vec<(usize, usize, Role)>) -> SentenceAnno {
        SentenceAnno {
            text: text.to_string(),
            start: 0,
            tags: Vec::new(),
            spans: spans
                .into_iter()
                .map(|(start, end, role)| RoleSpan {
                    span: Span::new(start, end),
                    roles: [role].into_iter().collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn one_item_per_sentence_in_order() {
        let sentences = vec![
            anno("She reads books.", vec![(10, 15, Role::Object)]),
            anno("No roles here.", vec![]),
        ];
        let quizzes = build_quizzes(&sentences);
        assert_eq!(quizzes.len(), 2);
        assert!(matches!(quizzes[0], QuizItem::Cloze { .. }));
        assert!(matches!(quizzes[1], QuizItem::Read { .. }));
    }

    #[test]
    fn cloze_blanks_exact_substring() {
        let sentences = vec![anno("She reads books.", vec![(10, 15, Role::Object)])];
        match &build_quizzes(&sentences)[0] {
            QuizItem::Cloze { prompt, answer } => {
                assert_eq!(answer, "books");
                assert_eq!(prompt, "She reads ____.");
            }
            other => panic!("expected cloze, got {other:?}"),
        }
    }

    #[test]
    fn cloze_prefers_object_then_complement() {
        let sentences = vec![anno(
            "He is happy today.",
            vec![(0, 2, Role::Subject), (6, 11, Role::Complement)],
        )];
        match &build_quizzes(&sentences)[0] {
            QuizItem::Cloze { answer, .. } => assert_eq!(answer, "happy"),
            other => panic!("expected cloze, got {other:?}"),
        }
    }

    #[test]
    fn subject_and_verb_only_yields_choice_with_sv_answer() {
        // No O or C span exists, so no cloze target; pattern is S+V.
        let sentences = vec![anno(
            "The cat sat.",
            vec![(4, 7, Role::Subject), (8, 11, Role::Verb)],
        )];
        match &build_quizzes(&sentences)[0] {
            QuizItem::Choice {
                options, answer, ..
            } => {
                assert_eq!(answer, "S+V");
                assert!(options.contains(answer));
                assert!(options.len() <= 4);
            }
            other => panic!("expected choice, got {other:?}"),
        }
    }

    #[test]
    fn subject_blank_is_a_last_resort_not_the_default() {
        // A Subject span does not preempt pattern classification.
        let sv = anno(
            "The cat sat.",
            vec![(4, 7, Role::Subject), (8, 11, Role::Verb)],
        );
        assert!(matches!(build_quizzes(&[sv])[0], QuizItem::Choice { .. }));

        // The last-resort chain still blanks a Subject span.
        let s_only = anno("The cat.", vec![(4, 7, Role::Subject)]);
        match cloze_item(&s_only, &CLOZE_LAST_RESORT) {
            Some(QuizItem::Cloze { answer, .. }) => assert_eq!(answer, "cat"),
            other => panic!("expected cloze, got {other:?}"),
        }
    }

    #[test]
    fn choice_distractors_unique_and_exclude_answer() {
        let sentences = vec![
            anno("a.", vec![(0, 1, Role::Verb)]),
            anno("b.", vec![(0, 1, Role::Verb)]),
        ];
        match &build_quizzes(&sentences)[0] {
            QuizItem::Choice {
                options, answer, ..
            } => {
                assert_eq!(answer, "V");
                assert_eq!(options.len(), 4);
                let mut deduped = options.clone();
                deduped.dedup();
                assert_eq!(&deduped, options);
                assert_eq!(options.iter().filter(|o| *o == answer).count(), 1);
            }
            other => panic!("expected choice, got {other:?}"),
        }
    }

    #[test]
    fn distractors_come_from_other_observed_patterns() {
        let sentences = vec![
            anno("x.", vec![(0, 1, Role::Subject), (1, 2, Role::Verb)]),
            anno("y.", vec![(0, 1, Role::Verb)]),
        ];
        match &build_quizzes(&sentences)[0] {
            QuizItem::Choice { options, .. } => {
                // "V" was observed in the batch, so it appears before
                // fallback-only patterns.
                assert_eq!(options[1], "V");
            }
            other => panic!("expected choice, got {other:?}"),
        }
    }

    #[test]
    fn empty_batch_yields_no_items() {
        assert!(build_quizzes(&[]).is_empty());
    }

    #[test]
    fn verb_only_span_never_becomes_cloze() {
        let sentences = vec![anno("Running fast.", vec![(0, 7, Role::Verb)])];
        assert!(matches!(
            build_quizzes(&sentences)[0],
            QuizItem::Choice { .. }
        ));
    }
}
