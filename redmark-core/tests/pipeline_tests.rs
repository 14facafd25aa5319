//! End-to-end pipeline tests: annotate, compose, merge, and quiz over
//! realistic inputs

use redmark_core::{
    build_quizzes, compose, find_vocab_spans, merge_matches, Annotator, Category, CheckerMatch,
    QuizItem, Role, Rule, RuleSet, Stage, VocabItem,
};

fn toy_annotator() -> Annotator {
    let rules = RuleSet::from_rules(vec![
        Rule::with_regex(
            "toy-subject",
            "Toy subject",
            Stage::Jh,
            Category::Pattern,
            Some(Role::Subject),
            r"\bcat\b",
        )
        .unwrap(),
        Rule::with_regex(
            "toy-verb",
            "Toy verb",
            Stage::Jh,
            Category::Pattern,
            Some(Role::Verb),
            r"\bsat\b",
        )
        .unwrap(),
    ]);
    Annotator::builder().rules(rules).build()
}

#[test]
fn annotate_then_quiz_falls_through_to_pattern_choice() {
    let annos = toy_annotator().annotate("The cat sat on the mat.");
    assert_eq!(annos.len(), 1);

    let anno = &annos[0];
    assert!(anno.has_role(Role::Subject));
    assert!(anno.has_role(Role::Verb));
    assert!(!anno.has_role(Role::Object));
    assert!(!anno.has_role(Role::Complement));

    // No Object or Complement span, so no cloze target; the generator
    // falls through to pattern classification.
    let quizzes = build_quizzes(&annos);
    match &quizzes[0] {
        QuizItem::Choice { answer, options, .. } => {
            assert_eq!(answer, "S+V");
            assert!(options.contains(answer));
        }
        other => panic!("expected choice item, got {other:?}"),
    }
}

#[test]
fn vocab_composition_over_annotated_sentence() {
    let annos = toy_annotator().annotate("The cat sat on the mat.");
    let anno = &annos[0];

    let vocab = [VocabItem::new("mat")];
    let vocab_spans = find_vocab_spans(&anno.text, &vocab);
    assert_eq!(vocab_spans.len(), 1);

    let pieces = compose(&anno.text, &anno.spans, &vocab_spans);

    // Full coverage: pieces concatenate back to the sentence.
    let joined: String = pieces.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(joined, anno.text);

    // "mat" carries the vocab item and no role tags ("mat" is not S/V/O/C
    // under the toy rules).
    let mat = pieces.iter().find(|p| p.text == "mat").expect("mat piece");
    assert_eq!(mat.vocab.as_ref().unwrap().word, "mat");
    assert!(mat.roles.is_empty());

    let cat = pieces.iter().find(|p| p.text == "cat").expect("cat piece");
    assert_eq!(cat.roles.as_slice(), &[Role::Subject]);
}

#[test]
fn merge_example_from_overlapping_chunks() {
    let merged = merge_matches(vec![
        CheckerMatch::new(5, 3, "specific"),
        CheckerMatch::new(5, 5, "broad"),
        CheckerMatch::new(20, 2, "tail"),
    ]);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].offset, 5);
    assert_eq!(merged[0].length, 3);
    assert_eq!(merged[0].index, 0);
    assert_eq!(merged[1].offset, 20);
    assert_eq!(merged[1].index, 1);
}

#[test]
fn builtin_profile_full_document() {
    let annotator = Annotator::default();
    let text = "Dr. Brown teaches us. He has taught the class since 2010. \
                The students are happy because he is kinder than most teachers.";
    let annos = annotator.annotate(text);
    assert_eq!(annos.len(), 3);

    // Every sentence of this document classifies to something.
    for anno in &annos {
        assert!(anno.pattern().is_some(), "unclassified: {}", anno.text);
    }

    // One quiz item per sentence, in order.
    let quizzes = build_quizzes(&annos);
    assert_eq!(quizzes.len(), 3);

    // The comparative construction is tagged somewhere in the document.
    assert!(annos
        .iter()
        .flat_map(|a| a.tags.iter())
        .any(|t| t.category == Category::Comparison));
}

#[test]
fn degenerate_inputs_yield_empty_collections() {
    let annotator = Annotator::default();
    assert!(annotator.annotate("").is_empty());
    assert!(build_quizzes(&[]).is_empty());
    assert!(merge_matches(Vec::new()).is_empty());
    assert!(find_vocab_spans("", &[VocabItem::new("word")]).is_empty());
    assert!(compose("", &[], &[]).is_empty());
}
