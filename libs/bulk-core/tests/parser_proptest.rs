//! Property-based tests for the bulk parsers.
//!
//! The parsers run on every keystroke against arbitrary half-typed text, so
//! these check that they are deterministic and only ever emit complete
//! records, whatever the input looks like.

use bulk_core::{parse_flashcards, parse_questions, render_questions, ParsedOption, ParsedQuestion};
use proptest::prelude::*;

/// Lines mixing every construct the grammars know about.
fn grammar_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("---".to_string()),
        Just("   ".to_string()),
        "[a-z ]{0,12}",
        "[a-z]{1,8} >> [a-z ]{0,8}",
        "[a-z]{0,8}::[a-z ]{0,8}",
        "[a-z ]{0,8} ↓ ?[a-z]{0,8}",
        "(Q:|q:|Question:|[0-9]{1,2}\\.) ?[a-z ?]{0,12}",
        "[a-eA-E][.:]? [a-z0-9 ]{0,8}( ?<| ?\\*)?",
    ]
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(grammar_line(), 0..24).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn parsing_is_idempotent(text in "\\PC*") {
        prop_assert_eq!(parse_flashcards(&text), parse_flashcards(&text));
        prop_assert_eq!(parse_questions(&text), parse_questions(&text));
    }

    #[test]
    fn structured_parsing_is_idempotent(text in document()) {
        prop_assert_eq!(parse_flashcards(&text), parse_flashcards(&text));
        prop_assert_eq!(parse_questions(&text), parse_questions(&text));
    }

    #[test]
    fn emitted_flashcards_are_complete(text in document()) {
        for card in parse_flashcards(&text) {
            prop_assert!(!card.front_text.trim().is_empty());
            prop_assert!(!card.back_text.trim().is_empty());
        }
    }

    #[test]
    fn emitted_questions_are_complete(text in document()) {
        for question in parse_questions(&text) {
            prop_assert!(!question.question_text.trim().is_empty());
            prop_assert!(!question.options.is_empty());
            prop_assert!(!question.correct_answer.is_empty());
            let matches = question
                .options
                .iter()
                .filter(|opt| opt.formatted() == question.correct_answer)
                .count();
            prop_assert_eq!(matches, 1);
        }
    }

    #[test]
    fn separators_are_symmetric(front in "[a-z][a-z ]{0,10}[a-z]", back in "[a-z][a-z ]{0,10}[a-z]") {
        let arrow = parse_flashcards(&format!("{} >> {}", front, back));
        let colons = parse_flashcards(&format!("{} :: {}", front, back));
        prop_assert_eq!(&arrow, &colons);
        prop_assert_eq!(arrow.len(), 1);
        prop_assert_eq!(&arrow[0].front_text, &front);
        prop_assert_eq!(&arrow[0].back_text, &back);
    }

    #[test]
    fn correct_answer_names_exactly_one_option(
        texts in prop::collection::vec("[a-z0-9]{1,6}", 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let correct = pick.index(texts.len());
        let options: Vec<ParsedOption> = texts
            .iter()
            .enumerate()
            .map(|(idx, text)| ParsedOption::new((b'a' + idx as u8) as char, text.clone()))
            .collect();
        let question = ParsedQuestion {
            question_text: "Pick one".to_string(),
            correct_answer: options[correct].formatted(),
            options,
        };

        let parsed = parse_questions(&render_questions(std::slice::from_ref(&question)));
        prop_assert_eq!(parsed.len(), 1);
        let matches = parsed[0]
            .options
            .iter()
            .filter(|opt| opt.formatted() == parsed[0].correct_answer)
            .count();
        prop_assert_eq!(matches, 1);
        prop_assert_eq!(&parsed[0], &question);
    }
}
