//! Property-based tests for whitespace normalization and line matching
//!
//! These check that normalization is stable under repetition and that the
//! whitespace a learner may vary (indentation spelled as spaces, optional
//! spaces between tokens) never changes the verdict.

use codesheet::sheet::normalize::{
    collapse_spaces_to_tab, normalize_entered, remove_optional_space, SPACES_PER_TAB,
};
use codesheet::sheet::verify::check_match;
use codesheet::sheet::{LineState, Token, TokenCategory};
use proptest::prelude::*;

fn word_token_strategy() -> impl Strategy<Value = Token> {
    (
        prop_oneof![
            Just(TokenCategory::Keyword),
            Just(TokenCategory::Identifier),
            Just(TokenCategory::NumberLiteral),
            Just(TokenCategory::Symbol),
        ],
        "[a-z0-9:=]{1,6}",
        any::<bool>(),
    )
        .prop_map(|(category, text, space)| {
            let token = Token::new(category, text);
            if space {
                token.with_trailing_space()
            } else {
                token
            }
        })
}

/// Any line content, including runs of spaces and tabs.
fn line_strategy() -> impl Strategy<Value = Vec<Token>> {
    prop::collection::vec(
        prop_oneof![
            4 => word_token_strategy(),
            3 => Just(Token::space()),
            1 => Just(Token::tab()),
        ],
        0..24,
    )
}

/// Line content without Space tokens; tabs are the only whitespace.
fn tabbed_line_strategy() -> impl Strategy<Value = Vec<Token>> {
    prop::collection::vec(
        prop_oneof![
            3 => word_token_strategy(),
            1 => Just(Token::tab()),
        ],
        0..16,
    )
}

fn entered_line(required: Vec<Token>, entered: &[Token]) -> LineState {
    let mut line = LineState::new(required, None);
    for token in entered {
        line.insert(token.clone());
    }
    line
}

proptest! {
    #[test]
    fn collapse_is_idempotent(tokens in line_strategy()) {
        let once = collapse_spaces_to_tab(&tokens);
        prop_assert_eq!(collapse_spaces_to_tab(&once), once);
    }

    #[test]
    fn remove_optional_space_is_idempotent(tokens in line_strategy()) {
        let once = remove_optional_space(&tokens);
        prop_assert_eq!(remove_optional_space(&once), once);
    }

    #[test]
    fn collapse_never_leaves_a_full_group(tokens in line_strategy()) {
        let collapsed = collapse_spaces_to_tab(&tokens);
        let mut run = 0;
        for token in &collapsed {
            run = if token.is_space() { run + 1 } else { 0 };
            prop_assert!(run < SPACES_PER_TAB);
        }
    }

    #[test]
    fn four_spaces_match_a_tab(required in tabbed_line_strategy()) {
        let spelled_out: Vec<Token> = required
            .iter()
            .flat_map(|t| {
                if t.category == TokenCategory::Tab {
                    vec![Token::space(); SPACES_PER_TAB]
                } else {
                    vec![t.clone()]
                }
            })
            .collect();

        prop_assert_eq!(normalize_entered(&spelled_out), normalize_entered(&required));
        prop_assert!(check_match(&entered_line(required.clone(), &spelled_out)));
    }

    #[test]
    fn optional_space_is_tolerated(
        a in word_token_strategy(),
        b in word_token_strategy(),
    ) {
        let a = Token::new(a.category, a.text);
        let required = vec![a.clone(), b.clone()];

        prop_assert!(check_match(&entered_line(required.clone(), &[a.clone(), b.clone()])));
        prop_assert!(check_match(&entered_line(required, &[a, Token::space(), b])));
    }

    #[test]
    fn demanded_space_is_required(
        a in word_token_strategy(),
        b in word_token_strategy(),
    ) {
        let a = a.with_trailing_space();
        let required = vec![a.clone(), Token::space(), b.clone()];

        prop_assert!(check_match(&entered_line(required.clone(), &[a.clone(), Token::space(), b.clone()])));
        prop_assert!(!check_match(&entered_line(required, &[a, b])));
    }
}
