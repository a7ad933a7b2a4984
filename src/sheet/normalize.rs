//! Whitespace normalization applied before line comparison
//!
//! Learners may indent with four separate spaces where the catalog authored a
//! single tab, and may or may not type a space between two tokens that don't
//! need one. Both transforms here are pure and idempotent.

use super::token::{Token, TokenCategory};

/// Number of consecutive spaces that stand for one indentation tab.
pub const SPACES_PER_TAB: usize = 4;

/// Replace every group of four consecutive Space tokens with one Tab token.
///
/// Groups are taken left to right inside each run; a remainder shorter than
/// four stays as Space tokens.
pub fn collapse_spaces_to_tab(tokens: &[Token]) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut run = 0;

    for token in tokens {
        if token.is_space() {
            run += 1;
            continue;
        }
        flush_space_run(&mut result, run);
        run = 0;
        result.push(token.clone());
    }
    flush_space_run(&mut result, run);

    result
}

fn flush_space_run(out: &mut Vec<Token>, run: usize) {
    for _ in 0..run / SPACES_PER_TAB {
        out.push(Token::tab());
    }
    for _ in 0..run % SPACES_PER_TAB {
        out.push(Token::space());
    }
}

/// Drop cursor sentinels and every Space not demanded by the token before it.
///
/// A Space survives only when the previous *retained* token carries
/// `requires_trailing_space`.
pub fn remove_optional_space(tokens: &[Token]) -> Vec<Token> {
    let mut result: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token.category {
            TokenCategory::CursorSentinel => {}
            TokenCategory::Space => {
                let demanded = result
                    .last()
                    .is_some_and(|prev| prev.requires_trailing_space);
                if demanded {
                    result.push(token.clone());
                }
            }
            _ => result.push(token.clone()),
        }
    }

    result
}

/// Both transforms in verifier order.
pub fn normalize_entered(tokens: &[Token]) -> Vec<Token> {
    remove_optional_space(&collapse_spaces_to_tab(tokens))
}

/// Like [`remove_optional_space`], but a Space survives when the *required*
/// token at the previous retained position demands one.
///
/// Entered tokens come from the palette, which holds one copy per distinct
/// token, so their own flags can differ from the catalog's at a given spot.
pub fn remove_optional_space_aligned(tokens: &[Token], required: &[Token]) -> Vec<Token> {
    let mut result: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token.category {
            TokenCategory::CursorSentinel => {}
            TokenCategory::Space => {
                let demanded = result
                    .len()
                    .checked_sub(1)
                    .and_then(|prev| required.get(prev))
                    .is_some_and(|prev| prev.requires_trailing_space);
                if demanded {
                    result.push(token.clone());
                }
            }
            _ => result.push(token.clone()),
        }
    }

    result
}

/// Normalize entered tokens against an already normalized required line.
pub fn normalize_entered_against(tokens: &[Token], required: &[Token]) -> Vec<Token> {
    remove_optional_space_aligned(&collapse_spaces_to_tab(tokens), required)
}
