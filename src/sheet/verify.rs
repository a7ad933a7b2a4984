//! Line verification
//!
//! A line matches when its normalized entered tokens equal its normalized
//! required tokens position by position. There is no partial credit and no
//! reordering tolerance; a mismatch simply means "not yet".

use super::line::LineState;
use super::normalize::normalize_entered_against;

/// Whether the learner's tokens on `line` are equivalent to the required ones.
pub fn check_match(line: &LineState) -> bool {
    let required = line.normalized_required();
    let entered = normalize_entered_against(&line.entered_tokens, required);

    entered.len() == required.len()
        && entered
            .iter()
            .zip(required)
            .all(|(e, r)| e.category == r.category && e.text == r.text)
}
