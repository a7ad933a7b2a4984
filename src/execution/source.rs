//! Assembling the program text sent to the gateway

use crate::sheet::{LineState, LineStatus, Token, Worksheet};

/// Which token body each line contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    /// The catalog's required tokens (canonical spacing).
    #[default]
    Required,
    /// What the learner actually placed on the line.
    Entered,
}

/// Program text for every line up to and including `through`.
///
/// Each line is the concatenation of its token texts followed by `\n`. Lines
/// with no tokens in the chosen body are skipped. Lines that were never
/// reached are never sent.
pub fn assemble_source(sheet: &Worksheet, through: usize, mode: SourceMode) -> String {
    let mut source = String::new();

    for line in sheet.lines().iter().take(through + 1) {
        let tokens = body(line, mode);
        if tokens.is_empty() {
            continue;
        }
        for token in tokens {
            source.push_str(&token.text);
        }
        source.push('\n');
    }

    source
}

fn body(line: &LineState, mode: SourceMode) -> &[Token] {
    match (mode, line.status) {
        (_, LineStatus::Hidden) => &[],
        (SourceMode::Required, _) => line.required_tokens.as_slice(),
        (SourceMode::Entered, _) => line.entered_tokens.as_slice(),
    }
}
