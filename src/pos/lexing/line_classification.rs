//! Line Classification
//!
//! Core classification logic for determining line types based on token
//! patterns. A pos line is classified by its first content token: structural
//! markers open or close frame regions, anything else is row content the
//! structural scan does not interpret.

use crate::pos::lexing::tokens::Token;

/// The classification of one line of a pos file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `#[data] <dim-name>...` - opens a data frame
    DataOpen,
    /// `#[done]` - closes a data frame
    Done,
    /// `box <dim-name>...` - opens a box frame
    BoxOpen,
    /// `def <name>...` - shape declaration inside a box frame
    Def,
    /// `eof` - closes a box frame
    Eof,
    /// Anything else: a numeric row, a shape row, a blank line
    Content,
}

/// Determine the kind of a line based on its tokens.
///
/// Only the first content (non-whitespace) token matters: the pos grammar
/// puts structural tags at line start and nowhere else. A tag keyword in the
/// middle of a line (e.g. a dimension label literally named `eof`) does not
/// change the line's kind.
pub fn classify_line_tokens(tokens: &[Token]) -> LineKind {
    match first_content_token(tokens) {
        Some(Token::DataMarker) => LineKind::DataOpen,
        Some(Token::DoneMarker) => LineKind::Done,
        Some(Token::BoxKeyword) => LineKind::BoxOpen,
        Some(Token::DefKeyword) => LineKind::Def,
        Some(Token::EofKeyword) => LineKind::Eof,
        _ => LineKind::Content,
    }
}

/// Tokenize and classify a line in one step.
pub fn classify_line(line: &str) -> LineKind {
    classify_line_tokens(&super::tokenize_line(line))
}

/// Extract the dimension labels of an opening tag line.
///
/// Labels are the whitespace-delimited tokens after the tag, in order. The
/// tag itself is skipped; numbers and stray keywords both count as labels
/// (`box 10 10 10` has labels `["10", "10", "10"]`, matching how simulation
/// tools abuse the header line).
pub fn dimension_labels(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !t.is_whitespace())
        .skip(1)
        .filter_map(|t| t.text().map(str::to_string))
        .collect()
}

fn first_content_token(tokens: &[Token]) -> Option<&Token> {
    tokens.iter().find(|t| !t.is_whitespace())
}
