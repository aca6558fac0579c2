//! Token definitions for the pos format
//!
//! This module defines the tokens produced when lexing a single line of a
//! pos file. The tokens are defined using the logos derive macro. Structural
//! markers are fixed keywords; everything else on a line is either a number,
//! a bare word, or whitespace.

use logos::Logos;

/// All possible tokens on one line of a pos file
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    // Structural markers
    #[token("#[data]")]
    DataMarker,
    #[token("#[done]")]
    DoneMarker,
    #[token("box")]
    BoxKeyword,
    #[token("def")]
    DefKeyword,
    #[token("eof")]
    EofKeyword,

    // Numeric literal: optional sign, digits, optional fraction and exponent
    #[regex(r"[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string(), priority = 3)]
    Number(String),

    // Any other non-whitespace run (observable names, shape names, quoted junk)
    #[regex(r"[^ \t\r\n]+", |lex| lex.slice().to_string(), priority = 1)]
    Word(String),

    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,
}

impl Token {
    /// Check if this token is whitespace or a line break
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace | Token::Newline)
    }

    /// Check if this token is a structural marker
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            Token::DataMarker
                | Token::DoneMarker
                | Token::BoxKeyword
                | Token::DefKeyword
                | Token::EofKeyword
        )
    }

    /// The source text of this token.
    ///
    /// Whitespace and newlines have no meaningful text and return `None`.
    /// Marker keywords return their fixed spelling so that a marker word in
    /// the middle of a line (e.g. a label literally named `eof`) still
    /// contributes to label extraction.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::DataMarker => Some("#[data]"),
            Token::DoneMarker => Some("#[done]"),
            Token::BoxKeyword => Some("box"),
            Token::DefKeyword => Some("def"),
            Token::EofKeyword => Some("eof"),
            Token::Number(s) | Token::Word(s) => Some(s),
            Token::Whitespace | Token::Newline => None,
        }
    }
}

/// Tokenize one line of a pos file.
///
/// The line may or may not carry its trailing newline; both forms produce
/// the same content tokens. Lexer errors (bytes matching no pattern, e.g. a
/// lone carriage return) are skipped rather than propagated - the structural
/// scan must classify every line, garbage included.
pub fn tokenize_line(line: &str) -> Vec<Token> {
    let mut lexer = Token::lexer(line);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push(token);
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_marker() {
        let tokens = tokenize_line("#[data] x y z\n");
        assert_eq!(tokens[0], Token::DataMarker);
        assert_eq!(tokens[1], Token::Whitespace);
        assert_eq!(tokens[2], Token::Word("x".to_string()));
    }

    #[test]
    fn test_done_marker() {
        let tokens = tokenize_line("#[done]\n");
        assert_eq!(
            tokens,
            vec![Token::DoneMarker, Token::Newline]
        );
    }

    #[test]
    fn test_box_keyword_is_delimited() {
        // "box" as a keyword...
        let tokens = tokenize_line("box 10 10 10");
        assert_eq!(tokens[0], Token::BoxKeyword);

        // ...but a longer word containing it is just a word
        let tokens = tokenize_line("boxed 10");
        assert_eq!(tokens[0], Token::Word("boxed".to_string()));
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize_line("1 -2.5 .75 1e5 6.02e-23");
        let numbers: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Number(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec!["1", "-2.5", ".75", "1e5", "6.02e-23"]);
    }

    #[test]
    fn test_non_numeric_is_word() {
        // A longer match beats the Number pattern
        let tokens = tokenize_line("1.5abc");
        assert_eq!(tokens, vec![Token::Word("1.5abc".to_string())]);

        // "nan" never lexes as a number
        let tokens = tokenize_line("nan");
        assert_eq!(tokens, vec![Token::Word("nan".to_string())]);
    }

    #[test]
    fn test_marker_text() {
        assert_eq!(Token::DataMarker.text(), Some("#[data]"));
        assert_eq!(Token::EofKeyword.text(), Some("eof"));
        assert_eq!(Token::Number("1.5".to_string()).text(), Some("1.5"));
        assert_eq!(Token::Whitespace.text(), None);
    }

    #[test]
    fn test_crlf_line() {
        let tokens = tokenize_line("eof\r\n");
        assert_eq!(tokens, vec![Token::EofKeyword, Token::Newline]);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(tokenize_line(""), vec![]);
        assert_eq!(tokenize_line("\n"), vec![Token::Newline]);
    }
}
