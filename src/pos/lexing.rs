//! Lexer
//!
//! Tokenization for the pos format is strictly line-scoped: the structural
//! grammar (`#[data]`, `#[done]`, `box`, `def`, `eof`) only ever appears at
//! the start of a line, and numeric rows never span lines. The scanner and
//! the extractors therefore feed the lexer one line at a time and classify
//! the result, rather than tokenizing the whole file up front.
//!
//! Structure:
//! 1. Core tokenization using the logos lexer (`tokens`)
//! 2. Line classification over the token stream (`line_classification`)

pub mod line_classification;
pub mod tokens;

pub use line_classification::{classify_line, classify_line_tokens, dimension_labels, LineKind};
pub use tokens::{tokenize_line, Token};
