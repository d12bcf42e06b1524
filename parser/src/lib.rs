// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

//! Tokenizer and parser for the expression language.
//!
//! [`tokenize`] turns source text into tokens, [`parse`] turns tokens into
//! the arena syntax tree with every identifier resolved against a
//! [`Context`](mathjit_dsl::context::Context).

use logos::Logos;
use mathjit_dsl::core::SourceSpan;
use mathjit_dsl::diagnostic::{Diagnostic, Label};
use mathjit_problems::Problem;

pub mod num;
mod parser;
pub mod token;

pub use parser::parse;
use token::{Token, TokenType};

/// Tokenize an expression.
///
/// Returns a list of tokens and a list of diagnostics. This does not
/// return a result because the trivia-preserving token list is still
/// useful for giving context about what was wrong at the error location.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();
    let mut lexer = TokenType::lexer(source);

    let mut line = 1;
    let mut line_start = 0;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let col = span.start - line_start + 1;

        match result {
            Ok(token_type) => {
                tokens.push(Token {
                    token_type,
                    span: SourceSpan::range(span.start, span.end),
                    line,
                    col,
                    text: text.to_owned(),
                });
            }
            Err(_) => {
                diagnostics.push(Diagnostic::problem(
                    Problem::InvalidSyntax,
                    Label::position(
                        SourceSpan::range(span.start, span.end),
                        line,
                        col,
                        format!("unrecognized character {text:?}"),
                    ),
                ));
            }
        }

        // A token may span lines (block comments), so scan its text.
        for (index, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line += 1;
                line_start = span.start + index + 1;
            }
        }
    }

    (tokens, diagnostics)
}
