//! Provides definitions of tokens for the expression language.
use core::fmt;

use logos::Logos;
use mathjit_dsl::core::SourceSpan;

/// A classified region of the source text.
#[derive(Debug)]
pub struct Token {
    /// The type of the token (what does this token represent).
    pub token_type: TokenType,
    /// The location in the source text where the token begins.
    pub span: SourceSpan,

    /// The line in the source text where the token begins (1-indexed).
    pub line: usize,

    /// The column in the source text where the token begins (1-indexed).
    pub col: usize,

    /// The text that this token matched.
    pub text: String,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "{}",
            self.text.replace('\n', "\\n").replace('\r', "\\r"),
        ))
    }
}

#[derive(Clone, Logos, Debug, PartialEq)]
pub enum TokenType {
    #[regex(r"\r\n")]
    #[regex(r"\n")]
    Newline,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    // A bare opener only matches when the closing sequence never appears;
    // a terminated comment is the longer match and wins.
    #[token("/*")]
    UnterminatedComment,

    // Grouping and other markers
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,

    // Keywords. Higher priority than identifiers.
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Lower priority than any keyword.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", priority = 1)]
    Identifier,

    // Maximal-munch scan of a numeric literal. Conversion to a value is
    // the number module's job, not the lexer's.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,
}

impl TokenType {
    pub fn describe(&self) -> &'static str {
        match self {
            TokenType::Newline => "'\\n' (new line)",
            TokenType::Whitespace => "' ' (space) | '\\t' (tab)",
            TokenType::LineComment => "'// ...' (comment)",
            TokenType::BlockComment => "'/* ... */' (comment)",
            TokenType::UnterminatedComment => "'/*' (unterminated comment)",
            TokenType::LeftParen => "'('",
            TokenType::RightParen => "')'",
            TokenType::Comma => "','",
            TokenType::Semicolon => "';'",
            TokenType::Plus => "'+'",
            TokenType::Minus => "'-'",
            TokenType::Star => "'*'",
            TokenType::Slash => "'/'",
            TokenType::Percent => "'%'",
            TokenType::Caret => "'^'",
            TokenType::Bang => "'!'",
            TokenType::Equal => "'='",
            TokenType::EqualEqual => "'=='",
            TokenType::BangEqual => "'!='",
            TokenType::Less => "'<'",
            TokenType::LessEqual => "'<='",
            TokenType::Greater => "'>'",
            TokenType::GreaterEqual => "'>='",
            TokenType::AndAnd => "'&&'",
            TokenType::OrOr => "'||'",
            TokenType::True => "'true'",
            TokenType::False => "'false'",
            TokenType::Identifier => "identifier",
            TokenType::Number => "number",
        }
    }

    /// Returns true for tokens the parser consumes; trivia is false.
    pub fn is_significant(&self) -> bool {
        !matches!(
            self,
            TokenType::Newline
                | TokenType::Whitespace
                | TokenType::LineComment
                | TokenType::BlockComment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    fn kinds(source: &str) -> Vec<TokenType> {
        TokenType::lexer(source)
            .map(|result| result.expect(source))
            .collect()
    }

    #[test]
    fn lexer_when_expression_then_expected_kinds() {
        assert_eq!(
            kinds("x+1.5"),
            vec![
                TokenType::Identifier,
                TokenType::Plus,
                TokenType::Number,
            ]
        );
    }

    #[test]
    fn lexer_when_two_char_punctuators_then_greedy_match() {
        assert_eq!(
            kinds("<= >= == != && ||"),
            vec![
                TokenType::LessEqual,
                TokenType::Whitespace,
                TokenType::GreaterEqual,
                TokenType::Whitespace,
                TokenType::EqualEqual,
                TokenType::Whitespace,
                TokenType::BangEqual,
                TokenType::Whitespace,
                TokenType::AndAnd,
                TokenType::Whitespace,
                TokenType::OrOr,
            ]
        );
    }

    #[test]
    fn lexer_when_keyword_prefix_of_identifier_then_identifier() {
        assert_eq!(kinds("truex"), vec![TokenType::Identifier]);
        assert_eq!(kinds("true"), vec![TokenType::True]);
    }

    #[test]
    fn lexer_when_leading_dot_number_then_number() {
        assert_eq!(kinds(".5e2"), vec![TokenType::Number]);
    }

    #[test]
    fn lexer_when_terminated_block_comment_then_comment_token() {
        assert_eq!(
            kinds("/* a * b **/1"),
            vec![TokenType::BlockComment, TokenType::Number]
        );
    }

    #[test]
    fn lexer_when_unterminated_block_comment_then_marker_token() {
        let tokens = kinds("/* a");
        assert_eq!(tokens[0], TokenType::UnterminatedComment);
    }
}
