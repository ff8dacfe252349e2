use ferrite_shared::TokenKind;
use std::fmt;

/// The closed set of stylesheet token categories produced by the external
/// tokenizer. Kinds carry no data; the token text travels separately as
/// bytes, so a `Function` token's bytes are the name including the trailing
/// `(` and an `AtKeyword`'s bytes include the `@` marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenType {
    /// Terminal token: end of input or a tokenizer fault, distinguished by
    /// the stream's error value
    Error,
    /// An `@`-prefixed keyword opening an at-rule
    AtKeyword,
    Ident,
    /// A function-open token, e.g. `rgb(`
    Function,
    Url,
    BadUrl,
    Dimension,
    Percentage,
    Number,
    QuotedString,
    /// An unterminated or otherwise broken string; always a parse error
    BadString,
    Hash,
    /// A single delimiter character such as `>`, `+`, `~` or `!`
    Delim,
    LCurly,
    RCurly,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    /// `<!--`
    Cdo,
    /// `-->`
    Cdc,
    Whitespace,
    Comment,
}

impl TokenKind for TokenType {
    fn is_whitespace(self) -> bool {
        self == TokenType::Whitespace
    }

    fn is_comment(self) -> bool {
        self == TokenType::Comment
    }

    fn error() -> Self {
        TokenType::Error
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenType::Error => "error",
            TokenType::AtKeyword => "at-keyword",
            TokenType::Ident => "identifier",
            TokenType::Function => "function",
            TokenType::Url => "url",
            TokenType::BadUrl => "bad url",
            TokenType::Dimension => "dimension",
            TokenType::Percentage => "percentage",
            TokenType::Number => "number",
            TokenType::QuotedString => "string",
            TokenType::BadString => "bad string",
            TokenType::Hash => "hash",
            TokenType::Delim => "delimiter",
            TokenType::LCurly => "{",
            TokenType::RCurly => "}",
            TokenType::LParen => "(",
            TokenType::RParen => ")",
            TokenType::LBracket => "[",
            TokenType::RBracket => "]",
            TokenType::Comma => ",",
            TokenType::Colon => ":",
            TokenType::Semicolon => ";",
            TokenType::Cdo => "<!--",
            TokenType::Cdc => "-->",
            TokenType::Whitespace => "whitespace",
            TokenType::Comment => "comment",
        };
        write!(f, "{s}")
    }
}
