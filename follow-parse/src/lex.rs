//! Scanning of source text into tokens.

use crate::{Keyword, Position, Range, Token, TokenKind};
use logos::{Lexer, Logos};

#[derive(Logos, Clone, Copy, Debug, PartialEq)]
enum Raw {
    #[regex("[\n\u{2028}\u{2029}]")]
    Newline,

    #[regex("[\t\u{0B}\u{0C}\r \u{A0}\u{1680}\u{2000}-\u{200A}\u{202F}\u{205F}\u{3000}\u{FEFF}]+")]
    Space,

    #[regex("[(){},=]")]
    Sep,

    #[regex("//[^\n\u{2028}\u{2029}\r]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(
        "[^\n\u{2028}\u{2029}\t\u{0B}\u{0C}\r \u{A0}\u{1680}\u{2000}-\u{200A}\u{202F}\u{205F}\u{3000}\u{FEFF}(){},=]",
        word
    )]
    Word,

    // Logos requires one token variant to handle errors.
    #[error]
    Error,
}

/// Characters that end a word.
fn is_boundary(c: char) -> bool {
    crate::pos::is_newline(c) || is_space(c) || is_separator(c)
}

fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub fn is_separator(c: char) -> bool {
    matches!(c, '(' | ')' | '{' | '}' | ',' | '=')
}

fn starts_comment(s: &str) -> bool {
    s.starts_with("//") || s.starts_with("/*")
}

fn word(lex: &mut Lexer<Raw>) -> Option<()> {
    let rest = lex.remainder();
    let len = rest
        .char_indices()
        .find(|&(i, c)| is_boundary(c) || starts_comment(&rest[i..]))
        .map_or(rest.len(), |(i, _)| i);
    lex.bump(len);
    Some(())
}

/// Consume until the first `*/`, or until the end of input.
fn block_comment(lex: &mut Lexer<Raw>) -> Option<()> {
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |i| i + 2);
    lex.bump(len);
    Some(())
}

/// Scan a text into tokens.
///
/// Scanning never fails, and the concatenation of all token texts
/// yields the original text.
///
/// ~~~
/// # use follow_parse::{scan, TokenKind};
/// let tokens = scan("type Wff // formulas");
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// use TokenKind::*;
/// assert_eq!(kinds, vec![Keyword, Ignore, Word, Ignore, Comment]);
/// ~~~
pub fn scan(text: &str) -> Vec<Token> {
    let mut lexer = Raw::lexer(text);
    let mut pos = Position::default();
    let mut tokens = Vec::new();
    while let Some(raw) = lexer.next() {
        let slice = lexer.slice();
        let start = pos;
        slice.chars().for_each(|c| pos.advance(c));
        let kind = match raw {
            Raw::Newline | Raw::Space => TokenKind::Ignore,
            Raw::Sep => TokenKind::Separator,
            Raw::LineComment | Raw::BlockComment => TokenKind::Comment,
            Raw::Word | Raw::Error => match slice.parse::<Keyword>() {
                Ok(_) => TokenKind::Keyword,
                Err(_) => TokenKind::Word,
            },
        };
        tokens.push(Token::new(kind, slice.into(), Range::new(start, pos)));
    }
    tokens
}

#[test]
fn coverage() {
    let texts = [
        "",
        "type Wff\nterm Wff neg(Wff p) {¬p}",
        "a/b//c\r\n/* open",
        "x/*y*/z\u{2028}w\u{3000}v",
        "thm t(Wff p){|- p}={ax(p)}",
    ];
    for text in texts {
        let tokens = scan(text);
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, text);
        for w in tokens.windows(2) {
            assert_eq!(w[0].range.end, w[1].range.start);
        }
    }
}

#[test]
fn words() {
    let texts = |s| -> Vec<String> {
        scan(s)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Ignore)
            .map(|t| t.text)
            .collect()
    };
    assert_eq!(texts("a/b//c"), vec!["a/b", "//c"]);
    assert_eq!(texts("x/*y*/z"), vec!["x", "/*y*/", "z"]);
    assert_eq!(texts("neg(p),q"), vec!["neg", "(", "p", ")", ",", "q"]);
    assert_eq!(texts("|- -| diff"), vec!["|-", "-|", "diff"]);

    let tokens = scan("|- p\n/* open");
    assert_eq!(tokens[0].kind, TokenKind::Keyword);
    assert_eq!(tokens[2].kind, TokenKind::Word);
    assert_eq!(tokens[4].kind, TokenKind::Comment);
    assert_eq!(tokens[4].range.start, Position::new(1, 0, 5));
}
