use crate::{ErrorKind, Range};
use core::fmt::{self, Display};
use core::str::FromStr;

/// Reserved words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    Type,
    Term,
    Axiom,
    Thm,
    /// `|-`
    Target,
    /// `-|`
    Assume,
    Diff,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Term => "term",
            Self::Axiom => "axiom",
            Self::Thm => "thm",
            Self::Target => "|-",
            Self::Assume => "-|",
            Self::Diff => "diff",
        }
    }

    /// Return true for keywords that start a block.
    pub fn starts_block(&self) -> bool {
        matches!(self, Self::Type | Self::Term | Self::Axiom | Self::Thm)
    }
}

impl FromStr for Keyword {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" => Ok(Self::Type),
            "term" => Ok(Self::Term),
            "axiom" => Ok(Self::Axiom),
            "thm" => Ok(Self::Thm),
            "|-" => Ok(Self::Target),
            "-|" => Ok(Self::Assume),
            "diff" => Ok(Self::Diff),
            _ => Err(()),
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

/// Token kind.
///
/// The scanner only produces the first five kinds.
/// Parser and binder refine words into the remaining kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Word,
    Comment,
    Separator,
    /// whitespace and newlines
    Ignore,

    TypeName,
    ArgName,
    TermName,
    ConstName,
    AxiomName,
    ThmName,
    /// name that refers to no declaration
    Unresolved,
}

impl TokenKind {
    /// Return true if the token is a word, refined or not.
    pub fn is_name(&self) -> bool {
        !matches!(
            self,
            Self::Keyword | Self::Comment | Self::Separator | Self::Ignore
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub range: Range,
    /// first diagnostic anchored at this token
    pub error: Option<ErrorKind>,
    /// text shown next to the token by editors
    pub comment: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, range: Range) -> Self {
        Self {
            kind,
            text,
            range,
            error: None,
            comment: None,
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => self.text.parse().ok(),
            _ => None,
        }
    }

    pub fn is_sep(&self, c: char) -> bool {
        self.kind == TokenKind::Separator && self.text.starts_with(c)
    }

    /// Unrefined word, i.e. a word that parsing has not claimed yet.
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text.fmt(f)
    }
}

/// Reference to a token in the token stream,
/// together with a copy of its text and range.
///
/// AST nodes and compiled nodes refer to tokens this way,
/// so that later passes can refine token kinds in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tok {
    /// index into the token stream
    pub idx: usize,
    pub text: String,
    pub range: Range,
}

impl Tok {
    pub fn new(idx: usize, token: &Token) -> Self {
        Self {
            idx,
            text: token.text.clone(),
            range: token.range,
        }
    }

    /// Token that does not stem from source text,
    /// such as the name of a metavariable.
    pub fn synthetic(idx: usize, text: String, range: Range) -> Self {
        Self { idx, text, range }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.text.fmt(f)
    }
}
