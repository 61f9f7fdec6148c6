//! Diagnostics.

use crate::{Range, Tok};
use core::fmt::{self, Display};

/// Kind of a diagnostic.
///
/// Parsing produces the kinds up to `EqualsMissing`,
/// binding and proof checking produce the remaining ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnexpectedToken,
    TypeMissing,
    NameMissing,
    LeftParenMissing,
    RightParenMissing,
    ParamTypeMissing,
    ParamNameMissing,
    LeftBraceMissing,
    RightBraceMissing,
    BodyKeywordMissing,
    EmptyTargetBodyStmt,
    EmptyAssumeBodyStmt,
    EmptyDiffBodyStmt,
    DupDiff,
    SingleDiff,
    DiffNotArg,
    TargetMissing,
    EqualsMissing,

    TypeDefMissing,
    NotType,
    DupName,
    DupArgName,
    DiffIsKeyword,
    TermDefMissing,
    TooManyArg,
    TooLessArg,
    ArgTypeError,
    AxiomThmDefMissing,
    ProofDiffError,
    ProofOpUseless,
    ThmWithoutValidProof,
}

impl ErrorKind {
    /// Return true if the diagnostic stems from the parser.
    pub fn is_syntactic(&self) -> bool {
        (*self as u8) <= (Self::EqualsMissing as u8)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::UnexpectedToken => "unexpected token",
            Self::TypeMissing => "type missing",
            Self::NameMissing => "name missing",
            Self::LeftParenMissing => "'(' missing",
            Self::RightParenMissing => "')' missing",
            Self::ParamTypeMissing => "parameter type missing",
            Self::ParamNameMissing => "parameter name missing",
            Self::LeftBraceMissing => "'{' missing",
            Self::RightBraceMissing => "'}' missing",
            Self::BodyKeywordMissing => "expected '|-', '-|' or 'diff'",
            Self::EmptyTargetBodyStmt => "empty target statement",
            Self::EmptyAssumeBodyStmt => "empty assumption statement",
            Self::EmptyDiffBodyStmt => "empty diff statement",
            Self::DupDiff => "diff group contains the same name twice",
            Self::SingleDiff => "diff group needs at least two names",
            Self::DiffNotArg => "diff accepts only parameter names",
            Self::TargetMissing => "target missing",
            Self::EqualsMissing => "'=' missing",
            Self::TypeDefMissing => "undefined type",
            Self::NotType => "not a type",
            Self::DupName => "name already defined",
            Self::DupArgName => "parameter name already used",
            Self::DiffIsKeyword => "'diff' is a keyword",
            Self::TermDefMissing => "undefined term",
            Self::TooManyArg => "too many arguments",
            Self::TooLessArg => "too few arguments",
            Self::ArgTypeError => "argument of wrong type",
            Self::AxiomThmDefMissing => "undefined axiom or theorem",
            Self::ProofDiffError => "diff condition of the applied rule violated",
            Self::ProofOpUseless => "proof step proves no current target",
            Self::ThmWithoutValidProof => "theorem not proved",
        };
        s.fmt(f)
    }
}

/// Diagnostic anchored at a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    /// index of the anchor token
    pub tok: usize,
    pub range: Range,
}

impl Error {
    pub fn new(kind: ErrorKind, tok: &Tok) -> Self {
        Self {
            kind,
            tok: tok.idx,
            range: tok.range,
        }
    }

    /// Order diagnostics by the start, then by the end of their range.
    pub fn cmp_pos(&self, other: &Self) -> core::cmp::Ordering {
        let (s, o) = (&self.range, &other.range);
        s.start
            .cmp_lc(&o.start)
            .then_with(|| s.end.cmp_lc(&o.end))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.range.start, self.kind)
    }
}
