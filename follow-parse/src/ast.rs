//! Abstract syntax of blocks.

use crate::{Range, Tok};
use core::fmt::{self, Display};

/// Parameter `type name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub ty: Tok,
    pub name: Tok,
}

impl Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// Operator application `head(children...)`, or just `head`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpNode {
    pub head: Tok,
    pub children: Vec<OpNode>,
    pub range: Range,
}

impl OpNode {
    pub fn leaf(head: Tok) -> Self {
        let range = head.range;
        Self {
            head,
            children: Vec::new(),
            range,
        }
    }
}

impl Display for OpNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.head.fmt(f)?;
        if !self.children.is_empty() {
            write!(f, "(")?;
            fmt_list(&self.children, ", ", f)?;
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// `type A B ...`
#[derive(Clone, Debug)]
pub struct TypeNode {
    pub keyword: Tok,
    pub names: Vec<Tok>,
    pub range: Range,
}

/// `term T name(T1 x1, ...) { content }`
#[derive(Clone, Debug)]
pub struct TermNode {
    pub keyword: Tok,
    pub ty: Tok,
    pub name: Tok,
    pub params: Vec<Param>,
    /// tokens between the braces, or the name if there are no braces
    pub content: Vec<Tok>,
    pub range: Range,
}

/// Parameters and statements shared by axioms and theorems.
#[derive(Clone, Debug)]
pub struct RuleNode {
    pub keyword: Tok,
    pub name: Tok,
    pub params: Vec<Param>,
    pub targets: Vec<OpNode>,
    pub assumptions: Vec<OpNode>,
    /// groups of parameters that must be pairwise distinct
    pub diffs: Vec<Vec<Tok>>,
    pub range: Range,
}

/// `thm name(...) { ... } = { proof }`
#[derive(Clone, Debug)]
pub struct ThmNode {
    pub rule: RuleNode,
    pub proof: Vec<OpNode>,
}

/// Top-level block.
#[derive(Clone, Debug)]
pub enum Node {
    Type(TypeNode),
    Term(TermNode),
    Axiom(RuleNode),
    Thm(ThmNode),
}

impl Node {
    pub fn range(&self) -> Range {
        match self {
            Self::Type(ty) => ty.range,
            Self::Term(tm) => tm.range,
            Self::Axiom(ax) => ax.range,
            Self::Thm(thm) => thm.rule.range,
        }
    }
}

pub(crate) fn fmt_list<T: Display>(xs: &[T], sep: &str, f: &mut fmt::Formatter) -> fmt::Result {
    let mut iter = xs.iter();
    if let Some(x) = iter.next() {
        x.fmt(f)?;
    }
    iter.try_for_each(|x| write!(f, "{}{}", sep, x))
}

impl Display for RuleNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        fmt_list(&self.params, ", ", f)?;
        write!(f, ") {{")?;
        for diff in &self.diffs {
            write!(f, "\n  diff (")?;
            fmt_list(diff, ", ", f)?;
            write!(f, ")")?;
        }
        for a in &self.assumptions {
            write!(f, "\n  -| {}", a)?;
        }
        for t in &self.targets {
            write!(f, "\n  |- {}", t)?;
        }
        write!(f, "\n}}")
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Type(ty) => {
                write!(f, "type ")?;
                fmt_list(&ty.names, " ", f)
            }
            Self::Term(tm) => {
                write!(f, "term {} {}", tm.ty, tm.name)?;
                if !tm.params.is_empty() {
                    write!(f, "(")?;
                    fmt_list(&tm.params, ", ", f)?;
                    write!(f, ")")?;
                }
                write!(f, " {{")?;
                fmt_list(&tm.content, " ", f)?;
                write!(f, "}}")
            }
            Self::Axiom(ax) => write!(f, "axiom {}", ax),
            Self::Thm(thm) => {
                write!(f, "thm {} = {{", thm.rule)?;
                for step in &thm.proof {
                    write!(f, "\n  {}", step)?;
                }
                write!(f, "\n}}")
            }
        }
    }
}
