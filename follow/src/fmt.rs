//! Printing of compiled declarations in surface syntax.
//!
//! The regular form prints terms by their keys, which can be parsed again.
//! The alternate form (`{:#}`) prints terms by their rendered text and
//! omits proofs, which is suitable for display.

use crate::decl::{Decl, ProofStep, Rule, TermDecl};
use crate::TermOp;
use core::fmt::{self, Display, Formatter};
use follow_parse::Param;
use std::sync::Arc;

fn list<T: Display>(xs: &[T], f: &mut Formatter) -> fmt::Result {
    let mut iter = xs.iter();
    if let Some(x) = iter.next() {
        x.fmt(f)?;
    }
    iter.try_for_each(|x| write!(f, ", {}", x))
}

fn params(ps: &[Param], f: &mut Formatter) -> fmt::Result {
    write!(f, "(")?;
    list(ps, f)?;
    write!(f, ")")
}

impl Display for TermDecl {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "term {} {}", self.ty, self.name)?;
        if !self.params.is_empty() {
            params(&self.params, f)?;
        }
        let names: Vec<&str> = self.params.iter().map(|p| p.name.as_str()).collect();
        write!(f, " {{{}}}", self.render(&names))
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        params(&self.params, f)?;
        writeln!(f, " {{")?;
        let alt = f.alternate();
        let show = |tm: &Arc<TermOp>| if alt { tm.text.clone() } else { tm.key.clone() };
        for t in &self.targets {
            writeln!(f, "  |- {}", show(t))?;
        }
        for a in &self.assumptions {
            writeln!(f, "  -| {}", show(a))?;
        }
        if !self.diff_groups.is_empty() {
            write!(f, "  diff")?;
            for group in &self.diff_groups {
                write!(f, " (")?;
                list(group, f)?;
                write!(f, ")")?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

impl Display for ProofStep {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.head.fmt(f)?;
        if !self.children.is_empty() {
            write!(f, "(")?;
            list(&self.children, f)?;
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl Display for Decl {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Type(ty) => write!(f, "type {}", ty.name),
            Self::Term(tm) => tm.fmt(f),
            Self::Axiom(rule) if f.alternate() => write!(f, "axiom {:#}", rule),
            Self::Axiom(rule) => write!(f, "axiom {}", rule),
            Self::Thm(thm) if f.alternate() => write!(f, "thm {:#}", thm.rule),
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

#[cfg(test)]
mod tests {
    use crate::Compiler;

    const TEXT: &str = "type Wff
term Wff top
term Wff imp(Wff p, Wff q) {(p→q)}
axiom mp(Wff p, Wff q) {
  |- q
  -| p
  -| imp(p, q)
}
axiom ax1(Wff p, Wff q) {
  |- imp(p, imp(q, p))
  diff (p, q)
}
thm t(Wff a) {
  |- imp(a, imp(top, a))
} = {
  ax1(a, top)
}";

    #[test]
    fn print() {
        let info = Compiler::default().compile(TEXT);
        assert!(info.diagnostics.is_empty());
        let decls: Vec<_> = info.decls().iter().map(|d| d.to_string()).collect();
        assert_eq!(decls[1], "term Wff top {top}");
        assert_eq!(decls[2], "term Wff imp(Wff p, Wff q) {(p→q)}");
        assert_eq!(decls[4], "axiom ax1(Wff p, Wff q) {\n  |- imp(p,imp(q,p))\n  diff (p, q)\n}");
        assert!(decls[5].ends_with("} = {\n  ax1(a, top)\n}"));

        let alt = format!("{:#}", info.decls()[4]);
        assert_eq!(alt, "axiom ax1(Wff p, Wff q) {\n  |- (p→(q→p))\n  diff (p, q)\n}");
    }

    #[test]
    fn reparse() {
        let info = Compiler::default().compile(TEXT);
        let printed: Vec<_> = info.decls().iter().map(|d| d.to_string()).collect();
        let again = Compiler::default().compile(&printed.join("\n"));
        assert!(again.diagnostics.is_empty());
        let reprinted: Vec<_> = again.decls().iter().map(|d| d.to_string()).collect();
        assert_eq!(printed, reprinted);
    }
}
