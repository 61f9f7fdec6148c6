//! Elaborated terms.

use crate::decl::TermDecl;
use core::fmt::{self, Display};
use follow_parse::{Param, Range, Tok};
use std::collections::BTreeSet;
use std::sync::Arc;

/// What the head of a term refers to.
#[derive(Clone, Debug)]
pub enum Def {
    /// a declared term
    Term(Arc<TermDecl>),
    /// a block parameter, or the rule parameter a metavariable stands for
    Param(Param),
}

/// Elaborated term.
///
/// Terms are compared only by their canonical key:
/// the key of a leaf is its name, and
/// the key of an application is `name(key1,key2,...)`.
/// The rendered text is for display only.
#[derive(Clone, Debug)]
pub struct TermOp {
    pub head: Tok,
    pub children: Vec<Arc<TermOp>>,
    pub range: Range,
    pub def: Def,
    /// name of the type of the term
    pub ty: String,
    pub text: String,
    pub key: String,
    /// true if the term is a metavariable, which never has children
    pub virt: bool,
}

impl TermOp {
    /// Occurrence of a block parameter.
    pub fn param(head: Tok, range: Range, param: &Param) -> Self {
        let name = param.name.text.clone();
        Self {
            head,
            children: Vec::new(),
            range,
            def: Def::Param(param.clone()),
            ty: param.ty.text.clone(),
            text: name.clone(),
            key: name,
            virt: false,
        }
    }

    /// Metavariable standing for a term of the given parameter's type.
    pub fn virt(head: Tok, range: Range, param: &Param) -> Self {
        let name = head.text.clone();
        Self {
            head,
            children: Vec::new(),
            range,
            def: Def::Param(param.clone()),
            ty: param.ty.text.clone(),
            text: name.clone(),
            key: name,
            virt: true,
        }
    }

    /// Application of a declared term to arguments.
    pub fn app(head: Tok, range: Range, decl: Arc<TermDecl>, children: Vec<Arc<Self>>) -> Self {
        let texts: Vec<&str> = children.iter().map(|c| c.text.as_str()).collect();
        let text = decl.render(&texts);
        let key = make_key(&decl.name.text, &children);
        Self {
            head,
            children,
            range,
            ty: decl.ty.text.clone(),
            def: Def::Term(decl),
            text,
            key,
            virt: false,
        }
    }

    /// Copy of the term with new children.
    fn with_children(&self, children: Vec<Arc<Self>>) -> Self {
        match &self.def {
            Def::Term(decl) => Self::app(self.head.clone(), self.range, decl.clone(), children),
            Def::Param(_) => Self {
                children,
                ..self.clone()
            },
        }
    }

    /// Return true if the term contains a metavariable.
    pub fn has_virtual(&self) -> bool {
        self.virt || self.children.iter().any(|c| c.has_virtual())
    }

    /// Keys of all metavariables in the term.
    pub fn virtuals(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        self.collect_virtuals(&mut set);
        set
    }

    fn collect_virtuals(&self, set: &mut BTreeSet<String>) {
        if self.virt {
            set.insert(self.key.clone());
        }
        self.children.iter().for_each(|c| c.collect_virtuals(set))
    }

    /// Call a function on every metavariable occurrence in the term.
    pub fn visit_virtuals<'a>(self: &'a Arc<Self>, f: &mut impl FnMut(&'a Arc<Self>)) {
        if self.virt {
            f(self)
        }
        for c in &self.children {
            c.visit_virtuals(&mut *f)
        }
    }

    /// Keys of all leaves in the term, including constants.
    pub fn leaves(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        self.collect_leaves(&mut set);
        set
    }

    fn collect_leaves(&self, set: &mut BTreeSet<String>) {
        if self.children.is_empty() {
            set.insert(self.key.clone());
        }
        self.children.iter().for_each(|c| c.collect_leaves(set))
    }

    /// Replace every subterm whose key is mapped by `subst`.
    ///
    /// Subterms that do not change are shared with the original term.
    pub fn apply_subst<S>(self: &Arc<Self>, subst: &S) -> Arc<Self>
    where
        S: Fn(&str) -> Option<Arc<Self>>,
    {
        if let Some(tm) = subst(&self.key) {
            return tm;
        }
        if self.children.is_empty() {
            return self.clone();
        }
        let children: Vec<_> = self.children.iter().map(|c| c.apply_subst(subst)).collect();
        if self
            .children
            .iter()
            .zip(children.iter())
            .all(|(c, c2)| Arc::ptr_eq(c, c2))
        {
            return self.clone();
        }
        Arc::new(self.with_children(children))
    }
}

fn make_key(name: &str, children: &[Arc<TermOp>]) -> String {
    if children.is_empty() {
        return name.to_string();
    }
    let keys: Vec<&str> = children.iter().map(|c| c.key.as_str()).collect();
    format!("{}({})", name, keys.join(","))
}

impl PartialEq for TermOp {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TermOp {}

impl Display for TermOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            self.text.fmt(f)
        } else {
            self.key.fmt(f)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::decl::Frag;

    pub fn tok(s: &str) -> Tok {
        Tok::synthetic(0, s.to_string(), Range::default())
    }

    pub fn param(x: &str) -> Param {
        Param {
            ty: tok("Wff"),
            name: tok(x),
        }
    }

    /// Term of type `Wff` rendered as its name followed by its arguments.
    pub fn decl(name: &str, arity: usize) -> Arc<TermDecl> {
        let params = (0..arity).map(|i| param(&format!("x{}", i))).collect();
        let mut template = vec![Frag::Text(name.to_string())];
        template.extend((0..arity).map(Frag::Arg));
        Arc::new(TermDecl {
            ty: tok("Wff"),
            name: tok(name),
            params,
            template,
            range: Range::default(),
        })
    }

    pub fn var(x: &str) -> Arc<TermOp> {
        Arc::new(TermOp::param(tok(x), Range::default(), &param(x)))
    }

    pub fn virt(x: &str) -> Arc<TermOp> {
        Arc::new(TermOp::virt(tok(x), Range::default(), &param(x)))
    }

    pub fn app(d: &Arc<TermDecl>, children: Vec<Arc<TermOp>>) -> Arc<TermOp> {
        let head = tok(&d.name.text);
        Arc::new(TermOp::app(head, Range::default(), d.clone(), children))
    }

    #[test]
    fn keys() {
        let imp = decl("imp", 2);
        let neg = decl("neg", 1);
        let a = app(&imp, vec![var("p"), app(&neg, vec![var("q")])]);
        let b = app(&imp, vec![app(&neg, vec![var("p")]), var("q")]);
        assert_eq!(a.key, "imp(p,neg(q))");
        assert_eq!(a.text, "imppnegq");
        assert_ne!(a.key, b.key);
        assert_eq!(a.leaves().len(), 2);
        assert!(!a.has_virtual());
    }

    #[test]
    fn subst_shares() {
        let imp = decl("imp", 2);
        let neg = decl("neg", 1);
        let unchanged = app(&neg, vec![var("q")]);
        let tm = app(&imp, vec![var("p"), unchanged.clone()]);
        let sub = |k: &str| (k == "p").then(|| virt("?Wff0"));
        let tm2 = tm.apply_subst(&sub);
        assert_eq!(tm2.key, "imp(?Wff0,neg(q))");
        assert!(Arc::ptr_eq(&tm2.children[1], &unchanged));
        assert!(tm2.has_virtual());

        let none = |_: &str| -> Option<Arc<TermOp>> { None };
        assert!(Arc::ptr_eq(&tm.apply_subst(&none), &tm));
    }
}
